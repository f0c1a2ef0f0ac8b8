use super::{assets_config::AssetsConfig, cors_config, server_config::ServerConfig};
use business::domain::shared::config::IdentificationConfig;
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub assets: AssetsConfig,
    pub identification: IdentificationConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            assets: AssetsConfig::from_env(),
            identification: super::assets_config::identification_from_env(),
        }
    }
}
