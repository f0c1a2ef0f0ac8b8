use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use assets::{FsImageStore, QrSymbolEncoder};
use logger::TracingLogger;
use persistence::product::repository::ProductRepositorySqlite;

use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_all::GetAllProductsUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::identify::IdentifyProductUseCaseImpl;
use business::application::product::register::RegisterProductUseCaseImpl;
use business::domain::product::similarity::SignatureMatcher;
use business::domain::shared::config::IdentificationConfig;

use crate::config::assets_config::AssetsConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub product_api: crate::api::product::routes::ProductApi,
    pub image_dir: PathBuf,
    pub symbol_dir: PathBuf,
}

impl DependencyContainer {
    pub fn new(
        pool: SqlitePool,
        assets: &AssetsConfig,
        config: IdentificationConfig,
    ) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let product_repository = Arc::new(ProductRepositorySqlite::new(pool));
        let image_store = Arc::new(FsImageStore::new(&assets.image_dir)?);
        let symbol_encoder = Arc::new(QrSymbolEncoder::new(&assets.symbol_dir)?);
        let matcher = Arc::new(SignatureMatcher::new(config.matcher.clone()));

        // Product use cases
        let register_use_case = Arc::new(RegisterProductUseCaseImpl {
            repository: product_repository.clone(),
            image_store: image_store.clone(),
            symbol_encoder: symbol_encoder.clone(),
            config: config.clone(),
            logger: logger.clone(),
        });
        let identify_use_case = Arc::new(IdentifyProductUseCaseImpl {
            repository: product_repository.clone(),
            image_store: image_store.clone(),
            matcher,
            config,
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetAllProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository,
            image_store,
            symbol_encoder,
            logger,
        });

        let product_api = crate::api::product::routes::ProductApi::new(
            register_use_case,
            identify_use_case,
            get_all_use_case,
            get_by_id_use_case,
            delete_use_case,
        );

        Ok(Self {
            health_api,
            product_api,
            image_dir: assets.image_dir.clone(),
            symbol_dir: assets.symbol_dir.clone(),
        })
    }
}
