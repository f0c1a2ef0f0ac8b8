use std::env;
use std::path::PathBuf;

use business::domain::shared::config::{DEFAULT_MAX_IMAGE_BYTES, IdentificationConfig};

pub const DEFAULT_IMAGE_DIR: &str = "static/product_images";
pub const DEFAULT_SYMBOL_DIR: &str = "static/qrcodes";

/// Where reference images and rendered symbols live on disk
#[derive(Debug, Clone)]
pub struct AssetsConfig {
    pub image_dir: PathBuf,
    pub symbol_dir: PathBuf,
}

impl AssetsConfig {
    /// Environment variables:
    /// - IMAGE_DIR: reference image directory (default: "static/product_images")
    /// - SYMBOL_DIR: QR symbol directory (default: "static/qrcodes")
    pub fn from_env() -> Self {
        Self {
            image_dir: env::var("IMAGE_DIR")
                .unwrap_or_else(|_| DEFAULT_IMAGE_DIR.to_string())
                .into(),
            symbol_dir: env::var("SYMBOL_DIR")
                .unwrap_or_else(|_| DEFAULT_SYMBOL_DIR.to_string())
                .into(),
        }
    }
}

/// Engine settings with `MAX_IMAGE_SIZE` (bytes) applied over the defaults.
pub fn identification_from_env() -> IdentificationConfig {
    IdentificationConfig {
        max_image_bytes: parse_max_image_size(env::var("MAX_IMAGE_SIZE").ok()),
        ..IdentificationConfig::default()
    }
}

fn parse_max_image_size(raw: Option<String>) -> usize {
    match raw.as_deref().map(str::trim).map(str::parse::<usize>) {
        Some(Ok(bytes)) if bytes > 0 => bytes,
        Some(_) => {
            tracing::warn!(
                "MAX_IMAGE_SIZE is not a positive byte count, using {}",
                DEFAULT_MAX_IMAGE_BYTES
            );
            DEFAULT_MAX_IMAGE_BYTES
        }
        None => DEFAULT_MAX_IMAGE_BYTES,
    }
}
