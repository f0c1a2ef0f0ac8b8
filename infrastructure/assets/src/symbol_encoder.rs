use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::Luma;
use qrcode::{EcLevel, QrCode};

use business::domain::errors::AssetError;
use business::domain::product::services::SymbolEncoder;
use business::domain::shared::value_objects::ProductCode;

const MODULE_PIXELS: u32 = 10;

/// Renders product codes as QR symbols (PNG) into a directory.
pub struct QrSymbolEncoder {
    root: PathBuf,
}

impl QrSymbolEncoder {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// PNG bytes of the symbol for `code`.
    pub fn render_png(code: &ProductCode) -> Result<Vec<u8>, AssetError> {
        let symbol = QrCode::with_error_correction_level(code.as_str(), EcLevel::L)
            .map_err(|e| AssetError::Encode(e.to_string()))?;
        let image = symbol
            .render::<Luma<u8>>()
            .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
            .quiet_zone(true)
            .build();

        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, image::ImageFormat::Png)
            .map_err(|e| AssetError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

#[async_trait]
impl SymbolEncoder for QrSymbolEncoder {
    async fn encode(&self, code: &ProductCode) -> Result<String, AssetError> {
        let png = Self::render_png(code)?;
        let name = code.symbol_asset_name();
        tokio::fs::write(self.root.join(&name), png).await?;
        tracing::debug!("rendered symbol {} for code {}", name, code);
        Ok(name)
    }

    async fn remove(&self, code: &ProductCode) -> Result<(), AssetError> {
        match tokio::fs::remove_file(self.root.join(code.symbol_asset_name())).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
