use async_trait::async_trait;

use super::image_validator::ValidatedImage;
use crate::domain::errors::AssetError;
use crate::domain::shared::value_objects::ProductCode;

/// Blob port for reference images.
///
/// Handles returned by `save` are stable file names of the form
/// `{code}_{timestamp}.{ext}`.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, image: &ValidatedImage, code: &ProductCode) -> Result<String, AssetError>;

    async fn load(&self, handle: &str) -> Result<Vec<u8>, AssetError>;

    /// Idempotent: a handle that no longer exists is not an error.
    async fn delete(&self, handle: &str) -> Result<(), AssetError>;
}

/// Renders a product code into a scannable symbol named after the code.
#[async_trait]
pub trait SymbolEncoder: Send + Sync {
    /// Writes (or overwrites) the symbol for `code` and returns its asset name.
    async fn encode(&self, code: &ProductCode) -> Result<String, AssetError>;

    /// Idempotent, like [`ImageStore::delete`].
    async fn remove(&self, code: &ProductCode) -> Result<(), AssetError>;
}
