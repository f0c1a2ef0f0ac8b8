use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use business::domain::errors::AssetError;
use business::domain::product::image_validator::ValidatedImage;
use business::domain::product::services::ImageStore;
use business::domain::shared::value_objects::ProductCode;

/// Stores reference images as plain files under a single directory.
///
/// Handles returned by [`FsImageStore::save`] are bare file names relative to
/// the root, e.g. `482913_20240501093011123.jpg`.
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, handle: &str) -> Result<PathBuf, AssetError> {
        if handle.is_empty()
            || handle.contains('/')
            || handle.contains('\\')
            || handle.contains("..")
        {
            return Err(AssetError::InvalidHandle);
        }
        Ok(self.root.join(handle))
    }
}

/// Writes `bytes` to a freshly created file; on failure the partial file at `path` is removed.
async fn write_or_discard<W>(mut writer: W, path: &Path, bytes: &[u8]) -> Result<(), AssetError>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    }
    .await;
    drop(writer);

    if let Err(e) = written {
        if let Err(cleanup) = tokio::fs::remove_file(path).await {
            tracing::warn!(
                "failed to remove partial image {}: {}",
                path.display(),
                cleanup
            );
        }
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save(&self, image: &ValidatedImage, code: &ProductCode) -> Result<String, AssetError> {
        let handle = format!(
            "{}_{}.{}",
            code,
            Utc::now().format("%Y%m%d%H%M%S%3f"),
            image.format().extension()
        );
        let path = self.resolve(&handle)?;

        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        write_or_discard(file, &path, image.bytes()).await?;

        tracing::debug!("stored reference image {}", path.display());
        Ok(handle)
    }

    async fn load(&self, handle: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve(handle)?;
        Ok(tokio::fs::read(path).await?)
    }

    async fn delete(&self, handle: &str) -> Result<(), AssetError> {
        let path = self.resolve(handle)?;
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
