/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.duplicated")]
    Duplicated,
    #[error("repository.database_error")]
    DatabaseError,
}

/// Errors raised by blob adapters (reference images, rendered symbols).
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset.not_found")]
    NotFound,
    #[error("asset.invalid_handle")]
    InvalidHandle,
    #[error("asset.io_error: {0}")]
    Io(String),
    #[error("asset.encode_error: {0}")]
    Encode(String),
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound,
            _ => AssetError::Io(err.to_string()),
        }
    }
}
