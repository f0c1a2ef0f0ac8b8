use crate::domain::errors::{AssetError, RepositoryError};
use crate::domain::product::image_validator::ImageRejection;

/// Failure taxonomy shared with callers of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Decode,
    NotFound,
    Conflict,
    Io,
    ResourceExhausted,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.name_empty")]
    NameEmpty,
    #[error("product.location_empty")]
    LocationEmpty,
    #[error("product.negative_quantity")]
    NegativeQuantity,
    #[error("product.negative_price")]
    NegativePrice,
    #[error("product.image_required")]
    ImageRequired,
    #[error("product.invalid_image: {0}")]
    InvalidImage(#[from] ImageRejection),
    #[error("product.not_found")]
    NotFound,
    #[error("product.code_conflict")]
    CodeConflict,
    #[error("product.code_space_exhausted")]
    CodeSpaceExhausted,
    #[error("product.asset_failed: {0}")]
    Asset(#[from] AssetError),
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NameEmpty
            | ProductError::LocationEmpty
            | ProductError::NegativeQuantity
            | ProductError::NegativePrice
            | ProductError::ImageRequired => ErrorKind::Validation,
            ProductError::InvalidImage(ImageRejection::Decode(_)) => ErrorKind::Decode,
            ProductError::InvalidImage(_) => ErrorKind::Validation,
            ProductError::NotFound => ErrorKind::NotFound,
            ProductError::CodeConflict => ErrorKind::Conflict,
            ProductError::CodeSpaceExhausted => ErrorKind::ResourceExhausted,
            ProductError::Asset(_) => ErrorKind::Io,
            ProductError::Repository(RepositoryError::NotFound) => ErrorKind::NotFound,
            ProductError::Repository(RepositoryError::Duplicated) => ErrorKind::Conflict,
            ProductError::Repository(_) => ErrorKind::Internal,
        }
    }
}
