use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::shared::value_objects::ProductCode;

pub struct IdentifyProductParams {
    /// Code read from the printed symbol, if the scanner decoded one.
    pub code: Option<String>,
    /// Captured photo used for the visual fallback.
    pub image_base64: Option<String>,
}

/// How a product was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentificationMethod {
    Code,
    Visual,
}

impl std::fmt::Display for IdentificationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentificationMethod::Code => write!(f, "code"),
            IdentificationMethod::Visual => write!(f, "visual"),
        }
    }
}

/// Caller-facing reason for a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundHint {
    /// No code was supplied and no reference image matched.
    NothingDetected,
    /// A code was read but no product carries it.
    CodeNotRegistered(ProductCode),
}

#[derive(Debug, Clone)]
pub enum Identification {
    Found {
        product: Product,
        method: IdentificationMethod,
    },
    NotFound {
        hint: NotFoundHint,
        /// Reference images that could not be read and were skipped.
        unevaluated: usize,
    },
}

#[async_trait]
pub trait IdentifyProductUseCase: Send + Sync {
    async fn execute(&self, params: IdentifyProductParams) -> Result<Identification, ProductError>;
}
