use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct RegisterProductParams {
    pub name: String,
    pub location: String,
    pub quantity: i64,
    pub price: BigDecimal,
    pub category: Option<String>,
    /// Base64 image, optionally prefixed with a `data:image/...;base64,` header.
    pub image_base64: Option<String>,
}

/// A committed registration: the new product and the name of its symbol asset.
#[derive(Debug, Clone)]
pub struct RegisteredProduct {
    pub product: Product,
    pub symbol_ref: String,
}

#[async_trait]
pub trait RegisterProductUseCase: Send + Sync {
    async fn execute(&self, params: RegisterProductParams)
    -> Result<RegisteredProduct, ProductError>;
}
