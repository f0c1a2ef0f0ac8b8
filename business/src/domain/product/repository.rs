use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::ProductCode;

use super::model::Product;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ascending by name.
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
    async fn find_by_code(&self, code: &ProductCode) -> Result<Option<Product>, RepositoryError>;
    /// True if the code was ever issued, including to deleted products.
    async fn code_exists(&self, code: &ProductCode) -> Result<bool, RepositoryError>;
    /// Products holding a reference image, ascending by name.
    async fn get_with_reference_image(&self) -> Result<Vec<Product>, RepositoryError>;
    /// Inserts a new product; `Duplicated` when its code was already issued.
    async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
