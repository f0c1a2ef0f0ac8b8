use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::{ImageStore, SymbolEncoder};
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};

pub struct DeleteProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub image_store: Arc<dyn ImageStore>,
    pub symbol_encoder: Arc<dyn SymbolEncoder>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteProductUseCase for DeleteProductUseCaseImpl {
    async fn execute(&self, params: DeleteProductParams) -> Result<(), ProductError> {
        self.logger
            .info(&format!("Deleting product: {}", params.id));

        // Verify product exists before deleting
        let product = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ProductError::NotFound,
                other => ProductError::Repository(other),
            })?;

        self.repository.delete(params.id).await?;

        // Asset removal is best-effort once the row is gone
        if let Some(handle) = product.image_path.as_deref()
            && let Err(e) = self.image_store.delete(handle).await
        {
            self.logger.warn(&format!(
                "Failed to delete image {} of product {}: {}",
                handle, product.id, e
            ));
        }
        if let Err(e) = self.symbol_encoder.remove(&product.code).await {
            self.logger.warn(&format!(
                "Failed to delete symbol of product {}: {}",
                product.id, e
            ));
        }

        self.logger.info(&format!("Product deleted: {}", params.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AssetError;
    use crate::domain::product::image_validator::ValidatedImage;
    use crate::domain::product::model::Product;
    use crate::domain::shared::value_objects::ProductCode;
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
            async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
            async fn find_by_code(&self, code: &ProductCode) -> Result<Option<Product>, RepositoryError>;
            async fn code_exists(&self, code: &ProductCode) -> Result<bool, RepositoryError>;
            async fn get_with_reference_image(&self) -> Result<Vec<Product>, RepositoryError>;
            async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
            async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Images {}

        #[async_trait]
        impl ImageStore for Images {
            async fn save(&self, image: &ValidatedImage, code: &ProductCode) -> Result<String, AssetError>;
            async fn load(&self, handle: &str) -> Result<Vec<u8>, AssetError>;
            async fn delete(&self, handle: &str) -> Result<(), AssetError>;
        }
    }

    mock! {
        pub Symbols {}

        #[async_trait]
        impl SymbolEncoder for Symbols {
            async fn encode(&self, code: &ProductCode) -> Result<String, AssetError>;
            async fn remove(&self, code: &ProductCode) -> Result<(), AssetError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn stored_product(id: Uuid, image_path: Option<&str>) -> Product {
        let now = Utc::now();
        Product::from_repository(
            id,
            ProductCode::new("654321"),
            "Spirit level".to_string(),
            "Rack 1".to_string(),
            2,
            BigDecimal::from(12),
            "General".to_string(),
            image_path.map(str::to_string),
            now,
            now,
        )
    }

    #[tokio::test]
    async fn should_delete_product_and_its_assets_when_exists() {
        let product_id = Uuid::new_v4();
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(stored_product(product_id, Some("654321_1.png"))));
        mock_repo.expect_delete().times(1).returning(|_| Ok(()));
        let mut images = MockImages::new();
        images
            .expect_delete()
            .withf(|handle| handle == "654321_1.png")
            .times(1)
            .returning(|_| Ok(()));
        let mut symbols = MockSymbols::new();
        symbols.expect_remove().times(1).returning(|_| Ok(()));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            image_store: Arc::new(images),
            symbol_encoder: Arc::new(symbols),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteProductParams { id: product_id })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_succeed_when_asset_deletion_fails() {
        let product_id = Uuid::new_v4();
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(stored_product(product_id, Some("654321_1.png"))));
        mock_repo.expect_delete().returning(|_| Ok(()));
        let mut images = MockImages::new();
        images
            .expect_delete()
            .returning(|_| Err(AssetError::Io("permission denied".to_string())));
        let mut symbols = MockSymbols::new();
        symbols
            .expect_remove()
            .returning(|_| Err(AssetError::Io("permission denied".to_string())));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            image_store: Arc::new(images),
            symbol_encoder: Arc::new(symbols),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteProductParams { id: product_id })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_skip_image_deletion_when_product_has_none() {
        let product_id = Uuid::new_v4();
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(stored_product(product_id, None)));
        mock_repo.expect_delete().returning(|_| Ok(()));
        let mut symbols = MockSymbols::new();
        symbols.expect_remove().returning(|_| Ok(()));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            image_store: Arc::new(MockImages::new()),
            symbol_encoder: Arc::new(symbols),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteProductParams { id: product_id })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_nonexistent_product() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            image_store: Arc::new(MockImages::new()),
            symbol_encoder: Arc::new(MockSymbols::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteProductParams { id: Uuid::new_v4() })
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ProductError::NotFound));
    }
}
