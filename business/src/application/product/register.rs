use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::code_generator::CodeGenerator;
use crate::domain::product::errors::ProductError;
use crate::domain::product::image_validator::ImageValidator;
use crate::domain::product::model::{NewProductProps, Product, validate_fields};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::{ImageStore, SymbolEncoder};
use crate::domain::product::use_cases::register::{
    RegisterProductParams, RegisterProductUseCase, RegisteredProduct,
};
use crate::domain::shared::config::IdentificationConfig;
use crate::domain::shared::text::sanitize_text;
use crate::domain::shared::value_objects::ProductCode;

pub struct RegisterProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub image_store: Arc<dyn ImageStore>,
    pub symbol_encoder: Arc<dyn SymbolEncoder>,
    pub config: IdentificationConfig,
    pub logger: Arc<dyn Logger>,
}

impl RegisterProductUseCaseImpl {
    async fn discard_image(&self, handle: &str) {
        if let Err(e) = self.image_store.delete(handle).await {
            self.logger
                .warn(&format!("Failed to discard image {}: {}", handle, e));
        }
    }

    async fn discard_symbol(&self, code: &ProductCode) {
        if let Err(e) = self.symbol_encoder.remove(code).await {
            self.logger
                .warn(&format!("Failed to discard symbol for {}: {}", code, e));
        }
    }
}

#[async_trait]
impl RegisterProductUseCase for RegisterProductUseCaseImpl {
    async fn execute(
        &self,
        params: RegisterProductParams,
    ) -> Result<RegisteredProduct, ProductError> {
        let name = sanitize_text(&params.name);
        let location = sanitize_text(&params.location);
        let category = params
            .category
            .as_deref()
            .map(sanitize_text)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.config.default_category.clone());

        self.logger.info(&format!("Registering product: {}", name));

        validate_fields(&name, &location, params.quantity, &params.price)?;
        let payload = params.image_base64.ok_or(ProductError::ImageRequired)?;
        let image = ImageValidator::new(self.config.max_image_bytes).validate(&payload)?;

        let generator = CodeGenerator::from_config(&self.config);
        let repository = self.repository.as_ref();

        for attempt in 1..=self.config.max_register_attempts {
            let code = generator
                .generate(|candidate| async move { repository.code_exists(&candidate).await })
                .await?;

            let image_path = self.image_store.save(&image, &code).await?;

            let symbol_ref = match self.symbol_encoder.encode(&code).await {
                Ok(symbol_ref) => symbol_ref,
                Err(e) => {
                    self.logger
                        .error(&format!("Failed to encode symbol for {}: {}", code, e));
                    self.discard_image(&image_path).await;
                    return Err(e.into());
                }
            };

            let product = Product::new(NewProductProps {
                code: code.clone(),
                name: name.clone(),
                location: location.clone(),
                quantity: params.quantity,
                price: params.price.clone(),
                category: category.clone(),
                image_path: Some(image_path.clone()),
            })?;

            match self.repository.save(&product).await {
                Ok(()) => {
                    self.logger.info(&format!(
                        "Product registered with id: {} (code {})",
                        product.id, product.code
                    ));
                    return Ok(RegisteredProduct {
                        product,
                        symbol_ref,
                    });
                }
                // The symbol for a claimed code is owned by the winner, only the image is ours.
                Err(RepositoryError::Duplicated) => {
                    self.logger.warn(&format!(
                        "Code {} was claimed concurrently (attempt {}/{})",
                        code, attempt, self.config.max_register_attempts
                    ));
                    self.discard_image(&image_path).await;
                }
                Err(e) => {
                    self.discard_image(&image_path).await;
                    self.discard_symbol(&code).await;
                    return Err(e.into());
                }
            }
        }

        Err(ProductError::CodeConflict)
    }
}
