use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::image_validator::ImageValidator;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::ImageStore;
use crate::domain::product::similarity::SimilarityMatcher;
use crate::domain::product::use_cases::identify::{
    Identification, IdentificationMethod, IdentifyProductParams, IdentifyProductUseCase,
    NotFoundHint,
};
use crate::domain::shared::config::IdentificationConfig;
use crate::domain::shared::value_objects::ProductCode;

pub struct IdentifyProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub image_store: Arc<dyn ImageStore>,
    pub matcher: Arc<dyn SimilarityMatcher>,
    pub config: IdentificationConfig,
    pub logger: Arc<dyn Logger>,
}

impl IdentifyProductUseCaseImpl {
    async fn identify_by_code(&self, code: ProductCode) -> Result<Identification, ProductError> {
        self.logger
            .info(&format!("Identifying product by code: {}", code));

        match self.repository.find_by_code(&code).await? {
            Some(product) => {
                self.logger
                    .info(&format!("Product identified by code: {}", product.name));
                Ok(Identification::Found {
                    product,
                    method: IdentificationMethod::Code,
                })
            }
            None => {
                self.logger
                    .info(&format!("Code {} is not registered", code));
                Ok(Identification::NotFound {
                    hint: NotFoundHint::CodeNotRegistered(code),
                    unevaluated: 0,
                })
            }
        }
    }

    async fn identify_by_image(&self, payload: &str) -> Result<Identification, ProductError> {
        self.logger.info("Identifying product by image");

        let captured = ImageValidator::new(self.config.max_image_bytes).validate(payload)?;
        let candidates = self.repository.get_with_reference_image().await?;
        let mut unevaluated = 0;

        // First match in enumeration order wins; there is no ranking.
        for product in candidates {
            let Some(handle) = product.image_path.as_deref() else {
                continue;
            };

            let reference = match self.image_store.load(handle).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.logger.warn(&format!(
                        "Skipping reference image {} of product {}: {}",
                        handle, product.id, e
                    ));
                    unevaluated += 1;
                    continue;
                }
            };

            let verdict = self.matcher.evaluate(captured.bytes(), &reference);
            self.logger
                .debug(&format!("Compared against {}: {:?}", handle, verdict));

            if verdict.is_match() {
                self.logger.info(&format!(
                    "Product identified by image: {} (code {})",
                    product.name, product.code
                ));
                return Ok(Identification::Found {
                    product,
                    method: IdentificationMethod::Visual,
                });
            }
        }

        if unevaluated > 0 {
            self.logger.warn(&format!(
                "{} reference images could not be evaluated",
                unevaluated
            ));
        }
        Ok(Identification::NotFound {
            hint: NotFoundHint::NothingDetected,
            unevaluated,
        })
    }
}

#[async_trait]
impl IdentifyProductUseCase for IdentifyProductUseCaseImpl {
    async fn execute(&self, params: IdentifyProductParams) -> Result<Identification, ProductError> {
        let code = params
            .code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        if let Some(code) = code {
            return self.identify_by_code(ProductCode::new(code)).await;
        }

        if let Some(payload) = params.image_base64 {
            return self.identify_by_image(&payload).await;
        }

        self.logger.info("Nothing to identify: no code and no image");
        Ok(Identification::NotFound {
            hint: NotFoundHint::NothingDetected,
            unevaluated: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{AssetError, RepositoryError};
    use crate::domain::product::image_validator::{ImageRejection, ValidatedImage};
    use crate::domain::product::model::Product;
    use crate::domain::product::similarity::SignatureMatcher;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
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

    fn product(name: &str, code: &str, image_path: Option<&str>) -> Product {
        let now = Utc::now();
        Product::from_repository(
            Uuid::new_v4(),
            ProductCode::new(code),
            name.to_string(),
            "Bin 7".to_string(),
            1,
            BigDecimal::from(10),
            "General".to_string(),
            image_path.map(str::to_string),
            now,
            now,
        )
    }

    fn jpeg(len: usize, fill: u8) -> Vec<u8> {
        let mut bytes = vec![fill; len];
        bytes[0] = 0xFF;
        bytes[1] = 0xD8;
        bytes
    }

    fn use_case(repo: MockProductRepo, images: MockImages) -> IdentifyProductUseCaseImpl {
        IdentifyProductUseCaseImpl {
            repository: Arc::new(repo),
            image_store: Arc::new(images),
            matcher: Arc::new(SignatureMatcher::default()),
            config: IdentificationConfig::default(),
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_find_product_when_code_registered() {
        let mut repo = MockProductRepo::new();
        repo.expect_find_by_code()
            .withf(|code| code.as_str() == "123456")
            .returning(|_| Ok(Some(product("Hammer", "123456", None))));

        let result = use_case(repo, MockImages::new())
            .execute(IdentifyProductParams {
                code: Some(" 123456 ".to_string()),
                image_base64: None,
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            Identification::Found { ref product, method: IdentificationMethod::Code }
                if product.name == "Hammer"
        ));
    }

    #[tokio::test]
    async fn should_report_unregistered_code_distinctly() {
        let mut repo = MockProductRepo::new();
        repo.expect_find_by_code().returning(|_| Ok(None));

        let result = use_case(repo, MockImages::new())
            .execute(IdentifyProductParams {
                code: Some("999999".to_string()),
                image_base64: None,
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            Identification::NotFound { hint: NotFoundHint::CodeNotRegistered(ref code), .. }
                if code.as_str() == "999999"
        ));
    }

    #[tokio::test]
    async fn should_prefer_code_over_image_when_both_given() {
        let mut repo = MockProductRepo::new();
        repo.expect_find_by_code()
            .returning(|_| Ok(Some(product("Saw", "222222", None))));

        let result = use_case(repo, MockImages::new())
            .execute(IdentifyProductParams {
                code: Some("222222".to_string()),
                image_base64: Some("not even base64".to_string()),
            })
            .await
            .unwrap();

        assert!(matches!(result, Identification::Found { .. }));
    }

    #[tokio::test]
    async fn should_report_nothing_detected_when_no_input() {
        let result = use_case(MockProductRepo::new(), MockImages::new())
            .execute(IdentifyProductParams {
                code: Some("   ".to_string()),
                image_base64: None,
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            Identification::NotFound {
                hint: NotFoundHint::NothingDetected,
                unevaluated: 0
            }
        ));
    }

    #[tokio::test]
    async fn should_match_first_candidate_in_enumeration_order() {
        let captured = jpeg(4096, 0x42);
        let reference = captured.clone();
        let mut repo = MockProductRepo::new();
        repo.expect_get_with_reference_image().returning(|| {
            Ok(vec![
                product("Anvil", "100000", Some("100000_a.jpg")),
                product("Bolt", "200000", Some("200000_b.jpg")),
            ])
        });
        let mut images = MockImages::new();
        images
            .expect_load()
            .returning(move |_| Ok(reference.clone()));

        let result = use_case(repo, images)
            .execute(IdentifyProductParams {
                code: None,
                image_base64: Some(STANDARD.encode(&captured)),
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            Identification::Found { ref product, method: IdentificationMethod::Visual }
                if product.name == "Anvil"
        ));
    }

    #[tokio::test]
    async fn should_not_find_when_no_reference_matches() {
        let mut repo = MockProductRepo::new();
        repo.expect_get_with_reference_image()
            .returning(|| Ok(vec![product("Clamp", "300000", Some("300000_c.jpg"))]));
        let mut images = MockImages::new();
        images
            .expect_load()
            .returning(|_| Ok(jpeg(120 * 1024, 0x10)));

        let result = use_case(repo, images)
            .execute(IdentifyProductParams {
                code: None,
                image_base64: Some(STANDARD.encode(jpeg(50 * 1024, 0x20))),
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            Identification::NotFound {
                hint: NotFoundHint::NothingDetected,
                unevaluated: 0
            }
        ));
    }

    #[tokio::test]
    async fn should_count_unreadable_references_as_unevaluated() {
        let captured = jpeg(2048, 0x42);
        let reference = captured.clone();
        let mut repo = MockProductRepo::new();
        repo.expect_get_with_reference_image().returning(|| {
            Ok(vec![
                product("Anvil", "100000", Some("missing.jpg")),
                product("Bolt", "200000", Some("200000_b.jpg")),
            ])
        });
        let mut images = MockImages::new();
        images
            .expect_load()
            .withf(|handle| handle == "missing.jpg")
            .returning(|_| Err(AssetError::NotFound));
        images
            .expect_load()
            .withf(|handle| handle == "200000_b.jpg")
            .returning(move |_| Ok(reference.clone()));

        let result = use_case(repo, images)
            .execute(IdentifyProductParams {
                code: None,
                image_base64: Some(STANDARD.encode(&captured)),
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            Identification::Found { ref product, .. } if product.name == "Bolt"
        ));
    }

    #[tokio::test]
    async fn should_report_unevaluated_count_on_miss() {
        let mut repo = MockProductRepo::new();
        repo.expect_get_with_reference_image()
            .returning(|| Ok(vec![product("Anvil", "100000", Some("gone.jpg"))]));
        let mut images = MockImages::new();
        images
            .expect_load()
            .returning(|_| Err(AssetError::NotFound));

        let result = use_case(repo, images)
            .execute(IdentifyProductParams {
                code: None,
                image_base64: Some(STANDARD.encode(jpeg(64, 0x01))),
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            Identification::NotFound { unevaluated: 1, .. }
        ));
    }

    #[tokio::test]
    async fn should_reject_invalid_capture_before_enumerating() {
        let result = use_case(MockProductRepo::new(), MockImages::new())
            .execute(IdentifyProductParams {
                code: None,
                image_base64: Some(STANDARD.encode(b"plain text")),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::InvalidImage(ImageRejection::InvalidFormat)
        ));
    }
}
