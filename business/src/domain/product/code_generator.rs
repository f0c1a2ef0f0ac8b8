use std::future::Future;

use rand::Rng;

use super::errors::ProductError;
use crate::domain::errors::RepositoryError;
use crate::domain::shared::config::IdentificationConfig;
use crate::domain::shared::value_objects::ProductCode;

/// Draws fixed-length numeric codes until one is not already issued.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
    max_attempts: u32,
}

impl CodeGenerator {
    pub fn new(length: usize, max_attempts: u32) -> Self {
        Self {
            length,
            max_attempts,
        }
    }

    pub fn from_config(config: &IdentificationConfig) -> Self {
        Self::new(config.code_length, config.max_code_attempts)
    }

    /// Draws one candidate code, each digit uniform over 0-9.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> ProductCode {
        let code: String = (0..self.length)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        ProductCode::new(code)
    }

    /// Synchronous variant over an in-memory lookup.
    pub fn generate_with<R, F>(&self, rng: &mut R, mut is_taken: F) -> Result<ProductCode, ProductError>
    where
        R: Rng + ?Sized,
        F: FnMut(&ProductCode) -> bool,
    {
        for _ in 0..self.max_attempts {
            let code = self.draw(rng);
            if !is_taken(&code) {
                return Ok(code);
            }
        }
        Err(ProductError::CodeSpaceExhausted)
    }

    /// Draws codes until `is_taken` reports one as free, up to the attempt cap.
    pub async fn generate<F, Fut>(&self, mut is_taken: F) -> Result<ProductCode, ProductError>
    where
        F: FnMut(ProductCode) -> Fut,
        Fut: Future<Output = Result<bool, RepositoryError>>,
    {
        for _ in 0..self.max_attempts {
            let code = self.draw(&mut rand::rng());
            if !is_taken(code.clone()).await? {
                return Ok(code);
            }
        }
        Err(ProductError::CodeSpaceExhausted)
    }
}
