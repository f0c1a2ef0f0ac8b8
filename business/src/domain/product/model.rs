use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;
use uuid::Uuid;

use super::errors::ProductError;
use crate::domain::shared::value_objects::ProductCode;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub code: ProductCode,
    pub name: String,
    pub location: String,
    pub quantity: i64,
    pub price: BigDecimal,
    pub category: String,
    /// Handle of the reference image in the image store.
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewProductProps {
    pub code: ProductCode,
    pub name: String,
    pub location: String,
    pub quantity: i64,
    pub price: BigDecimal,
    pub category: String,
    pub image_path: Option<String>,
}

/// Checks the operator-supplied fields of a product.
pub fn validate_fields(
    name: &str,
    location: &str,
    quantity: i64,
    price: &BigDecimal,
) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::NameEmpty);
    }
    if location.trim().is_empty() {
        return Err(ProductError::LocationEmpty);
    }
    if quantity < 0 {
        return Err(ProductError::NegativeQuantity);
    }
    if *price < BigDecimal::zero() {
        return Err(ProductError::NegativePrice);
    }
    Ok(())
}

impl Product {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        validate_fields(&props.name, &props.location, props.quantity, &props.price)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            code: props.code,
            name: props.name,
            location: props.location,
            quantity: props.quantity,
            price: props.price,
            category: props.category,
            image_path: props.image_path,
            created_at: now,
            updated_at: now,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        code: ProductCode,
        name: String,
        location: String,
        quantity: i64,
        price: BigDecimal,
        category: String,
        image_path: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            name,
            location,
            quantity,
            price,
            category,
            image_path,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn props() -> NewProductProps {
        NewProductProps {
            code: ProductCode::new("123456"),
            name: "Cordless drill".to_string(),
            location: "Aisle 4".to_string(),
            quantity: 3,
            price: BigDecimal::from_str("89.90").unwrap(),
            category: "Tools".to_string(),
            image_path: Some("123456_20260101120000000.jpg".to_string()),
        }
    }

    #[test]
    fn should_create_product_when_fields_valid() {
        let product = Product::new(props()).unwrap();
        assert_eq!(product.code.as_str(), "123456");
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn should_reject_blank_name() {
        let result = Product::new(NewProductProps {
            name: "   ".to_string(),
            ..props()
        });
        assert!(matches!(result, Err(ProductError::NameEmpty)));
    }

    #[test]
    fn should_reject_blank_location() {
        let result = Product::new(NewProductProps {
            location: String::new(),
            ..props()
        });
        assert!(matches!(result, Err(ProductError::LocationEmpty)));
    }

    #[test]
    fn should_reject_negative_quantity() {
        let result = Product::new(NewProductProps {
            quantity: -1,
            ..props()
        });
        assert!(matches!(result, Err(ProductError::NegativeQuantity)));
    }

    #[test]
    fn should_reject_negative_price() {
        let result = Product::new(NewProductProps {
            price: BigDecimal::from_str("-0.01").unwrap(),
            ..props()
        });
        assert!(matches!(result, Err(ProductError::NegativePrice)));
    }

    #[test]
    fn should_accept_zero_quantity_and_price() {
        let result = Product::new(NewProductProps {
            quantity: 0,
            price: BigDecimal::zero(),
            ..props()
        });
        assert!(result.is_ok());
    }
}
