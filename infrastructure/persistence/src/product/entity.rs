use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::product::model::Product;
use business::domain::shared::value_objects::ProductCode;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub location: String,
    pub quantity: i64,
    pub price: String,
    pub category: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            ProductCode::new(self.code),
            self.name,
            self.location,
            self.quantity,
            BigDecimal::from_str(&self.price).unwrap_or_default(),
            self.category,
            self.image_path,
            self.created_at,
            self.updated_at,
        )
    }
}
