use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use business::domain::product::model::Product;
use business::domain::product::use_cases::identify::{
    Identification, IdentificationMethod, NotFoundHint,
};
use business::domain::product::use_cases::register::RegisteredProduct;

pub const SYMBOL_URL_PREFIX: &str = "/static/qrcodes";
pub const IMAGE_URL_PREFIX: &str = "/static/product_images";

fn symbol_url(symbol_ref: &str) -> String {
    format!("{}/{}", SYMBOL_URL_PREFIX, symbol_ref)
}

fn image_url(image_path: &str) -> String {
    format!("{}/{}", IMAGE_URL_PREFIX, image_path)
}

/// Parses a JSON number into an exact decimal, `None` for NaN or infinity.
pub fn price_from_f64(price: f64) -> Option<BigDecimal> {
    if !price.is_finite() {
        return None;
    }
    BigDecimal::from_str(&price.to_string()).ok()
}

#[derive(Debug, Clone, Object)]
pub struct RegisterProductRequest {
    /// Product name (cannot be empty)
    pub name: String,
    /// Shelf or storage location (cannot be empty)
    pub location: String,
    /// Units in stock
    #[oai(default)]
    pub quantity: i64,
    /// Unit price
    #[oai(default)]
    pub price: f64,
    /// Category, "General" when omitted
    #[oai(skip_serializing_if_is_none)]
    pub category: Option<String>,
    /// Reference photo, raw base64 or a `data:image/...;base64,` URI
    #[oai(skip_serializing_if_is_none)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Object)]
pub struct RegisterProductResponseBody {
    pub id: String,
    /// Six-digit product code
    pub code: String,
    /// Where the printable QR symbol is served
    pub symbol_url: String,
    /// Where the reference image is served
    pub image_url: String,
}

impl From<RegisteredProduct> for RegisterProductResponseBody {
    fn from(registered: RegisteredProduct) -> Self {
        Self {
            id: registered.product.id.to_string(),
            code: registered.product.code.to_string(),
            symbol_url: symbol_url(&registered.symbol_ref),
            image_url: registered
                .product
                .image_path
                .as_deref()
                .map(image_url)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ProductResponse {
    pub id: String,
    pub code: String,
    pub name: String,
    pub location: String,
    pub quantity: i64,
    /// Decimal price rendered as a string to keep precision
    pub price: String,
    pub category: String,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    pub symbol_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            symbol_url: symbol_url(&product.code.symbol_asset_name()),
            code: product.code.to_string(),
            name: product.name,
            location: product.location,
            quantity: product.quantity,
            price: product.price.to_string(),
            category: product.category,
            image_url: product.image_path.as_deref().map(image_url),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

// --- DTOs for scanning ---

#[derive(Debug, Clone, Object)]
pub struct ScanProductRequest {
    /// Code decoded from a printed symbol
    #[oai(skip_serializing_if_is_none)]
    pub code: Option<String>,
    /// Captured photo for visual matching
    #[oai(skip_serializing_if_is_none)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Enum)]
pub enum ScanStatusDto {
    #[oai(rename = "found")]
    Found,
    #[oai(rename = "not_found")]
    NotFound,
}

#[derive(Debug, Clone, Object)]
pub struct ScanProductResponseBody {
    pub status: ScanStatusDto,
    /// "code" or "visual" when found
    #[oai(skip_serializing_if_is_none)]
    pub method: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub product: Option<ProductResponse>,
    /// Machine-readable explanation of the outcome
    pub hint: String,
    /// Code that was read but is not registered
    #[oai(skip_serializing_if_is_none)]
    pub detected_code: Option<String>,
    /// Reference images that could not be read during visual matching
    pub unevaluated: u64,
}

impl From<Identification> for ScanProductResponseBody {
    fn from(identification: Identification) -> Self {
        match identification {
            Identification::Found { product, method } => Self {
                status: ScanStatusDto::Found,
                method: Some(method.to_string()),
                product: Some(product.into()),
                hint: match method {
                    IdentificationMethod::Code => "identified_by_code",
                    IdentificationMethod::Visual => "identified_by_image",
                }
                .to_string(),
                detected_code: None,
                unevaluated: 0,
            },
            Identification::NotFound { hint, unevaluated } => {
                let (hint, detected_code) = match hint {
                    NotFoundHint::NothingDetected => ("nothing_detected", None),
                    NotFoundHint::CodeNotRegistered(code) => {
                        ("code_not_registered", Some(code.to_string()))
                    }
                };
                Self {
                    status: ScanStatusDto::NotFound,
                    method: None,
                    product: None,
                    hint: hint.to_string(),
                    detected_code,
                    unevaluated: unevaluated as u64,
                }
            }
        }
    }
}
