use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use business::domain::product::use_cases::get_all::GetAllProductsUseCase;
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::identify::{
    IdentifyProductParams, IdentifyProductUseCase,
};
use business::domain::product::use_cases::register::{
    RegisterProductParams, RegisterProductUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{
    ProductResponse, RegisterProductRequest, RegisterProductResponseBody, ScanProductRequest,
    ScanProductResponseBody, price_from_f64,
};
use crate::api::tags::ApiTags;

pub struct ProductApi {
    register_use_case: Arc<dyn RegisterProductUseCase>,
    identify_use_case: Arc<dyn IdentifyProductUseCase>,
    get_all_use_case: Arc<dyn GetAllProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
}

impl ProductApi {
    pub fn new(
        register_use_case: Arc<dyn RegisterProductUseCase>,
        identify_use_case: Arc<dyn IdentifyProductUseCase>,
        get_all_use_case: Arc<dyn GetAllProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
    ) -> Self {
        Self {
            register_use_case,
            identify_use_case,
            get_all_use_case,
            get_by_id_use_case,
            delete_use_case,
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, Json<ErrorResponse>> {
    Uuid::parse_str(raw).map_err(|_| ErrorResponse::validation("product.invalid_id"))
}

/// Product inventory API
///
/// Registration with a generated code and printable symbol, identification by
/// code or photo, and basic inventory reads.
#[OpenApi]
impl ProductApi {
    /// Register a product
    ///
    /// Validates the fields and reference image, issues a unique six-digit
    /// code and renders its QR symbol.
    #[oai(path = "/products", method = "post", tag = "ApiTags::Products")]
    async fn register_product(&self, body: Json<RegisterProductRequest>) -> RegisterProductResponse {
        let Some(price) = price_from_f64(body.0.price) else {
            return RegisterProductResponse::BadRequest(ErrorResponse::validation(
                "product.invalid_price",
            ));
        };

        let params = RegisterProductParams {
            name: body.0.name,
            location: body.0.location,
            quantity: body.0.quantity,
            price,
            category: body.0.category,
            image_base64: body.0.image_base64,
        };

        match self.register_use_case.execute(params).await {
            Ok(registered) => RegisterProductResponse::Created(Json(registered.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => RegisterProductResponse::BadRequest(json),
                    409 => RegisterProductResponse::Conflict(json),
                    503 => RegisterProductResponse::ServiceUnavailable(json),
                    _ => RegisterProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Identify a scanned product
    ///
    /// Looks the product up by its code when one was read, otherwise compares
    /// the captured photo against every stored reference image.
    #[oai(path = "/products/scan", method = "post", tag = "ApiTags::Products")]
    async fn scan_product(&self, body: Json<ScanProductRequest>) -> ScanProductResponse {
        let params = IdentifyProductParams {
            code: body.0.code,
            image_base64: body.0.image_base64,
        };

        match self.identify_use_case.execute(params).await {
            Ok(identification) => ScanProductResponse::Ok(Json(identification.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ScanProductResponse::BadRequest(json),
                    _ => ScanProductResponse::InternalError(json),
                }
            }
        }
    }

    /// List all products
    ///
    /// Returns every product ordered by name.
    #[oai(path = "/products", method = "get", tag = "ApiTags::Products")]
    async fn get_all_products(&self) -> GetAllProductsResponse {
        match self.get_all_use_case.execute().await {
            Ok(products) => {
                let responses: Vec<ProductResponse> =
                    products.into_iter().map(|p| p.into()).collect();
                GetAllProductsResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetAllProductsResponse::InternalError(json)
            }
        }
    }

    /// Get a product by ID
    #[oai(path = "/products/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(&self, id: Path<String>) -> GetProductByIdResponse {
        let uuid = match parse_id(&id.0) {
            Ok(uuid) => uuid,
            Err(json) => return GetProductByIdResponse::BadRequest(json),
        };

        match self
            .get_by_id_use_case
            .execute(GetProductByIdParams { id: uuid })
            .await
        {
            Ok(product) => GetProductByIdResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetProductByIdResponse::NotFound(json),
                    _ => GetProductByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a product
    ///
    /// Removes the product together with its reference image and symbol.
    /// Its code is never issued again.
    #[oai(path = "/products/:id", method = "delete", tag = "ApiTags::Products")]
    async fn delete_product(&self, id: Path<String>) -> DeleteProductResponse {
        let uuid = match parse_id(&id.0) {
            Ok(uuid) => uuid,
            Err(json) => return DeleteProductResponse::BadRequest(json),
        };

        match self
            .delete_use_case
            .execute(DeleteProductParams { id: uuid })
            .await
        {
            Ok(()) => DeleteProductResponse::NoContent,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteProductResponse::NotFound(json),
                    _ => DeleteProductResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum RegisterProductResponse {
    #[oai(status = 201)]
    Created(Json<RegisterProductResponseBody>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 503)]
    ServiceUnavailable(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ScanProductResponse {
    #[oai(status = 200)]
    Ok(Json<ScanProductResponseBody>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllProductsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ProductResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteProductResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
