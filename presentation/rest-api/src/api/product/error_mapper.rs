use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::product::errors::{ErrorKind, ProductError};

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ProductError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match self.kind() {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "ValidationError"),
            ErrorKind::Decode => (StatusCode::BAD_REQUEST, "DecodeError"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "ConflictError"),
            ErrorKind::ResourceExhausted => (StatusCode::SERVICE_UNAVAILABLE, "ResourceExhausted"),
            ErrorKind::Io | ErrorKind::Internal => {
                tracing::error!("request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError")
            }
        };

        // Asset causes carry filesystem paths; they stay in the log.
        let message = match self {
            ProductError::Asset(_) => "product.asset_failed".to_string(),
            other => other.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message,
            }),
        )
    }
}
