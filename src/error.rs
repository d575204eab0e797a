//! Unified HTTP error type.
//!
//! Every handler returns `Result<_, AppError>`; the error renders as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": { } } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

use crate::domain::pricing::PricingError;
use crate::infrastructure::store::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload, also embedded in batch results.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Upstream { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Upstream { message, details } => {
                (StatusCode::BAD_GATEWAY, "upstream_error", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts the error into the payload used inside batch responses.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, code, message, _) = self.parts();
        write!(f, "{}: {}", code, message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Storage error");
        AppError::internal("Storage error", json!({ "reason": e.to_string() }))
    }
}

impl From<PricingError> for AppError {
    fn from(e: PricingError) -> Self {
        let details = match &e {
            PricingError::InvalidWeight(weight) => json!({ "weight": weight }),
            PricingError::OutOfRange { channel, weight } => {
                json!({ "channel": channel, "weight": weight })
            }
            PricingError::InvalidChannel(reason) => json!({ "reason": reason }),
        };
        AppError::bad_request(e.to_string(), details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("x", json!({})).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::upstream("x", json!({})).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::internal("x", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_to_error_info() {
        let info = AppError::not_found("Package not found", json!({ "id": "abc" })).to_error_info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "Package not found");
        assert_eq!(info.details["id"], "abc");
    }

    #[test]
    fn test_pricing_error_maps_to_validation() {
        let err: AppError = PricingError::InvalidWeight(0.0).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_error_maps_to_internal() {
        let err: AppError = StoreError::Operation("boom".to_string()).into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
