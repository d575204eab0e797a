//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage check failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "file backend reachable" },
///     "tracking": { "status": "ok", "message": "Providers: 17track, aftership" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let tracking = check_tracking(&state);

    let healthy = storage.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { storage, tracking },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    let backend = state.store.backend();
    if state.store.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} backend reachable", backend)),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{} backend unreachable", backend)),
        }
    }
}

/// Reports configured providers; lookups still work offline through the demo fallback.
fn check_tracking(state: &AppState) -> CheckStatus {
    let message = if state.tracking_providers.is_empty() {
        "No providers configured".to_string()
    } else {
        format!("Providers: {}", state.tracking_providers.join(", "))
    };
    CheckStatus {
        status: "ok".to_string(),
        message: Some(message),
    }
}
