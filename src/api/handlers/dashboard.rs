//! Handler for the dashboard overview.

use axum::{Json, extract::State};

use crate::application::services::DashboardSummary;
use crate::state::AppState;

/// Package and shipment totals plus shelf alerts.
///
/// # Endpoint
///
/// `GET /api/dashboard`
pub async fn dashboard_handler(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.dashboard_service.summary().await)
}
