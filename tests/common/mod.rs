#![allow(dead_code)]

use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

use parcel_depot::api::handlers::health_handler;
use parcel_depot::api::middleware::auth;
use parcel_depot::api::routes::protected_routes;
use parcel_depot::infrastructure::store::{KvStore, MemoryStore};
use parcel_depot::state::{AppState, TrackingOptions};

pub const SIGNING_SECRET: &str = "test-signing-secret";

pub fn create_test_state() -> AppState {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    AppState::new(store, SIGNING_SECRET.to_string(), TrackingOptions::default())
}

/// The API as mounted by the server, without rate limiting.
pub fn create_test_app(state: AppState) -> Router {
    let api = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
}

pub async fn issue_token(state: &AppState) -> String {
    let (_, raw) = state
        .auth_service
        .issue("integration tests", None)
        .await
        .unwrap();
    raw
}

/// Fresh in-memory server and a valid bearer token.
pub async fn create_test_server() -> (TestServer, String) {
    let state = create_test_state();
    let token = issue_token(&state).await;
    let server = TestServer::new(create_test_app(state)).unwrap();
    (server, token)
}

pub async fn create_package(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/api/packages")
        .authorization_bearer(token)
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub fn recipient() -> Value {
    json!({
        "name": "Ann Lee",
        "phone": "+1 555 0100",
        "email": "ann@example.com",
        "address": "1 Main St, Springfield",
        "country": "United States",
        "zipCode": "12345"
    })
}
