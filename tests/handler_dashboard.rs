mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_dashboard_counts() {
    let (server, token) = common::create_test_server().await;
    common::create_package(&server, &token, json!({ "trackingNumber": "D1", "shelf": "A1" }))
        .await;
    common::create_package(
        &server,
        &token,
        json!({ "trackingNumber": "D2", "status": "delivered" }),
    )
    .await;

    let response = server
        .get("/api/dashboard")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["totalPackages"], 2);
    assert_eq!(json["inStock"], 1);
    assert_eq!(json["delivered"], 1);
    assert_eq!(json["totalShipments"], 0);
    assert!(json["shelfAlerts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_reports_full_shelves() {
    let (server, token) = common::create_test_server().await;
    server
        .post("/api/shelves/adjust")
        .authorization_bearer(&token)
        .json(&json!({ "name": "B2", "delta": 100 }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let json = server
        .get("/api/dashboard")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    let alerts = json["shelfAlerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["name"], "B2");
}
