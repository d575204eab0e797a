mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_demo_fallback_answers_known_number() {
    let (server, token) = common::create_test_server().await;

    let response = server
        .get("/api/tracking/dhl-1234-56789")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["result"]["trackingNumber"], "DHL123456789");
    assert_eq!(json["result"]["source"], "demo");
    assert_eq!(json["result"]["carrier"], "DHL");
    assert!(!json["result"]["timeline"].as_array().unwrap().is_empty());
    assert!(json["localPackages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_lookup_attaches_local_packages() {
    let (server, token) = common::create_test_server().await;
    common::create_package(
        &server,
        &token,
        json!({ "trackingNumber": "ups 987 654 321", "owner": "Li Si" }),
    )
    .await;

    let json = server
        .get("/api/tracking/UPS987654321")
        .authorization_bearer(&token)
        .await
        .json::<Value>();

    let local = json["localPackages"].as_array().unwrap();
    assert_eq!(local.len(), 1);
    assert_eq!(local[0]["owner"], "Li Si");
}

#[tokio::test]
async fn test_unknown_number_not_found() {
    let (server, token) = common::create_test_server().await;

    let response = server
        .get("/api/tracking/ZZ0000000000")
        .authorization_bearer(&token)
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_malformed_number_rejected() {
    let (server, token) = common::create_test_server().await;

    server
        .get("/api/tracking/AB12")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_detect_carrier() {
    let (server, token) = common::create_test_server().await;

    let json = server
        .get("/api/tracking/1z999aa10123456784/carrier")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(json["trackingNumber"], "1Z999AA10123456784");
    assert_eq!(json["carrier"], "UPS");

    let json = server
        .get("/api/tracking/ZZ0000000000/carrier")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert!(json["carrier"].is_null());
}
