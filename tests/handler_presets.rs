mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_owner_presets_add_and_remove() {
    let (server, token) = common::create_test_server().await;

    let json = server
        .get("/api/presets/owners")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(json["items"], json!(["Zhang San", "Li Si", "Wang Wu"]));

    let response = server
        .post("/api/presets/owners")
        .authorization_bearer(&token)
        .json(&json!({ "value": " Zhao Liu " }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["items"][3], "Zhao Liu");

    server
        .post("/api/presets/owners")
        .authorization_bearer(&token)
        .json(&json!({ "value": "Zhao Liu" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .delete("/api/presets/owners/Zhao%20Liu")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete("/api/presets/owners/Zhao%20Liu")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_tag_presets() {
    let (server, token) = common::create_test_server().await;

    let json = server
        .get("/api/presets/tags")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(json["items"].as_array().unwrap().len(), 4);

    server
        .post("/api/presets/tags")
        .authorization_bearer(&token)
        .json(&json!({ "value": "" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_unknown_preset_list() {
    let (server, token) = common::create_test_server().await;

    let response = server
        .get("/api/presets/colors")
        .authorization_bearer(&token)
        .await;
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_status_labels_rename_and_reset() {
    let (server, token) = common::create_test_server().await;

    let labels = server
        .put("/api/presets/statuses/in_stock")
        .authorization_bearer(&token)
        .json(&json!({ "label": "On shelf" }))
        .await
        .json::<Value>();
    let in_stock = labels
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["value"] == "in_stock")
        .unwrap()
        .clone();
    assert_eq!(in_stock["label"], "On shelf");

    let reset = server
        .delete("/api/presets/statuses")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(reset[0]["label"], "Inbound");

    let listed = server
        .get("/api/presets/statuses")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(listed.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_settings_roundtrip() {
    let (server, token) = common::create_test_server().await;

    let settings = server
        .get("/api/settings")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(settings["lowStockThreshold"], 10);

    let response = server
        .put("/api/settings")
        .authorization_bearer(&token)
        .json(&json!({
            "companyName": "  Harbor Forwarding ",
            "contactEmail": "",
            "lowStockThreshold": 25,
            "backupFrequency": "weekly"
        }))
        .await;
    response.assert_status_ok();
    let saved = response.json::<Value>();
    assert_eq!(saved["companyName"], "Harbor Forwarding");
    assert!(saved["contactEmail"].is_null());
    assert_eq!(saved["backupFrequency"], "weekly");

    let settings = server
        .get("/api/settings")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(settings["lowStockThreshold"], 25);
}

#[tokio::test]
async fn test_settings_validation() {
    let (server, token) = common::create_test_server().await;

    server
        .put("/api/settings")
        .authorization_bearer(&token)
        .json(&json!({ "lowStockThreshold": 0 }))
        .await
        .assert_status_bad_request();

    server
        .put("/api/settings")
        .authorization_bearer(&token)
        .json(&json!({ "contactEmail": "not-an-email" }))
        .await
        .assert_status_bad_request();
}
