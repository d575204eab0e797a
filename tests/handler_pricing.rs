mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

fn sea_channel() -> Value {
    json!({
        "channel": "UK Sea Freight",
        "country": "United Kingdom",
        "weightRange": { "minKg": 1.0, "maxKg": 100.0 },
        "billingMethod": "per_kg",
        "firstWeight": 20.0,
        "unitKg": 1.0,
        "handlingFee": 50.0,
        "timeFrame": "30-40 days"
    })
}

#[tokio::test]
async fn test_quote_single_channel() {
    let (server, token) = common::create_test_server().await;

    let response = server
        .get("/api/pricing/quote")
        .authorization_bearer(&token)
        .add_query_param("weight", "1.0")
        .add_query_param("channel", "us-dhl-air")
        .await;

    response.assert_status_ok();
    let items = response.json::<Value>()["items"].clone();
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["baseFee"], 200.0);
    assert_eq!(items[0]["fuelSurchargeRate"], 24.5);
    assert_eq!(items[0]["total"], 249.0);
}

#[tokio::test]
async fn test_quote_without_surcharge() {
    let (server, token) = common::create_test_server().await;

    let json = server
        .get("/api/pricing/quote")
        .authorization_bearer(&token)
        .add_query_param("weight", "1.0")
        .add_query_param("channel", "us-dhl-air")
        .add_query_param("surcharge", "false")
        .await
        .json::<Value>();

    assert_eq!(json["items"][0]["total"], 200.0);
}

#[tokio::test]
async fn test_quote_all_skips_channels_out_of_range() {
    let (server, token) = common::create_test_server().await;

    let json = server
        .get("/api/pricing/quote")
        .authorization_bearer(&token)
        .add_query_param("weight", "2")
        .add_query_param("country", "united states")
        .await
        .json::<Value>();

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["channelId"], "us-dhl-air");
}

#[tokio::test]
async fn test_quote_invalid_weight() {
    let (server, token) = common::create_test_server().await;

    server
        .get("/api/pricing/quote")
        .authorization_bearer(&token)
        .add_query_param("weight", "0")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_quote_unknown_channel() {
    let (server, token) = common::create_test_server().await;

    server
        .get("/api/pricing/quote")
        .authorization_bearer(&token)
        .add_query_param("weight", "1")
        .add_query_param("channel", "nope")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_channel_crud() {
    let (server, token) = common::create_test_server().await;

    let response = server
        .post("/api/pricing/channels")
        .authorization_bearer(&token)
        .json(&sea_channel())
        .await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Value>();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let json = server
        .get("/api/pricing/quote")
        .authorization_bearer(&token)
        .add_query_param("weight", "3")
        .add_query_param("channel", &id)
        .await
        .json::<Value>();
    assert_eq!(json["items"][0]["total"], 110.0);

    let mut changed = sea_channel();
    changed["handlingFee"] = json!(10.0);
    let updated = server
        .put(&format!("/api/pricing/channels/{}", id))
        .authorization_bearer(&token)
        .json(&changed)
        .await
        .json::<Value>();
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["handlingFee"], 10.0);

    server
        .delete(&format!("/api/pricing/channels/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let channels = server
        .get("/api/pricing/channels")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(channels.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_inconsistent_channel() {
    let (server, token) = common::create_test_server().await;
    let mut channel = sea_channel();
    channel["weightRange"] = json!({ "minKg": 5.0, "maxKg": 1.0 });

    server
        .post("/api/pricing/channels")
        .authorization_bearer(&token)
        .json(&channel)
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_update_fuel_surcharge() {
    let (server, token) = common::create_test_server().await;

    let response = server
        .put("/api/pricing/fuel-surcharges/DHL")
        .authorization_bearer(&token)
        .json(&json!({ "rate": 10.0 }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["rate"], 10.0);

    let json = server
        .get("/api/pricing/quote")
        .authorization_bearer(&token)
        .add_query_param("weight", "1.0")
        .add_query_param("channel", "us-dhl-air")
        .await
        .json::<Value>();
    assert_eq!(json["items"][0]["total"], 220.0);

    let surcharges = server
        .get("/api/pricing/fuel-surcharges")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(surcharges.as_array().unwrap().len(), 3);
}
