//! Integration tests for per-user storage settings.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::TestApp;

fn s3_settings() -> Value {
    json!({
        "storage_vendor": "amazon_s3",
        "bucket_name": "dam-assets",
        "region": "eu-west-1",
        "access_key_id": "AKIAEXAMPLE",
        "secret_access_key": "wJalrXUtnFEMI/K7MDENG"
    })
}

#[tokio::test]
async fn test_create_and_get_settings_without_secrets() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request("POST", "/api/users/settings", Some(s3_settings()), Some(user))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    assert_eq!(response.data()["storage_vendor"], "amazon_s3");
    assert_eq!(response.data()["bucket_name"], "dam-assets");
    assert!(!response.text.contains("wJalrXUtnFEMI"));
    assert!(!response.text.contains("AKIAEXAMPLE"));

    let response = app.request("GET", "/api/users/settings", None, Some(user)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["region"], "eu-west-1");
    assert_eq!(response.data()["user_id"], user.to_string());
    assert!(!response.text.contains("wJalrXUtnFEMI"));
}

#[tokio::test]
async fn test_second_settings_record_conflicts() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let first = app
        .request("POST", "/api/users/settings", Some(s3_settings()), Some(user))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/api/users/settings", Some(s3_settings()), Some(user))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_missing_settings_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/users/settings", None, Some(Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_vendor_is_rejected() {
    let app = TestApp::new();
    let mut body = s3_settings();
    body["storage_vendor"] = json!("dropbox");

    let response = app
        .request("POST", "/api/users/settings", Some(body), Some(Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_bucket_is_rejected() {
    let app = TestApp::new();
    let mut body = s3_settings();
    body["bucket_name"] = json!("   ");

    let response = app
        .request("POST", "/api/users/settings", Some(body), Some(Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
