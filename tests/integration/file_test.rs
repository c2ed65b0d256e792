//! Integration tests for files and their versions.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upload_creates_first_version() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;
    let dir = app.create_directory(user, &root, "Photos").await;

    let file_id = app.upload_file(user, &dir, "hero.png", 2048).await;
    let file = app.file(user, &file_id).await;
    assert_eq!(file["full_path"], format!("/{root}/hero.png"));
    assert_eq!(file["directory_id"], dir);
    assert_eq!(file["size_bytes"], 2048);

    let response = app
        .request("GET", &format!("/api/files/{file_id}/versions"), None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let versions = response.data()["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["version_number"], 1);
    assert_eq!(versions[0]["id"], file["latest_version_id"]);
}

#[tokio::test]
async fn test_new_version_becomes_latest() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;
    let file_id = app.upload_file(user, &root, "logo.svg", 100).await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/versions"),
            Some(json!({ "size_bytes": 300, "content_type": "image/svg+xml" })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    assert_eq!(response.data()["version_number"], 2);
    let version_id = response.data_str("id");

    let file = app.file(user, &file_id).await;
    assert_eq!(file["latest_version_id"], version_id);
    assert_eq!(file["size_bytes"], 300);
    assert_eq!(file["content_type"], "image/svg+xml");

    let response = app
        .request("GET", &format!("/api/files/{file_id}/versions"), None, Some(user))
        .await;
    let numbers: Vec<i64> = response.data()["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn test_new_version_by_other_user_is_forbidden() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let root = app.create_root(owner, "Root").await;
    let file_id = app.upload_file(owner, &root, "a.png", 1).await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/versions"),
            Some(json!({ "size_bytes": 2, "content_type": "image/png" })),
            Some(Uuid::new_v4()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_upload_into_foreign_directory_is_forbidden() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let root = app.create_root(owner, "Root").await;

    let response = app
        .request(
            "POST",
            &format!("/api/directories/{root}/files"),
            Some(json!({ "name": "sneaky.png", "size_bytes": 1, "content_type": "image/png" })),
            Some(Uuid::new_v4()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_versions_of_missing_file_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            &format!("/api/files/{}/versions", Uuid::new_v4()),
            None,
            Some(Uuid::new_v4()),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_metadata_replaces_tags() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;
    let file_id = app.upload_file(user, &root, "banner.png", 5).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}"),
            Some(json!({ "description": "Spring banner", "tags": ["spring", "web"] })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text);
    assert_eq!(response.data()["description"], "Spring banner");
    assert_eq!(response.data()["tags"], json!(["spring", "web"]));

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}"),
            Some(json!({ "tags": ["archived"] })),
            Some(user),
        )
        .await;
    assert_eq!(response.data()["tags"], json!(["archived"]));
    assert!(response.data()["description"].is_null());
}

#[tokio::test]
async fn test_move_files_keeps_names() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;
    let from = app.create_directory(user, &root, "Inbox").await;
    let to = app.create_directory(user, &from, "Sorted").await;
    let a = app.upload_file(user, &from, "a.png", 1).await;
    let b = app.upload_file(user, &from, "b.png", 1).await;

    let response = app
        .request(
            "POST",
            "/api/files/move",
            Some(json!({ "source_file_ids": [a, b], "destination_directory_id": to })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text);
    assert_eq!(response.data().as_array().unwrap().len(), 2);

    let moved = app.file(user, &a).await;
    assert_eq!(moved["directory_id"], to);
    assert_eq!(moved["full_path"], format!("/{root}/{from}/a.png"));
    assert_eq!(app.file(user, &b).await["name"], "b.png");
}

#[tokio::test]
async fn test_move_files_to_missing_directory_is_not_found() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;
    let a = app.upload_file(user, &root, "a.png", 1).await;

    let response = app
        .request(
            "POST",
            "/api/files/move",
            Some(json!({ "source_file_ids": [a], "destination_directory_id": Uuid::new_v4() })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let file = app.file(user, &a).await;
    assert_eq!(file["directory_id"], root);
}

#[tokio::test]
async fn test_version_history_is_stable_and_keeps_sizes() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;
    let file_id = app.upload_file(user, &root, "brief.pdf", 1).await;

    for size in [5, 6] {
        let response = app
            .request(
                "POST",
                &format!("/api/files/{file_id}/versions"),
                Some(json!({ "size_bytes": size, "content_type": "application/pdf" })),
                Some(user),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    }

    let path = format!("/api/files/{file_id}/versions");
    let first = app.request("GET", &path, None, Some(user)).await;
    let second = app.request("GET", &path, None, Some(user)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["versions"], second.data()["versions"]);

    let sizes: Vec<i64> = first.data()["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["size_bytes"].as_i64().unwrap())
        .collect();
    assert_eq!(sizes, vec![1, 5, 6]);
}
