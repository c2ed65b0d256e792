//! Integration tests for the directory tree.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_roots_are_listed_per_user() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let first = app.create_root(alice, "Assets").await;
    let second = app.create_root(alice, "Archive").await;
    app.create_root(bob, "Bob's").await;

    let response = app
        .request("GET", "/api/directories/roots", None, Some(alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let roots = response.data().as_array().unwrap();
    let ids: Vec<&str> = roots.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.as_str()));
    assert!(ids.contains(&second.as_str()));
    assert!(roots.iter().all(|r| r["level"] == 0 && r["full_path"] == ""));
}

#[tokio::test]
async fn test_child_path_is_parent_chain() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let root = app.create_root(user, "Root").await;
    let child = app.create_directory(user, &root, "Campaigns").await;
    let grandchild = app.create_directory(user, &child, "2026").await;

    let child_dir = app.directory(user, &child).await;
    assert_eq!(child_dir["full_path"], format!("/{root}"));
    assert_eq!(child_dir["level"], 1);
    assert_eq!(child_dir["parent_directory_id"], root);

    let grandchild_dir = app.directory(user, &grandchild).await;
    assert_eq!(grandchild_dir["full_path"], format!("/{root}/{child}"));
    assert_eq!(grandchild_dir["level"], 2);
}

#[tokio::test]
async fn test_create_under_missing_parent_is_not_found() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            "/api/directories",
            Some(json!({ "name": "orphan", "parent_directory_id": Uuid::new_v4() })),
            Some(user),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request("POST", "/api/directories/roots", Some(json!({ "name": "" })), Some(user))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["name"].is_array());

    let response = app
        .request("POST", "/api/directories/roots", Some(json!({ "name": "   " })), Some(user))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_keeps_paths_and_checks_owner() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let root = app.create_root(owner, "Root").await;
    let child = app.create_directory(owner, &root, "Old").await;
    let grandchild = app.create_directory(owner, &child, "Inner").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/directories/{child}"),
            Some(json!({ "name": "New" })),
            Some(stranger),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/api/directories/{child}"),
            Some(json!({ "name": "New" })),
            Some(owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "New");
    assert_eq!(response.data()["full_path"], format!("/{root}"));

    let inner = app.directory(owner, &grandchild).await;
    assert_eq!(inner["full_path"], format!("/{root}/{child}"));
}

#[tokio::test]
async fn test_move_subtree_to_second_root() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let r = app.create_root(user, "R").await;
    let s = app.create_root(user, "S").await;
    let c = app.create_directory(user, &r, "C").await;
    let d = app.create_directory(user, &c, "D").await;
    let sibling = app.create_directory(user, &r, "Sibling").await;
    let in_c = app.upload_file(user, &c, "x.png", 10).await;
    let in_d = app.upload_file(user, &d, "y.png", 20).await;

    let response = app
        .request(
            "POST",
            "/api/directories/move",
            Some(json!({ "source_directory_ids": [c], "destination_directory_id": s })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text);
    assert_eq!(response.data()[0]["id"], c);

    let moved = app.directory(user, &c).await;
    assert_eq!(moved["parent_directory_id"], s);
    assert_eq!(moved["full_path"], format!("/{s}"));
    assert_eq!(moved["level"], 1);

    let nested = app.directory(user, &d).await;
    assert_eq!(nested["full_path"], format!("/{s}/{c}"));
    assert_eq!(nested["level"], 2);

    assert_eq!(app.file(user, &in_c).await["full_path"], format!("/{s}/x.png"));
    assert_eq!(app.file(user, &in_d).await["full_path"], format!("/{s}/{c}/y.png"));

    let untouched = app.directory(user, &sibling).await;
    assert_eq!(untouched["full_path"], format!("/{r}"));
}

#[tokio::test]
async fn test_move_into_own_subtree_is_rejected() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let root = app.create_root(user, "Root").await;
    let a = app.create_directory(user, &root, "A").await;
    let a_child = app.create_directory(user, &a, "A1").await;

    let response = app
        .request(
            "POST",
            "/api/directories/move",
            Some(json!({ "source_directory_ids": [a], "destination_directory_id": a_child })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let unchanged = app.directory(user, &a).await;
    assert_eq!(unchanged["parent_directory_id"], root);
}

#[tokio::test]
async fn test_move_with_empty_sources_is_rejected() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;

    let response = app
        .request(
            "POST",
            "/api/directories/move",
            Some(json!({ "source_directory_ids": [], "destination_directory_id": root })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_move_foreign_source_is_forbidden() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    let theirs = app.create_root(owner, "Theirs").await;
    let their_child = app.create_directory(owner, &theirs, "Child").await;
    let mine = app.create_root(other, "Mine").await;

    let response = app
        .request(
            "POST",
            "/api/directories/move",
            Some(json!({ "source_directory_ids": [their_child], "destination_directory_id": mine })),
            Some(other),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_children_page_mixes_directories_and_files() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let root = app.create_root(user, "Root").await;
    app.create_directory(user, &root, "b-dir").await;
    app.create_directory(user, &root, "d-dir").await;
    app.upload_file(user, &root, "a.png", 1).await;
    app.upload_file(user, &root, "c.png", 1).await;

    let response = app
        .request(
            "GET",
            &format!("/api/directories/{root}/children?order_by=name%20asc&limit=3"),
            None,
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text);

    let page = response.data();
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.png", "b-dir", "c.png"]);
    assert_eq!(page["items"][1]["is_directory"], true);
    assert_eq!(page["items"][0]["is_directory"], false);
    assert_eq!(page["total_items"], 4);
    assert_eq!(page["has_more"], true);

    let response = app
        .request(
            "GET",
            &format!("/api/directories/{root}/children?order_by=name%20asc&limit=3&offset=3"),
            None,
            Some(user),
        )
        .await;
    let page = response.data();
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["items"][0]["name"], "d-dir");
    assert_eq!(page["has_more"], false);
}

#[tokio::test]
async fn test_children_rejects_bad_listing_parameters() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;

    for query in ["order_by=size", "order_by=name%20sideways", "limit=0", "limit=101", "offset=-1"] {
        let response = app
            .request(
                "GET",
                &format!("/api/directories/{root}/children?{query}"),
                None,
                Some(user),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{query}");
    }

    let response = app
        .request(
            "GET",
            &format!("/api/directories/{}/children", Uuid::new_v4()),
            None,
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_requests_without_identity_are_unauthenticated() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/directories/roots", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_children_ordered_by_timestamps_across_kinds() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;

    app.create_directory(user, &root, "d1").await;
    app.settle().await;
    let f1 = app.upload_file(user, &root, "f1.png", 1).await;
    app.settle().await;
    app.create_directory(user, &root, "d2").await;

    assert_eq!(
        app.child_names(user, &root, "order_by=created_at%20asc").await,
        vec!["d1", "f1.png", "d2"]
    );
    assert_eq!(
        app.child_names(user, &root, "").await,
        vec!["d2", "f1.png", "d1"]
    );

    app.settle().await;
    let response = app
        .request(
            "PUT",
            &format!("/api/files/{f1}"),
            Some(json!({ "description": "touched", "tags": [] })),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text);

    assert_eq!(
        app.child_names(user, &root, "order_by=updated_at%20desc").await,
        vec!["f1.png", "d2", "d1"]
    );
}

#[tokio::test]
async fn test_malformed_query_and_path_use_error_envelope() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_root(user, "Root").await;

    let response = app
        .request(
            "GET",
            &format!("/api/directories/{root}/children?limit=abc"),
            None,
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_ARGUMENT", "{}", response.text);
    assert!(response.body["message"].is_string());

    for path in ["/api/directories/not-a-uuid", "/api/files/not-a-uuid/versions"] {
        let response = app.request("GET", path, None, Some(user)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.body["error"], "INVALID_ARGUMENT", "{}", response.text);
    }
}

#[tokio::test]
async fn test_move_with_failing_later_source_changes_nothing() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    let root = app.create_root(owner, "Root").await;
    let dest = app.create_root(owner, "Dest").await;
    let a = app.create_directory(owner, &root, "A").await;
    let in_a = app.upload_file(owner, &a, "a.png", 1).await;
    let b = app.create_directory(owner, &root, "B").await;
    let b_child = app.create_directory(owner, &b, "B1").await;
    let foreign_root = app.create_root(other, "Other").await;
    let foreign = app.create_directory(other, &foreign_root, "Foreign").await;

    let response = app
        .request(
            "POST",
            "/api/directories/move",
            Some(json!({ "source_directory_ids": [a, foreign], "destination_directory_id": dest })),
            Some(owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "PERMISSION_DENIED");

    let response = app
        .request(
            "POST",
            "/api/directories/move",
            Some(json!({ "source_directory_ids": [a, b], "destination_directory_id": b_child })),
            Some(owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let a_after = app.directory(owner, &a).await;
    assert_eq!(a_after["parent_directory_id"], root);
    assert_eq!(a_after["full_path"], format!("/{root}"));
    assert_eq!(a_after["level"], 1);
    assert_eq!(app.file(owner, &in_a).await["full_path"], format!("/{root}/a.png"));
    assert_eq!(app.directory(owner, &b).await["parent_directory_id"], root);
}
