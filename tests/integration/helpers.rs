//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use dam_api::{AppState, build_app};
use dam_core::config::AppConfig;
use dam_database::{MemoryStore, RepositorySet};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

/// Response from a test request
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestResponse {
    /// The `data` payload of a success response.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// A string field of the `data` payload.
    pub fn data_str(&self, field: &str) -> String {
        self.body["data"][field]
            .as_str()
            .unwrap_or_else(|| panic!("missing string field {field} in {}", self.text))
            .to_string()
    }
}

impl TestApp {
    /// Create a new test application over an empty memory store
    pub fn new() -> Self {
        let state = AppState::new(
            AppConfig::in_memory(),
            RepositorySet::memory(MemoryStore::new()),
            None,
        );
        Self {
            router: build_app(state),
        }
    }

    /// Make a JSON request as `user` (or anonymously)
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<Uuid>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(user) = user {
            req = req.header("x-user-id", user.to_string());
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }

    /// Create a root directory and return its id
    pub async fn create_root(&self, user: Uuid, name: &str) -> String {
        let response = self
            .request("POST", "/api/directories/roots", Some(json!({ "name": name })), Some(user))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.data_str("id")
    }

    /// Create a directory under `parent` and return its id
    pub async fn create_directory(&self, user: Uuid, parent: &str, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/directories",
                Some(json!({ "name": name, "parent_directory_id": parent })),
                Some(user),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.data_str("id")
    }

    /// Upload a file into `directory` and return its id
    pub async fn upload_file(&self, user: Uuid, directory: &str, name: &str, size: i64) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/directories/{directory}/files"),
                Some(json!({ "name": name, "size_bytes": size, "content_type": "image/png" })),
                Some(user),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.data_str("id")
    }

    /// Wait long enough that the next write gets a later timestamp
    pub async fn settle(&self) {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    /// Child names of `directory` for a listing query
    pub async fn child_names(&self, user: Uuid, directory: &str, query: &str) -> Vec<String> {
        let response = self
            .request(
                "GET",
                &format!("/api/directories/{directory}/children?{query}"),
                None,
                Some(user),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.data()["items"]
            .as_array()
            .expect("items array")
            .iter()
            .map(|i| i["name"].as_str().expect("name").to_string())
            .collect()
    }

    /// Fetch a directory record
    pub async fn directory(&self, user: Uuid, id: &str) -> Value {
        let response = self
            .request("GET", &format!("/api/directories/{id}"), None, Some(user))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.data().clone()
    }

    /// Fetch a file record
    pub async fn file(&self, user: Uuid, id: &str) -> Value {
        let response = self
            .request("GET", &format!("/api/files/{id}"), None, Some(user))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.data().clone()
    }
}
