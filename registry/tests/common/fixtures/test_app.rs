//! Router harness: builds the real router over an in-memory database and
//! drives it with `oneshot`, no socket involved.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use mail_registry::web::{create_router, AppState};
use mail_registry::Config;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use super::TestDatabase;

pub struct TestApp {
    pub router: Router,
    pub database: TestDatabase,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let database = TestDatabase::new()
            .await
            .expect("Failed to create test database");
        let state = AppState::new(Arc::new(config), database.db());
        Self {
            router: create_router(state),
            database,
        }
    }

    /// Sends a request and returns the status with the raw body bytes
    pub async fn send_raw(&self, method: Method, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        (status, bytes.to_vec())
    }

    /// Sends an optional JSON body and parses the JSON envelope back
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let (status, bytes) = self.send_raw(method, uri, body).await;
        let json = serde_json::from_slice(&bytes).expect("Response is not JSON");
        (status, json)
    }

    /// Creates a server through the API and returns its `serverId`
    pub async fn create_server(&self, payload: Value) -> String {
        let (status, body) = self.send(Method::POST, "/add-server", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["data"]["serverId"]
            .as_str()
            .expect("serverId missing")
            .to_string()
    }
}
