#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use tinylink::domain::entities::{InsertOutcome, Link, NewLink};
use tinylink::domain::repositories::{LinkRepository, LinkTotals};
use tinylink::error::AppError;
use tinylink::infrastructure::persistence::InMemoryLinkRepository;
use tinylink::routes::router;
use tinylink::state::AppState;

pub const BASE_URL: &str = "http://s.example.com";

pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(InMemoryLinkRepository::new()), BASE_URL)
}

/// Server over the full router backed by a fresh in-memory store.
pub fn create_test_server() -> (TestServer, AppState) {
    let state = create_test_state();
    let server = TestServer::new(router(state.clone())).unwrap();
    (server, state)
}

pub fn create_failing_server() -> TestServer {
    let state = AppState::new(Arc::new(FailingLinkRepository), BASE_URL);
    TestServer::new(router(state)).unwrap()
}

/// Creates a link through the API and returns the response body.
pub async fn create_link(server: &TestServer, target_url: &str, code: Option<&str>) -> Value {
    let mut body = json!({ "target_url": target_url });
    if let Some(code) = code {
        body["code"] = json!(code);
    }

    let response = server.post("/api/links").json(&body).await;
    response.json::<Value>()
}

/// Store whose every operation fails, as if the database were down.
pub struct FailingLinkRepository;

fn unavailable() -> AppError {
    AppError::store_unavailable("Database error", json!({ "reason": "connection refused" }))
}

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn create_or_get(&self, _new_link: NewLink) -> Result<InsertOutcome, AppError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn find_by_target_url(&self, _target_url: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        Err(unavailable())
    }

    async fn delete(&self, _code: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn increment_and_touch(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}
