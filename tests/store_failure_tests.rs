//! Router behaviour when the books store fails, panics or stalls

mod common;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{http::StatusCode, Router};
use serde_json::json;
use uuid::Uuid;

use common::{app_with, dune, send};
use library_server::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, NewBook, UpdateBook},
    repository::{memory::MemoryStore, BookStore, Repository},
    AppConfig,
};

/// Store whose connection is gone: reads and pings fail, writes panic
struct BrokenBooks;

#[async_trait]
impl BookStore for BrokenBooks {
    async fn find(&self, _filter: &BookFilter, _skip: u64, _limit: u64) -> AppResult<Vec<Book>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Book>> {
        panic!("books store lost its connection");
    }

    async fn insert(&self, _book: NewBook) -> AppResult<Book> {
        panic!("books store lost its connection");
    }

    async fn update_by_id(&self, _id: Uuid, _patch: &UpdateBook) -> AppResult<Option<Book>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete_by_id(&self, _id: Uuid) -> AppResult<Option<Book>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Store that answers listings far later than the request timeout
struct SlowBooks;

#[async_trait]
impl BookStore for SlowBooks {
    async fn find(&self, _filter: &BookFilter, _skip: u64, _limit: u64) -> AppResult<Vec<Book>> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Book>> {
        Ok(None)
    }

    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        Ok(book.into_book(Uuid::new_v4()))
    }

    async fn update_by_id(&self, _id: Uuid, _patch: &UpdateBook) -> AppResult<Option<Book>> {
        Ok(None)
    }

    async fn delete_by_id(&self, _id: Uuid) -> AppResult<Option<Book>> {
        Ok(None)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

fn app_on(config: AppConfig, books: impl BookStore + 'static) -> Router {
    let repository = Repository::from_stores(Arc::new(books), Arc::new(MemoryStore::default()));
    app_with(config, repository)
}

#[tokio::test]
async fn test_list_store_failure_is_bad_request() {
    let app = app_on(AppConfig::default(), BrokenBooks);

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert!(body.get("err").is_none());
}

#[tokio::test]
async fn test_list_store_failure_in_legacy_mode() {
    let mut config = AppConfig::default();
    config.api.legacy_error_status = true;
    let app = app_on(config, BrokenBooks);

    let (status, body) = send(&app, "GET", "/books?author=Herbert", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["err"]["message"].is_string());

    // Write paths keep their status in legacy mode
    let missing = Uuid::new_v4();
    let (status, body) = send(&app, "DELETE", &format!("/books/{missing}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_store_panic_becomes_internal_error() {
    let app = app_on(AppConfig::default(), BrokenBooks);
    let expected = json!({ "message": "Internal server error" });

    let id = Uuid::new_v4();
    let (status, body) = send(&app, "GET", &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = send(&app, "POST", "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    // The router keeps serving after a panic
    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_ready_reports_unreachable_store() {
    let app = app_on(AppConfig::default(), BrokenBooks);

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let mut config = AppConfig::default();
    config.server.request_timeout_secs = 1;
    let app = app_on(config, SlowBooks);

    let (status, _) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

    // Requests that finish in time are unaffected
    let (status, _) = send(&app, "POST", "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);
}
