//! Helpers shared by the router-level tests

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_server::{api::create_router, repository::Repository, AppConfig, AppState};

pub fn app() -> Router {
    app_with(AppConfig::default(), Repository::in_memory())
}

pub fn app_with(config: AppConfig, repository: Repository) -> Router {
    create_router(AppState::new(config, repository))
}

/// Send a request through the router and decode the JSON body (`Null` when empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn dune() -> Value {
    json!({
        "name": "Dune",
        "price": 20,
        "image": "u",
        "author": "Herbert",
        "year": 1965
    })
}

pub fn book(name: &str, author: &str, year: i32) -> Value {
    json!({
        "name": name,
        "price": 12.5,
        "image": format!("/img/{}.png", name),
        "author": author,
        "year": year
    })
}

/// Create a book and return its id
pub async fn create_book(app: &Router, payload: Value) -> String {
    let (status, body) = send(app, "POST", "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["book"]["id"].as_str().unwrap().to_string()
}
