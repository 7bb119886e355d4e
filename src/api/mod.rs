//! API handlers and router for the library REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod users;

use std::{any::Any, time::Duration};

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// A panicking handler still gets a JSON 500 instead of tearing down the connection
fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    AppError::Internal("handler panicked".to_string()).into_response()
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let request_timeout = state.config.server.request_timeout_secs;

    let mut router = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        // Users
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        // OpenAPI document
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state);

    if request_timeout > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(request_timeout)));
    }

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
