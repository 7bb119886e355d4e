//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    messages::{BOOK_CREATED, BOOK_UPDATED},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    AppState,
};

/// Book mutation response
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

/// Store failures on the read paths answer `200 {"err": ...}` when the legacy
/// status behaviour is switched on
fn read_failure(state: &AppState, err: AppError) -> AppResult<Response> {
    if state.config.api.legacy_error_status && err.is_store_failure() {
        tracing::warn!("Store failure answered with 200: {}", err);
        Ok(err.into_legacy_response())
    } else {
        Err(err)
    }
}

/// List books with filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books in insertion order", body = Vec<Book>),
        (status = 400, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, AppError>,
) -> AppResult<Response> {
    let query = BookQuery::from_pairs(pairs);
    match state.services.books.list(&query).await {
        Ok(books) => Ok(Json(books).into_response()),
        Err(err) => read_failure(&state, err),
    }
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.services.books.get(&id).await {
        Ok(book) => Ok(Json(book).into_response()),
        Err(err) => read_failure(&state, err),
    }
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Missing field", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateBook>, AppError>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.books.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: BOOK_CREATED.to_string(),
            book,
        }),
    ))
}

/// Partially update a book
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 400, description = "Malformed ID or body", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(patch), _): WithRejection<Json<UpdateBook>, AppError>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(&id, patch).await?;
    Ok(Json(BookResponse {
        message: BOOK_UPDATED.to_string(),
        book,
    }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.books.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
