//! Error types for the library server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Failures raised by the data-access layer rather than by request checks.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, AppError::InvalidId(_) | AppError::Database(_))
    }

    /// Body returned for store failures on the read paths when the legacy
    /// status behaviour is enabled: `200 {"err": {...}}`.
    pub fn into_legacy_response(self) -> Response {
        let body = json!({ "err": { "message": self.public_message() } });
        (StatusCode::OK, Json(body)).into_response()
    }

    fn public_message(&self) -> String {
        match self {
            AppError::InvalidId(raw) => format!("Invalid id \"{}\"", raw),
            AppError::Database(e) => e.to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::Authentication(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

/// Error response body.
///
/// Request-level failures carry `error`, store-level failures carry `message`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::InvalidId(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                StatusCode::BAD_REQUEST
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.public_message();
        let body = match self {
            AppError::Authentication(_)
            | AppError::NotFound(_)
            | AppError::Validation(_)
            | AppError::Conflict(_) => ErrorResponse {
                error: Some(message),
                message: None,
            },
            _ => ErrorResponse {
                error: None,
                message: Some(message),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn request_errors_use_error_key() {
        let response = AppError::NotFound("Kitob topilmadi".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, json!({ "error": "Kitob topilmadi" }));

        let response = AppError::Conflict("Foydalanuvchi mavjud".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::Authentication("Login xato".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn store_errors_use_message_key() {
        let response = AppError::InvalidId("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert!(body.get("error").is_none());
        assert!(body["message"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = AppError::Internal("pool poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await["message"], "Internal server error");
    }

    #[tokio::test]
    async fn legacy_response_is_ok_with_err_payload() {
        let err = AppError::InvalidId("nope".to_string());
        assert!(err.is_store_failure());
        let response = err.into_legacy_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_of(response).await["err"]["message"].is_string());
    }

    #[test]
    fn request_errors_are_not_store_failures() {
        assert!(!AppError::Validation("x".to_string()).is_store_failure());
        assert!(!AppError::NotFound("x".to_string()).is_store_failure());
    }
}
