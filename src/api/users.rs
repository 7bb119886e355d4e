//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    messages::{REGISTERED, WELCOME},
    models::user::{LoginRequest, RegisterRequest, User},
    AppState,
};

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub message: String,
    pub user: User,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Missing field", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users.register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: REGISTERED.to_string(),
            user,
        }),
    ))
}

/// Log in with name and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials match", body = UserResponse),
        (status = 400, description = "Missing field", body = crate::error::ErrorResponse),
        (status = 401, description = "Credentials do not match", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.login(request).await?;
    Ok(Json(UserResponse {
        message: WELCOME.to_string(),
        user,
    }))
}
