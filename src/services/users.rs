//! Registration and login

use crate::{
    error::{AppError, AppResult},
    messages::{LOGIN_FAILED, LOGIN_FIELDS_REQUIRED, REGISTER_FIELDS_REQUIRED, USER_EXISTS},
    models::{LoginRequest, RegisterRequest, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a user whose name is not taken yet
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let new_user = request
            .into_new_user()
            .ok_or_else(|| AppError::Validation(REGISTER_FIELDS_REQUIRED.to_string()))?;

        if self
            .repository
            .users
            .find_by_name(&new_user.name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(USER_EXISTS.to_string()));
        }

        // The store rejects a concurrent duplicate with Conflict as well
        let user = self.repository.users.insert(new_user).await?;
        tracing::info!("User registered id={} name={:?}", user.id, user.name);
        Ok(user)
    }

    /// Exact name and password match
    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        let credentials = request
            .into_credentials()
            .ok_or_else(|| AppError::Validation(LOGIN_FIELDS_REQUIRED.to_string()))?;

        match self
            .repository
            .users
            .find_by_credentials(&credentials.name, &credentials.password)
            .await?
        {
            Some(user) => {
                tracing::debug!("Login succeeded for {:?}", user.name);
                Ok(user)
            }
            None => {
                tracing::debug!("Login failed for {:?}", credentials.name);
                Err(AppError::Authentication(LOGIN_FAILED.to_string()))
            }
        }
    }
}
