//! Users repository for PostgreSQL

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    messages::USER_EXISTS,
    models::{NewUser, User},
};

use super::UserStore;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, password, age FROM users WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_credentials(&self, name: &str, password: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, password, age FROM users WHERE name = $1 AND password = $2",
        )
        .bind(name)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, password, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, password, age
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            // users_name_key closes the gap between the existence check and this insert
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::Conflict(USER_EXISTS.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
