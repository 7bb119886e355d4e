//! User model and related request types

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Stored user document. The password is kept verbatim but never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    #[schema(write_only)]
    pub password: String,
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub age: i32,
}

impl NewUser {
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            password: self.password,
            age: self.age,
        }
    }
}

/// Registration request
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[validate(required)]
    pub age: Option<i32>,
}

impl RegisterRequest {
    pub fn into_new_user(self) -> Option<NewUser> {
        if self.validate().is_err() {
            return None;
        }
        let age = self.age.filter(|a| *a != 0)?;
        Some(NewUser {
            name: self.name?,
            password: self.password?,
            age,
        })
    }
}

/// Login request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Credentials pulled out of a [`LoginRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Option<Credentials> {
        if self.validate().is_err() {
            return None;
        }
        Some(Credentials {
            name: self.name?,
            password: self.password?,
        })
    }
}
