//! Business logic services

pub mod books;
pub mod users;

use crate::{config::ApiConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, api_config: &ApiConfig) -> Self {
        Self {
            books: books::BooksService::new(repository.clone(), api_config.max_take),
            users: users::UsersService::new(repository),
        }
    }
}
