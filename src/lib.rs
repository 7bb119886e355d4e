//! Library server
//!
//! A REST JSON API over two collections, books and users, with
//! registration and login by name and password.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, &config.api);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
