//! Repository layer: document store access for the books and users collections

pub mod books;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookFilter, NewBook, NewUser, UpdateBook, User},
};

/// Access to the books collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Matching books in insertion order, windowed by `skip` / `limit`
    async fn find(&self, filter: &BookFilter, skip: u64, limit: u64) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;

    async fn insert(&self, book: NewBook) -> AppResult<Book>;

    /// Merge `patch` into the stored book and return the updated document
    async fn update_by_id(&self, id: Uuid, patch: &UpdateBook) -> AppResult<Option<Book>>;

    /// Remove a book, returning it if it existed
    async fn delete_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;

    /// Cheap round trip used by the readiness check
    async fn ping(&self) -> AppResult<()>;
}

/// Access to the users collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>>;

    async fn find_by_credentials(&self, name: &str, password: &str) -> AppResult<Option<User>>;

    /// Insert a user. A name that is already taken yields `AppError::Conflict`.
    async fn insert(&self, user: NewUser) -> AppResult<User>;
}

/// Main repository struct holding the collection stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub users: Arc<dyn UserStore>,
}

impl Repository {
    /// Create a repository backed by the given PostgreSQL pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            users: Arc::new(users::UsersRepository::new(pool)),
        }
    }

    /// Create a repository that keeps every document in process memory
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            books: store.clone(),
            users: store,
        }
    }

    pub fn from_stores(books: Arc<dyn BookStore>, users: Arc<dyn UserStore>) -> Self {
        Self { books, users }
    }
}
