//! In-process store for both collections, used by the `memory` backend and in tests

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    messages::USER_EXISTS,
    models::{Book, BookFilter, NewBook, NewUser, UpdateBook, User},
};

use super::{BookStore, UserStore};

/// Documents are kept in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: RwLock<Vec<Book>>,
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn find(&self, filter: &BookFilter, skip: u64, limit: u64) -> AppResult<Vec<Book>> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|book| filter.matches(book))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        let created = book.into_book(Uuid::new_v4());
        self.books.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_by_id(&self, id: Uuid, patch: &UpdateBook) -> AppResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|book| book.id == id).map(|book| {
            patch.apply_to(book);
            book.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books
            .iter()
            .position(|book| book.id == id)
            .map(|index| books.remove(index)))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.name == name).cloned())
    }

    async fn find_by_credentials(&self, name: &str, password: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.name == name && user.password == password)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        // Check and push under one write lock so concurrent registrations cannot both win
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.name == user.name) {
            return Err(AppError::Conflict(USER_EXISTS.to_string()));
        }
        let created = user.into_user(Uuid::new_v4());
        users.push(created.clone());
        Ok(created)
    }
}
