//! Book catalog service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    messages::{BOOK_FIELDS_REQUIRED, BOOK_NOT_FOUND},
    models::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

/// Parse a path identifier; anything that is not a UUID is a store-level failure
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidId(raw.to_string()))
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    max_take: u64,
}

impl BooksService {
    pub fn new(repository: Repository, max_take: u64) -> Self {
        Self {
            repository,
            max_take,
        }
    }

    /// Filtered, paginated listing
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let (filter, pagination) = query.normalize(self.max_take);
        let Some(filter) = filter else {
            tracing::debug!("Non-numeric year filter {:?}, nothing can match", query.year);
            return Ok(Vec::new());
        };

        self.repository
            .books
            .find(&filter, pagination.skip(), pagination.take)
            .await
    }

    pub async fn get(&self, id: &str) -> AppResult<Book> {
        let id = parse_id(id)?;
        self.repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, request: CreateBook) -> AppResult<Book> {
        let new_book = request
            .into_new_book()
            .ok_or_else(|| AppError::Validation(BOOK_FIELDS_REQUIRED.to_string()))?;

        let book = self.repository.books.insert(new_book).await?;
        tracing::info!("Book created id={} name={:?}", book.id, book.name);
        Ok(book)
    }

    pub async fn update(&self, id: &str, patch: UpdateBook) -> AppResult<Book> {
        let id = parse_id(id)?;
        let book = self
            .repository
            .books
            .update_by_id(id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        tracing::info!("Book updated id={}", book.id);
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        self.repository
            .books
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        tracing::info!("Book deleted id={}", id);
        Ok(())
    }

    /// Store round trip for the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
