//! Books repository for PostgreSQL

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookFilter, NewBook, UpdateBook},
};

use super::BookStore;

const BOOK_COLUMNS: &str = "id, name, price, image, author, year";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find(&self, filter: &BookFilter, skip: u64, limit: u64) -> AppResult<Vec<Book>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM books WHERE TRUE",
            BOOK_COLUMNS
        ));

        if let Some(ref author) = filter.author {
            builder.push(" AND author = ").push_bind(author.clone());
        }
        if let Some(year) = filter.year {
            builder.push(" AND year = ").push_bind(year);
        }

        builder
            .push(" ORDER BY seq LIMIT ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(skip).unwrap_or(i64::MAX));

        let books = builder
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (id, name, price, image, author, year)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&book.name)
        .bind(book.price)
        .bind(&book.image)
        .bind(&book.author)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_by_id(&self, id: Uuid, patch: &UpdateBook) -> AppResult<Option<Book>> {
        let updated = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                image = COALESCE($4, image),
                author = COALESCE($5, author),
                year = COALESCE($6, year)
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(patch.price)
        .bind(&patch.image)
        .bind(&patch.author)
        .bind(patch.year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let deleted = sqlx::query_as::<_, Book>(&format!(
            "DELETE FROM books WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
