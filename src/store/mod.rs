use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;

pub mod memory;
pub mod postgres;

/// A catalog entry, keyed by its isbn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, JsonSchema, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// The non-key fields of a [`Book`], replaced as a whole on update.
#[derive(Debug, Clone)]
pub struct BookFields {
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no book matches the given isbn")]
    NotFound,
    #[error("a book with isbn `{0}` already exists")]
    Duplicate(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Persistence port for [`Book`] rows.
///
/// The store is the sole owner of the `books` table. Every operation is a
/// single statement, so existence and uniqueness checks belong to the
/// backing store, not to the callers.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Returns all books, ordered by title ascending.
    async fn list_all(&self) -> Result<Vec<Book>, StoreError>;

    /// Returns the book with the given isbn.
    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError>;

    /// Inserts a new book and returns the stored row.
    ///
    /// Inserting an isbn that already exists fails with a store error.
    async fn create(&self, book: Book) -> Result<Book, StoreError>;

    /// Replaces all non-key fields of the book with the given isbn and
    /// returns the updated row.
    async fn update(&self, isbn: &str, fields: BookFields) -> Result<Book, StoreError>;

    /// Deletes the book with the given isbn.
    async fn remove(&self, isbn: &str) -> Result<(), StoreError>;

    /// Releases whatever resources the store holds.
    async fn close(&self) {}
}
