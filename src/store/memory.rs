use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Book, BookFields, BookStore, StoreError};

/// [`BookStore`] holding rows in process memory.
///
/// Serves when no database is configured and backs the integration tests.
/// The whole map sits behind one lock and every operation takes it exactly
/// once, so there is no read-modify-write window between statements.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<BTreeMap<String, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        let mut books: Vec<Book> = self.books.read().await.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(books)
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        self.books
            .read()
            .await
            .get(isbn)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;

        if books.contains_key(&book.isbn) {
            return Err(StoreError::Duplicate(book.isbn));
        }

        books.insert(book.isbn.clone(), book.clone());

        Ok(book)
    }

    async fn update(&self, isbn: &str, fields: BookFields) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;
        let book = books.get_mut(isbn).ok_or(StoreError::NotFound)?;

        book.amazon_url = fields.amazon_url;
        book.author = fields.author;
        book.language = fields.language;
        book.pages = fields.pages;
        book.publisher = fields.publisher;
        book.title = fields.title;
        book.year = fields.year;

        Ok(book.clone())
    }

    async fn remove(&self, isbn: &str) -> Result<(), StoreError> {
        self.books
            .write()
            .await
            .remove(isbn)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
