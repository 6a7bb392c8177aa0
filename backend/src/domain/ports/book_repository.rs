//! Driven port for the book store.
//!
//! Every method is a single atomic operation on one record (or a full scan
//! for [`BookRepository::list`]). Implementations must refuse a second book
//! with an existing title by returning
//! [`BookPersistenceError::DuplicateTitle`].

use async_trait::async_trait;

use crate::domain::{Book, BookId, BookPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by book repository adapters.
    pub enum BookPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "book repository query failed: {message}",
        /// The write would give two books the same title.
        DuplicateTitle { title: String } => "a book titled '{title}' already exists",
    }
}

/// Book store with find/insert/update/delete semantics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Look a book up by id.
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookPersistenceError>;

    /// Look a book up by exact title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Book>, BookPersistenceError>;

    /// Every stored book in insertion order.
    async fn list(&self) -> Result<Vec<Book>, BookPersistenceError>;

    /// Store a new book.
    async fn insert(&self, book: &Book) -> Result<(), BookPersistenceError>;

    /// Apply `patch` and return the updated record, or `None` if `id` is unknown.
    async fn update(
        &self,
        id: &BookId,
        patch: &BookPatch,
    ) -> Result<Option<Book>, BookPersistenceError>;

    /// Remove a book and return the removed record, or `None` if `id` is unknown.
    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookPersistenceError>;
}
