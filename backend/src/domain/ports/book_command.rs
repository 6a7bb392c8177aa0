//! Driving port for book mutations.

use async_trait::async_trait;

use crate::domain::{Book, BookId, BookPatch, Error, NewBook};

/// Mutating book use cases. Callers must have passed the access guard.
#[async_trait]
pub trait BookCommand: Send + Sync {
    /// Create a book with a fresh id; `conflict` when the title is taken.
    async fn create(&self, fields: NewBook) -> Result<Book, Error>;

    /// Apply a partial update; `not_found` when `id` is unknown.
    async fn update(&self, id: &BookId, patch: BookPatch) -> Result<Book, Error>;

    /// Delete a book and return its last state; `not_found` when `id` is unknown.
    async fn delete(&self, id: &BookId) -> Result<Book, Error>;
}
