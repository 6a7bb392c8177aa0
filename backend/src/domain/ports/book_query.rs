//! Driving port for book reads.

use async_trait::async_trait;

use crate::domain::{Book, BookId, Error};

/// Read-only book use cases.
#[async_trait]
pub trait BookQuery: Send + Sync {
    /// Every stored book.
    async fn list_all(&self) -> Result<Vec<Book>, Error>;

    /// A single book; `not_found` when `id` is unknown.
    async fn get_by_id(&self, id: &BookId) -> Result<Book, Error>;
}
