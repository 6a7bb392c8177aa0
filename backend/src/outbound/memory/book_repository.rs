//! `BookRepository` held in a mutex-guarded vector.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{BookPersistenceError, BookRepository};
use crate::domain::{Book, BookId, BookPatch};

/// Book store that lives for the lifetime of the process.
///
/// Records keep insertion order. The title check and the write happen under
/// one lock, so concurrent creates with the same title cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

impl InMemoryBookRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Book>>, BookPersistenceError> {
        self.books
            .lock()
            .map_err(|_| BookPersistenceError::query("book store lock poisoned"))
    }
}

fn title_taken(books: &[Book], title: &str, except: Option<BookId>) -> bool {
    books
        .iter()
        .any(|book| book.title() == title && Some(book.id()) != except)
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookPersistenceError> {
        Ok(self.lock()?.iter().find(|book| book.id() == *id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Book>, BookPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|book| book.title() == title)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Book>, BookPersistenceError> {
        Ok(self.lock()?.clone())
    }

    async fn insert(&self, book: &Book) -> Result<(), BookPersistenceError> {
        let mut books = self.lock()?;
        if title_taken(&books, book.title(), None) {
            return Err(BookPersistenceError::duplicate_title(book.title()));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &BookId,
        patch: &BookPatch,
    ) -> Result<Option<Book>, BookPersistenceError> {
        let mut books = self.lock()?;
        let Some(index) = books.iter().position(|book| book.id() == *id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title() {
            if title_taken(&books, title, Some(*id)) {
                return Err(BookPersistenceError::duplicate_title(title));
            }
        }
        Ok(books.get_mut(index).map(|book| {
            book.apply(patch);
            book.clone()
        }))
    }

    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookPersistenceError> {
        let mut books = self.lock()?;
        Ok(books
            .iter()
            .position(|book| book.id() == *id)
            .map(|index| books.remove(index)))
    }
}
