//! Book CRUD domain service implementing [`BookCommand`] and [`BookQuery`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{BookCommand, BookPersistenceError, BookQuery, BookRepository};
use crate::domain::{Book, BookId, BookPatch, Error, NewBook};

/// Book service over a [`BookRepository`].
#[derive(Clone)]
pub struct BookService<R> {
    books: Arc<R>,
}

impl<R> BookService<R> {
    /// Create a service backed by `books`.
    pub fn new(books: Arc<R>) -> Self {
        Self { books }
    }
}

fn map_persistence_error(err: BookPersistenceError) -> Error {
    match err {
        BookPersistenceError::Connection { message } => {
            error!(error = %message, "book repository unavailable");
            Error::service_unavailable(format!("book repository unavailable: {message}"))
        }
        BookPersistenceError::Query { message } => {
            error!(error = %message, "book repository query failed");
            Error::internal(format!("book repository error: {message}"))
        }
        BookPersistenceError::DuplicateTitle { .. } => already_exists(),
    }
}

fn already_exists() -> Error {
    Error::conflict("book already exists")
}

fn book_not_found() -> Error {
    Error::not_found("book not found")
}

#[async_trait]
impl<R> BookCommand for BookService<R>
where
    R: BookRepository,
{
    async fn create(&self, fields: NewBook) -> Result<Book, Error> {
        let existing = self
            .books
            .find_by_title(fields.title())
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            return Err(already_exists());
        }

        let book = Book::new(BookId::random(), fields);
        self.books
            .insert(&book)
            .await
            .map_err(map_persistence_error)?;
        info!(book_id = %book.id(), "book created");
        Ok(book)
    }

    async fn update(&self, id: &BookId, patch: BookPatch) -> Result<Book, Error> {
        let book = self
            .books
            .update(id, &patch)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(book_not_found)?;
        info!(book_id = %id, "book updated");
        Ok(book)
    }

    async fn delete(&self, id: &BookId) -> Result<Book, Error> {
        let book = self
            .books
            .delete(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(book_not_found)?;
        info!(book_id = %id, "book deleted");
        Ok(book)
    }
}

#[async_trait]
impl<R> BookQuery for BookService<R>
where
    R: BookRepository,
{
    async fn list_all(&self) -> Result<Vec<Book>, Error> {
        self.books.list().await.map_err(map_persistence_error)
    }

    async fn get_by_id(&self, id: &BookId) -> Result<Book, Error> {
        self.books
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(book_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockBookRepository;
    use rstest::{fixture, rstest};

    fn some(value: &str) -> Option<String> {
        Some(value.to_owned())
    }

    #[fixture]
    fn fields() -> NewBook {
        NewBook::try_from_parts(some("T"), some("D"), some("A"), Some(2024)).expect("valid book")
    }

    fn service(repo: MockBookRepository) -> BookService<MockBookRepository> {
        BookService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn create_inserts_when_title_is_free(fields: NewBook) {
        let mut repo = MockBookRepository::new();
        repo.expect_find_by_title()
            .withf(|title| title == "T")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|book| book.title() == "T" && book.year() == 2024)
            .times(1)
            .returning(|_| Ok(()));

        let book = service(repo).create(fields).await.expect("created");
        assert_eq!(book.title(), "T");
    }

    #[rstest]
    #[tokio::test]
    async fn create_with_taken_title_conflicts_without_writing(fields: NewBook) {
        let existing = Book::new(BookId::random(), fields.clone());
        let mut repo = MockBookRepository::new();
        repo.expect_find_by_title()
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_insert().times(0);

        let err = service(repo).create(fields).await.expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "book already exists");
    }

    #[rstest]
    #[tokio::test]
    async fn create_maps_lost_race_to_conflict(fields: NewBook) {
        let mut repo = MockBookRepository::new();
        repo.expect_find_by_title().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(BookPersistenceError::duplicate_title("T")));

        let err = service(repo).create(fields).await.expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let mut repo = MockBookRepository::new();
        repo.expect_update().times(1).returning(|_, _| Ok(None));
        repo.expect_insert().times(0);

        let patch = BookPatch::try_from_parts(some("T2"), None, None, None).expect("patch");
        let err = service(repo)
            .update(&BookId::random(), patch)
            .await
            .expect_err("missing book");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "book not found");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_returns_removed_snapshot(fields: NewBook) {
        let book = Book::new(BookId::random(), fields);
        let id = book.id();
        let snapshot = book.clone();
        let mut repo = MockBookRepository::new();
        repo.expect_delete()
            .withf(move |candidate| *candidate == id)
            .return_once(move |_| Ok(Some(snapshot)));

        let removed = service(repo).delete(&id).await.expect("deleted");
        assert_eq!(removed, book);
    }

    #[rstest]
    #[tokio::test]
    async fn get_by_id_of_unknown_id_is_not_found() {
        let mut repo = MockBookRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo)
            .get_by_id(&BookId::random())
            .await
            .expect_err("missing book");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(BookPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(BookPersistenceError::query("bad sql"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn store_failures_map_to_backend_errors(
        #[case] failure: BookPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockBookRepository::new();
        repo.expect_list().return_once(move || Err(failure));

        let err = service(repo).list_all().await.expect_err("store failure");
        assert_eq!(err.code(), expected);
    }
}
