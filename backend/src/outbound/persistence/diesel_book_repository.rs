//! PostgreSQL-backed `BookRepository` using Diesel.
//!
//! Title uniqueness is enforced by the `books_title_key` constraint, so a
//! create that races past the service-level check still fails cleanly.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookPersistenceError, BookRepository};
use crate::domain::{Book, BookId, BookPatch};

use super::error_mapping::DbFailure;
use super::models::{BookChangeset, BookRow, NewBookRow};
use super::pool::DbPool;
use super::schema::books;

/// Diesel implementation of [`BookRepository`].
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a failure, naming `title` if a uniqueness check fired.
fn map_failure(failure: impl Into<DbFailure>, title: Option<&str>) -> BookPersistenceError {
    match failure.into() {
        DbFailure::Connection(message) => BookPersistenceError::connection(message),
        DbFailure::UniqueViolation => {
            BookPersistenceError::duplicate_title(title.unwrap_or_default())
        }
        DbFailure::Query(message) => BookPersistenceError::query(message),
    }
}

fn map_error(failure: impl Into<DbFailure>) -> BookPersistenceError {
    map_failure(failure, None)
}

fn into_book(row: BookRow) -> Result<Book, BookPersistenceError> {
    let id = row.id;
    Book::try_from(row).map_err(|err| {
        BookPersistenceError::query(format!("stored book {id} is invalid: {err}"))
    })
}

fn into_optional_book(row: Option<BookRow>) -> Result<Option<Book>, BookPersistenceError> {
    row.map(into_book).transpose()
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_error)?;
        let row = books::table
            .find(*id.as_uuid())
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        into_optional_book(row)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Book>, BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_error)?;
        let row = books::table
            .filter(books::title.eq(title))
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        into_optional_book(row)
    }

    async fn list(&self) -> Result<Vec<Book>, BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_error)?;
        let rows: Vec<BookRow> = books::table
            .order((books::created_at.asc(), books::id.asc()))
            .select(BookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        rows.into_iter().map(into_book).collect()
    }

    async fn insert(&self, book: &Book) -> Result<(), BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_error)?;
        diesel::insert_into(books::table)
            .values(NewBookRow::from(book))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_failure(err, Some(book.title())))
    }

    async fn update(
        &self,
        id: &BookId,
        patch: &BookPatch,
    ) -> Result<Option<Book>, BookPersistenceError> {
        // Diesel rejects an empty SET clause; an empty patch is a plain read.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_error)?;
        let row = diesel::update(books::table.find(*id.as_uuid()))
            .set(BookChangeset::from(patch))
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(err, patch.title()))?;
        into_optional_book(row)
    }

    async fn delete(&self, id: &BookId) -> Result<Option<Book>, BookPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_error)?;
        let row = diesel::delete(books::table.find(*id.as_uuid()))
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        into_optional_book(row)
    }
}
