//! Diesel row structs. Internal to the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Book, BookId, BookPatch, NewBook, PasswordHash, User};

use super::schema::{books, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            row.name,
            PasswordHash::from_stored(row.password_hash),
            row.created_at,
            row.updated_at,
        )
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            name: user.name(),
            password_hash: user.password_hash().as_str(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
    pub year: i32,
}

impl TryFrom<BookRow> for Book {
    type Error = crate::domain::BookValidationError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let fields = NewBook::try_from_parts(
            Some(row.title),
            Some(row.description),
            Some(row.author),
            Some(row.year),
        )?;
        Ok(Book::new(BookId::from_uuid(row.id), fields))
    }
}

/// `created_at` is filled by the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub author: &'a str,
    pub year: i32,
}

impl<'a> From<&'a Book> for NewBookRow<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            id: *book.id().as_uuid(),
            title: book.title(),
            description: book.description(),
            author: book.author(),
            year: book.year(),
        }
    }
}

/// Partial update; `None` columns are left out of the `SET` clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books)]
pub(crate) struct BookChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub author: Option<&'a str>,
    pub year: Option<i32>,
}

impl<'a> From<&'a BookPatch> for BookChangeset<'a> {
    fn from(patch: &'a BookPatch) -> Self {
        Self {
            title: patch.title(),
            description: patch.description(),
            author: patch.author(),
            year: patch.year(),
        }
    }
}
