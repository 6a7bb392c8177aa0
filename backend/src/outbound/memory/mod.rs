//! In-process adapters for the driven ports.
//!
//! Used by the test suite and by debug builds started without
//! `DATABASE_URL`. Both keep the same uniqueness rules as the PostgreSQL
//! schema so behaviour does not depend on the backend.

mod book_repository;
mod user_repository;

pub use book_repository::InMemoryBookRepository;
pub use user_repository::InMemoryUserRepository;
