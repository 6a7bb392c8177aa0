//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between row structs and domain types.
//! Queries run on `diesel-async` connections checked out of a `bb8` pool;
//! schema migrations are embedded and applied at startup.

mod diesel_book_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
