//! Domain ports: the traits adapters implement (driven) or call (driving).

mod macros;
pub(crate) use macros::define_port_error;

mod book_command;
mod book_query;
mod book_repository;
mod sign_in_service;
mod user_repository;

pub use book_command::BookCommand;
pub use book_query::BookQuery;
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookPersistenceError, BookRepository};
pub use sign_in_service::SignInService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
