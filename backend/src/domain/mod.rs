//! Domain primitives, services, and ports.
//!
//! Nothing here depends on actix or Diesel. Inbound adapters call the driving
//! ports ([`ports::SignInService`], [`ports::BookCommand`],
//! [`ports::BookQuery`]); outbound adapters implement the driven ones
//! ([`ports::UserRepository`], [`ports::BookRepository`]).

pub mod access_guard;
pub mod auth;
pub mod authenticator;
pub mod book;
pub mod book_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod token;
pub mod trace_id;
pub mod user;

pub use self::access_guard::{GuardError, UserSubject, authorize, extract_token};
pub use self::auth::{CredentialsValidationError, SignInCredentials};
pub use self::authenticator::Authenticator;
pub use self::book::{Book, BookId, BookPatch, BookValidationError, NewBook};
pub use self::book_service::BookService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{
    DEFAULT_HASH_COST, PasswordError, PasswordHash, hash_password, verify_password,
};
pub use self::token::{Claims, IssuedToken, TOKEN_TTL_SECS, TokenError, TokenKeys};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::User;
