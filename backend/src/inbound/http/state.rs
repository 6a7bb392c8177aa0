//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see domain ports, so tests
//! can swap in any adapter without touching the handlers.

use std::sync::Arc;

use crate::domain::TokenKeys;
use crate::domain::ports::{BookCommand, BookQuery, SignInService};

/// Sign-in cookie settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Emit the `Secure` attribute.
    pub secure: bool,
}

/// Dependency bundle for HTTP handlers and the bearer guard.
#[derive(Clone)]
pub struct HttpState {
    pub sign_in: Arc<dyn SignInService>,
    pub books: Arc<dyn BookCommand>,
    pub books_query: Arc<dyn BookQuery>,
    pub token_keys: TokenKeys,
    pub cookie: CookiePolicy,
}

impl HttpState {
    /// Bundle the ports with the token keys the guard verifies against.
    pub fn new(
        sign_in: Arc<dyn SignInService>,
        books: Arc<dyn BookCommand>,
        books_query: Arc<dyn BookQuery>,
        token_keys: TokenKeys,
        cookie: CookiePolicy,
    ) -> Self {
        Self {
            sign_in,
            books,
            books_query,
            token_keys,
            cookie,
        }
    }
}
