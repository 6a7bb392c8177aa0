//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;

use crate::domain::{Authenticator, BookService, TokenKeys, User, hash_password};
use crate::inbound::http::state::{CookiePolicy, HttpState};
use crate::outbound::memory::{InMemoryBookRepository, InMemoryUserRepository};

/// Signing secret shared by handler tests.
pub const TEST_SECRET: &[u8] = b"http-test-secret-http-test-secret";

/// Name and password of the user [`http_state`] seeds.
pub const TEST_USER: (&str, &str) = ("subhan", "hunter2");

/// Keys matching [`TEST_SECRET`].
pub fn test_keys() -> TokenKeys {
    TokenKeys::from_secret(TEST_SECRET)
}

/// Build handler state over fresh in-memory stores with one known user.
///
/// Hashing uses the minimum bcrypt cost to keep tests fast.
pub async fn http_state() -> HttpState {
    let (name, password) = TEST_USER;
    let hash = hash_password(password, 4).await.expect("hash test password");
    let now = Utc::now();
    let users = InMemoryUserRepository::with_users([User::new(name, hash, now, now)]);
    let books = Arc::new(BookService::new(Arc::new(InMemoryBookRepository::new())));
    let sign_in = Authenticator::new(Arc::new(users), test_keys(), Arc::new(DefaultClock));

    HttpState::new(
        Arc::new(sign_in),
        books.clone(),
        books,
        test_keys(),
        CookiePolicy { secure: false },
    )
}

/// `Authorization` header value carrying a freshly issued token for `name`.
pub fn bearer_for(name: &str) -> String {
    let issued = test_keys().issue(name, Utc::now()).expect("issue test token");
    format!("Bearer {}", issued.as_str())
}
