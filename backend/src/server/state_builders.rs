//! Builders wiring domain services to the persistence adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use bookshelf::domain::ports::{
    BookCommand, BookQuery, BookRepository, SignInService, UserRepository,
};
use bookshelf::domain::{
    Authenticator, BookService, DEFAULT_HASH_COST, TokenKeys, User, hash_password,
};
use bookshelf::inbound::http::state::{CookiePolicy, HttpState};
use bookshelf::outbound::memory::{InMemoryBookRepository, InMemoryUserRepository};
use bookshelf::outbound::persistence::{DieselBookRepository, DieselUserRepository};
use bookshelf::settings::DevUser;

use super::ServerConfig;

type Ports = (
    Arc<dyn SignInService>,
    Arc<dyn BookCommand>,
    Arc<dyn BookQuery>,
);

fn ports_over<U, B>(users: U, books: B, keys: TokenKeys, clock: Arc<dyn Clock>) -> Ports
where
    U: UserRepository + 'static,
    B: BookRepository + 'static,
{
    let books = Arc::new(BookService::new(Arc::new(books)));
    let sign_in = Authenticator::new(Arc::new(users), keys, clock);
    (Arc::new(sign_in), books.clone(), books)
}

async fn in_memory_users(
    dev_user: Option<&DevUser>,
    clock: &dyn Clock,
) -> std::io::Result<InMemoryUserRepository> {
    let Some(dev_user) = dev_user else {
        warn!("in-memory user store is empty; every sign-in will be rejected");
        return Ok(InMemoryUserRepository::new());
    };
    let hash = hash_password(dev_user.password.as_str(), DEFAULT_HASH_COST)
        .await
        .map_err(|err| std::io::Error::other(format!("hashing dev user password: {err}")))?;
    let now = clock.utc();
    info!(user = dev_user.name.as_str(), "seeded in-memory user store");
    Ok(InMemoryUserRepository::with_users([User::new(
        dev_user.name.as_str(),
        hash,
        now,
        now,
    )]))
}

/// Build the handler state for `config`.
///
/// Uses the Diesel adapters when a pool is configured and the in-memory
/// stores otherwise.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the development user cannot be hashed.
pub(crate) async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let keys = config.token_keys.clone();
    let (sign_in, books, books_query) = match &config.db_pool {
        Some(pool) => ports_over(
            DieselUserRepository::new(pool.clone()),
            DieselBookRepository::new(pool.clone()),
            keys.clone(),
            clock,
        ),
        None => {
            let users = in_memory_users(config.dev_user.as_ref(), clock.as_ref()).await?;
            ports_over(users, InMemoryBookRepository::new(), keys.clone(), clock)
        }
    };

    Ok(HttpState::new(
        sign_in,
        books,
        books_query,
        keys,
        CookiePolicy {
            secure: config.cookie_secure,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf::domain::{ErrorCode, SignInCredentials};
    use rstest::rstest;
    use zeroize::Zeroizing;

    fn config(dev_user: Option<DevUser>) -> ServerConfig {
        ServerConfig::new(
            TokenKeys::from_secret(b"state-builder-secret-state-builder"),
            false,
            "127.0.0.1:0".parse().expect("socket address"),
        )
        .with_dev_user(dev_user)
    }

    fn credentials(name: &str, password: &str) -> SignInCredentials {
        SignInCredentials::try_from_parts(name, password).expect("credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn dev_user_can_sign_in_against_memory_store() {
        let state = build_http_state(&config(Some(DevUser {
            name: "dev".to_owned(),
            password: Zeroizing::new("dev-password".to_owned()),
        })))
        .await
        .expect("state");

        let issued = state
            .sign_in
            .sign_in(&credentials("dev", "dev-password"))
            .await
            .expect("sign-in");
        assert_eq!(issued.claims().sub, "dev");
        assert!(!state.cookie.secure);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_memory_store_rejects_everyone() {
        let state = build_http_state(&config(None)).await.expect("state");

        let err = state
            .sign_in
            .sign_in(&credentials("dev", "dev-password"))
            .await
            .expect_err("no users");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert!(state.books_query.list_all().await.expect("list").is_empty());
    }
}
