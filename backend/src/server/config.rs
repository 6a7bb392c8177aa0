//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use bookshelf::domain::TokenKeys;
use bookshelf::outbound::persistence::DbPool;
use bookshelf::settings::DevUser;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) token_keys: TokenKeys,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) dev_user: Option<DevUser>,
}

impl ServerConfig {
    /// Construct a configuration that uses the in-memory stores.
    #[must_use]
    pub fn new(token_keys: TokenKeys, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            token_keys,
            cookie_secure,
            bind_addr,
            db_pool: None,
            dev_user: None,
        }
    }

    /// Attach a database connection pool; the Diesel adapters replace the
    /// in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed the in-memory user store. Ignored when a pool is attached.
    #[must_use]
    pub fn with_dev_user(mut self, user: Option<DevUser>) -> Self {
        self.dev_user = user;
        self
    }
}
