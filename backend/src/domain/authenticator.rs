//! Sign-in domain service.
//!
//! Looks the user up, checks the bcrypt hash, and signs a one-hour token.
//! Store and hashing failures are collapsed into a single "login error" so
//! callers never see the underlying cause; the cause is logged instead.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{SignInService, UserRepository};
use crate::domain::{Error, IssuedToken, SignInCredentials, TokenKeys, verify_password};

/// [`SignInService`] backed by a [`UserRepository`].
#[derive(Clone)]
pub struct Authenticator<U> {
    users: Arc<U>,
    keys: TokenKeys,
    clock: Arc<dyn Clock>,
}

impl<U> Authenticator<U> {
    /// Create an authenticator over the given credential store.
    pub fn new(users: Arc<U>, keys: TokenKeys, clock: Arc<dyn Clock>) -> Self {
        Self { users, keys, clock }
    }
}

fn backend_error() -> Error {
    Error::invalid_request("login error").with_details(json!({ "error": "backend_error" }))
}

#[async_trait]
impl<U> SignInService for Authenticator<U>
where
    U: UserRepository,
{
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<IssuedToken, Error> {
        let user = match self.users.find_by_name(credentials.name()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(reason = "user_not_found", "sign-in rejected");
                return Err(Error::unauthorized("user not found"));
            }
            Err(err) => {
                error!(error = %err, "credential lookup failed");
                return Err(backend_error());
            }
        };

        let matches = verify_password(credentials.password(), user.password_hash())
            .await
            .map_err(|err| {
                error!(error = %err, "password verification failed");
                backend_error()
            })?;
        if !matches {
            warn!(reason = "invalid_password", "sign-in rejected");
            return Err(Error::unauthorized("invalid password"));
        }

        let issued = self.keys.issue(user.name(), self.clock.utc()).map_err(|err| {
            error!(error = %err, "token signing failed");
            backend_error()
        })?;
        info!(user = user.name(), "sign-in succeeded");
        Ok(issued)
    }
}
