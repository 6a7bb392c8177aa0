//! Driving port for the sign-in use case.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, SignInCredentials};

/// Verifies credentials and issues a bearer token.
///
/// Failures use these codes:
/// - `unauthorized` for an unknown user or a wrong password.
/// - `invalid_request` with details `{"error":"backend_error"}` when the
///   credential store or hasher fails.
#[async_trait]
pub trait SignInService: Send + Sync {
    /// Sign in with validated credentials.
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<IssuedToken, Error>;
}
