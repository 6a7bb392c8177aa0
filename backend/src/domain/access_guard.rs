//! Bearer-token access decision for protected routes.
//!
//! [`authorize`] is a pure function over the raw `Authorization` header value;
//! the HTTP middleware only extracts the header and reports the outcome.

use tracing::debug;

use crate::domain::{Error, TokenError, TokenKeys};

/// Identity proven by a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSubject(String);

impl UserSubject {
    /// Name of the authenticated user.
    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// No token could be found in the header.
    #[error("unauthorized")]
    MissingToken,
    /// A token was present but failed verification.
    #[error("invalid token")]
    InvalidToken,
}

impl From<GuardError> for Error {
    fn from(value: GuardError) -> Self {
        match value {
            GuardError::MissingToken => Error::forbidden("unauthorized"),
            GuardError::InvalidToken => Error::unauthorized("invalid token"),
        }
    }
}

/// Second whitespace-delimited segment of the header value.
///
/// The scheme word is not inspected, so `Token abc` yields `abc`.
pub fn extract_token(raw_header: Option<&str>) -> Option<&str> {
    raw_header?.split_whitespace().nth(1)
}

/// Decide whether a request carrying `raw_header` may proceed.
///
/// # Examples
/// ```
/// use bookshelf::domain::{authorize, GuardError, TokenKeys};
///
/// let keys = TokenKeys::from_secret(b"doc-test-secret-doc-test-secret!!");
/// assert_eq!(authorize(None, &keys), Err(GuardError::MissingToken));
/// assert_eq!(authorize(Some("Bearer nope"), &keys), Err(GuardError::InvalidToken));
/// ```
pub fn authorize(raw_header: Option<&str>, keys: &TokenKeys) -> Result<UserSubject, GuardError> {
    let token = extract_token(raw_header).ok_or(GuardError::MissingToken)?;
    let claims = keys.verify(token).map_err(|err| {
        match &err {
            TokenError::Expired => debug!("rejected expired token"),
            _ => debug!(error = %err, "rejected invalid token"),
        }
        GuardError::InvalidToken
    })?;
    if claims.sub.trim().is_empty() {
        debug!("rejected token with empty subject");
        return Err(GuardError::InvalidToken);
    }
    Ok(UserSubject(claims.sub))
}
