//! Sign-in credential primitives.
//!
//! Inbound adapters hand raw strings to [`SignInCredentials::try_from_parts`]
//! so presence checks happen before any port is called.

use zeroize::Zeroizing;

/// Returned when a sign-in payload is missing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Name was missing or empty.
    #[error("name must not be empty")]
    EmptyName,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl CredentialsValidationError {
    /// Name of the offending request field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyPassword => "password",
        }
    }

    /// Machine-readable reason for error details.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `name` is non-empty and kept verbatim; lookups match it exactly.
/// - `password` is non-empty and kept verbatim, whitespace included.
///
/// # Examples
/// ```
/// use bookshelf::domain::SignInCredentials;
///
/// let creds = SignInCredentials::try_from_parts("subhan", "hunter2").unwrap();
/// assert_eq!(creds.name(), "subhan");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    name: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Build credentials from raw request values.
    pub fn try_from_parts(name: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        if name.is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            name: name.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// User name used for the credential lookup.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Plaintext password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}
