//! bcrypt password hashing.
//!
//! bcrypt is deliberately slow, so both hashing and verification run on
//! Tokio's blocking pool rather than on the request worker.

use zeroize::Zeroizing;

/// bcrypt cost used when seeding users.
pub const DEFAULT_HASH_COST: u32 = 10;

/// Stored bcrypt hash in modular crypt format (`$2b$...`).
///
/// `Debug` output never includes the hash itself.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a hash loaded from storage.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Access the encoded hash for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Failures raised while hashing or verifying passwords.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// bcrypt rejected the input or the stored hash.
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    /// The blocking task panicked or was cancelled.
    #[error("password worker failed: {message}")]
    Worker { message: String },
}

fn worker_error(err: tokio::task::JoinError) -> PasswordError {
    PasswordError::Worker {
        message: err.to_string(),
    }
}

/// Hash `password` with a fresh salt at the given cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<PasswordHash, PasswordError> {
    let password = Zeroizing::new(password.to_owned());
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
        .await
        .map_err(worker_error)??;
    Ok(PasswordHash(hash))
}

/// Check `password` against `hash`.
///
/// Returns `Ok(false)` on mismatch; errors are reserved for malformed hashes
/// and worker failures.
pub async fn verify_password(password: &str, hash: &PasswordHash) -> Result<bool, PasswordError> {
    let password = Zeroizing::new(password.to_owned());
    let hash = hash.0.clone();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password.as_str(), &hash))
        .await
        .map_err(worker_error)??;
    Ok(matches)
}
