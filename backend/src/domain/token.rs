//! HS256 bearer tokens.
//!
//! Tokens carry `{ sub, iat, exp }` and live for [`TOKEN_TTL_SECS`]. Expiry
//! is checked with zero leeway.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token lifetime in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Registered claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Name of the authenticated user.
    pub sub: String,
    /// Issue time as a Unix timestamp.
    pub iat: i64,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

/// A freshly signed token together with the claims it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: String,
    claims: Claims,
}

impl IssuedToken {
    /// Compact JWS serialisation.
    pub fn as_str(&self) -> &str {
        self.token.as_str()
    }

    /// Claims signed into the token.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Consume the wrapper, returning the compact token.
    pub fn into_string(self) -> String {
        self.token
    }
}

/// Failures while signing or verifying tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signing failed.
    #[error("failed to sign token: {message}")]
    Encode { message: String },
    /// The token was well formed but past its expiry.
    #[error("token has expired")]
    Expired,
    /// Bad signature, malformed token, or missing claims.
    #[error("token is invalid: {message}")]
    Invalid { message: String },
}

/// Signing and verification keys derived from the server secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    /// Derive HS256 keys from a shared secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token for `subject` valid for one hour from `issued_at`.
    pub fn issue(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: subject.to_owned(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(
            |err| TokenError::Encode {
                message: err.to_string(),
            },
        )?;
        Ok(IssuedToken { token, claims })
    }

    /// Check signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid {
                    message: err.to_string(),
                },
            })
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("algorithm", &"HS256")
            .finish_non_exhaustive()
    }
}
