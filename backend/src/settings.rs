//! Environment-driven application settings.
//!
//! Everything is read through [`mockable::Env`] so the parsing rules can be
//! tested without touching the process environment. Debug builds tolerate
//! missing or malformed values (logging a warning and using a default);
//! release builds reject them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

const JWT_SECRET_ENV: &str = "JWT_SECRET";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const APP_ENV_ENV: &str = "APP_ENV";
const COOKIE_SECURE_ENV: &str = "COOKIE_SECURE";
const PORT_ENV: &str = "PORT";
const BIND_HOST_ENV: &str = "BIND_HOST";
const POOL_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";
const DEV_USER_NAME_ENV: &str = "DEV_USER_NAME";
const DEV_USER_PASSWORD_ENV: &str = "DEV_USER_PASSWORD";

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_SIZE: u32 = 10;
/// Minimum signing secret length accepted in release builds.
pub const JWT_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Build mode used to pick between lenient and strict validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or invalid values fall back to defaults with a warning.
    Debug,
    /// Missing or invalid values are errors.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The signing secret is too short for release builds.
    #[error("JWT_SECRET too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Credentials loaded into the in-memory user store of a database-less
/// debug run.
pub struct DevUser {
    /// User name.
    pub name: String,
    /// Plaintext password, hashed at startup.
    pub password: Zeroizing<String>,
}

/// Validated settings for the HTTP server and its adapters.
pub struct AppSettings {
    /// HS256 signing secret.
    pub jwt_secret: Zeroizing<Vec<u8>>,
    /// PostgreSQL URL; `None` selects the in-memory stores.
    pub database_url: Option<String>,
    /// Whether the `token` cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Listening address.
    pub bind_addr: SocketAddr,
    /// Maximum pooled database connections.
    pub db_pool_max_size: u32,
    /// Optional user seeded into the in-memory store.
    pub dev_user: Option<DevUser>,
}

/// Build settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use bookshelf::settings::{BuildMode, app_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "DATABASE_URL" => Some("postgres://localhost/bookshelf".to_owned()),
///     "APP_ENV" => Some("development".to_owned()),
///     _ => None,
/// });
///
/// let settings = app_settings_from_env(&env, BuildMode::Release).expect("valid settings");
/// assert!(!settings.cookie_secure);
/// assert_eq!(settings.bind_addr.port(), 3000);
/// ```
pub fn app_settings_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<AppSettings, SettingsError> {
    let jwt_secret = jwt_secret_from_env(env, mode)?;
    let database_url = database_url_from_env(env, mode)?;
    let cookie_secure = cookie_secure_from_env(env, mode)?;
    let port = parse_or_default(env, mode, PORT_ENV, DEFAULT_PORT, "a TCP port number")?;
    let host = parse_or_default(
        env,
        mode,
        BIND_HOST_ENV,
        IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        "an IP address",
    )?;
    let db_pool_max_size = pool_size_from_env(env, mode)?;
    let dev_user = dev_user_from_env(env, mode, database_url.is_some());

    Ok(AppSettings {
        jwt_secret,
        database_url,
        cookie_secure,
        bind_addr: SocketAddr::new(host, port),
        db_pool_max_size,
        dev_user,
    })
}

fn jwt_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
    match env.string(JWT_SECRET_ENV) {
        Some(value) => {
            let secret = Zeroizing::new(value.into_bytes());
            let length = secret.len();
            if length >= JWT_SECRET_MIN_LEN {
                return Ok(secret);
            }
            if mode.is_debug() && length > 0 {
                warn!(length, "JWT_SECRET shorter than recommended (dev only)");
                return Ok(secret);
            }
            if mode.is_debug() {
                warn!("JWT_SECRET empty; using ephemeral secret (dev only)");
                return Ok(ephemeral_secret());
            }
            Err(SettingsError::SecretTooShort {
                length,
                min_len: JWT_SECRET_MIN_LEN,
            })
        }
        None => debug_warn_or_error(
            mode,
            SettingsError::MissingEnv {
                name: JWT_SECRET_ENV,
            },
            || {
                warn!("JWT_SECRET not set; using ephemeral secret, tokens will not survive restarts");
                ephemeral_secret()
            },
        ),
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    rand::thread_rng().fill_bytes(bytes.as_mut_slice());
    bytes
}

fn database_url_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Option<String>, SettingsError> {
    match env.string(DATABASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
        Some(url) => Ok(Some(url)),
        None => debug_warn_or_error(
            mode,
            SettingsError::MissingEnv {
                name: DATABASE_URL_ENV,
            },
            || {
                warn!("DATABASE_URL not set; using in-memory stores (dev only)");
                None
            },
        ),
    }
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SettingsError> {
    let default_secure = env
        .string(APP_ENV_ENV)
        .is_none_or(|value| !value.eq_ignore_ascii_case("development"));

    match env.string(COOKIE_SECURE_ENV) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None => {
                let err = SettingsError::InvalidEnv {
                    name: COOKIE_SECURE_ENV,
                    value: value.clone(),
                    expected: BOOL_EXPECTED,
                };
                debug_warn_or_error(mode, err, || {
                    warn!(value = %value, "invalid COOKIE_SECURE; using APP_ENV default");
                    default_secure
                })
            }
        },
        None => Ok(default_secure),
    }
}

fn pool_size_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<u32, SettingsError> {
    let size = parse_or_default(
        env,
        mode,
        POOL_SIZE_ENV,
        DEFAULT_POOL_SIZE,
        "a positive integer",
    )?;
    if size > 0 {
        return Ok(size);
    }
    debug_warn_or_error(
        mode,
        SettingsError::InvalidEnv {
            name: POOL_SIZE_ENV,
            value: size.to_string(),
            expected: "a positive integer",
        },
        || {
            warn!("DB_POOL_MAX_SIZE=0; using default");
            DEFAULT_POOL_SIZE
        },
    )
}

fn dev_user_from_env<E: Env>(env: &E, mode: BuildMode, has_database: bool) -> Option<DevUser> {
    let name = env.string(DEV_USER_NAME_ENV)?;
    let password = Zeroizing::new(env.string(DEV_USER_PASSWORD_ENV)?);
    if !mode.is_debug() || has_database {
        warn!("DEV_USER_NAME ignored outside database-less debug runs");
        return None;
    }
    let name = name.trim();
    if name.is_empty() || password.is_empty() {
        warn!("DEV_USER_NAME or DEV_USER_PASSWORD blank; not seeding");
        return None;
    }
    Some(DevUser {
        name: name.to_owned(),
        password,
    })
}

fn parse_or_default<E, T>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, SettingsError>
where
    E: Env,
    T: FromStr,
{
    let Some(value) = env.string(name) else {
        return Ok(default);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(parsed),
        Err(_) => {
            let err = SettingsError::InvalidEnv {
                name,
                value: value.clone(),
                expected,
            };
            debug_warn_or_error(mode, err, || {
                warn!(value = %value, "invalid {name}; using default");
                default
            })
        }
    }
}

fn debug_warn_or_error<T, F>(mode: BuildMode, error: SettingsError, fallback: F) -> Result<T, SettingsError>
where
    F: FnOnce() -> T,
{
    if mode.is_debug() {
        Ok(fallback())
    } else {
        Err(error)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
