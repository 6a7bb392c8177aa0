//! Create or replace a sign-in user in the PostgreSQL store.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use bookshelf::domain::ports::UserRepository;
use bookshelf::domain::{DEFAULT_HASH_COST, User, hash_password};
use bookshelf::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use mockable::{Clock, DefaultClock};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

/// `seed-user` command arguments.
#[derive(Parser)]
#[command(
    name = "seed-user",
    about = "Create or replace a user allowed to sign in",
    version
)]
struct CliArgs {
    /// User name; an existing user with this name is replaced.
    #[arg(long, value_name = "name")]
    name: String,
    /// Plaintext password to hash.
    #[arg(long, value_name = "password", env = "SEED_USER_PASSWORD", hide_env_values = true)]
    password: String,
    /// bcrypt work factor.
    #[arg(long, value_name = "cost", default_value_t = DEFAULT_HASH_COST)]
    cost: u32,
    /// Database connection URL.
    #[arg(long = "database-url", value_name = "url", env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let args = CliArgs::parse();
    let name = args.name.trim().to_owned();
    if name.is_empty() {
        return Err(eyre!("--name must not be blank"));
    }
    let password = Zeroizing::new(args.password);
    if password.is_empty() {
        return Err(eyre!("--password must not be empty"));
    }

    run_pending_migrations(&args.database_url)
        .await
        .wrap_err("apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(&args.database_url).with_max_size(1))
        .await
        .wrap_err("create database pool")?;

    let hash = hash_password(password.as_str(), args.cost)
        .await
        .wrap_err("hash password")?;
    let now = DefaultClock.utc();
    DieselUserRepository::new(pool)
        .upsert(&User::new(name.as_str(), hash, now, now))
        .await
        .wrap_err("store user")?;

    info!(user = name.as_str(), "user seeded");
    println!("seeded user {name}");
    Ok(())
}
