//! Backend entry-point: loads settings, prepares persistence, and serves the
//! book catalogue.

mod server;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookshelf::domain::TokenKeys;
use bookshelf::inbound::http::health::HealthState;
use bookshelf::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use bookshelf::settings::{AppSettings, BuildMode, app_settings_from_env};
use server::{ServerConfig, create_server};

/// Read settings from the process environment.
fn load_settings(mode: BuildMode) -> color_eyre::Result<AppSettings> {
    app_settings_from_env(&DefaultEnv::new(), mode).wrap_err("invalid configuration")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(BuildMode::from_debug_assertions())?;

    let mut config = ServerConfig::new(
        TokenKeys::from_secret(&settings.jwt_secret),
        settings.cookie_secure,
        settings.bind_addr,
    );

    match settings.database_url.as_deref() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .wrap_err("failed to apply database migrations")?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_max_size))
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => config = config.with_dev_user(settings.dev_user),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr, "starting HTTP server");
    let server = create_server(health_state.clone(), config)
        .await
        .wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server terminated with an error")?;
    health_state.mark_unhealthy();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn debug_settings_load_from_process_environment() {
        // Debug mode falls back to defaults for anything unset or invalid.
        let settings = load_settings(BuildMode::Debug).expect("debug settings always load");
        assert!(settings.db_pool_max_size > 0);
    }
}
