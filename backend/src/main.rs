//! Service entry-point: loads settings, prepares storage, and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Report, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pr_reviewers::AppSettings;
use pr_reviewers::inbound::http::health::HealthState;
use pr_reviewers::outbound::persistence::{DbPool, run_pending_migrations};
use pr_reviewers::settings::RunMode;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    init_tracing(settings.run_mode().map_err(Report::new)?);

    let config = server_config(&settings).await?;
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated with an error")
}

fn init_tracing(mode: RunMode) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = match mode {
        RunMode::Release => builder.json().try_init(),
        RunMode::Debug => builder.try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let mut config = ServerConfig::new(settings.bind_addr().map_err(Report::new)?)
        .with_request_timeout(settings.request_timeout().map_err(Report::new)?)
        .with_shutdown_timeout(settings.shutdown_timeout())
        .with_policy(settings.reassignment_policy());

    if let Some(pool_config) = settings.pool_config().map_err(Report::new)? {
        if settings.skip_migrations {
            info!("skipping database migrations");
        } else {
            run_pending_migrations(pool_config.database_url())
                .await
                .wrap_err("database migrations failed")?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    Ok(config)
}
