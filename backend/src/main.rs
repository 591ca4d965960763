//! Backend entry-point: load settings, open the database when configured,
//! and serve the selected site.

mod server;

use std::time::Duration;

use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use noticeboard::inbound::http::session_config::{BuildMode, SessionSettings};
use noticeboard::outbound::persistence::{DbPool, PoolConfig};
use noticeboard::settings::AppSettings;

use server::{ServerConfig, create_server};

const DB_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let site = settings.site()?;
    let bind_addr = settings.bind_addr()?;
    let session =
        SessionSettings::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .wrap_err("invalid session configuration")?;

    let mut config =
        ServerConfig::new(session, bind_addr, site).with_news_settings(settings.news_settings());
    if let Some(url) = settings.database_url() {
        let pool = DbPool::new(PoolConfig::new(url).with_connection_timeout(DB_CONNECT_TIMEOUT))
            .await
            .wrap_err("failed to build database pool")?;
        pool.ping().await.wrap_err("database is unreachable")?;
        config = config.with_db_pool(pool);
    }

    create_server(config)?.await?;
    Ok(())
}
