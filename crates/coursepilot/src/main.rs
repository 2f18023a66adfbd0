use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn, Level};

use coursepilot::catalog::build_catalog;
use coursepilot::config::AppConfig;
use coursepilot::professors::ProfessorDirectory;
use coursepilot::server::create_router;
use coursepilot::types::AppState;

const CONFIG_ENV_VAR: &str = "COURSEPILOT_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var(CONFIG_ENV_VAR).ok())
        .map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    match &config_path {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file given, using defaults"),
    }

    let client = config
        .upstream
        .build_http_client()
        .context("failed to build HTTP client")?;
    let catalog = build_catalog(&config, client)?;

    let professors = match &config.professors_path {
        Some(path) => ProfessorDirectory::load_from_file(path)?,
        None => {
            warn!("No professors file configured, using built-in data");
            ProfessorDirectory::with_fixtures()
        }
    };
    info!("Loaded {} professors", professors.len());

    let state = Arc::new(AppState {
        catalog,
        professors,
        mode: config.mode,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    info!(
        "Serving the {:?} catalog on {}",
        config.mode,
        listener.local_addr()?
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
