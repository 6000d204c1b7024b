//! Infobus: web front end and dependency health endpoint.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file, builds the database and broker probes,
//! sets up the Axum router and starts the HTTP server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infobus::config::{AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use infobus::health::{HealthAggregator, PostgresProbe, RedisProbe};
use infobus::http::start_server;
use infobus::routes::create_router;
use infobus::state::AppState;
use infobus::templates::init_templates;

/// Infobus: web front end and health endpoint
#[derive(Parser, Debug)]
#[command(name = "infobus", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "infobus=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(log_filter: &str, logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(log_filter));
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration is loaded before tracing so the log format can be honored
    let config = AppConfig::load(&args.config)?;

    // Log filter priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        config = %args.config,
        expose_errors = config.health.expose_errors,
        "Loaded configuration"
    );

    let tera = init_templates(&config.templates)?;
    tracing::info!(dir = %config.templates.dir, "Initialized templates");

    let database = PostgresProbe::new(&config.database)?;
    let broker = RedisProbe::new(&config.broker);
    tracing::info!(
        database_timeout_secs = config.database.timeout_seconds,
        broker_timeout_secs = config.broker.timeout_seconds,
        "Initialized health probes"
    );

    let health = HealthAggregator::new(
        Arc::new(database),
        Arc::new(broker),
        config.health.expose_errors,
    );

    let state = AppState::new(config.clone(), tera, health);
    let app = create_router(state);

    start_server(app, &config.http).await?;
    Ok(())
}
