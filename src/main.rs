use anyhow::Result;
use persona_chat::{config, server};
use tracing::{info, warn};

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Variables from .env behave like real environment variables
    let dotenv_path = dotenvy::dotenv().ok();

    // Load configuration first (before logging setup)
    let loaded = match config::load().await {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let config = loaded.config;

    let log_level = config.server.logs.level.clone();
    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // RUST_LOG overrides the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .json()
        .init();

    info!("Starting persona chat server with log level: {}", log_level);
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    for note in loaded.notes.iter().chain(config::validate(&config).iter()) {
        warn!("{}", note);
    }
    config::log_status(&config);

    server::run(config).await?;

    Ok(())
}
