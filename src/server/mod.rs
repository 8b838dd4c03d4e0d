pub mod diagnostics;
pub mod handlers;
pub mod types;

pub use handlers::AppState;

use crate::{
    Error, Result,
    config::{Config, ServerConfig},
    generator::ResponseGenerator,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub async fn run(config: Config) -> Result<()> {
    let generator = ResponseGenerator::from_config(&config)?;

    let addr = bind_addr(&config.server).await?;

    let app = router(AppState::new(generator, config));

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolves `host:port`; `host` may be an IP literal or a hostname.
pub async fn bind_addr(server: &ServerConfig) -> Result<SocketAddr> {
    let host = server.host.as_str();
    tokio::net::lookup_host((host, server.port))
        .await?
        .next()
        .ok_or_else(|| Error::config(format!("Host {} resolved to no address", host)))
}

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::home))
        .route("/chat", post(handlers::chat));

    if state.config.server.diagnostics {
        warn!("Mounting diagnostics routes under /debug");
        app = app
            .route("/debug", get(diagnostics::status))
            .route("/debug/providers/:name", get(diagnostics::probe_provider))
            .route("/debug/generate", get(diagnostics::generate));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(host: &str, port: u16) -> ServerConfig {
        ServerConfig {
            host: host.to_string(),
            port,
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_bind_addr_accepts_ip_literal() {
        let addr = bind_addr(&server("127.0.0.1", 5000)).await.unwrap();
        assert_eq!(addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_bind_addr_resolves_hostname() {
        let addr = bind_addr(&server("localhost", 8080)).await.unwrap();

        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8080);
    }
}
