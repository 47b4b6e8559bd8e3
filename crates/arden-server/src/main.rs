//! Arden HTTP Server
//!
//! Hosts the compiled web frontend and a health probe. All campaign state
//! lives in the browser; the server holds none.

mod handlers;
mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arden_core::ArdenConfig;
use arden_registry::registry_from_config;

use crate::handlers::router;
use crate::state::{AppState, ServerConfig};

const DEFAULT_LOG: &str = "info,tower_http=debug";

/// `RUST_LOG` as currently set, read after `.env` is loaded
fn log_directives() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG.into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so `.env` can set RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_directives()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let arden = ArdenConfig::from_env();

    let state = AppState {
        registry: registry_from_config(&arden),
    };

    if !config.static_dir.join("index.html").exists() {
        tracing::warn!(dir = %config.static_dir.display(), "No index.html in static dir; build the web crate first");
    }

    let app = router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("Arden running on http://{}", config.bind_addr);
    tracing::info!("  GET  /health  - Health check");
    tracing::info!("  GET  /*       - Frontend from {}", config.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotenv_feeds_log_filter() {
        // A RUST_LOG from the real environment takes precedence over `.env`
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        let dir = std::env::temp_dir().join(format!("arden-env-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env");
        std::fs::write(&path, "RUST_LOG=arden_server=trace\n").unwrap();

        assert_eq!(log_directives(), DEFAULT_LOG);
        dotenvy::from_path(&path).unwrap();
        assert_eq!(log_directives(), "arden_server=trace");
    }
}
