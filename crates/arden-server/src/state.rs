//! Application State

use std::path::PathBuf;
use std::sync::Arc;

use arden_core::RegistryClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registry backend the frontend will talk to, reported by `/health`
    pub registry: Arc<dyn RegistryClient>,
}

/// Server configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,

    /// Built frontend bundle (`index.html`, wasm, assets)
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }
}
