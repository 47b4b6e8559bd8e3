//! # arden-registry
//!
//! On-chain user registry client for Arden.
//!
//! ## Backends
//!
//! - **EVM JSON-RPC**: [`EvmRegistryClient`] over any [`JsonRpcTransport`]
//!   (HTTP natively with the `http` feature, the injected wallet in the browser)
//! - **In-memory**: `arden_core::MockRegistryClient`, used when no contract
//!   address is configured
//!
//! ## Usage
//!
//! ```rust,ignore
//! use arden_registry::registry_from_config;
//!
//! let registry = registry_from_config(&ArdenConfig::from_env());
//! let profile = load_profile(registry.as_ref(), &address).await;
//! ```

pub mod abi;
pub mod client;
pub mod transport;

pub use client::EvmRegistryClient;
pub use transport::{JsonRpcTransport, RpcRequest, RpcResponse, TransportError};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export core types for convenience
pub use arden_core::{
    load_profile, ArdenConfig, ArdenError, MockRegistryClient, RegistryClient, Result, TxHash,
    UserProfile, UserRecord, WalletAddress, WriteState,
};

/// Pick a registry backend: the EVM client when both contract address and RPC
/// URL are configured, otherwise the in-memory registry.
#[cfg(feature = "http")]
pub fn registry_from_config(config: &ArdenConfig) -> std::sync::Arc<dyn RegistryClient> {
    match EvmRegistryClient::from_config(config) {
        Ok(client) => {
            tracing::info!(contract = %client.contract(), "Using EVM registry");
            std::sync::Arc::new(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to in-memory registry");
            std::sync::Arc::new(MockRegistryClient::new())
        }
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_uses_mock() {
        let registry = registry_from_config(&ArdenConfig::default());
        assert_eq!(registry.name(), "MockRegistry");
    }

    #[test]
    fn test_configured_uses_http() {
        let config = ArdenConfig {
            registry_address: WalletAddress::parse("0xc0ffee0000000000000000000000000000000001").ok(),
            rpc_url: Some("http://127.0.0.1:8545".into()),
            ..ArdenConfig::default()
        };
        assert_eq!(registry_from_config(&config).name(), "http");
    }
}
