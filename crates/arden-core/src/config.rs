//! Runtime configuration
//!
//! Read from any key lookup so the same rules apply to process env (native)
//! and to values baked in at build time (browser).

use std::time::Duration;

use crate::registry::WalletAddress;

pub const REGISTRY_ADDRESS: &str = "ARDEN_REGISTRY_ADDRESS";
pub const RPC_URL: &str = "ARDEN_RPC_URL";
pub const WALLET_POLL_INTERVAL_MS: &str = "ARDEN_WALLET_POLL_INTERVAL_MS";
pub const WALLET_POLL_MAX_ATTEMPTS: &str = "ARDEN_WALLET_POLL_MAX_ATTEMPTS";
pub const WALLET_LINK_TIMEOUT_SECS: &str = "ARDEN_WALLET_LINK_TIMEOUT_SECS";
pub const NOTICE_TTL_SECS: &str = "ARDEN_NOTICE_TTL_SECS";
pub const SUBMIT_DELAY_MS: &str = "ARDEN_SUBMIT_DELAY_MS";

/// Arden configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArdenConfig {
    /// User registry contract; `None` selects the in-memory registry
    pub registry_address: Option<WalletAddress>,

    /// JSON-RPC endpoint for native clients
    pub rpc_url: Option<String>,

    /// Delay between wallet-link checks
    pub wallet_poll_interval_ms: u64,

    /// Checks before giving up on a wallet link
    pub wallet_poll_max_attempts: u32,

    /// Hard ceiling on the whole wallet-link wait
    pub wallet_link_timeout_secs: u64,

    pub notice_ttl_secs: u64,

    /// Simulated latency for campaign creation
    pub submit_delay_ms: u64,
}

impl Default for ArdenConfig {
    fn default() -> Self {
        Self {
            registry_address: None,
            rpc_url: None,
            wallet_poll_interval_ms: 1_000,
            wallet_poll_max_attempts: 30,
            wallet_link_timeout_secs: 45,
            notice_ttl_secs: 5,
            submit_delay_ms: 800,
        }
    }
}

impl ArdenConfig {
    /// Build from a key lookup. Missing or unparseable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let registry_address = get(REGISTRY_ADDRESS).and_then(|raw| {
            WalletAddress::parse(&raw)
                .map_err(|e| tracing::warn!(key = REGISTRY_ADDRESS, error = %e, "Ignoring registry address"))
                .ok()
        });

        Self {
            registry_address,
            rpc_url: get(RPC_URL),
            wallet_poll_interval_ms: get(WALLET_POLL_INTERVAL_MS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.wallet_poll_interval_ms),
            wallet_poll_max_attempts: get(WALLET_POLL_MAX_ATTEMPTS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.wallet_poll_max_attempts),
            wallet_link_timeout_secs: get(WALLET_LINK_TIMEOUT_SECS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.wallet_link_timeout_secs),
            notice_ttl_secs: get(NOTICE_TTL_SECS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notice_ttl_secs),
            submit_delay_ms: get(SUBMIT_DELAY_MS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.submit_delay_ms),
        }
    }

    /// Build from process environment variables
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn wallet_poll_interval(&self) -> Duration {
        Duration::from_millis(self.wallet_poll_interval_ms)
    }

    pub fn wallet_link_timeout(&self) -> Duration {
        Duration::from_secs(self.wallet_link_timeout_secs)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_lookup_overrides_and_fallbacks() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (REGISTRY_ADDRESS, "0x00000000000000000000000000000000000000AA"),
            (WALLET_POLL_MAX_ATTEMPTS, "10"),
            (NOTICE_TTL_SECS, "soon"),
            (RPC_URL, "  "),
        ]);
        let config = ArdenConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string()));

        assert_eq!(
            config.registry_address.as_ref().map(WalletAddress::as_str),
            Some("0x00000000000000000000000000000000000000aa")
        );
        assert_eq!(config.wallet_poll_max_attempts, 10);
        assert_eq!(config.notice_ttl(), Duration::from_secs(5));
        assert_eq!(config.rpc_url, None);
        assert_eq!(config.wallet_poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_bad_address_is_ignored() {
        let config = ArdenConfig::from_lookup(|k| (k == REGISTRY_ADDRESS).then(|| "0x12".to_string()));
        assert!(config.registry_address.is_none());
    }
}
