//! Application Context
//!
//! One [`AppContext`] is provided at the root. Campaign data is re-read from
//! the store whenever `revision` changes, so every page sees the latest writes.

use std::sync::Arc;
use std::time::Duration;

use arden_core::{
    config,
    store::{self, keys},
    ArdenConfig, ArdenError, CampaignRepository, KeyValueStoreExt, Notice, RegistrationForm,
    RegistryClient, WalletAddress, WalletLinkHandle, WalletLinkPoller,
};
use leptos::prelude::*;

use crate::storage::LocalStore;
use crate::wallet::{registry_for, sleep, InjectedWallet};

/// Config baked in at build time
pub fn web_config() -> ArdenConfig {
    ArdenConfig::from_lookup(|key| {
        let value = match key {
            config::REGISTRY_ADDRESS => option_env!("ARDEN_REGISTRY_ADDRESS"),
            config::RPC_URL => option_env!("ARDEN_RPC_URL"),
            config::WALLET_POLL_INTERVAL_MS => option_env!("ARDEN_WALLET_POLL_INTERVAL_MS"),
            config::WALLET_POLL_MAX_ATTEMPTS => option_env!("ARDEN_WALLET_POLL_MAX_ATTEMPTS"),
            config::WALLET_LINK_TIMEOUT_SECS => option_env!("ARDEN_WALLET_LINK_TIMEOUT_SECS"),
            config::NOTICE_TTL_SECS => option_env!("ARDEN_NOTICE_TTL_SECS"),
            config::SUBMIT_DELAY_MS => option_env!("ARDEN_SUBMIT_DELAY_MS"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

/// Shared frontend state
#[derive(Clone)]
pub struct AppContext {
    pub config: ArdenConfig,

    /// Campaigns, joins and created campaigns over `localStorage`
    pub repo: CampaignRepository,

    pub registry: Arc<dyn RegistryClient>,

    /// Bumped after every repository write
    pub revision: RwSignal<u64>,

    /// Address from the wallet-link subscription
    pub wallet: RwSignal<Option<WalletAddress>>,

    /// Persisted `walletConnected` flag shown in the navbar
    pub wallet_connected: RwSignal<bool>,

    pub notice: RwSignal<Option<(u64, Notice)>>,

    notice_seq: StoredValue<u64>,
    link: StoredValue<Option<WalletLinkHandle>>,
}

impl AppContext {
    pub fn new() -> Self {
        let config = web_config();
        let repo = CampaignRepository::with_showcase(Arc::new(LocalStore));
        let wallet_connected = repo.store().read(keys::WALLET_CONNECTED, false);

        tracing::info!(
            registry = config.registry_address.is_some(),
            wallet_connected,
            "Arden starting"
        );

        Self {
            registry: registry_for(&config),
            config,
            repo,
            revision: RwSignal::new(0),
            wallet: RwSignal::new(None),
            wallet_connected: RwSignal::new(wallet_connected),
            notice: RwSignal::new(None),
            notice_seq: StoredValue::new(0),
            link: StoredValue::new(None),
        }
    }

    /// Signal that stored campaign data changed
    pub fn touch(&self) {
        self.revision.update(|r| *r += 1);
    }

    /// Show a notice; it clears itself after its ttl unless replaced
    pub fn notify(&self, notice: Notice) {
        let notice = notice.with_ttl(self.config.notice_ttl());
        let ttl = notice.ttl;

        self.notice_seq.update_value(|s| *s += 1);
        let seq = self.notice_seq.get_value();
        self.notice.set(Some((seq, notice)));

        let slot = self.notice;
        leptos::task::spawn_local(async move {
            sleep(ttl).await;
            slot.update(|current| {
                if current.as_ref().is_some_and(|(s, _)| *s == seq) {
                    *current = None;
                }
            });
        });
    }

    pub fn success(&self, message: &str) {
        self.notify(Notice::success(message));
    }

    pub fn fail(&self, message: &str) {
        self.notify(Notice::error(message));
    }

    /// Log an error and surface its user-facing message
    pub fn report(&self, err: &ArdenError) {
        tracing::warn!(error = %err, "Action failed");
        self.notify(Notice::from(err));
    }

    pub fn dismiss(&self) {
        self.notice.set(None);
    }

    /// Simulated network latency for local-only submissions
    pub async fn simulate_latency(&self, delay: Duration) {
        sleep(delay).await;
    }

    fn persist_wallet_flag(&self, connected: bool) {
        self.wallet_connected.set(connected);
        if let Err(e) = self.repo.store().write(keys::WALLET_CONNECTED, &connected) {
            self.report(&e);
        }
    }

    /// Start (or restart) the wallet-link subscription. `prompt` asks the
    /// wallet for access first; otherwise only already-exposed accounts count.
    pub fn link_wallet(&self, prompt: bool) {
        self.cancel_link();

        let (task, handle) =
            WalletLinkPoller::from_config(&self.config).subscribe(InjectedWallet, sleep);
        self.link.set_value(Some(handle));

        let app = self.clone();
        leptos::task::spawn_local(async move {
            if prompt {
                if let Err(e) = InjectedWallet.connect().await {
                    app.cancel_link();
                    app.report(&e);
                    return;
                }
            }

            match task.await {
                Ok(address) => {
                    app.wallet.set(Some(address));
                    app.persist_wallet_flag(true);
                }
                Err(ArdenError::WalletLinkCancelled) => {}
                Err(e) => {
                    if prompt {
                        app.report(&e);
                    } else {
                        tracing::info!(error = %e, "Stored wallet link not restored");
                    }
                }
            }
        });
    }

    fn cancel_link(&self) {
        if let Some(handle) = self.link.get_value() {
            handle.cancel();
        }
        self.link.set_value(None);
    }

    pub fn disconnect_wallet(&self) {
        self.cancel_link();
        self.wallet.set(None);
        self.persist_wallet_flag(false);
    }

    /// Registered in this browser, or a wallet is linked or being restored.
    /// Tracks the wallet signals.
    pub fn is_signed_in(&self) -> bool {
        self.wallet.with(Option::is_some)
            || self.wallet_connected.get()
            || store::has_local_profile(self.repo.store().as_ref())
    }

    /// Display name from the register page, if any
    pub fn user_name(&self) -> Option<String> {
        self.repo.store().read::<Option<String>>(keys::USER_NAME, None)
    }

    pub fn user_data(&self) -> Option<RegistrationForm> {
        self.repo.store().read(keys::USER_DATA, None)
    }

    /// Owner recorded on new campaigns: wallet first, then the user name
    pub fn owner(&self) -> Option<String> {
        self.wallet
            .get_untracked()
            .map(|w| w.to_string())
            .or_else(|| self.user_name())
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
