//! Wallet Link Subscription
//!
//! After sign-in the wallet may take a moment to show up among the user's
//! linked accounts. [`WalletLinkPoller`] checks a [`WalletSource`] on a fixed
//! interval until an address appears, the attempt budget runs out, the overall
//! timeout fires, or the subscriber cancels.
//!
//! Sleeping is injected so the same poller runs on tokio and in the browser.

use async_trait::async_trait;
use futures::future::{abortable, select, AbortHandle, Either};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use crate::config::ArdenConfig;
use crate::error::{ArdenError, Result};
use crate::registry::WalletAddress;

/// Kind of account linked to the signed-in user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    SmartWallet,
    Wallet,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccount {
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub address: WalletAddress,
}

/// Pick the address to act with: a smart wallet beats a plain wallet
pub fn select_wallet(accounts: &[LinkedAccount]) -> Option<WalletAddress> {
    let find = |kind: AccountKind| {
        accounts
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.address.clone())
    };
    find(AccountKind::SmartWallet).or_else(|| find(AccountKind::Wallet))
}

/// Anything that can report the user's linked accounts
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait WalletSource {
    async fn linked_accounts(&self) -> Result<Vec<LinkedAccount>>;
}

/// Cancels a running subscription
#[derive(Clone, Debug)]
pub struct WalletLinkHandle(AbortHandle);

impl WalletLinkHandle {
    pub fn cancel(&self) {
        self.0.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

/// Bounded wallet-link polling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalletLinkPoller {
    pub interval: Duration,
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl Default for WalletLinkPoller {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 30,
            timeout: Duration::from_secs(45),
        }
    }
}

impl WalletLinkPoller {
    pub fn from_config(config: &ArdenConfig) -> Self {
        Self {
            interval: config.wallet_poll_interval(),
            max_attempts: config.wallet_poll_max_attempts.max(1),
            timeout: config.wallet_link_timeout(),
        }
    }

    /// Poll until a wallet is linked or a limit is hit
    pub async fn wait_for_wallet<S, F, Fut>(&self, source: &S, sleep: F) -> Result<WalletAddress>
    where
        S: WalletSource + ?Sized,
        F: Fn(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        let attempts = Cell::new(0u32);

        let polling = async {
            loop {
                attempts.set(attempts.get() + 1);
                match source.linked_accounts().await {
                    Ok(accounts) => {
                        if let Some(address) = select_wallet(&accounts) {
                            tracing::info!(%address, attempts = attempts.get(), "Wallet linked");
                            return Ok(address);
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "Wallet lookup failed"),
                }

                if attempts.get() >= self.max_attempts {
                    return Err(ArdenError::WalletLinkTimeout {
                        attempts: attempts.get(),
                    });
                }
                sleep(self.interval).await;
            }
        };
        let deadline = sleep(self.timeout);

        futures::pin_mut!(polling, deadline);
        match select(polling, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ArdenError::WalletLinkTimeout {
                attempts: attempts.get(),
            }),
        }
    }

    /// Start a cancellable subscription. Cancelling resolves the future with
    /// [`ArdenError::WalletLinkCancelled`].
    pub fn subscribe<S, F, Fut>(
        self,
        source: S,
        sleep: F,
    ) -> (impl Future<Output = Result<WalletAddress>>, WalletLinkHandle)
    where
        S: WalletSource,
        F: Fn(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        let task = async move { self.wait_for_wallet(&source, sleep).await };
        let (task, handle) = abortable(task);
        let task = task.map(|outcome| match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!("Wallet link subscription cancelled");
                Err(ArdenError::WalletLinkCancelled)
            }
        });
        (task, WalletLinkHandle(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Links a wallet on the n-th lookup
    struct LinksAfter {
        calls: Arc<AtomicU32>,
        after: u32,
    }

    #[async_trait]
    impl WalletSource for LinksAfter {
        async fn linked_accounts(&self) -> Result<Vec<LinkedAccount>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < self.after {
                return Ok(vec![]);
            }
            Ok(vec![
                LinkedAccount {
                    kind: AccountKind::Wallet,
                    address: WalletAddress::parse("0x1111111111111111111111111111111111111111")?,
                },
                LinkedAccount {
                    kind: AccountKind::SmartWallet,
                    address: WalletAddress::parse("0x2222222222222222222222222222222222222222")?,
                },
            ])
        }
    }

    fn fast(max_attempts: u32, timeout_ms: u64) -> WalletLinkPoller {
        WalletLinkPoller {
            interval: Duration::from_millis(5),
            max_attempts,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    fn source(after: u32) -> (LinksAfter, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (LinksAfter { calls: calls.clone(), after }, calls)
    }

    #[tokio::test]
    async fn test_prefers_smart_wallet() {
        let (src, calls) = source(3);
        let address = fast(10, 1_000)
            .wait_for_wallet(&src, tokio::time::sleep)
            .await
            .unwrap();
        assert!(address.as_str().starts_with("0x2222"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let (src, calls) = source(u32::MAX);
        let err = fast(4, 1_000)
            .wait_for_wallet(&src, tokio::time::sleep)
            .await
            .unwrap_err();
        assert!(matches!(err, ArdenError::WalletLinkTimeout { attempts: 4 }));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_overall_timeout() {
        let (src, _) = source(u32::MAX);
        let poller = WalletLinkPoller {
            interval: Duration::from_millis(50),
            max_attempts: 1_000,
            timeout: Duration::from_millis(120),
        };
        let err = poller
            .wait_for_wallet(&src, tokio::time::sleep)
            .await
            .unwrap_err();
        assert!(matches!(err, ArdenError::WalletLinkTimeout { attempts } if attempts < 1_000));
    }

    #[tokio::test]
    async fn test_cancel() {
        let (src, calls) = source(u32::MAX);
        let (task, handle) = fast(1_000, 10_000).subscribe(src, tokio::time::sleep);
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            handle.cancel();
        };

        let (result, ()) = tokio::join!(task, cancel);
        let err = result.unwrap_err();
        assert!(matches!(err, ArdenError::WalletLinkCancelled));
        assert!(handle.is_cancelled());

        let seen = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), seen);
    }

    #[test]
    fn test_select_wallet_fallback() {
        let accounts: Vec<LinkedAccount> = serde_json::from_str(
            r#"[{"type":"email","address":"0x3333333333333333333333333333333333333333"},
                {"type":"wallet","address":"0x1111111111111111111111111111111111111111"}]"#,
        )
        .unwrap();
        assert_eq!(accounts[0].kind, AccountKind::Other);
        assert!(select_wallet(&accounts).unwrap().as_str().starts_with("0x1111"));
        assert_eq!(select_wallet(&[]), None);
    }
}
