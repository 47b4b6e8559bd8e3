//! User Registry Boundary
//!
//! The on-chain user registry is owned elsewhere; Arden only reads profiles
//! and submits `registerUser` / `verifyUser` transactions through a
//! [`RegistryClient`]. Implementations live in `arden-registry` (EVM JSON-RPC)
//! and here ([`MockRegistryClient`], for tests and unconfigured deployments).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ArdenError, Result};
use crate::forms::UserRole;

/// 20-byte account address, stored lowercase with `0x` prefix
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The sentinel address the registry returns for unknown users
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(40)))
    }

    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| ArdenError::InvalidAddress(s.to_string()))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ArdenError::InvalidAddress(s.to_string()));
        }
        Ok(Self(format!("0x{}", hex.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0[2..].chars().all(|c| c == '0')
    }

    /// `0x1234...abcd`
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ArdenError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<WalletAddress> for String {
    fn from(addr: WalletAddress) -> Self {
        addr.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry user struct as returned by `getUser` / `ardenUsers`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_address: WalletAddress,
    pub first_name: String,
    pub last_name: String,
    pub role: u8,
    pub is_registered: bool,
    pub is_verified: bool,
}

impl UserRecord {
    /// Zero address or registration flag unset
    pub fn is_unregistered(&self) -> bool {
        self.user_address.is_zero() || !self.is_registered
    }

    pub fn role(&self) -> UserRole {
        UserRole::from_code(self.role)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Transaction hash returned by a write
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a contract read as the UI sees it
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ReadState<T> {
    /// Waiting on the wallet or the node; may stay here indefinitely
    #[default]
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> ReadState<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => ReadState::Ready(value),
            Err(e) => ReadState::Failed(e.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ReadState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ReadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Lifecycle of a contract write
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum WriteState {
    #[default]
    Idle,
    /// Waiting for the wallet to sign and broadcast
    Submitting,
    /// Broadcast, awaiting a receipt
    Submitted(TxHash),
    Confirmed(TxHash),
    Failed(String),
}

impl WriteState {
    pub fn transaction_hash(&self) -> Option<&TxHash> {
        match self {
            WriteState::Submitted(hash) | WriteState::Confirmed(hash) => Some(hash),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, WriteState::Submitting | WriteState::Submitted(_))
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, WriteState::Confirmed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WriteState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Contract surface of the user registry
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RegistryClient: Send + Sync {
    /// `getUser(address)`; `None` for the zero-address sentinel
    async fn get_user(&self, address: &WalletAddress) -> Result<Option<UserRecord>>;

    /// `ardenUsers(address)` public mapping getter
    async fn arden_user(&self, address: &WalletAddress) -> Result<Option<UserRecord>>;

    /// `registeredUsers()`
    async fn registered_users(&self) -> Result<u64>;

    /// `verifiedUsers()`
    async fn verified_users(&self) -> Result<u64>;

    /// `kycVerification(address)`; `None` when empty
    async fn kyc_verification(&self, address: &WalletAddress) -> Result<Option<String>>;

    /// `registerUser(firstName, role, lastName)` sent from `from`
    async fn register_user(
        &self,
        from: &WalletAddress,
        first_name: &str,
        role: UserRole,
        last_name: &str,
    ) -> Result<TxHash>;

    /// `verifyUser(address, kycHash)` sent from `from`
    async fn verify_user(
        &self,
        from: &WalletAddress,
        user: &WalletAddress,
        kyc_hash: &str,
    ) -> Result<TxHash>;

    /// Whether a submitted transaction has a successful receipt
    async fn is_confirmed(&self, tx: &TxHash) -> Result<bool>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Everything the profile modal shows for one address
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub user: Option<UserRecord>,
    pub kyc_hash: Option<String>,
    pub total_registered: Option<u64>,
    pub total_verified: Option<u64>,
}

impl UserProfile {
    pub fn is_registered(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.is_unregistered())
    }
}

/// Load a profile. `getUser` wins over `ardenUsers`; every failed read is
/// logged and treated as missing data.
pub async fn load_profile(client: &dyn RegistryClient, address: &WalletAddress) -> UserProfile {
    fn ok_or_log<T>(what: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(read = what, error = %e, "Registry read failed");
                None
            }
        }
    }

    let mut user = ok_or_log("getUser", client.get_user(address).await).flatten();
    if user.is_none() {
        user = ok_or_log("ardenUsers", client.arden_user(address).await).flatten();
    }

    UserProfile {
        user,
        kyc_hash: ok_or_log("kycVerification", client.kyc_verification(address).await).flatten(),
        total_registered: ok_or_log("registeredUsers", client.registered_users().await),
        total_verified: ok_or_log("verifiedUsers", client.verified_users().await),
    }
}

/// In-memory registry (for development/testing)
#[derive(Default)]
pub struct MockRegistryClient {
    users: RwLock<HashMap<WalletAddress, UserRecord>>,
    kyc: RwLock<HashMap<WalletAddress, String>>,
    fail_writes: bool,
}

impl MockRegistryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose writes always fail, for exercising error paths
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn lock_err() -> ArdenError {
        ArdenError::Registry("mock registry lock poisoned".into())
    }

    fn tx_hash() -> TxHash {
        TxHash(format!("0x{}", uuid::Uuid::new_v4().simple()))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RegistryClient for MockRegistryClient {
    async fn get_user(&self, address: &WalletAddress) -> Result<Option<UserRecord>> {
        let users = self.users.read().map_err(|_| Self::lock_err())?;
        Ok(users.get(address).cloned())
    }

    async fn arden_user(&self, address: &WalletAddress) -> Result<Option<UserRecord>> {
        self.get_user(address).await
    }

    async fn registered_users(&self) -> Result<u64> {
        let users = self.users.read().map_err(|_| Self::lock_err())?;
        Ok(users.values().filter(|u| u.is_registered).count() as u64)
    }

    async fn verified_users(&self) -> Result<u64> {
        let users = self.users.read().map_err(|_| Self::lock_err())?;
        Ok(users.values().filter(|u| u.is_verified).count() as u64)
    }

    async fn kyc_verification(&self, address: &WalletAddress) -> Result<Option<String>> {
        let kyc = self.kyc.read().map_err(|_| Self::lock_err())?;
        Ok(kyc.get(address).cloned())
    }

    async fn register_user(
        &self,
        from: &WalletAddress,
        first_name: &str,
        role: UserRole,
        last_name: &str,
    ) -> Result<TxHash> {
        if self.fail_writes {
            return Err(ArdenError::Registry("execution reverted".into()));
        }

        let mut users = self.users.write().map_err(|_| Self::lock_err())?;
        if users.get(from).is_some_and(|u| u.is_registered) {
            return Err(ArdenError::Registry("user already registered".into()));
        }
        users.insert(
            from.clone(),
            UserRecord {
                user_address: from.clone(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                role: role.code(),
                is_registered: true,
                is_verified: false,
            },
        );
        Ok(Self::tx_hash())
    }

    async fn verify_user(
        &self,
        _from: &WalletAddress,
        user: &WalletAddress,
        kyc_hash: &str,
    ) -> Result<TxHash> {
        if self.fail_writes {
            return Err(ArdenError::Registry("execution reverted".into()));
        }

        let mut users = self.users.write().map_err(|_| Self::lock_err())?;
        let record = users
            .get_mut(user)
            .ok_or_else(|| ArdenError::Registry("user not registered".into()))?;
        record.is_verified = true;

        let mut kyc = self.kyc.write().map_err(|_| Self::lock_err())?;
        kyc.insert(user.clone(), kyc_hash.to_string());
        Ok(Self::tx_hash())
    }

    async fn is_confirmed(&self, _tx: &TxHash) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "MockRegistry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> WalletAddress {
        WalletAddress::parse("0x00000000000000000000000000000000000A11CE").unwrap()
    }

    #[test]
    fn test_wallet_address() {
        let addr = alice();
        assert_eq!(addr.as_str(), "0x00000000000000000000000000000000000a11ce");
        assert_eq!(addr.short(), "0x0000...11ce");
        assert!(!addr.is_zero());
        assert!(WalletAddress::zero().is_zero());
        assert!(WalletAddress::parse("0x123").is_err());
        assert!(WalletAddress::parse("deadbeef").is_err());
    }

    #[test]
    fn test_write_state() {
        let hash = TxHash("0xabc".into());
        assert!(WriteState::Submitting.is_pending());
        assert_eq!(WriteState::Submitted(hash.clone()).transaction_hash(), Some(&hash));
        assert!(WriteState::Confirmed(hash).is_confirmed());
        assert_eq!(WriteState::Failed("boom".into()).error(), Some("boom"));
    }

    #[tokio::test]
    async fn test_register_and_verify() {
        let registry = MockRegistryClient::new();
        let addr = alice();

        let profile = load_profile(&registry, &addr).await;
        assert!(!profile.is_registered());
        assert_eq!(profile.total_registered, Some(0));

        registry
            .register_user(&addr, "Ada", UserRole::Builder, "Lovelace")
            .await
            .unwrap();
        registry
            .verify_user(&addr, &addr, "kyc-ref-1")
            .await
            .unwrap();

        let profile = load_profile(&registry, &addr).await;
        assert!(profile.is_registered());
        let user = profile.user.unwrap();
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert_eq!(user.role(), UserRole::Builder);
        assert!(user.is_verified);
        assert_eq!(profile.kyc_hash.as_deref(), Some("kyc-ref-1"));
        assert_eq!(profile.total_verified, Some(1));
    }

    #[tokio::test]
    async fn test_failed_write_is_reported() {
        let registry = MockRegistryClient::failing_writes();
        let err = registry
            .register_user(&alice(), "Ada", UserRole::User, "")
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
