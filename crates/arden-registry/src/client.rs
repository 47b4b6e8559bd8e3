//! EVM Registry Client
//!
//! [`RegistryClient`] over plain JSON-RPC: reads go through `eth_call`,
//! writes through `eth_sendTransaction` signed by the connected wallet, and
//! confirmation through `eth_getTransactionReceipt`.

use alloy_primitives::{hex, Address};
use alloy_sol_types::SolCall;
use arden_core::{
    error::{ArdenError, Result},
    registry::{RegistryClient, TxHash, UserRecord, WalletAddress},
    UserRole,
};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::abi;
use crate::transport::{JsonRpcTransport, TransportError};

/// Registry contract client
pub struct EvmRegistryClient<T> {
    transport: T,
    contract: WalletAddress,
}

fn to_address(addr: &WalletAddress) -> Result<Address> {
    addr.as_str()
        .parse()
        .map_err(|_| ArdenError::InvalidAddress(addr.to_string()))
}

fn from_address(addr: Address) -> Result<WalletAddress> {
    WalletAddress::parse(&addr.to_string())
}

fn encode<C: SolCall>(call: &C) -> String {
    hex::encode_prefixed(call.abi_encode())
}

fn hex_result(value: &Value, method: &str) -> Result<Vec<u8>> {
    let raw = value
        .as_str()
        .ok_or_else(|| TransportError::Empty(method.to_string()))?;
    hex::decode(raw).map_err(|e| TransportError::Decode(format!("{method}: {e}")).into())
}

/// Zero-address records are the contract's "no such user"
fn known(record: UserRecord) -> Option<UserRecord> {
    (!record.user_address.is_zero()).then_some(record)
}

impl<T: JsonRpcTransport> EvmRegistryClient<T> {
    pub fn new(transport: T, contract: WalletAddress) -> Self {
        Self { transport, contract }
    }

    pub fn contract(&self) -> &WalletAddress {
        &self.contract
    }

    async fn call<C: SolCall>(&self, data: String) -> Result<C::Return> {
        let params = json!([{ "to": self.contract.as_str(), "data": data }, "latest"]);
        let result = self.transport.request("eth_call", params).await?;
        let bytes = hex_result(&result, C::SIGNATURE)?;

        C::abi_decode_returns(&bytes, true)
            .map_err(|e| TransportError::Decode(format!("{}: {e}", C::SIGNATURE)).into())
    }

    async fn send(&self, from: &WalletAddress, data: String, signature: &str) -> Result<TxHash> {
        let params = json!([{
            "from": from.as_str(),
            "to": self.contract.as_str(),
            "data": data,
        }]);

        let result = self
            .transport
            .request("eth_sendTransaction", params)
            .await
            .inspect_err(|e| tracing::warn!(call = signature, error = %e, "Registry write failed"))?;

        let hash = result
            .as_str()
            .ok_or_else(|| TransportError::Empty("eth_sendTransaction".into()))?;

        tracing::info!(call = signature, tx = hash, "Registry transaction sent");
        Ok(TxHash(hash.to_string()))
    }
}

#[cfg(feature = "http")]
impl EvmRegistryClient<crate::transport::HttpTransport> {
    /// Native client from `ARDEN_REGISTRY_ADDRESS` + `ARDEN_RPC_URL`
    pub fn from_config(config: &arden_core::ArdenConfig) -> Result<Self> {
        let contract = config
            .registry_address
            .clone()
            .ok_or_else(|| ArdenError::Config("registry address not set".into()))?;
        let url = config
            .rpc_url
            .as_deref()
            .ok_or_else(|| ArdenError::Config("RPC URL not set".into()))?;

        Ok(Self::new(crate::transport::HttpTransport::new(url), contract))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: JsonRpcTransport> RegistryClient for EvmRegistryClient<T> {
    async fn get_user(&self, address: &WalletAddress) -> Result<Option<UserRecord>> {
        let data = encode(&abi::getUserCall {
            user: to_address(address)?,
        });
        let user = self.call::<abi::getUserCall>(data).await?._0;

        Ok(known(UserRecord {
            user_address: from_address(user.userAddress)?,
            first_name: user.firstName,
            last_name: user.lastName,
            role: user.role,
            is_registered: user.isRegistered,
            is_verified: user.isVerified,
        }))
    }

    async fn arden_user(&self, address: &WalletAddress) -> Result<Option<UserRecord>> {
        let data = encode(&abi::ardenUsersCall {
            user: to_address(address)?,
        });
        let user = self.call::<abi::ardenUsersCall>(data).await?;

        Ok(known(UserRecord {
            user_address: from_address(user.userAddress)?,
            first_name: user.firstName,
            last_name: user.lastName,
            role: user.role,
            is_registered: user.isRegistered,
            is_verified: user.isVerified,
        }))
    }

    async fn registered_users(&self) -> Result<u64> {
        let data = encode(&abi::registeredUsersCall {});
        let count = self.call::<abi::registeredUsersCall>(data).await?._0;
        u64::try_from(count).map_err(|e| ArdenError::Registry(format!("registeredUsers: {e}")))
    }

    async fn verified_users(&self) -> Result<u64> {
        let data = encode(&abi::verifiedUsersCall {});
        let count = self.call::<abi::verifiedUsersCall>(data).await?._0;
        u64::try_from(count).map_err(|e| ArdenError::Registry(format!("verifiedUsers: {e}")))
    }

    async fn kyc_verification(&self, address: &WalletAddress) -> Result<Option<String>> {
        let data = encode(&abi::kycVerificationCall {
            user: to_address(address)?,
        });
        let hash = self.call::<abi::kycVerificationCall>(data).await?._0;
        Ok((!hash.is_empty()).then_some(hash))
    }

    async fn register_user(
        &self,
        from: &WalletAddress,
        first_name: &str,
        role: UserRole,
        last_name: &str,
    ) -> Result<TxHash> {
        let data = encode(&abi::registerUserCall {
            firstName: first_name.to_string(),
            role: role.code(),
            lastName: last_name.to_string(),
        });
        self.send(from, data, abi::registerUserCall::SIGNATURE).await
    }

    async fn verify_user(
        &self,
        from: &WalletAddress,
        user: &WalletAddress,
        kyc_hash: &str,
    ) -> Result<TxHash> {
        let data = encode(&abi::verifyUserCall {
            user: to_address(user)?,
            kycHash: kyc_hash.to_string(),
        });
        self.send(from, data, abi::verifyUserCall::SIGNATURE).await
    }

    async fn is_confirmed(&self, tx: &TxHash) -> Result<bool> {
        let receipt = self
            .transport
            .request("eth_getTransactionReceipt", json!([tx.0]))
            .await?;

        if receipt.is_null() {
            return Ok(false);
        }
        match receipt.get("status").and_then(Value::as_str) {
            Some("0x1") => Ok(true),
            Some(_) => Err(ArdenError::Registry(format!("transaction {tx} reverted"))),
            None => Err(TransportError::Decode("receipt without status".into()).into()),
        }
    }

    fn name(&self) -> &str {
        self.transport.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned answers keyed by method, or by selector for `eth_call`
    #[derive(Default)]
    struct MockTransport {
        answers: HashMap<String, Value>,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl MockTransport {
        fn on_call<C: SolCall>(mut self, encoded: Vec<u8>) -> Self {
            self.answers
                .insert(hex::encode(C::SELECTOR), json!(hex::encode_prefixed(encoded)));
            self
        }

        fn on(mut self, method: &str, answer: Value) -> Self {
            self.answers.insert(method.to_string(), answer);
            self
        }
    }

    #[async_trait]
    impl JsonRpcTransport for MockTransport {
        async fn request(&self, method: &str, params: Value) -> std::result::Result<Value, TransportError> {
            self.seen.lock().unwrap().push((method.to_string(), params.clone()));

            let key = if method == "eth_call" {
                params[0]["data"].as_str().unwrap_or_default()[2..10].to_string()
            } else {
                method.to_string()
            };
            self.answers.get(&key).cloned().ok_or(TransportError::Rpc {
                code: -32000,
                message: "execution reverted".into(),
            })
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn contract() -> WalletAddress {
        WalletAddress::parse("0xc0ffee0000000000000000000000000000000001").unwrap()
    }

    fn alice() -> WalletAddress {
        WalletAddress::parse("0x00000000000000000000000000000000000a11ce").unwrap()
    }

    fn user(address: Address, registered: bool) -> abi::User {
        abi::User {
            userAddress: address,
            firstName: "Ada".into(),
            lastName: "Lovelace".into(),
            role: 1,
            isRegistered: registered,
            isVerified: false,
        }
    }

    #[tokio::test]
    async fn test_get_user() {
        let encoded = abi::getUserCall::abi_encode_returns(&(user(to_address(&alice()).unwrap(), true),));
        let client = EvmRegistryClient::new(MockTransport::default().on_call::<abi::getUserCall>(encoded), contract());

        let record = client.get_user(&alice()).await.unwrap().unwrap();
        assert_eq!(record.user_address, alice());
        assert_eq!(record.display_name(), "Ada Lovelace");
        assert_eq!(record.role(), UserRole::Builder);

        let seen = client.transport.seen.lock().unwrap();
        assert_eq!(seen[0].0, "eth_call");
        assert_eq!(seen[0].1[0]["to"], json!(contract().as_str()));
        assert_eq!(seen[0].1[1], json!("latest"));
    }

    #[tokio::test]
    async fn test_zero_address_is_unknown() {
        let encoded = abi::getUserCall::abi_encode_returns(&(user(Address::ZERO, false),));
        let client = EvmRegistryClient::new(MockTransport::default().on_call::<abi::getUserCall>(encoded), contract());
        assert_eq!(client.get_user(&alice()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_counters() {
        let transport = MockTransport::default()
            .on_call::<abi::registeredUsersCall>(abi::registeredUsersCall::abi_encode_returns(&(U256::from(12),)))
            .on_call::<abi::verifiedUsersCall>(abi::verifiedUsersCall::abi_encode_returns(&(U256::from(7),)));
        let client = EvmRegistryClient::new(transport, contract());

        assert_eq!(client.registered_users().await.unwrap(), 12);
        assert_eq!(client.verified_users().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_register_sends_from_wallet() {
        let transport = MockTransport::default().on("eth_sendTransaction", json!("0xfeed"));
        let client = EvmRegistryClient::new(transport, contract());

        let tx = client
            .register_user(&alice(), "Ada", UserRole::Builder, "Lovelace")
            .await
            .unwrap();
        assert_eq!(tx, TxHash("0xfeed".into()));

        let seen = client.transport.seen.lock().unwrap();
        let params = &seen[0].1[0];
        assert_eq!(params["from"], json!(alice().as_str()));
        let data = params["data"].as_str().unwrap();
        assert!(data.starts_with(&hex::encode_prefixed(abi::registerUserCall::SELECTOR)));
    }

    #[tokio::test]
    async fn test_write_error_surfaces() {
        let client = EvmRegistryClient::new(MockTransport::default(), contract());
        let err = client
            .verify_user(&alice(), &alice(), "kyc-1")
            .await
            .unwrap_err();
        assert!(matches!(err, ArdenError::Registry(_)));
    }

    #[tokio::test]
    async fn test_receipt_states() {
        let pending = EvmRegistryClient::new(
            MockTransport::default().on("eth_getTransactionReceipt", Value::Null),
            contract(),
        );
        assert!(!pending.is_confirmed(&TxHash("0x1".into())).await.unwrap());

        let mined = EvmRegistryClient::new(
            MockTransport::default().on("eth_getTransactionReceipt", json!({ "status": "0x1" })),
            contract(),
        );
        assert!(mined.is_confirmed(&TxHash("0x1".into())).await.unwrap());

        let reverted = EvmRegistryClient::new(
            MockTransport::default().on("eth_getTransactionReceipt", json!({ "status": "0x0" })),
            contract(),
        );
        assert!(reverted.is_confirmed(&TxHash("0x1".into())).await.is_err());
    }
}
