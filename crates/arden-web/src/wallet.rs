//! Injected wallet (EIP-1193)
//!
//! `window.ethereum.request({ method, params })` doubles as the JSON-RPC
//! transport for the registry and as the source of linked accounts.

use std::sync::Arc;
use std::time::Duration;

use arden_core::{
    wallet::{AccountKind, LinkedAccount, WalletSource},
    ArdenConfig, MockRegistryClient, RegistryClient, Result, TxHash, WalletAddress,
};
use arden_registry::{EvmRegistryClient, JsonRpcTransport, TransportError};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Timer used by every async wait in the app
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

/// JSON-RPC through the injected provider
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectedTransport;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl JsonRpcTransport for InjectedTransport {
    async fn request(&self, method: &str, params: Value) -> std::result::Result<Value, TransportError> {
        #[cfg(target_arch = "wasm32")]
        {
            eip1193::request(method, &params).await
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = params;
            Err(TransportError::Unavailable(format!(
                "{method}: no injected wallet outside the browser"
            )))
        }
    }

    fn name(&self) -> &str {
        "injected"
    }
}

#[cfg(target_arch = "wasm32")]
mod eip1193 {
    use super::*;
    use js_sys::{Function, Object, Promise, Reflect, JSON};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    fn unavailable(msg: &str) -> TransportError {
        TransportError::Unavailable(msg.to_string())
    }

    /// Wallet rejections carry `{ code, message }`
    fn rpc_error(err: &JsValue) -> TransportError {
        let code = Reflect::get(err, &JsValue::from_str("code"))
            .ok()
            .and_then(|c| c.as_f64())
            .map_or(-1, |c| c as i64);
        let message = Reflect::get(err, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_else(|| "wallet request failed".into());
        TransportError::Rpc { code, message }
    }

    pub async fn request(method: &str, params: &Value) -> std::result::Result<Value, TransportError> {
        let window = web_sys::window().ok_or_else(|| unavailable("No window"))?;

        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|_| unavailable("No injected wallet found"))?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return Err(unavailable("No injected wallet found. Please install one and refresh."));
        }

        let request_fn: Function = Reflect::get(&ethereum, &JsValue::from_str("request"))
            .map_err(|_| unavailable("Wallet has no request method"))?
            .dyn_into()
            .map_err(|_| unavailable("request is not a function"))?;

        let js_params = JSON::parse(&params.to_string())
            .map_err(|_| TransportError::Decode("params are not JSON".into()))?;
        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(|_| unavailable("Could not build request"))?;
        Reflect::set(&args, &JsValue::from_str("params"), &js_params)
            .map_err(|_| unavailable("Could not build request"))?;

        let promise: Promise = request_fn
            .call1(&ethereum, &args)
            .map_err(|e| rpc_error(&e))?
            .dyn_into()
            .map_err(|_| unavailable("request did not return a promise"))?;

        let result = JsFuture::from(promise).await.map_err(|e| rpc_error(&e))?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }

        let text = JSON::stringify(&result)
            .ok()
            .and_then(|s| s.as_string())
            .ok_or_else(|| TransportError::Decode(format!("{method}: result not serializable")))?;
        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Accounts exposed by the injected wallet
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectedWallet;

impl InjectedWallet {
    /// Ask the wallet to expose accounts to this origin (opens the wallet UI)
    pub async fn connect(&self) -> Result<()> {
        InjectedTransport.request("eth_requestAccounts", json!([])).await?;
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl WalletSource for InjectedWallet {
    async fn linked_accounts(&self) -> Result<Vec<LinkedAccount>> {
        let accounts: Vec<String> =
            serde_json::from_value(InjectedTransport.request("eth_accounts", json!([])).await?)?;

        accounts
            .iter()
            .map(|a| -> Result<LinkedAccount> {
                Ok(LinkedAccount {
                    kind: AccountKind::Wallet,
                    address: WalletAddress::parse(a)?,
                })
            })
            .collect()
    }
}

/// EVM registry through the wallet when a contract is configured
pub fn registry_for(config: &ArdenConfig) -> Arc<dyn RegistryClient> {
    match &config.registry_address {
        Some(contract) => {
            tracing::info!(%contract, "Using injected-wallet registry");
            Arc::new(EvmRegistryClient::new(InjectedTransport, contract.clone()))
        }
        None => {
            tracing::info!("No registry contract configured, using in-memory registry");
            Arc::new(MockRegistryClient::new())
        }
    }
}

/// Poll for a receipt. `Ok(false)` when still pending after the attempt budget.
pub async fn await_confirmation(
    registry: &dyn RegistryClient,
    tx: &TxHash,
    config: &ArdenConfig,
) -> Result<bool> {
    for _ in 0..config.wallet_poll_max_attempts.max(1) {
        if registry.is_confirmed(tx).await? {
            return Ok(true);
        }
        sleep(config.wallet_poll_interval()).await;
    }
    Ok(false)
}
