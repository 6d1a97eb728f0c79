use std::borrow::Cow;

use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::ChainProvider;
use crate::error::TrackerError;

/// JSON-RPC node standing in for a browser-injected wallet.
///
/// `eth_accounts` / `eth_requestAccounts` are forwarded as-is, so a node that
/// manages no keys simply reports no accounts.
pub struct RpcProvider {
    url: String,
    inner: DynProvider,
}

impl RpcProvider {
    pub fn connect(rpc_url: &str) -> Result<Self> {
        let inner = ProviderBuilder::new()
            .connect_http(
                rpc_url
                    .parse()
                    .with_context(|| format!("invalid RPC url '{rpc_url}'"))?,
            )
            .erased();
        Ok(Self {
            url: rpc_url.to_string(),
            inner,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn rpc_error(method: &str, err: impl std::fmt::Display) -> TrackerError {
    TrackerError::Rpc {
        method: method.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl ChainProvider for RpcProvider {
    async fn accounts(&self) -> Result<Vec<Address>> {
        debug!(url = %self.url, "eth_accounts");
        let accounts = self
            .inner
            .get_accounts()
            .await
            .map_err(|e| rpc_error("eth_accounts", e))?;
        Ok(accounts)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        debug!(url = %self.url, "eth_requestAccounts");
        let accounts: Vec<Address> = self
            .inner
            .raw_request(Cow::Borrowed("eth_requestAccounts"), Vec::<serde_json::Value>::new())
            .await
            .map_err(|e| rpc_error("eth_requestAccounts", e))?;
        Ok(accounts)
    }

    async fn native_balance(&self, address: Address) -> Result<U256> {
        debug!(url = %self.url, %address, "eth_getBalance");
        let balance = self
            .inner
            .get_balance(address)
            .await
            .map_err(|e| rpc_error("eth_getBalance", e))?;
        Ok(balance)
    }
}
