use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::position::PoolPosition;
use super::token::TokenBalance;

/// Wallet holdings snapshot. Rebuilt wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub total_value: f64,
    pub tokens: Vec<TokenBalance>,
    pub pools: Vec<PoolPosition>,
}

impl Portfolio {
    /// Build a snapshot, summing token and pool USD values into `total_value`.
    pub fn from_holdings(tokens: Vec<TokenBalance>, pools: Vec<PoolPosition>) -> Self {
        let token_value: f64 = tokens.iter().map(|t| t.usd_value).sum();
        let pool_value: f64 = pools.iter().map(|p| p.total_usd_value).sum();
        Self {
            total_value: token_value + pool_value,
            tokens,
            pools,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.pools.is_empty()
    }
}
