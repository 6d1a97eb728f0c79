use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::token::TokenBalance;

/// A user's stake in one liquidity or lending pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolPosition {
    /// Protocol display name, e.g. "Uniswap V3".
    pub protocol: String,
    pub pool_name: String,
    /// LP / receipt token amount as a decimal string.
    pub lp_tokens: String,
    pub token0: TokenBalance,
    /// Second leg. `TokenBalance::empty()` for single-asset pools.
    pub token1: TokenBalance,
    pub total_usd_value: f64,
    /// Advertised APR in percent (12.5 == 12.5%).
    pub apr: f64,
}

impl PoolPosition {
    /// Tokens actually held in the position (skips the empty leg).
    pub fn legs(&self) -> impl Iterator<Item = &TokenBalance> {
        [&self.token0, &self.token1]
            .into_iter()
            .filter(|t| !t.is_empty())
    }
}
