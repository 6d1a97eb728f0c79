use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A token holding at a point in time.
///
/// `balance` is kept as the decimal string the chain read produced so no
/// precision is lost before display; `usd_value` is derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// ERC-20 contract address. `None` for the chain's native coin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    pub symbol: String,
    /// Decimal string in whole-token units (e.g. "0.5").
    pub balance: String,
    pub usd_value: f64,
}

impl TokenBalance {
    pub fn new(
        contract_address: impl Into<String>,
        symbol: impl Into<String>,
        balance: impl Into<String>,
        usd_value: f64,
    ) -> Self {
        Self {
            contract_address: Some(contract_address.into()),
            symbol: symbol.into(),
            balance: balance.into(),
            usd_value,
        }
    }

    /// Balance of the chain's base currency.
    pub fn native(symbol: impl Into<String>, balance: impl Into<String>, usd_value: f64) -> Self {
        Self {
            contract_address: None,
            symbol: symbol.into(),
            balance: balance.into(),
            usd_value,
        }
    }

    /// Placeholder leg for single-asset positions (lending supply).
    pub fn empty() -> Self {
        Self {
            contract_address: None,
            symbol: String::new(),
            balance: "0".to_string(),
            usd_value: 0.0,
        }
    }

    pub fn is_native(&self) -> bool {
        self.contract_address.is_none() && !self.symbol.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol.is_empty()
    }
}
