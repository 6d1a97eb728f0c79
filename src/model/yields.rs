use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Aggregation granularity for yield history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly];

    /// Number of history entries produced for this timeframe.
    pub fn entry_count(self) -> usize {
        match self {
            Timeframe::Daily => 30,
            Timeframe::Weekly => 12,
            Timeframe::Monthly => 6,
        }
    }

    /// Days between consecutive entries.
    pub fn spacing_days(self) -> i64 {
        match self {
            Timeframe::Daily => 1,
            Timeframe::Weekly => 7,
            Timeframe::Monthly => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        }
    }

    /// Capitalized button label.
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Timeframe::Daily),
            "weekly" => Ok(Timeframe::Weekly),
            "monthly" => Ok(Timeframe::Monthly),
            other => Err(TrackerError::InvalidTimeframe(other.to_string())),
        }
    }
}

/// One yield payout. Independent of any `PoolPosition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct YieldHistoryEntry {
    /// Calendar day, serialized as ISO `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub protocol: String,
    pub pool_name: String,
    /// Amount in token units.
    pub yield_amount: f64,
    pub token_symbol: String,
    pub usd_value: f64,
}

/// Yield totals and per-timeframe history. Each list is sorted newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct YieldSummary {
    #[serde(rename = "totalYieldUSD")]
    pub total_yield_usd: f64,
    pub daily_yields: Vec<YieldHistoryEntry>,
    pub weekly_yields: Vec<YieldHistoryEntry>,
    pub monthly_yields: Vec<YieldHistoryEntry>,
}

impl YieldSummary {
    pub fn entries(&self, timeframe: Timeframe) -> &[YieldHistoryEntry] {
        match timeframe {
            Timeframe::Daily => &self.daily_yields,
            Timeframe::Weekly => &self.weekly_yields,
            Timeframe::Monthly => &self.monthly_yields,
        }
    }
}
