use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, U256, address};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::error::TrackerError;
use crate::protocols::DEFAULT_LATENCY;
use crate::provider::{ChainProvider, RpcProvider, StaticProvider};

/// Fixed native-currency → USD conversion rate.
pub const DEFAULT_ETH_USD: f64 = 2500.0;

pub const ENV_RPC_URL: &str = "YIELD_TRACKER_RPC_URL";
pub const ENV_ETH_USD: &str = "YIELD_TRACKER_ETH_USD";
pub const ENV_SEED: &str = "YIELD_TRACKER_SEED";

/// Account exposed by the `--demo` provider.
pub const DEMO_ACCOUNT: Address = address!("0x742d35Cc6634C0532925a3b844Bc454e4438f44e");
/// 1.5 ETH in wei.
pub const DEMO_BALANCE_WEI: u128 = 1_500_000_000_000_000_000;

/// Dashboard runtime configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// JSON-RPC endpoint used as the chain provider.
    pub rpc_url: Option<String>,
    /// Serve a fixed account and balance instead of talking to a node.
    pub demo: bool,
    pub eth_usd_rate: f64,
    /// Seed for the mock generators. `None` = fresh entropy each run.
    pub seed: Option<u64>,
    /// Simulated per-protocol query latency.
    pub adapter_latency: Duration,
    /// Pin "today" for the generated series.
    pub as_of: Option<NaiveDate>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            demo: false,
            eth_usd_rate: DEFAULT_ETH_USD,
            seed: None,
            adapter_latency: DEFAULT_LATENCY,
            as_of: None,
        }
    }
}

/// Values supplied on the command line; each one wins over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub rpc_url: Option<String>,
    pub demo: bool,
    pub eth_usd_rate: Option<f64>,
    pub seed: Option<u64>,
    pub latency_ms: Option<u64>,
    pub as_of: Option<String>,
}

impl DashboardConfig {
    /// Read `YIELD_TRACKER_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_RPC_URL) {
            if !url.trim().is_empty() {
                config.rpc_url = Some(url.trim().to_string());
            }
        }
        if let Some(rate) = lookup(ENV_ETH_USD) {
            config.eth_usd_rate = rate
                .trim()
                .parse()
                .with_context(|| format!("{ENV_ETH_USD} must be a number, got '{rate}'"))?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            config.seed = Some(
                seed.trim()
                    .parse()
                    .with_context(|| format!("{ENV_SEED} must be an integer, got '{seed}'"))?,
            );
        }

        Ok(config)
    }

    /// Defaults plus command-line overrides, without reading the environment.
    /// For commands that only need the generators' seed and date.
    pub fn offline(overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::default();
        config.apply(overrides)?;
        Ok(config)
    }

    /// Environment first, then command-line overrides on top.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::from_env()?;
        config.apply(overrides)?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) -> Result<()> {
        if let Some(url) = &overrides.rpc_url {
            self.rpc_url = Some(url.clone());
        }
        if overrides.demo {
            self.demo = true;
        }
        if let Some(rate) = overrides.eth_usd_rate {
            self.eth_usd_rate = rate;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(ms) = overrides.latency_ms {
            self.adapter_latency = Duration::from_millis(ms);
        }
        if let Some(date) = &overrides.as_of {
            self.as_of = Some(parse_date(date)?);
        }
        Ok(())
    }

    /// The pinned date, or the local calendar day.
    pub fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Rng for the mock generators.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Chain provider for this run. `None` behaves like a browser with no
    /// wallet extension installed.
    pub fn build_provider(&self) -> Result<Option<Arc<dyn ChainProvider>>> {
        if self.demo {
            info!(account = %DEMO_ACCOUNT, "using demo provider");
            return Ok(Some(Arc::new(StaticProvider::new(
                vec![DEMO_ACCOUNT],
                U256::from(DEMO_BALANCE_WEI),
            ))));
        }
        match &self.rpc_url {
            Some(url) => {
                info!(url = %url, "using JSON-RPC provider");
                Ok(Some(Arc::new(RpcProvider::connect(url)?)))
            }
            None => Ok(None),
        }
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_env_overlays_defaults() {
        let config = DashboardConfig::from_vars(vars(&[
            (ENV_RPC_URL, "  http://localhost:8545 "),
            (ENV_ETH_USD, "3000"),
            (ENV_SEED, "42"),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url.as_deref(), Some("http://localhost:8545"));
        assert_eq!(config.eth_usd_rate, 3000.0);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.adapter_latency, DEFAULT_LATENCY);

        let empty = DashboardConfig::from_vars(vars(&[(ENV_RPC_URL, " ")])).unwrap();
        assert_eq!(empty.rpc_url, None);
        assert_eq!(empty.eth_usd_rate, DEFAULT_ETH_USD);
    }

    #[test]
    fn test_bad_env_values_are_errors() {
        let err = DashboardConfig::from_vars(vars(&[(ENV_ETH_USD, "lots")])).unwrap_err();
        assert!(err.to_string().contains(ENV_ETH_USD));
        assert!(DashboardConfig::from_vars(vars(&[(ENV_SEED, "-1")])).is_err());
    }

    #[test]
    fn test_overrides_win_over_env() {
        let mut config = DashboardConfig::from_vars(vars(&[
            (ENV_ETH_USD, "3000"),
            (ENV_SEED, "1"),
        ]))
        .unwrap();
        config
            .apply(&ConfigOverrides {
                demo: true,
                eth_usd_rate: Some(1800.0),
                latency_ms: Some(0),
                as_of: Some("2026-10-19".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert!(config.demo);
        assert_eq!(config.eth_usd_rate, 1800.0);
        // not overridden
        assert_eq!(config.seed, Some(1));
        assert!(config.adapter_latency.is_zero());
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    }

    #[test]
    fn test_offline_only_uses_overrides() {
        let config = DashboardConfig::offline(&ConfigOverrides {
            seed: Some(9),
            as_of: Some("2026-01-02".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.eth_usd_rate, DEFAULT_ETH_USD);
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2026, 1, 2));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2026-10-19 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert!(matches!(
            parse_date("19/10/2026"),
            Err(TrackerError::InvalidDate(s)) if s == "19/10/2026"
        ));
    }

    #[tokio::test]
    async fn test_demo_provider_serves_demo_account() {
        let config = DashboardConfig {
            demo: true,
            ..Default::default()
        };
        let provider = config.build_provider().unwrap().unwrap();
        assert_eq!(provider.accounts().await.unwrap(), vec![DEMO_ACCOUNT]);
        assert!(DashboardConfig::default().build_provider().unwrap().is_none());
    }
}
