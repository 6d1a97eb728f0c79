use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::format::round_dp;
use crate::model::{Timeframe, YieldHistoryEntry, YieldSummary};

pub const MOCK_PROTOCOLS: &[&str] = &["Uniswap V3", "Compound", "Aave"];
pub const MOCK_POOLS: &[&str] = &["USDC/ETH", "cUSDC", "aUSDC"];
pub const MOCK_TOKENS: &[&str] = &["USDC", "ETH", "COMP", "AAVE"];

/// Advertised lifetime total shown above the history list.
pub const MOCK_TOTAL_YIELD_USD: f64 = 847.32;

/// Mock yield history for one timeframe, newest first.
///
/// Entry `i` is dated `today - i * spacing_days`. Yield amount is drawn from
/// [0.1, 5.1) and rounded to 4 dp; USD value from [5, 55) rounded to 2 dp.
pub fn generate_yields<R: Rng>(
    timeframe: Timeframe,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<YieldHistoryEntry> {
    let mut entries: Vec<YieldHistoryEntry> = (0..timeframe.entry_count())
        .map(|i| {
            let offset = i as u64 * timeframe.spacing_days() as u64;
            YieldHistoryEntry {
                date: today - Days::new(offset),
                protocol: pick(MOCK_PROTOCOLS, rng),
                pool_name: pick(MOCK_POOLS, rng),
                yield_amount: round_dp(rng.random::<f64>() * 5.0 + 0.1, 4),
                token_symbol: pick(MOCK_TOKENS, rng),
                usd_value: round_dp(rng.random::<f64>() * 50.0 + 5.0, 2),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// All three timeframes, generated independently.
pub fn mock_yield_summary<R: Rng>(today: NaiveDate, rng: &mut R) -> YieldSummary {
    YieldSummary {
        total_yield_usd: MOCK_TOTAL_YIELD_USD,
        daily_yields: generate_yields(Timeframe::Daily, today, rng),
        weekly_yields: generate_yields(Timeframe::Weekly, today, rng),
        monthly_yields: generate_yields(Timeframe::Monthly, today, rng),
    }
}

fn pick<R: Rng>(options: &[&str], rng: &mut R) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}
