use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::model::ChartPoint;

/// Days of history before today in the portfolio chart.
pub const PORTFOLIO_WINDOW_DAYS: u64 = 30;

/// Mock portfolio value history: `PORTFOLIO_WINDOW_DAYS` days plus today,
/// oldest first.
///
/// `value[i] = 0.8·base + sin(0.2·i)·0.1·base + U[0,1)·0.05·base`, floored at 0.
pub fn portfolio_series<R: Rng>(
    base_value: f64,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<ChartPoint> {
    (0..=PORTFOLIO_WINDOW_DAYS)
        .map(|i| {
            let date = today - Days::new(PORTFOLIO_WINDOW_DAYS - i);
            let wave = (i as f64 * 0.2).sin() * base_value * 0.1;
            let noise = rng.random::<f64>() * base_value * 0.05;
            let value = (base_value * 0.8 + wave + noise).max(0.0);
            ChartPoint::new(date, value)
        })
        .collect()
}
