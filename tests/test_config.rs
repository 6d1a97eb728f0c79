use chrono::NaiveDate;
use rand::Rng;

use yield_tracker::config::{ConfigOverrides, DashboardConfig, ENV_ETH_USD};

// Only test in this binary: it mutates the process environment.
#[test]
fn test_malformed_rate_only_breaks_env_backed_config() {
    // SAFETY: no other thread in this test binary reads the environment.
    unsafe { std::env::set_var(ENV_ETH_USD, "not-a-number") };

    let overrides = ConfigOverrides {
        seed: Some(5),
        as_of: Some("2026-10-19".to_string()),
        ..Default::default()
    };
    let err = DashboardConfig::resolve(&overrides).unwrap_err();
    assert!(format!("{err:#}").contains(ENV_ETH_USD));

    // the chart command only needs the seed and the date
    let config = DashboardConfig::offline(&overrides).unwrap();
    assert_eq!(config.today(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    let a: f64 = config.rng().random();
    let b: f64 = config.rng().random();
    assert_eq!(a, b);

    unsafe { std::env::remove_var(ENV_ETH_USD) };
}
