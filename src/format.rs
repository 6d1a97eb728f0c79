//! Display formatting shared by the chart renderer and the views.

use chrono::NaiveDate;

/// en-US currency: `$1,234.50`, `-$12.00`.
///
/// Any negative input keeps its sign, even when it rounds to zero (`-$0.00`).
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }
    let cents = (amount.abs() * 100.0).round() as u128;
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Compact axis label: `$2500.0k` at or above 1000, whole dollars below.
pub fn format_axis_value(value: f64) -> String {
    if value >= 1000.0 {
        format!("${:.1}k", round_dp(value / 1000.0, 1))
    } else {
        format!("${:.0}", round_dp(value, 0))
    }
}

/// Fix a decimal token balance to `decimals` places, ties away from zero.
/// Unparseable input is returned as-is.
pub fn format_token_amount(balance: &str, decimals: usize) -> String {
    match balance.trim().parse::<f64>() {
        Ok(n) => format!("{:.decimals$}", round_dp(n, decimals as i32)),
        Err(_) => balance.to_string(),
    }
}

/// `Oct 19`
pub fn format_axis_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `Oct 19, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `0x1F98...F984` style abbreviation of a hex address.
pub fn short_address(address: &str) -> String {
    match (address.get(..6), address.get(38..)) {
        (Some(head), Some(tail)) => format!("{head}...{tail}"),
        _ => address.to_string(),
    }
}

/// Round half away from zero to `dp` decimal places.
///
/// `format!("{:.N}")` rounds exact ties to even (`2.5` → `2`); display values
/// go through this first so ties round up.
pub(crate) fn round_dp(value: f64, dp: i32) -> f64 {
    let scale = 10f64.powi(dp);
    (value * scale).round() / scale
}

fn group_thousands(mut n: u128) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(847.32), "$847.32");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_usd(-12.0), "-$12.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(-0.001), "-$0.00");
    }

    #[test]
    fn test_format_axis_value() {
        assert_eq!(format_axis_value(2_500_000.0), "$2500.0k");
        assert_eq!(format_axis_value(1000.0), "$1.0k");
        assert_eq!(format_axis_value(999.0), "$999");
        assert_eq!(format_axis_value(42.4), "$42");
    }

    #[test]
    fn test_axis_value_ties_round_up() {
        // each leg of the Uniswap mock position is worth 1250
        assert_eq!(format_axis_value(1250.0), "$1.3k");
        assert_eq!(format_axis_value(2.5), "$3");
        assert_eq!(format_axis_value(0.5), "$1");
    }

    #[test]
    fn test_format_token_amount() {
        assert_eq!(format_token_amount("1.5", 4), "1.5000");
        assert_eq!(format_token_amount("0.123456789", 4), "0.1235");
        assert_eq!(format_token_amount("n/a", 4), "n/a");
    }

    #[test]
    fn test_token_amount_ties_round_up() {
        assert_eq!(format_token_amount("0.03125", 4), "0.0313");
        assert_eq!(format_token_amount("2.5", 0), "3");
        assert_eq!(format_token_amount("-0.03125", 4), "-0.0313");
    }

    #[test]
    fn test_dates() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();
        assert_eq!(format_axis_date(d), "Oct 9");
        assert_eq!(format_long_date(d), "Oct 9, 2026");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x1F98431c8aD98523631AE4a59f267346ea31F984"),
            "0x1F98...F984"
        );
        assert_eq!(short_address("0x12"), "0x12");
    }
}
