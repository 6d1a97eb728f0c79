use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use yield_tracker::chart::{self, ChartOptions};
use yield_tracker::config::{ConfigOverrides, DEMO_ACCOUNT, DashboardConfig};
use yield_tracker::format::{format_long_date, format_token_amount, format_usd};
use yield_tracker::mock;
use yield_tracker::model::Timeframe;
use yield_tracker::protocols::{PositionService, protocol_tvl};
use yield_tracker::view::Dashboard;

use crate::cli::ConnectionArgs;

pub struct ChartArgs {
    pub base_value: f64,
    pub title: String,
    pub height: f64,
    pub color: String,
    pub seed: Option<u64>,
    pub as_of: Option<String>,
    pub output: Option<PathBuf>,
}

/// `dashboard`: mount, connect if the wallet is not already authorized, render.
pub async fn dashboard(conn: &ConnectionArgs, timeframe: &str, output: Option<&Path>) -> Result<()> {
    let timeframe: Timeframe = timeframe.parse()?;
    let config = DashboardConfig::resolve(&conn.overrides())?;
    let provider = config.build_provider()?;

    let mut dashboard = Dashboard::new(&config, provider);
    dashboard.mount().await;
    if dashboard.account().is_none() {
        if let Err(e) = dashboard.connect().await {
            warn!("wallet not connected: {e:#}");
        }
    }
    dashboard.yields_mut().select_timeframe(timeframe);

    if let Some(err) = dashboard.portfolio().error() {
        warn!("portfolio: {err}");
    }
    write_output(&dashboard.render_html(), output)
}

/// `chart`: mock value series → SVG. Reads no environment.
pub fn chart(args: &ChartArgs) -> Result<()> {
    let config = DashboardConfig::offline(&ConfigOverrides {
        seed: args.seed,
        as_of: args.as_of.clone(),
        ..Default::default()
    })?;
    let mut rng = config.rng();
    let points = mock::portfolio_series(args.base_value, config.today(), &mut rng);

    let options = ChartOptions::new(&args.title)
        .with_height(args.height)
        .with_color(&args.color);
    let render = chart::render(&points, &options);
    write_output(&render.to_svg(), args.output.as_deref())
}

/// `yields`: print mock yield history.
pub fn yields(timeframe: &str, seed: Option<u64>, as_of: Option<&str>, json: bool) -> Result<()> {
    let timeframe: Timeframe = timeframe.parse()?;
    let config = DashboardConfig::resolve(&ConfigOverrides {
        seed,
        as_of: as_of.map(str::to_string),
        ..Default::default()
    })?;
    let mut rng = config.rng();
    let summary = mock::mock_yield_summary(config.today(), &mut rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Total earned: {}", format_usd(summary.total_yield_usd));
    println!("Recent yields ({timeframe})");
    println!("  {:<14} {:<12} {:<10} {:>10} {:<6} {:>10}", "Date", "Protocol", "Pool", "Amount", "Token", "USD");
    println!("  {}", "-".repeat(68));
    for entry in summary.entries(timeframe) {
        println!(
            "  {:<14} {:<12} {:<10} {:>10.4} {:<6} {:>10}",
            format_long_date(entry.date),
            entry.protocol,
            entry.pool_name,
            entry.yield_amount,
            entry.token_symbol,
            format_usd(entry.usd_value),
        );
    }
    Ok(())
}

/// `positions`: run the aggregator once and print what came back.
pub async fn positions(conn: &ConnectionArgs, address: Option<&str>, json: bool) -> Result<()> {
    let config = DashboardConfig::resolve(&conn.overrides())?;
    let address: Address = match address {
        Some(a) => a.parse().with_context(|| format!("invalid address '{a}'"))?,
        None if config.demo => DEMO_ACCOUNT,
        None => bail!("--address is required unless --demo is set"),
    };

    let service = PositionService::supported(config.build_provider()?, config.adapter_latency);
    info!(%address, protocols = service.protocols().len(), "fetching positions");
    let report = service.fetch_all(address).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for pos in &report.positions {
        println!(
            "{:<12} {:<16} {:>12} {:>6.1}% APR  LP {}  (protocol TVL {})",
            pos.protocol,
            pos.pool_name,
            format_usd(pos.total_usd_value),
            pos.apr,
            format_token_amount(&pos.lp_tokens, 4),
            format_usd(protocol_tvl(&pos.protocol)),
        );
    }
    for failure in &report.failures {
        println!("{:<12} FAILED: {}", failure.protocol, failure.reason);
    }
    println!("Total: {}", format_usd(report.total_usd_value()));
    Ok(())
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
