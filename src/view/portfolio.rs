use std::fmt::Write;
use std::sync::Arc;

use alloy::primitives::Address;
use alloy::primitives::utils::format_ether;
use anyhow::Result;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use tracing::{debug, error};

use super::{FetchState, RequestGuard, Ticket, card, status};
use crate::chart::{self, ChartOptions, ChartRender, escape_xml};
use crate::error::TrackerError;
use crate::format::{format_token_amount, format_usd};
use crate::mock::portfolio_series;
use crate::model::{ChartPoint, Portfolio, TokenBalance};
use crate::protocols::PositionService;
use crate::provider::ChainProvider;

/// Inline message shown for any fetch failure.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch portfolio data";
pub const NATIVE_SYMBOL: &str = "ETH";
pub const CHART_TITLE: &str = "Portfolio Value";
/// Decimal places for token amounts.
const TOKEN_DECIMALS: usize = 4;

/// A loaded portfolio plus the value history drawn for it.
#[derive(Debug, Clone)]
pub struct PortfolioData {
    pub portfolio: Portfolio,
    pub history: Vec<ChartPoint>,
}

/// An issued portfolio fetch. Owns everything it needs, so it can be driven
/// while the view keeps handling address changes.
pub struct PortfolioRequest {
    ticket: Ticket,
    address: Address,
    provider: Option<Arc<dyn ChainProvider>>,
    positions: Arc<PositionService>,
    eth_usd_rate: f64,
}

/// Result of a `PortfolioRequest`, to be handed back to `PortfolioView::apply`.
pub struct PortfolioOutcome {
    ticket: Ticket,
    address: Address,
    result: Result<Portfolio>,
}

impl PortfolioRequest {
    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn run(self) -> PortfolioOutcome {
        let result = load_portfolio(
            self.provider,
            &self.positions,
            self.address,
            self.eth_usd_rate,
        )
        .await;
        PortfolioOutcome {
            ticket: self.ticket,
            address: self.address,
            result,
        }
    }
}

/// Native balance read and position aggregation, run concurrently.
async fn load_portfolio(
    provider: Option<Arc<dyn ChainProvider>>,
    positions: &PositionService,
    address: Address,
    eth_usd_rate: f64,
) -> Result<Portfolio> {
    let provider = provider.ok_or(TrackerError::ProviderUnavailable)?;

    let (balance, pools) = futures::join!(
        provider.native_balance(address),
        positions.get_all_positions(address),
    );

    let balance = format_ether(balance?);
    let amount: f64 = balance
        .parse()
        .map_err(|_| TrackerError::InvalidBalance(balance.clone()))?;
    let native = TokenBalance::native(NATIVE_SYMBOL, balance, amount * eth_usd_rate);

    Ok(Portfolio::from_holdings(vec![native], pools))
}

pub struct PortfolioView {
    provider: Option<Arc<dyn ChainProvider>>,
    positions: Arc<PositionService>,
    eth_usd_rate: f64,
    today: NaiveDate,
    rng: StdRng,
    address: Option<Address>,
    state: FetchState<PortfolioData>,
    guard: RequestGuard,
}

impl PortfolioView {
    pub fn new(
        provider: Option<Arc<dyn ChainProvider>>,
        positions: Arc<PositionService>,
        eth_usd_rate: f64,
        today: NaiveDate,
        rng: StdRng,
    ) -> Self {
        Self {
            provider,
            positions,
            eth_usd_rate,
            today,
            rng,
            address: None,
            state: FetchState::default(),
            guard: RequestGuard::default(),
        }
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn state(&self) -> &FetchState<PortfolioData> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn portfolio(&self) -> Option<&Portfolio> {
        self.state.data.as_ref().map(|d| &d.portfolio)
    }

    pub fn history(&self) -> &[ChartPoint] {
        self.state
            .data
            .as_ref()
            .map(|d| d.history.as_slice())
            .unwrap_or_default()
    }

    /// Record a new wallet address. Returns the fetch to run, if any: nothing
    /// when the address is unchanged, and nothing (state cleared) when it is
    /// `None`.
    pub fn change_address(&mut self, address: Option<Address>) -> Option<PortfolioRequest> {
        if address == self.address {
            return None;
        }
        self.address = address;
        if address.is_none() {
            self.guard.invalidate();
            self.state.clear();
            return None;
        }
        self.begin_fetch()
    }

    /// Change the address and run the resulting fetch to completion.
    pub async fn set_address(&mut self, address: Option<Address>) {
        if let Some(request) = self.change_address(address) {
            let outcome = request.run().await;
            self.apply(outcome);
        }
    }

    /// Manual refresh / retry.
    pub async fn refresh(&mut self) {
        if let Some(request) = self.begin_fetch() {
            let outcome = request.run().await;
            self.apply(outcome);
        }
    }

    /// Issue a fetch for the current address and enter the loading state.
    pub fn begin_fetch(&mut self) -> Option<PortfolioRequest> {
        let address = self.address?;
        let ticket = self.guard.issue();
        self.state.start();
        Some(PortfolioRequest {
            ticket,
            address,
            provider: self.provider.clone(),
            positions: self.positions.clone(),
            eth_usd_rate: self.eth_usd_rate,
        })
    }

    /// Store a finished fetch. Returns `false` if it was superseded and dropped.
    pub fn apply(&mut self, outcome: PortfolioOutcome) -> bool {
        if !self.guard.is_current(outcome.ticket) {
            debug!(address = %outcome.address, "discarding stale portfolio response");
            return false;
        }
        match outcome.result {
            Ok(portfolio) => {
                let history = portfolio_series(portfolio.total_value, self.today, &mut self.rng);
                self.state.succeed(PortfolioData { portfolio, history });
            }
            Err(e) => {
                error!(address = %outcome.address, "Error fetching portfolio: {e:#}");
                self.state.fail(FETCH_ERROR_MESSAGE);
            }
        }
        true
    }

    pub fn chart(&self) -> ChartRender {
        chart::render(self.history(), &ChartOptions::new(CHART_TITLE).with_color("#2e7d32"))
    }

    pub fn render_html(&self) -> String {
        if self.state.loading {
            return status("Loading portfolio data...");
        }
        if let Some(err) = &self.state.error {
            return format!(
                "<div style=\"padding: 20px; color: red\">\n  <p>Error: {}</p>\n  \
                 <button data-action=\"portfolio-retry\" style=\"margin-top: 10px; padding: 5px 10px\">Retry</button>\n</div>\n",
                escape_xml(err)
            );
        }
        let Some(data) = &self.state.data else {
            return String::new();
        };
        let portfolio = &data.portfolio;

        let mut body = String::new();
        body.push_str(
            "<div style=\"display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px\">\n  \
             <h3>Portfolio Overview</h3>\n  \
             <button data-action=\"portfolio-refresh\" style=\"padding: 5px 10px\">Refresh</button>\n</div>\n",
        );
        let _ = write!(
            body,
            "<div style=\"margin-bottom: 20px; padding: 15px; background-color: #f5f5f5; border-radius: 5px\">\n  \
             <h4 style=\"margin: 0 0 10px 0\">Total Portfolio Value</h4>\n  \
             <div style=\"font-size: 24px; font-weight: bold; color: #2e7d32\">{}</div>\n</div>\n",
            format_usd(portfolio.total_value)
        );

        body.push_str(&self.chart().to_html());

        body.push_str("<div>\n  <h4>Token Balances</h4>\n");
        if portfolio.tokens.is_empty() {
            body.push_str("  <p style=\"color: #666\">No tokens found</p>\n");
        } else {
            body.push_str("  <div style=\"border: 1px solid #eee; border-radius: 5px\">\n");
            for token in &portfolio.tokens {
                let symbol = escape_xml(&token.symbol);
                let _ = write!(
                    body,
                    "    <div style=\"padding: 10px; display: flex; justify-content: space-between\">\n      \
                     <div><strong>{symbol}</strong><div style=\"font-size: 14px; color: #666\">{} {symbol}</div></div>\n      \
                     <div style=\"text-align: right\">{}</div>\n    </div>\n",
                    escape_xml(&format_token_amount(&token.balance, TOKEN_DECIMALS)),
                    format_usd(token.usd_value)
                );
            }
            body.push_str("  </div>\n");
        }
        body.push_str("</div>\n");

        if !portfolio.pools.is_empty() {
            body.push_str("<div style=\"margin-top: 20px\">\n  <h4>LP Positions</h4>\n");
            for pool in &portfolio.pools {
                let legs = pool
                    .legs()
                    .map(|t| {
                        format!(
                            "{} {}",
                            format_token_amount(&t.balance, TOKEN_DECIMALS),
                            t.symbol
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(" + ");
                let _ = write!(
                    body,
                    "  <div style=\"padding: 10px; display: flex; justify-content: space-between\">\n    \
                     <div><strong>{}</strong><div style=\"font-size: 14px; color: #666\">{} • {} • {:.1}% APR</div></div>\n    \
                     <div style=\"text-align: right\">{}</div>\n  </div>\n",
                    escape_xml(&pool.pool_name),
                    escape_xml(&pool.protocol),
                    escape_xml(&legs),
                    pool.apr,
                    format_usd(pool.total_usd_value)
                );
            }
            body.push_str("</div>\n");
        }

        card(&body)
    }
}
