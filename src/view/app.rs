use std::sync::Arc;

use alloy::primitives::Address;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{PortfolioView, YieldHistoryView, card};
use crate::chart::escape_xml;
use crate::config::DashboardConfig;
use crate::format::short_address;
use crate::protocols::PositionService;
use crate::provider::ChainProvider;
use crate::wallet::{WalletConnector, WalletState};

pub const PAGE_TITLE: &str = "DeFi Yield Tracker";
pub const CONNECT_PROMPT: &str = "Please connect your wallet to start tracking your DeFi yields";

/// App shell: the wallet card plus the two data views, kept in sync with the
/// connected account.
pub struct Dashboard {
    wallet: WalletConnector,
    portfolio: PortfolioView,
    yields: YieldHistoryView,
}

impl Dashboard {
    /// Wire every collaborator from `config` around a single provider handle.
    pub fn new(config: &DashboardConfig, provider: Option<Arc<dyn ChainProvider>>) -> Self {
        let positions = Arc::new(PositionService::supported(
            provider.clone(),
            config.adapter_latency,
        ));
        let mut base = config.rng();
        let today = config.today();

        let portfolio = PortfolioView::new(
            provider.clone(),
            positions,
            config.eth_usd_rate,
            today,
            StdRng::from_rng(&mut base),
        );
        let yields = YieldHistoryView::new(today, StdRng::from_rng(&mut base));

        Self::from_parts(WalletConnector::new(provider), portfolio, yields)
    }

    pub fn from_parts(
        wallet: WalletConnector,
        portfolio: PortfolioView,
        yields: YieldHistoryView,
    ) -> Self {
        Self {
            wallet,
            portfolio,
            yields,
        }
    }

    pub fn wallet(&self) -> &WalletConnector {
        &self.wallet
    }

    pub fn wallet_mut(&mut self) -> &mut WalletConnector {
        &mut self.wallet
    }

    pub fn portfolio(&self) -> &PortfolioView {
        &self.portfolio
    }

    pub fn portfolio_mut(&mut self) -> &mut PortfolioView {
        &mut self.portfolio
    }

    pub fn yields(&self) -> &YieldHistoryView {
        &self.yields
    }

    pub fn yields_mut(&mut self) -> &mut YieldHistoryView {
        &mut self.yields
    }

    pub fn account(&self) -> Option<Address> {
        self.wallet.account()
    }

    /// Silent connection check on page load.
    pub async fn mount(&mut self) {
        self.wallet.mount().await;
        self.sync_views().await;
    }

    pub async fn connect(&mut self) -> Result<Option<Address>> {
        let result = self.wallet.connect().await;
        self.sync_views().await;
        result
    }

    pub async fn disconnect(&mut self) {
        self.wallet.disconnect();
        self.sync_views().await;
    }

    /// Push the wallet's account into both views. Views ignore unchanged addresses.
    async fn sync_views(&mut self) {
        let account = self.wallet.account();
        self.portfolio.set_address(account).await;
        self.yields.set_address(account);
    }

    fn render_wallet(&self) -> String {
        let mut body = String::from("<h3>Wallet Connection</h3>\n");
        match self.wallet.state() {
            WalletState::Connected(addr) => {
                body.push_str(&format!(
                    "<div>\n  <p>Connected: {}</p>\n  \
                     <button data-action=\"wallet-disconnect\" style=\"padding: 10px 20px\">Disconnect</button>\n</div>\n",
                    escape_xml(&short_address(&addr.to_string()))
                ));
            }
            WalletState::Connecting => body.push_str(
                "<button data-action=\"wallet-connect\" disabled style=\"padding: 10px 20px\">Connecting...</button>\n",
            ),
            WalletState::Disconnected => body.push_str(
                "<button data-action=\"wallet-connect\" style=\"padding: 10px 20px\">Connect Wallet</button>\n",
            ),
        }
        card(&body)
    }

    /// Full HTML document for the current state.
    pub fn render_html(&self) -> String {
        let mut main = self.render_wallet();
        if self.wallet.account().is_some() {
            main.push_str("<div style=\"margin-top: 20px\">\n");
            main.push_str(&self.portfolio.render_html());
            main.push_str("</div>\n<div style=\"margin-top: 20px\">\n");
            main.push_str(&self.yields.render_html());
            main.push_str("</div>\n");
        } else {
            main.push_str(&format!(
                "<div style=\"text-align: center; margin-top: 20px\">\n  <p>{CONNECT_PROMPT}</p>\n</div>\n"
            ));
        }

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{PAGE_TITLE}</title>\n</head>\n\
             <body>\n<div class=\"App\">\n\
             <header style=\"padding: 20px; text-align: center\">\n  <h1>{PAGE_TITLE}</h1>\n  \
             <p>Track your DeFi yield farming rewards</p>\n</header>\n\
             <main style=\"padding: 20px; max-width: 800px; margin: 0 auto\">\n{main}</main>\n\
             </div>\n</body>\n</html>\n"
        )
    }
}
