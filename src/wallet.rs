//! Wallet connection state machine.

use std::sync::Arc;

use alloy::primitives::Address;
use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::error::TrackerError;
use crate::provider::ChainProvider;

/// Shown when the user asks to connect but no wallet is installed.
pub const INSTALL_WALLET_MESSAGE: &str = "Please install MetaMask!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalletState {
    #[default]
    Disconnected,
    Connecting,
    Connected(Address),
}

impl WalletState {
    pub fn account(&self) -> Option<Address> {
        match self {
            WalletState::Connected(addr) => Some(*addr),
            _ => None,
        }
    }
}

/// Blocking user notification (browser `alert`).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Notifier that only logs.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!(target: "wallet", "{message}");
    }
}

/// Receives the connected account whenever it changes (`None` = disconnected).
pub trait AccountListener: Send + Sync {
    fn on_account_changed(&self, account: Option<Address>);
}

pub struct WalletConnector {
    provider: Option<Arc<dyn ChainProvider>>,
    notifier: Arc<dyn Notifier>,
    listeners: Vec<Arc<dyn AccountListener>>,
    state: WalletState,
    /// Last account listeners were told about.
    emitted: Option<Address>,
}

impl WalletConnector {
    pub fn new(provider: Option<Arc<dyn ChainProvider>>) -> Self {
        Self {
            provider,
            notifier: Arc::new(LogNotifier),
            listeners: Vec::new(),
            state: WalletState::Disconnected,
            emitted: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn AccountListener>) {
        self.listeners.push(listener);
    }

    pub fn state(&self) -> WalletState {
        self.state
    }

    pub fn account(&self) -> Option<Address> {
        self.state.account()
    }

    pub fn is_connecting(&self) -> bool {
        self.state == WalletState::Connecting
    }

    /// Silent check for an existing authorization. Never prompts and never
    /// surfaces an error.
    pub async fn mount(&mut self) {
        let Some(provider) = self.provider.clone() else {
            debug!("no chain provider; skipping connection check");
            return;
        };
        match provider.accounts().await {
            Ok(accounts) => {
                if let Some(first) = accounts.first() {
                    info!(account = %first, "wallet already authorized");
                    self.transition(WalletState::Connected(*first));
                }
            }
            Err(e) => error!("Error checking wallet connection: {e:#}"),
        }
    }

    /// User-initiated connect. Alerts and fails with
    /// `TrackerError::ProviderUnavailable` if no provider is installed.
    ///
    /// Returns the connected account, or `None` if the wallet granted no accounts.
    pub async fn connect(&mut self) -> Result<Option<Address>> {
        let Some(provider) = self.provider.clone() else {
            self.notifier.alert(INSTALL_WALLET_MESSAGE);
            return Err(TrackerError::ProviderUnavailable.into());
        };

        let previous = self.state;
        self.state = WalletState::Connecting;

        match provider.request_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(first) => {
                    info!(account = %first, "wallet connected");
                    self.transition(WalletState::Connected(*first));
                    Ok(Some(*first))
                }
                None => {
                    self.state = previous;
                    Ok(previous.account())
                }
            },
            Err(e) => {
                error!("Error connecting wallet: {e:#}");
                self.transition(WalletState::Disconnected);
                Err(e)
            }
        }
    }

    /// Local reset only; the wallet keeps its site authorization.
    pub fn disconnect(&mut self) {
        info!("wallet disconnected");
        self.transition(WalletState::Disconnected);
    }

    /// Move to `next`, notifying listeners if the visible account changed.
    fn transition(&mut self, next: WalletState) {
        self.state = next;
        let account = next.account();
        if account != self.emitted {
            self.emitted = account;
            for listener in &self.listeners {
                listener.on_account_changed(account);
            }
        }
    }
}
