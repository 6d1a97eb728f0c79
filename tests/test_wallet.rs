mod fakes;

use std::sync::Arc;

use yield_tracker::TrackerError;
use yield_tracker::provider::ChainProvider;
use yield_tracker::wallet::{INSTALL_WALLET_MESSAGE, WalletConnector, WalletState};

use fakes::*;

fn connector(
    provider: Option<FakeProvider>,
) -> (WalletConnector, Arc<RecordingListener>, Arc<RecordingNotifier>) {
    let provider = provider.map(|p| Arc::new(p) as Arc<dyn ChainProvider>);
    let listener = Arc::new(RecordingListener::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut wallet = WalletConnector::new(provider).with_notifier(notifier.clone());
    wallet.add_listener(listener.clone());
    (wallet, listener, notifier)
}

// ── Mount ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_mount_picks_up_authorized_account_once() {
    let (mut wallet, listener, notifier) = connector(Some(FakeProvider::preauthorized(ALICE)));

    wallet.mount().await;
    assert_eq!(wallet.state(), WalletState::Connected(ALICE));
    assert_eq!(listener.events(), vec![Some(ALICE)]);

    // a second check for the same account does not re-emit
    wallet.mount().await;
    assert_eq!(listener.events(), vec![Some(ALICE)]);
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn test_mount_without_authorization_stays_disconnected() {
    let (mut wallet, listener, _) = connector(Some(FakeProvider::fresh(vec![ALICE])));
    wallet.mount().await;
    assert_eq!(wallet.state(), WalletState::Disconnected);
    assert!(listener.events().is_empty());
}

#[tokio::test]
async fn test_mount_swallows_provider_errors() {
    let (mut wallet, listener, notifier) = connector(Some(FakeProvider::broken()));
    wallet.mount().await;
    assert_eq!(wallet.account(), None);
    assert!(listener.events().is_empty());
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn test_mount_without_provider_is_silent() {
    let (mut wallet, _, notifier) = connector(None);
    wallet.mount().await;
    assert_eq!(wallet.state(), WalletState::Disconnected);
    assert!(notifier.alerts().is_empty());
}

// ── Connect / disconnect ─────────────────────────────────────────────

#[tokio::test]
async fn test_connect_without_provider_alerts() {
    let (mut wallet, listener, notifier) = connector(None);

    let err = wallet.connect().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TrackerError>(),
        Some(TrackerError::ProviderUnavailable)
    ));
    assert_eq!(notifier.alerts(), vec![INSTALL_WALLET_MESSAGE.to_string()]);
    assert_eq!(wallet.state(), WalletState::Disconnected);
    assert!(listener.events().is_empty());
}

#[tokio::test]
async fn test_connect_uses_first_granted_account() {
    let (mut wallet, listener, _) = connector(Some(FakeProvider::fresh(vec![BOB, ALICE])));

    let account = wallet.connect().await.unwrap();
    assert_eq!(account, Some(BOB));
    assert_eq!(wallet.state(), WalletState::Connected(BOB));
    assert!(!wallet.is_connecting());
    assert_eq!(listener.events(), vec![Some(BOB)]);
}

#[tokio::test]
async fn test_connect_rejection_returns_to_disconnected() {
    let (mut wallet, listener, notifier) = connector(Some(FakeProvider::rejecting()));

    let err = wallet.connect().await.unwrap_err();
    assert!(err.to_string().contains("rejected"));
    assert_eq!(wallet.state(), WalletState::Disconnected);
    assert!(!wallet.is_connecting());
    assert!(listener.events().is_empty());
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn test_connect_with_no_granted_accounts_keeps_state() {
    let (mut wallet, listener, _) = connector(Some(FakeProvider::fresh(Vec::new())));

    let account = wallet.connect().await.unwrap();
    assert_eq!(account, None);
    assert_eq!(wallet.state(), WalletState::Disconnected);
    assert!(listener.events().is_empty());
}

#[tokio::test]
async fn test_disconnect_emits_none() {
    let (mut wallet, listener, _) = connector(Some(FakeProvider::preauthorized(ALICE)));
    wallet.mount().await;
    wallet.disconnect();

    assert_eq!(wallet.state(), WalletState::Disconnected);
    assert_eq!(listener.events(), vec![Some(ALICE), None]);

    // disconnecting twice is a no-op for listeners
    wallet.disconnect();
    assert_eq!(listener.events(), vec![Some(ALICE), None]);
}

#[tokio::test]
async fn test_reconnect_after_disconnect_emits_again() {
    let (mut wallet, listener, _) = connector(Some(FakeProvider::preauthorized(ALICE)));
    wallet.mount().await;
    wallet.disconnect();
    wallet.connect().await.unwrap();
    assert_eq!(listener.events(), vec![Some(ALICE), None, Some(ALICE)]);
}
