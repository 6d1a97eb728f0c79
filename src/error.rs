use thiserror::Error;

/// Domain errors. Trait seams return `anyhow::Result` and these convert in with `?`.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No injected chain provider (no wallet extension / no RPC configured).
    #[error("Web3 provider not available")]
    ProviderUnavailable,

    #[error("Chain RPC request `{method}` failed: {reason}")]
    Rpc { method: String, reason: String },

    #[error("Invalid native balance `{0}`")]
    InvalidBalance(String),

    #[error("Unknown timeframe '{0}'. Use: daily, weekly, monthly")]
    InvalidTimeframe(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}
