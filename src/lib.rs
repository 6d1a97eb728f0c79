//! Wallet dashboard core: portfolio balance, protocol positions and yield
//! history, with a dependency-free SVG chart renderer.
//!
//! Position records, value history and yield history are mock data; only the
//! native balance is read from the chain provider.

pub mod chart;
pub mod error;
pub mod format;
pub mod mock;
pub mod model;
pub mod schema;

#[cfg(feature = "full")]
pub mod config;
#[cfg(feature = "full")]
pub mod logging;
#[cfg(feature = "full")]
pub mod protocols;
#[cfg(feature = "full")]
pub mod provider;
#[cfg(feature = "full")]
pub mod view;
#[cfg(feature = "full")]
pub mod wallet;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::TrackerError;
