//! Synthetic data generators.
//!
//! Every generator takes the rng and "today" explicitly; seed a `StdRng` for
//! reproducible output.

pub mod portfolio;
pub mod yields;

pub use portfolio::portfolio_series;
pub use yields::{generate_yields, mock_yield_summary};
