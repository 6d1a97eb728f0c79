pub mod portfolio;
pub mod position;
pub mod series;
pub mod token;
pub mod yields;

pub use portfolio::Portfolio;
pub use position::PoolPosition;
pub use series::ChartPoint;
pub use token::TokenBalance;
pub use yields::{Timeframe, YieldHistoryEntry, YieldSummary};
