//! Risk and trade-parameter engine: stop-loss, take-profit, position size, risk level

pub mod error;
pub mod level;
pub mod parameters;
pub mod position;
pub mod stop_loss;
pub mod take_profit;

pub use error::RiskError;
pub use level::*;
pub use parameters::*;
pub use position::*;
pub use stop_loss::*;
pub use take_profit::*;
