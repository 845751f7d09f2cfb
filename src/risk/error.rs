//! Risk engine error types.

use thiserror::Error;

use crate::indicators::IndicatorError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("empty series")]
    EmptySeries,

    #[error("invalid current price: {0}")]
    InvalidPrice(f64),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error("non-finite {0}")]
    NonFinite(&'static str),
}
