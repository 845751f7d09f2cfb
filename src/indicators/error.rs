//! Indicator error types.

use thiserror::Error;

/// Reasons an indicator has no defined value for a series
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("empty series")]
    EmptySeries,

    #[error("insufficient data: need {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid period: {0}")]
    InvalidPeriod(u32),

    #[error("non-finite {0}")]
    NonFinite(&'static str),
}

impl IndicatorError {
    pub fn insufficient(required: usize, actual: usize) -> Self {
        IndicatorError::InsufficientData { required, actual }
    }
}
