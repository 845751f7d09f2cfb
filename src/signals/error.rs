//! Assessment error types.

use thiserror::Error;

use crate::models::timeframe::Timeframe;
use crate::services::market_data::MarketDataError;

/// Reasons an assessment produces no result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("missing or empty {0} series")]
    MissingSeries(Timeframe),

    #[error("invalid current price: {0}")]
    InvalidPrice(f64),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}

impl AssessmentError {
    /// True when the failure means there was nothing to assess
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            AssessmentError::MissingSeries(_)
                | AssessmentError::MarketData(MarketDataError::NotFound { .. })
        )
    }
}
