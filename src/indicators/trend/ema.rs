//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{closes, Candle, EmaIndicator};

/// Calculate EMA for a specific period
///
/// Seeded by the first close, so one candle is enough for a value.
pub fn calculate_ema(candles: &[Candle], period: u32) -> Result<EmaIndicator, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    let closes = closes(candles);
    let value = math::ema(&closes, period as usize).ok_or(IndicatorError::EmptySeries)?;
    if !value.is_finite() {
        return Err(IndicatorError::NonFinite("ema"));
    }

    Ok(EmaIndicator { value, period })
}

/// EMA at every bar
pub fn ema_series(candles: &[Candle], period: u32) -> Vec<f64> {
    math::ema_series(&closes(candles), period.max(1) as usize)
}

/// Relative gap between a fast and a slow EMA, in percent of the slow one
pub fn ema_gap_pct(fast: f64, slow: f64) -> Option<f64> {
    if slow == 0.0 || !fast.is_finite() || !slow.is_finite() {
        return None;
    }
    Some((fast - slow) / slow * 100.0)
}
