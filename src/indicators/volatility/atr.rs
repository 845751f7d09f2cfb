//! ATR (Average True Range) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{AtrIndicator, Candle};

/// True range of every bar; the first bar has no previous close and uses high - low
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| match i {
            0 => candle.high - candle.low,
            _ => math::true_range(candle.high, candle.low, candles[i - 1].close),
        })
        .collect()
}

/// Calculate ATR (Average True Range)
///
/// Simple rolling mean of the true range over the last `period` bars.
pub fn calculate_atr(candles: &[Candle], period: u32) -> Result<AtrIndicator, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    if candles.len() < period as usize {
        return Err(IndicatorError::insufficient(period as usize, candles.len()));
    }

    let tr_values = true_ranges(candles);
    let value = math::sma(&tr_values, period as usize)
        .ok_or_else(|| IndicatorError::insufficient(period as usize, candles.len()))?;
    if !value.is_finite() {
        return Err(IndicatorError::NonFinite("atr"));
    }

    Ok(AtrIndicator { value, period })
}
