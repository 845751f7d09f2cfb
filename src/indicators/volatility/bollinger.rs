//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{closes, BollingerBandsIndicator, Candle};

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: u32,
    std_dev: f64,
) -> Result<BollingerBandsIndicator, IndicatorError> {
    if period < 2 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    if candles.len() < period as usize {
        return Err(IndicatorError::insufficient(period as usize, candles.len()));
    }

    let closes = closes(candles);
    let middle = math::sma(&closes, period as usize)
        .ok_or_else(|| IndicatorError::insufficient(period as usize, closes.len()))?;
    let std = math::standard_deviation(&closes, period as usize)
        .ok_or(IndicatorError::NonFinite("bollinger deviation"))?;

    let upper = middle + (std_dev * std);
    let lower = middle - (std_dev * std);
    if !upper.is_finite() || !lower.is_finite() {
        return Err(IndicatorError::NonFinite("bollinger band"));
    }

    Ok(BollingerBandsIndicator {
        upper,
        middle,
        lower,
        period,
        std_dev,
    })
}

/// Where `price` sits between the bands: 0 at the lower band, 1 at the upper.
///
/// Clamped to [0, 1]; a zero-width band reads 0.5.
pub fn band_position(price: f64, lower: f64, upper: f64) -> f64 {
    let width = upper - lower;
    if !width.is_finite() || width <= 0.0 || !price.is_finite() {
        return 0.5;
    }
    ((price - lower) / width).clamp(0.0, 1.0)
}
