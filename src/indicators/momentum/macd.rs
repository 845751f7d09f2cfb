//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{closes, Candle, MacdIndicator};

/// MACD line, signal line and histogram at every bar
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Every EMA is seeded by its first input, so any non-empty series has a value.
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Result<MacdIndicator, IndicatorError> {
    let series = calculate_macd_series(candles, fast_period, slow_period, signal_period)?;

    let (macd, signal, histogram) = match (
        series.macd.last(),
        series.signal.last(),
        series.histogram.last(),
    ) {
        (Some(&m), Some(&s), Some(&h)) => (m, s, h),
        _ => return Err(IndicatorError::EmptySeries),
    };

    if !histogram.is_finite() {
        return Err(IndicatorError::NonFinite("macd histogram"));
    }

    Ok(MacdIndicator {
        macd,
        signal,
        histogram,
        period: Some((fast_period, slow_period, signal_period)),
    })
}

pub fn calculate_macd_series(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Result<MacdSeries, IndicatorError> {
    for period in [fast_period, slow_period, signal_period] {
        if period == 0 {
            return Err(IndicatorError::InvalidPeriod(period));
        }
    }
    if candles.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }

    let closes = closes(candles);
    let fast = math::ema_series(&closes, fast_period as usize);
    let slow = math::ema_series(&closes, slow_period as usize);

    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = math::ema_series(&macd, signal_period as usize);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    Ok(MacdSeries {
        macd,
        signal,
        histogram,
    })
}
