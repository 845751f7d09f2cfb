//! RSI (Relative Strength Index) indicator

use crate::indicators::error::IndicatorError;
use crate::models::indicators::{closes, Candle, RsiIndicator};

/// Value reported when RSI is undefined
pub const NEUTRAL_RSI: f64 = 50.0;

/// Calculate RSI indicator
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss, both simple means over the last `period` deltas
///
/// A window without losses has no defined RS: it reads 100 when there were
/// gains and 50 when price did not move at all.
pub fn calculate_rsi(candles: &[Candle], period: u32) -> Result<RsiIndicator, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    if candles.len() < period as usize + 1 {
        return Err(IndicatorError::insufficient(period as usize + 1, candles.len()));
    }

    let closes = closes(candles);
    let window = &closes[closes.len() - period as usize - 1..];
    let (value, zero_loss) = rsi_from_window(window, period)?;

    Ok(RsiIndicator {
        value,
        period: Some(period),
        zero_loss,
    })
}

/// RSI at every bar; bars without a full window read the neutral 50
pub fn rsi_series(candles: &[Candle], period: u32) -> Vec<f64> {
    let closes = closes(candles);
    let span = period as usize + 1;

    (0..closes.len())
        .map(|i| {
            if period == 0 || i + 1 < span {
                return NEUTRAL_RSI;
            }
            rsi_from_window(&closes[i + 1 - span..=i], period)
                .map(|(value, _)| value)
                .unwrap_or(NEUTRAL_RSI)
        })
        .collect()
}

/// RSI with the neutral default substituted for any failure
pub fn rsi_or_neutral(candles: &[Candle], period: u32) -> f64 {
    calculate_rsi(candles, period)
        .map(|rsi| rsi.value)
        .unwrap_or(NEUTRAL_RSI)
}

fn rsi_from_window(window: &[f64], period: u32) -> Result<(f64, bool), IndicatorError> {
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in window.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += change.abs();
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return Err(IndicatorError::NonFinite("rsi average"));
    }

    if avg_loss == 0.0 {
        let value = if avg_gain > 0.0 { 100.0 } else { NEUTRAL_RSI };
        return Ok((value, true));
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    Ok((rsi.clamp(0.0, 100.0), false))
}
