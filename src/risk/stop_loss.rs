//! Stop-loss placement: ATR, Bollinger or swing based, clamped to a band around price

use tracing::warn;

use crate::common::math;
use crate::config::{IndicatorPeriods, RiskConfig};
use crate::indicators::volatility::{calculate_atr, calculate_bollinger_bands};
use crate::models::indicators::{closes, Candle};
use crate::models::risk::{StopLossMethod, TradeSide};
use crate::risk::error::RiskError;

/// Last close, required to be finite and positive
pub fn current_price(candles: &[Candle]) -> Result<f64, RiskError> {
    let price = candles.last().ok_or(RiskError::EmptySeries)?.close;
    if !price.is_finite() || price <= 0.0 {
        return Err(RiskError::InvalidPrice(price));
    }
    Ok(price)
}

/// ATR multiplier scaled by whole-series return volatility
pub fn atr_multiplier(volatility_pct: f64, config: &RiskConfig) -> f64 {
    if volatility_pct > config.atr_volatility_high_pct {
        config.atr_multiplier_high
    } else if volatility_pct > config.atr_volatility_medium_pct {
        config.atr_multiplier_medium
    } else {
        config.atr_multiplier_base
    }
}

/// Keep the stop between `min_stop_pct` and `max_stop_pct` away from price
pub fn clamp_stop(stop: f64, price: f64, side: TradeSide, config: &RiskConfig) -> f64 {
    match side {
        TradeSide::Buy => {
            let farthest = price * (1.0 - config.max_stop_pct);
            let nearest = price * (1.0 - config.min_stop_pct);
            stop.max(farthest).min(nearest)
        }
        TradeSide::Sell => {
            let nearest = price * (1.0 + config.min_stop_pct);
            let farthest = price * (1.0 + config.max_stop_pct);
            stop.max(nearest).min(farthest)
        }
    }
}

/// Fixed-percentage stop used when the computed one is unavailable
pub fn fallback_stop(price: f64, side: TradeSide, config: &RiskConfig) -> f64 {
    match side {
        TradeSide::Buy => price * (1.0 - config.fallback_stop_pct),
        TradeSide::Sell => price * (1.0 + config.fallback_stop_pct),
    }
}

pub fn try_calculate_stop_loss(
    candles: &[Candle],
    side: TradeSide,
    method: StopLossMethod,
    config: &RiskConfig,
    periods: &IndicatorPeriods,
) -> Result<f64, RiskError> {
    let price = current_price(candles)?;

    let raw = match method {
        StopLossMethod::Atr => {
            let atr = calculate_atr(candles, periods.atr)?.value;
            let volatility = math::return_volatility_pct(&closes(candles)).unwrap_or(0.0);
            let distance = atr * atr_multiplier(volatility, config);
            match side {
                TradeSide::Buy => price - distance,
                TradeSide::Sell => price + distance,
            }
        }
        StopLossMethod::Bollinger => {
            let bands =
                calculate_bollinger_bands(candles, periods.bollinger, periods.bollinger_std_dev)?;
            match side {
                TradeSide::Buy => bands.lower,
                TradeSide::Sell => bands.upper,
            }
        }
        StopLossMethod::Swing => swing_stop(candles, side, config)?,
    };

    if !raw.is_finite() {
        return Err(RiskError::NonFinite("stop-loss"));
    }

    Ok(clamp_stop(raw, price, side, config))
}

/// Stop-loss with the fixed 2% fallback on failure
pub fn calculate_stop_loss(
    candles: &[Candle],
    side: TradeSide,
    method: StopLossMethod,
    config: &RiskConfig,
    periods: &IndicatorPeriods,
) -> f64 {
    match try_calculate_stop_loss(candles, side, method, config, periods) {
        Ok(stop) => stop,
        Err(e) => {
            let price = candles.last().map(|c| c.close).unwrap_or(0.0);
            warn!(error = %e, side = %side, method = ?method, "StopLoss: falling back to fixed stop");
            fallback_stop(price, side, config)
        }
    }
}

/// Mean of the most extreme recent lows (buy) or highs (sell), pushed out by a buffer
fn swing_stop(candles: &[Candle], side: TradeSide, config: &RiskConfig) -> Result<f64, RiskError> {
    let start = candles.len().saturating_sub(config.swing_lookback);
    let recent = &candles[start..];
    if recent.is_empty() || config.swing_points == 0 {
        return Err(RiskError::EmptySeries);
    }

    let mut extremes: Vec<f64> = match side {
        TradeSide::Buy => recent.iter().map(|c| c.low).collect(),
        TradeSide::Sell => recent.iter().map(|c| c.high).collect(),
    };
    match side {
        TradeSide::Buy => extremes.sort_by(|a, b| a.total_cmp(b)),
        TradeSide::Sell => extremes.sort_by(|a, b| b.total_cmp(a)),
    }
    extremes.truncate(config.swing_points);

    let mean = extremes.iter().sum::<f64>() / extremes.len() as f64;
    Ok(match side {
        TradeSide::Buy => mean * (1.0 - config.swing_buffer_pct),
        TradeSide::Sell => mean * (1.0 + config.swing_buffer_pct),
    })
}
