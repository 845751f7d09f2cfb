//! Position sizing by risk tier, scaled down in volatile markets

use tracing::{debug, warn};

use crate::common::math;
use crate::config::RiskConfig;
use crate::models::indicators::{closes, Candle};
use crate::models::risk::RiskLevel;
use crate::risk::error::RiskError;

/// Multiplier applied to the tier's base allocation
pub fn volatility_factor(volatility_pct: Option<f64>, config: &RiskConfig) -> f64 {
    match volatility_pct {
        Some(v) if v > config.position_volatility_high_pct => config.position_factor_high,
        Some(v) if v > config.position_volatility_medium_pct => config.position_factor_medium,
        _ => 1.0,
    }
}

/// Fraction of capital to allocate, within `[min_position, max_position]`.
///
/// Without enough history for the rolling volatility window the base
/// allocation is used unscaled.
pub fn try_calculate_position_size(
    candles: &[Candle],
    tier: RiskLevel,
    config: &RiskConfig,
) -> Result<f64, RiskError> {
    if candles.is_empty() {
        return Err(RiskError::EmptySeries);
    }

    let volatility =
        math::rolling_return_volatility_pct(&closes(candles), config.position_volatility_window);
    if volatility.is_none() {
        debug!(
            bars = candles.len(),
            window = config.position_volatility_window,
            "PositionSize: not enough history for volatility scaling"
        );
    }

    let size = config.tier(tier).base_position * volatility_factor(volatility, config);
    if !size.is_finite() {
        return Err(RiskError::NonFinite("position size"));
    }
    Ok(bounded(size, config))
}

/// Position size with the fixed 10% fallback on failure
pub fn calculate_position_size(candles: &[Candle], tier: RiskLevel, config: &RiskConfig) -> f64 {
    match try_calculate_position_size(candles, tier, config) {
        Ok(size) => size,
        Err(e) => {
            warn!(error = %e, tier = %tier, "PositionSize: falling back to fixed allocation");
            bounded(config.fallback_position, config)
        }
    }
}

fn bounded(size: f64, config: &RiskConfig) -> f64 {
    size.max(config.min_position).min(config.max_position)
}
