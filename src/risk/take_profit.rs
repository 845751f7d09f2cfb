//! Take-profit targets from Fibonacci extensions of the recent range

use tracing::warn;

use crate::config::RiskConfig;
use crate::models::indicators::Candle;
use crate::models::risk::{RiskLevel, TradeSide};
use crate::risk::error::RiskError;
use crate::risk::stop_loss::current_price;

/// Fixed-percentage target used when the computed one is unavailable
pub fn fallback_take_profit(price: f64, side: TradeSide, config: &RiskConfig) -> f64 {
    match side {
        TradeSide::Buy => price * (1.0 + config.fallback_take_profit_pct),
        TradeSide::Sell => price * (1.0 - config.fallback_take_profit_pct),
    }
}

/// Extend the last `take_profit_lookback` bars' range by the tier's Fibonacci
/// multiple, capped at `max_take_profit_pct` from price.
pub fn try_calculate_take_profit(
    candles: &[Candle],
    side: TradeSide,
    tier: RiskLevel,
    config: &RiskConfig,
) -> Result<f64, RiskError> {
    let price = current_price(candles)?;

    let start = candles.len().saturating_sub(config.take_profit_lookback);
    let recent = &candles[start..];
    let recent_high = recent.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let recent_low = recent.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let range = recent_high - recent_low;
    if !range.is_finite() {
        return Err(RiskError::NonFinite("price range"));
    }

    let fib = config.tier(tier).fib_extension;
    let target = match side {
        TradeSide::Buy => {
            let cap = price * (1.0 + config.max_take_profit_pct);
            (recent_low + range * fib).min(cap)
        }
        TradeSide::Sell => {
            let floor = price * (1.0 - config.max_take_profit_pct);
            (recent_high - range * fib).max(floor)
        }
    };

    if !target.is_finite() {
        return Err(RiskError::NonFinite("take-profit"));
    }
    Ok(target)
}

/// Take-profit with the fixed 5% fallback on failure
pub fn calculate_take_profit(
    candles: &[Candle],
    side: TradeSide,
    tier: RiskLevel,
    config: &RiskConfig,
) -> f64 {
    match try_calculate_take_profit(candles, side, tier, config) {
        Ok(target) => target,
        Err(e) => {
            let price = candles.last().map(|c| c.close).unwrap_or(0.0);
            warn!(error = %e, side = %side, tier = %tier, "TakeProfit: falling back to fixed target");
            fallback_take_profit(price, side, config)
        }
    }
}
