//! Per-indicator up-probabilities on a 0-100 scale
//!
//! Each mapping turns one indicator reading into the probability that the
//! next move is up. RSI and Bollinger are scored as mean-reversion signals,
//! MACD and the EMA gap as momentum signals.

use crate::config::{MacdScoring, SignalThresholds, TimeframeWeights};
use crate::indicators::trend::ema_gap_pct;

/// Probability used whenever an indicator has nothing to say
pub const NEUTRAL_PROBABILITY: f64 = 50.0;

/// Weighted blend of the per-timeframe RSI values
pub fn composite_rsi(short: f64, medium: f64, long: f64, weights: &TimeframeWeights) -> f64 {
    short * weights.short + medium * weights.medium + long * weights.long
}

/// Map composite RSI to an up-probability.
///
/// Overbought readings fall off 5 points per RSI point above the threshold,
/// oversold readings rise 5 points per RSI point below it, and the band in
/// between maps linearly from 100 at `rsi_oversold` to 0 at `rsi_overbought`.
pub fn rsi_probability(rsi: f64, thresholds: &SignalThresholds) -> f64 {
    let overbought = thresholds.rsi_overbought;
    let oversold = thresholds.rsi_oversold;

    if rsi >= overbought {
        (100.0 - (rsi - overbought) * 5.0).max(0.0)
    } else if rsi <= oversold {
        (50.0 + (oversold - rsi) * 5.0).min(100.0)
    } else {
        100.0 - (rsi - oversold) / (overbought - oversold) * 100.0
    }
}

/// Map the MACD histogram to an up-probability
pub fn macd_probability(histogram: f64, degraded: bool, scoring: &MacdScoring) -> f64 {
    if degraded || !histogram.is_finite() {
        return NEUTRAL_PROBABILITY;
    }
    let offset = (histogram.abs() * scoring.histogram_scale).min(scoring.max_offset);
    if histogram > 0.0 {
        scoring.bullish_base + offset
    } else if histogram < 0.0 {
        scoring.bearish_base - offset
    } else {
        NEUTRAL_PROBABILITY
    }
}

/// Map the close's position inside the bands (0 = lower, 1 = upper)
pub fn bollinger_probability(position: f64) -> f64 {
    if position > 0.8 {
        30.0 - (position - 0.8) * 150.0
    } else if position < 0.2 {
        70.0 + (0.2 - position) * 150.0
    } else {
        50.0 + (0.5 - position) * 40.0
    }
}

/// Map the short/long EMA gap to an up-probability
pub fn trend_probability(ema_short: f64, ema_long: f64) -> f64 {
    let Some(gap) = ema_gap_pct(ema_short, ema_long) else {
        return NEUTRAL_PROBABILITY;
    };
    if gap > 1.0 {
        80.0 + (gap * 2.0).min(19.0)
    } else if gap < -1.0 {
        20.0 - (gap.abs() * 2.0).min(19.0)
    } else {
        50.0 + gap * 30.0
    }
}

/// Distance of the up-probability from a coin flip, on a 0-100 scale
pub fn signal_strength(up_probability: f64) -> f64 {
    ((up_probability - 50.0).abs() * 2.0).clamp(0.0, 100.0)
}
