//! Direction, strength bucket, recommendations and reward:risk

use crate::config::SignalThresholds;
use crate::models::regime::{MarketRegime, TrendDirection};
use crate::models::signal::{
    LongTermRecommendation, RewardRisk, RewardRiskRating, ShortTermOutlook,
    ShortTermRecommendation, SignalDirection, SignalStrength,
};

pub fn strength_bucket(strength: f64) -> SignalStrength {
    if strength > 80.0 {
        SignalStrength::VeryStrong
    } else if strength > 60.0 {
        SignalStrength::Strong
    } else if strength > 40.0 {
        SignalStrength::Moderate
    } else if strength > 20.0 {
        SignalStrength::Weak
    } else {
        SignalStrength::Negligible
    }
}

pub fn direction(up_probability: f64, thresholds: &SignalThresholds) -> SignalDirection {
    if up_probability > thresholds.buy {
        SignalDirection::Buy
    } else if up_probability < thresholds.sell {
        SignalDirection::Sell
    } else {
        SignalDirection::Neutral
    }
}

pub fn short_term_recommendation(
    up_probability: f64,
    strength: SignalStrength,
    thresholds: &SignalThresholds,
) -> ShortTermRecommendation {
    let outlook = if up_probability > thresholds.strong_signal {
        ShortTermOutlook::StronglyBullish
    } else if up_probability > thresholds.buy {
        ShortTermOutlook::Bullish
    } else if up_probability < 100.0 - thresholds.strong_signal {
        ShortTermOutlook::StronglyBearish
    } else if up_probability < thresholds.sell {
        ShortTermOutlook::Bearish
    } else {
        ShortTermOutlook::Neutral
    };
    ShortTermRecommendation { outlook, strength }
}

/// Long-timeframe RSI read against the regime; first match wins
pub fn long_term_recommendation(long_rsi: f64, regime: &MarketRegime) -> LongTermRecommendation {
    let trend = regime.trend_direction();

    if long_rsi < 40.0 && trend == Some(TrendDirection::Up) {
        LongTermRecommendation::OversoldInUptrend
    } else if long_rsi > 60.0 && trend == Some(TrendDirection::Down) {
        LongTermRecommendation::OverboughtInDowntrend
    } else if matches!(regime, MarketRegime::StrongUptrend { .. }) {
        LongTermRecommendation::StrongUptrend
    } else if matches!(regime, MarketRegime::StrongDowntrend { .. }) {
        LongTermRecommendation::StrongDowntrend
    } else if long_rsi < 30.0 {
        LongTermRecommendation::LongTermOversold
    } else if long_rsi > 70.0 {
        LongTermRecommendation::LongTermOverbought
    } else {
        LongTermRecommendation::Neutral
    }
}

pub fn reward_risk_rating(ratio: f64) -> RewardRiskRating {
    if ratio > 3.0 {
        RewardRiskRating::Excellent
    } else if ratio > 2.0 {
        RewardRiskRating::VeryGood
    } else if ratio > 1.0 {
        RewardRiskRating::Good
    } else {
        RewardRiskRating::Fair
    }
}

/// Reward:risk against the Bollinger band edges.
///
/// A buy is rewarded by the upper band and risks the lower one; any other
/// direction is the inverse. The ratio is 1.0 when risk is not positive or
/// the division is not finite.
pub fn reward_risk(price: f64, upper: f64, lower: f64, direction: SignalDirection) -> RewardRisk {
    let to_upper = (upper - price) / price * 100.0;
    let to_lower = (price - lower) / price * 100.0;

    let (reward_pct, risk_pct) = match direction {
        SignalDirection::Buy => (to_upper, to_lower),
        SignalDirection::Sell | SignalDirection::Neutral => (to_lower, to_upper),
    };

    let ratio = if risk_pct > 0.0 {
        let ratio = reward_pct / risk_pct;
        if ratio.is_finite() {
            ratio
        } else {
            1.0
        }
    } else {
        1.0
    };

    RewardRisk {
        ratio,
        rating: reward_risk_rating(ratio),
        reward_pct,
        risk_pct,
    }
}
