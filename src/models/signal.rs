use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::IndicatorKind;
use crate::models::regime::MarketRegime;
use crate::models::risk::{RiskLevel, TradeSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Buy,
    Sell,
    Neutral,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Buy => write!(f, "buy"),
            SignalDirection::Sell => write!(f, "sell"),
            SignalDirection::Neutral => write!(f, "neutral"),
        }
    }
}

/// Bucket of `signal_strength`, bounded at 80/60/40/20
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    Negligible,
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SignalStrength::VeryStrong => "very strong",
            SignalStrength::Strong => "strong",
            SignalStrength::Moderate => "moderate",
            SignalStrength::Weak => "weak",
            SignalStrength::Negligible => "negligible",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortTermOutlook {
    StronglyBullish,
    Bullish,
    Neutral,
    Bearish,
    StronglyBearish,
}

impl ShortTermOutlook {
    pub fn is_strong(&self) -> bool {
        matches!(
            self,
            ShortTermOutlook::StronglyBullish | ShortTermOutlook::StronglyBearish
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortTermRecommendation {
    pub outlook: ShortTermOutlook,
    pub strength: SignalStrength,
}

impl fmt::Display for ShortTermRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outlook = match self.outlook {
            ShortTermOutlook::StronglyBullish => "strongly bullish",
            ShortTermOutlook::Bullish => "bullish",
            ShortTermOutlook::Neutral => "ranging / wait and see",
            ShortTermOutlook::Bearish => "bearish",
            ShortTermOutlook::StronglyBearish => "strongly bearish",
        };
        write!(f, "{} ({})", outlook, self.strength)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongTermRecommendation {
    OversoldInUptrend,
    OverboughtInDowntrend,
    StrongUptrend,
    StrongDowntrend,
    LongTermOversold,
    LongTermOverbought,
    Neutral,
}

impl fmt::Display for LongTermRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LongTermRecommendation::OversoldInUptrend => "bullish (oversold within an uptrend)",
            LongTermRecommendation::OverboughtInDowntrend => {
                "bearish (overbought within a downtrend)"
            }
            LongTermRecommendation::StrongUptrend => "bullish (strong uptrend)",
            LongTermRecommendation::StrongDowntrend => "bearish (strong downtrend)",
            LongTermRecommendation::LongTermOversold => "bullish (long-term oversold)",
            LongTermRecommendation::LongTermOverbought => "bearish (long-term overbought)",
            LongTermRecommendation::Neutral => "neutral (no clear trend)",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardRiskRating {
    Excellent,
    VeryGood,
    Good,
    Fair,
}

/// Distance to the favorable band edge versus distance to the adverse one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardRisk {
    pub ratio: f64,
    pub rating: RewardRiskRating,
    pub reward_pct: f64,
    pub risk_pct: f64,
}

/// RSI per timeframe plus the weighted blend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeframeRsi {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
    pub composite: f64,
}

/// Per-indicator up-probabilities feeding the composite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentProbabilities {
    pub rsi: f64,
    pub macd: f64,
    pub bollinger: f64,
    pub trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReason {
    pub description: String,
    pub weight: f64,
}

/// Complete assessment of one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityResult {
    pub symbol: String,
    pub price: f64,
    pub up_probability: f64,
    pub down_probability: f64,
    pub signal_strength: f64,
    pub signal_strength_bucket: SignalStrength,
    pub direction: SignalDirection,
    pub market_type: MarketRegime,
    pub rsi: TimeframeRsi,
    pub macd_histogram: f64,
    pub bollinger_position: f64,
    pub atr: f64,
    pub atr_percent: f64,
    pub components: ComponentProbabilities,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    pub risk_description: String,
    pub reward_risk: RewardRisk,
    pub trade_side: TradeSide,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size: f64,
    pub short_term_recommendation: ShortTermRecommendation,
    pub long_term_recommendation: LongTermRecommendation,
    pub reasons: Vec<SignalReason>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub degraded: Vec<IndicatorKind>,
}

impl ProbabilityResult {
    /// Position size as a whole percentage, e.g. "30%"
    pub fn position_text(&self) -> String {
        format!("{:.0}%", self.position_size * 100.0)
    }
}
