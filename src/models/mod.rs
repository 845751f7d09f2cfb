//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod regime;
pub mod risk;
pub mod signal;
pub mod timeframe;

pub use indicators::{
    AtrIndicator, BollingerBandsIndicator, Candle, EmaIndicator, IndicatorKind,
    IndicatorSnapshot, MacdIndicator, RsiIndicator,
};
pub use regime::{MarketRegime, TrendDirection};
pub use risk::{RiskAssessment, RiskLevel, StopLossMethod, TradeSide};
pub use signal::{
    ComponentProbabilities, LongTermRecommendation, ProbabilityResult, RewardRisk,
    RewardRiskRating, ShortTermOutlook, ShortTermRecommendation, SignalDirection, SignalReason,
    SignalStrength, TimeframeRsi,
};
pub use timeframe::{Timeframe, TimeframeSeries};
