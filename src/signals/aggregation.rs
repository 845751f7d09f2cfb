//! Weighted aggregation of component probabilities

use crate::indicators::registry::{IndicatorRegistry, COMPOSITE_INDICATORS};
use crate::models::indicators::IndicatorKind;
use crate::models::signal::{ComponentProbabilities, SignalReason};
use crate::signals::scoring::NEUTRAL_PROBABILITY;

/// Component probability with the weight it carries in the composite
#[derive(Debug, Clone)]
pub struct IndicatorScore {
    pub kind: IndicatorKind,
    pub probability: f64,
    pub weight: f64,
}

impl IndicatorScore {
    /// Signed lean away from neutral, -1 (down) to +1 (up)
    pub fn lean(&self) -> f64 {
        (self.probability - NEUTRAL_PROBABILITY) / NEUTRAL_PROBABILITY
    }
}

pub struct Aggregator;

impl Aggregator {
    pub fn component(components: &ComponentProbabilities, kind: IndicatorKind) -> Option<f64> {
        match kind {
            IndicatorKind::Rsi => Some(components.rsi),
            IndicatorKind::Macd => Some(components.macd),
            IndicatorKind::Bollinger => Some(components.bollinger),
            IndicatorKind::Ema => Some(components.trend),
            IndicatorKind::Atr => None,
        }
    }

    /// Pair each composite indicator with its effective weight
    pub fn score(
        registry: &IndicatorRegistry,
        components: &ComponentProbabilities,
    ) -> Vec<IndicatorScore> {
        COMPOSITE_INDICATORS
            .iter()
            .filter_map(|&kind| {
                Self::component(components, kind).map(|probability| IndicatorScore {
                    kind,
                    probability,
                    weight: registry.effective_weight(kind),
                })
            })
            .collect()
    }

    /// Weighted sum of the component probabilities, clamped to 0-100
    pub fn up_probability(scores: &[IndicatorScore]) -> f64 {
        let sum: f64 = scores.iter().map(|s| s.probability * s.weight).sum();
        if sum.is_finite() {
            sum.clamp(0.0, 100.0)
        } else {
            NEUTRAL_PROBABILITY
        }
    }

    /// Explainability breakdown, strongest contributor first
    pub fn generate_reasons(scores: &[IndicatorScore]) -> Vec<SignalReason> {
        let mut reasons: Vec<SignalReason> = scores
            .iter()
            .map(|s| {
                let lean = if s.probability > NEUTRAL_PROBABILITY {
                    "bullish"
                } else if s.probability < NEUTRAL_PROBABILITY {
                    "bearish"
                } else {
                    "neutral"
                };
                SignalReason {
                    description: format!("{}: {:.2}% up ({})", s.kind.name(), s.probability, lean),
                    weight: s.weight * s.lean().abs(),
                }
            })
            .collect();
        reasons.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        reasons
    }
}
