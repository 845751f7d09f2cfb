//! Indicator weight registry

use crate::config::{IndicatorWeights, WeightPolicy};
use crate::models::indicators::IndicatorKind;

/// Indicators folded into the up-probability composite, in reporting order
pub const COMPOSITE_INDICATORS: [IndicatorKind; 4] = [
    IndicatorKind::Rsi,
    IndicatorKind::Macd,
    IndicatorKind::Bollinger,
    IndicatorKind::Ema,
];

/// Looks up composite weights per indicator
#[derive(Debug, Clone)]
pub struct IndicatorRegistry {
    weights: IndicatorWeights,
    policy: WeightPolicy,
}

impl IndicatorRegistry {
    /// Create a new registry with default weights
    pub fn new() -> Self {
        Self::with_weights(IndicatorWeights::default(), WeightPolicy::default())
    }

    /// Create a new registry with custom weights
    pub fn with_weights(weights: IndicatorWeights, policy: WeightPolicy) -> Self {
        Self { weights, policy }
    }

    pub fn policy(&self) -> WeightPolicy {
        self.policy
    }

    /// Configured weight of an indicator
    pub fn weight(&self, kind: IndicatorKind) -> f64 {
        match kind {
            IndicatorKind::Rsi => self.weights.rsi,
            IndicatorKind::Macd => self.weights.macd,
            IndicatorKind::Bollinger => self.weights.bollinger,
            IndicatorKind::Ema => self.weights.ema,
            IndicatorKind::Atr => self.weights.atr,
        }
    }

    /// Weight actually applied in the composite under the active policy.
    ///
    /// ATR never enters the composite.
    pub fn effective_weight(&self, kind: IndicatorKind) -> f64 {
        if kind == IndicatorKind::Atr {
            return 0.0;
        }
        let weight = self.weight(kind);
        match self.policy {
            WeightPolicy::AsConfigured => weight,
            WeightPolicy::Normalized => {
                let total = self.weights.composite_total();
                if total > 0.0 {
                    weight / total
                } else {
                    0.0
                }
            }
        }
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
