//! Labels the market regime of a reference series from its price change,
//! return volatility and short/long EMA ordering.

use thiserror::Error;
use tracing::warn;

use crate::common::math;
use crate::config::RegimeThresholds;
use crate::models::indicators::{closes, Candle};
use crate::models::regime::MarketRegime;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegimeError {
    #[error("empty series")]
    EmptySeries,
    #[error("first close is zero")]
    ZeroReferencePrice,
    #[error("non-finite {0}")]
    NonFinite(&'static str),
}

/// Measurements the classification is decided on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeInputs {
    pub price_change_pct: f64,
    pub volatility_pct: f64,
    pub ema_short: f64,
    pub ema_long: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RegimeClassifier {
    thresholds: RegimeThresholds,
}

impl RegimeClassifier {
    pub fn new(thresholds: RegimeThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify, reporting any failure as `MarketRegime::ClassificationFailed`
    pub fn classify(&self, candles: &[Candle], ema_short: f64, ema_long: f64) -> MarketRegime {
        match self.try_classify(candles, ema_short, ema_long) {
            Ok(regime) => regime,
            Err(e) => {
                warn!(error = %e, "RegimeClassifier: classification failed");
                MarketRegime::ClassificationFailed
            }
        }
    }

    pub fn try_classify(
        &self,
        candles: &[Candle],
        ema_short: f64,
        ema_long: f64,
    ) -> Result<MarketRegime, RegimeError> {
        let inputs = Self::measure(candles, ema_short, ema_long)?;
        Ok(self.classify_inputs(&inputs))
    }

    /// Price change and volatility of the series, in percent.
    ///
    /// Volatility is 0 when there are fewer than two returns.
    pub fn measure(
        candles: &[Candle],
        ema_short: f64,
        ema_long: f64,
    ) -> Result<RegimeInputs, RegimeError> {
        let closes = closes(candles);
        let (first, last) = match (closes.first(), closes.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(RegimeError::EmptySeries),
        };
        if first == 0.0 {
            return Err(RegimeError::ZeroReferencePrice);
        }
        if !ema_short.is_finite() || !ema_long.is_finite() {
            return Err(RegimeError::NonFinite("ema"));
        }

        let price_change_pct = (last - first) / first * 100.0;
        if !price_change_pct.is_finite() {
            return Err(RegimeError::NonFinite("price change"));
        }
        let volatility_pct = math::return_volatility_pct(&closes).unwrap_or(0.0);

        Ok(RegimeInputs {
            price_change_pct,
            volatility_pct,
            ema_short,
            ema_long,
        })
    }

    /// First matching rule wins
    pub fn classify_inputs(&self, inputs: &RegimeInputs) -> MarketRegime {
        let t = &self.thresholds;
        let change = inputs.price_change_pct;
        let high_volatility = inputs.volatility_pct > t.high_volatility_pct;
        let bullish = inputs.ema_short > inputs.ema_long;
        let bearish = inputs.ema_short < inputs.ema_long;

        if bullish && change > t.strong_trend_pct {
            MarketRegime::StrongUptrend { high_volatility }
        } else if bearish && change < -t.strong_trend_pct {
            MarketRegime::StrongDowntrend { high_volatility }
        } else if change.abs() < t.ranging_change_pct {
            MarketRegime::Ranging {
                high_volatility: inputs.volatility_pct > t.ranging_volatility_pct,
            }
        } else if bullish {
            MarketRegime::WeakUptrend
        } else if bearish {
            MarketRegime::WeakDowntrend
        } else {
            MarketRegime::Indeterminate
        }
    }
}
