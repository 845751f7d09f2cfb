//! Multi-timeframe probability engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{EngineConfig, WeightPolicy};
use crate::indicators::momentum::{calculate_rsi, NEUTRAL_RSI};
use crate::indicators::registry::IndicatorRegistry;
use crate::indicators::snapshot::compute_snapshot;
use crate::indicators::trend::calculate_ema;
use crate::indicators::volatility::band_position;
use crate::models::indicators::{Candle, IndicatorKind};
use crate::models::regime::MarketRegime;
use crate::models::risk::{StopLossMethod, TradeSide};
use crate::models::signal::{ComponentProbabilities, ProbabilityResult, TimeframeRsi};
use crate::models::timeframe::{Timeframe, TimeframeSeries};
use crate::regime::RegimeClassifier;
use crate::risk::{evaluate_risk_level, RiskEngine};
use crate::signals::aggregation::Aggregator;
use crate::signals::error::AssessmentError;
use crate::signals::recommendation::{
    direction, long_term_recommendation, reward_risk, short_term_recommendation, strength_bucket,
};
use crate::signals::scoring::{
    bollinger_probability, composite_rsi, macd_probability, rsi_probability, signal_strength,
    trend_probability,
};

/// Per-call choices that change the result, and so take part in cache keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationOptions {
    pub stop_method: StopLossMethod,
    pub weight_policy: WeightPolicy,
}

impl EvaluationOptions {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            stop_method: config.stop_method,
            weight_policy: config.weight_policy,
        }
    }
}

pub struct ProbabilityEngine {
    config: EngineConfig,
    classifier: RegimeClassifier,
    risk: RiskEngine,
}

impl ProbabilityEngine {
    pub fn new(config: EngineConfig) -> Self {
        let classifier = RegimeClassifier::new(config.regime.clone());
        let risk = RiskEngine::new(config.risk.clone(), config.indicators.clone());
        Self {
            config,
            classifier,
            risk,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn default_options(&self) -> EvaluationOptions {
        EvaluationOptions::from_config(&self.config)
    }

    /// Evaluate with the configured stop method and weight policy
    pub fn evaluate(
        &self,
        symbol: &str,
        series: &TimeframeSeries,
    ) -> Result<ProbabilityResult, AssessmentError> {
        self.evaluate_with(symbol, series, self.default_options())
    }

    /// Full assessment of one symbol.
    ///
    /// Fails only when a series is empty or the last short-timeframe close is
    /// not a positive finite price; every other degenerate input is scored
    /// neutrally and listed in `degraded`.
    pub fn evaluate_with(
        &self,
        symbol: &str,
        series: &TimeframeSeries,
        options: EvaluationOptions,
    ) -> Result<ProbabilityResult, AssessmentError> {
        if let Some(timeframe) = series.first_missing() {
            return Err(AssessmentError::MissingSeries(timeframe));
        }

        let short = series.get(Timeframe::Short);
        let price = short.last().map(|c| c.close).unwrap_or(f64::NAN);
        if !price.is_finite() || price <= 0.0 {
            return Err(AssessmentError::InvalidPrice(price));
        }

        let periods = &self.config.indicators;
        let snapshot = compute_snapshot(short, periods);
        let mut degraded = snapshot.degraded.clone();

        let medium_rsi = self.timeframe_rsi(series.get(Timeframe::Medium), &mut degraded);
        let long_rsi = self.timeframe_rsi(series.get(Timeframe::Long), &mut degraded);
        let rsi = TimeframeRsi {
            short: snapshot.rsi,
            medium: medium_rsi,
            long: long_rsi,
            composite: composite_rsi(
                snapshot.rsi,
                medium_rsi,
                long_rsi,
                &self.config.timeframe_weights,
            ),
        };

        let bollinger_position = band_position(price, snapshot.bb_lower, snapshot.bb_upper);
        let components = ComponentProbabilities {
            rsi: rsi_probability(rsi.composite, &self.config.thresholds),
            macd: macd_probability(
                snapshot.macd_histogram,
                snapshot.is_degraded(IndicatorKind::Macd),
                &self.config.macd_scoring,
            ),
            bollinger: bollinger_probability(bollinger_position),
            trend: trend_probability(snapshot.ema_short, snapshot.ema_long),
        };

        let registry =
            IndicatorRegistry::with_weights(self.config.weights.clone(), options.weight_policy);
        let scores = Aggregator::score(&registry, &components);
        let up_probability = Aggregator::up_probability(&scores);
        let down_probability = 100.0 - up_probability;

        let strength = signal_strength(up_probability);
        let bucket = strength_bucket(strength);
        let direction = direction(up_probability, &self.config.thresholds);

        let regime = self.classify_regime(series, snapshot.ema_short, snapshot.ema_long);

        let reward_risk = reward_risk(price, snapshot.bb_upper, snapshot.bb_lower, direction);
        let risk = evaluate_risk_level(up_probability, &regime, reward_risk.ratio);

        let trade_side = if up_probability > 50.0 {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        };
        let params = self
            .risk
            .trade_parameters(short, trade_side, options.stop_method, risk.level);

        debug!(
            symbol = %symbol,
            up = up_probability,
            direction = %direction,
            regime = %regime,
            risk = %risk.level,
            "ProbabilityEngine: assessment complete"
        );

        Ok(ProbabilityResult {
            symbol: symbol.to_string(),
            price,
            up_probability,
            down_probability,
            signal_strength: strength,
            signal_strength_bucket: bucket,
            direction,
            short_term_recommendation: short_term_recommendation(
                up_probability,
                bucket,
                &self.config.thresholds,
            ),
            long_term_recommendation: long_term_recommendation(rsi.long, &regime),
            market_type: regime,
            rsi,
            macd_histogram: snapshot.macd_histogram,
            bollinger_position,
            atr: snapshot.atr,
            atr_percent: snapshot.atr / price * 100.0,
            components,
            risk_level: risk.level,
            risk_score: risk.score,
            risk_description: risk.description,
            reward_risk,
            trade_side,
            stop_loss: params.stop_loss,
            take_profit: params.take_profit,
            position_size: params.position_size,
            reasons: Aggregator::generate_reasons(&scores),
            degraded,
        })
    }

    fn timeframe_rsi(&self, candles: &[Candle], degraded: &mut Vec<IndicatorKind>) -> f64 {
        match calculate_rsi(candles, self.config.indicators.rsi) {
            Ok(rsi) => {
                if rsi.zero_loss {
                    mark_degraded(degraded, IndicatorKind::Rsi);
                }
                rsi.value
            }
            Err(e) => {
                debug!(error = %e, "ProbabilityEngine: RSI undefined, using neutral");
                mark_degraded(degraded, IndicatorKind::Rsi);
                NEUTRAL_RSI
            }
        }
    }

    /// Classify on the configured reference series.
    ///
    /// The short-timeframe snapshot EMAs are reused when the reference is the
    /// short series; otherwise EMAs are computed on the reference, falling
    /// back to its last close.
    fn classify_regime(
        &self,
        series: &TimeframeSeries,
        short_ema: f64,
        long_ema: f64,
    ) -> MarketRegime {
        let timeframe = self.config.regime_timeframe;
        let candles = series.get(timeframe);
        if timeframe == Timeframe::Short {
            return self.classifier.classify(candles, short_ema, long_ema);
        }

        let last = candles.last().map(|c| c.close).unwrap_or(f64::NAN);
        let periods = &self.config.indicators;
        let ema_short = calculate_ema(candles, periods.ema_short)
            .map(|e| e.value)
            .unwrap_or(last);
        let ema_long = calculate_ema(candles, periods.ema_long)
            .map(|e| e.value)
            .unwrap_or(last);
        self.classifier.classify(candles, ema_short, ema_long)
    }
}

fn mark_degraded(degraded: &mut Vec<IndicatorKind>, kind: IndicatorKind) {
    if !degraded.contains(&kind) {
        degraded.push(kind);
    }
}
