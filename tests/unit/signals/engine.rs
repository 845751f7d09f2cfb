//! Unit tests for the probability engine

use probix::config::{EngineConfig, WeightPolicy};
use probix::models::indicators::IndicatorKind;
use probix::models::risk::{StopLossMethod, TradeSide};
use probix::models::signal::{ProbabilityResult, SignalDirection};
use probix::models::timeframe::{Timeframe, TimeframeSeries};
use probix::signals::engine::{EvaluationOptions, ProbabilityEngine};
use probix::signals::error::AssessmentError;

use crate::fixtures::{
    assert_close, create_flat_candles, create_uptrend_candles, flat_series, uptrend_series,
};

fn engine() -> ProbabilityEngine {
    ProbabilityEngine::new(EngineConfig::default())
}

fn assert_all_finite(result: &ProbabilityResult) {
    let values = [
        result.price,
        result.up_probability,
        result.down_probability,
        result.signal_strength,
        result.rsi.short,
        result.rsi.medium,
        result.rsi.long,
        result.rsi.composite,
        result.macd_histogram,
        result.bollinger_position,
        result.atr,
        result.atr_percent,
        result.components.rsi,
        result.components.macd,
        result.components.bollinger,
        result.components.trend,
        result.reward_risk.ratio,
        result.stop_loss,
        result.take_profit,
        result.position_size,
    ];
    assert!(values.iter().all(|v| v.is_finite()), "non-finite in {:?}", result);
}

#[test]
fn test_missing_series() {
    let mut series = uptrend_series();
    series.medium.clear();
    let err = engine().evaluate("BTC", &series).unwrap_err();
    assert_eq!(err, AssessmentError::MissingSeries(Timeframe::Medium));
    assert!(err.is_no_data());

    let err = engine()
        .evaluate("BTC", &TimeframeSeries::default())
        .unwrap_err();
    assert_eq!(err, AssessmentError::MissingSeries(Timeframe::Short));
}

#[test]
fn test_invalid_price() {
    let mut series = uptrend_series();
    series.short.last_mut().unwrap().close = 0.0;
    let err = engine().evaluate("BTC", &series).unwrap_err();
    assert_eq!(err, AssessmentError::InvalidPrice(0.0));
    assert!(!err.is_no_data());

    series.short.last_mut().unwrap().close = f64::NAN;
    assert!(matches!(
        engine().evaluate("BTC", &series),
        Err(AssessmentError::InvalidPrice(_))
    ));
}

#[test]
fn test_flat_market_is_neutral() {
    let result = engine().evaluate("ETH", &flat_series()).unwrap();
    assert_all_finite(&result);
    assert_eq!(result.rsi.short, 50.0);
    assert_eq!(result.rsi.composite, 50.0);
    assert_close(result.up_probability, 45.0, 1e-9);
    assert_eq!(result.direction, SignalDirection::Neutral);
    assert_eq!(result.trade_side, TradeSide::Sell);
    assert!(result.market_type.is_ranging());
    assert_eq!(result.reward_risk.ratio, 1.0);
    assert!(result.degraded.contains(&IndicatorKind::Rsi));
}

#[test]
fn test_flat_market_normalized_policy() {
    let options = EvaluationOptions {
        stop_method: StopLossMethod::Atr,
        weight_policy: WeightPolicy::Normalized,
    };
    let result = engine()
        .evaluate_with("ETH", &flat_series(), options)
        .unwrap();
    assert_close(result.up_probability, 50.0, 1e-9);
    assert_close(result.signal_strength, 0.0, 1e-9);
}

#[test]
fn test_probabilities_complement() {
    for series in [uptrend_series(), flat_series()] {
        let result = engine().evaluate("X", &series).unwrap();
        assert_eq!(result.up_probability + result.down_probability, 100.0);
        assert!((0.0..=100.0).contains(&result.signal_strength));
        assert!((0.05..=1.0).contains(&result.position_size));
    }
}

#[test]
fn test_short_series_degrades_instead_of_failing() {
    let series = TimeframeSeries::new(
        create_uptrend_candles(5, 100.0, 0.01),
        create_flat_candles(3, 100.0),
        create_flat_candles(2, 100.0),
    );
    let result = engine().evaluate("NEW", &series).unwrap();
    assert_all_finite(&result);
    assert_eq!(result.rsi.short, 50.0);
    assert_eq!(result.rsi.medium, 50.0);
    assert!(result.degraded.contains(&IndicatorKind::Rsi));
    assert!(result.degraded.contains(&IndicatorKind::Bollinger));
    assert!(result.degraded.contains(&IndicatorKind::Atr));
    assert_eq!(
        result
            .degraded
            .iter()
            .filter(|k| **k == IndicatorKind::Rsi)
            .count(),
        1
    );
}

#[test]
fn test_regime_reference_timeframe() {
    let mut config = EngineConfig::default();
    config.regime_timeframe = Timeframe::Medium;
    let result = ProbabilityEngine::new(config)
        .evaluate("BTC", &uptrend_series())
        .unwrap();
    // the medium series is flat
    assert!(result.market_type.is_ranging());
}

#[test]
fn test_result_serializes() {
    let result = engine().evaluate("BTC", &uptrend_series()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["symbol"], "BTC");
    assert_eq!(json["direction"], "buy");
    assert_eq!(json["market_type"]["regime"], "strong_uptrend");
    assert!(json.get("risk_score").is_some());
}
