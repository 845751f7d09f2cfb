//! Market scenario tests

use probix::config::EngineConfig;
use probix::models::regime::{MarketRegime, TrendDirection};
use probix::models::risk::{StopLossMethod, TradeSide};
use probix::models::signal::{LongTermRecommendation, SignalDirection};
use probix::signals::engine::{EvaluationOptions, ProbabilityEngine};

use crate::fixtures::{assert_close, downtrend_series, full_uptrend_series, uptrend_series};

#[test]
fn test_short_term_uptrend_is_a_buy() {
    let engine = ProbabilityEngine::new(EngineConfig::default());
    let result = engine.evaluate("BTC", &uptrend_series()).unwrap();

    assert_eq!(result.direction, SignalDirection::Buy);
    assert!(result.up_probability > 60.0);
    assert_close(result.up_probability, 63.97, 0.05);
    assert_eq!(result.market_type.trend_direction(), Some(TrendDirection::Up));
    assert_eq!(
        result.market_type,
        MarketRegime::StrongUptrend {
            high_volatility: false
        }
    );
    assert_eq!(
        result.long_term_recommendation,
        LongTermRecommendation::StrongUptrend
    );

    // overbought short RSI blended with neutral longer horizons
    assert_eq!(result.rsi.short, 100.0);
    assert_close(result.rsi.composite, 75.0, 1e-9);
    assert_close(result.components.rsi, 75.0, 1e-9);
    assert_close(result.components.macd, 99.0, 1e-9);
    assert!(result.components.trend > 80.0);
    assert!(result.components.bollinger < 30.0);
}

#[test]
fn test_uptrend_on_every_timeframe_is_overbought() {
    let engine = ProbabilityEngine::new(EngineConfig::default());
    let result = engine.evaluate("BTC", &full_uptrend_series()).unwrap();

    // composite RSI of 100 zeroes the RSI component and outweighs the trend
    assert_close(result.rsi.composite, 100.0, 1e-9);
    assert_eq!(result.components.rsi, 0.0);
    assert_close(result.components.macd, 99.0, 1e-9);
    assert_close(result.up_probability, 45.22, 0.05);
    assert_eq!(result.direction, SignalDirection::Neutral);
    assert_eq!(result.trade_side, TradeSide::Sell);
    assert_eq!(
        result.market_type,
        MarketRegime::StrongUptrend {
            high_volatility: false
        }
    );
}

#[test]
fn test_uptrend_trade_parameters() {
    let engine = ProbabilityEngine::new(EngineConfig::default());
    let result = engine.evaluate("BTC", &uptrend_series()).unwrap();
    let price = result.price;

    assert_eq!(result.trade_side, TradeSide::Buy);
    assert!(result.stop_loss < price);
    assert!(result.stop_loss >= price * 0.90 - 1e-9);
    assert!(result.stop_loss <= price * 0.995 + 1e-9);
    assert!(result.take_profit > price);
    assert!(result.take_profit <= price * 1.5 + 1e-9);
    assert!((0.05..=1.0).contains(&result.position_size));
    assert!(result.risk_score.is_some());
    assert_eq!(result.position_text(), format!("{:.0}%", result.position_size * 100.0));
}

#[test]
fn test_every_stop_method_stays_in_band() {
    let engine = ProbabilityEngine::new(EngineConfig::default());
    for stop_method in [
        StopLossMethod::Atr,
        StopLossMethod::Bollinger,
        StopLossMethod::Swing,
    ] {
        let options = EvaluationOptions {
            stop_method,
            ..engine.default_options()
        };
        let result = engine
            .evaluate_with("BTC", &uptrend_series(), options)
            .unwrap();
        let price = result.price;
        assert!(
            result.stop_loss >= price * 0.90 - 1e-9 && result.stop_loss <= price * 0.995 + 1e-9,
            "{:?} stop {} outside band for {}",
            stop_method,
            result.stop_loss,
            price
        );
    }
}

#[test]
fn test_short_term_downtrend_reads_as_oversold() {
    let engine = ProbabilityEngine::new(EngineConfig::default());
    let result = engine.evaluate("SOL", &downtrend_series()).unwrap();

    assert_eq!(result.rsi.short, 0.0);
    assert_close(result.up_probability, 56.56, 0.05);
    assert_eq!(result.direction, SignalDirection::Neutral);
    assert_eq!(result.trade_side, TradeSide::Buy);
    assert_eq!(
        result.market_type.trend_direction(),
        Some(TrendDirection::Down)
    );
    assert_eq!(result.up_probability + result.down_probability, 100.0);
}
