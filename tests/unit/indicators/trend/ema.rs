//! Unit tests for EMA indicator

use probix::indicators::trend::{calculate_ema, ema_gap_pct, ema_series};
use probix::indicators::IndicatorError;
use probix::models::indicators::Candle;
use chrono::Utc;

fn create_test_candles(count: usize, base_price: f64) -> Vec<Candle> {
    let mut candles = Vec::new();
    for i in 0..count {
        let price = base_price + (i as f64 * 0.1);
        candles.push(Candle::new(
            price,
            price + 0.05,
            price - 0.05,
            price,
            1000.0,
            Utc::now(),
        ));
    }
    candles
}

#[test]
fn test_ema_empty_series() {
    assert_eq!(calculate_ema(&[], 20).unwrap_err(), IndicatorError::EmptySeries);
}

#[test]
fn test_ema_short_series_seeded_by_first_close() {
    let candles = create_test_candles(1, 100.0);
    let ema = calculate_ema(&candles, 20).unwrap();
    assert_eq!(ema.value, 100.0);
}

#[test]
fn test_ema_sufficient_data() {
    let candles = create_test_candles(50, 100.0);
    let ema = calculate_ema(&candles, 12).unwrap();
    assert_eq!(ema.period, 12);
    assert!(ema.value.is_finite());
    // lags a rising series
    assert!(ema.value < candles.last().unwrap().close);
}

#[test]
fn test_ema_series_length() {
    let candles = create_test_candles(30, 100.0);
    assert_eq!(ema_series(&candles, 10).len(), 30);
}

#[test]
fn test_ema_gap_pct() {
    assert_eq!(ema_gap_pct(102.0, 100.0), Some(2.0));
    assert_eq!(ema_gap_pct(100.0, 0.0), None);
    assert_eq!(ema_gap_pct(f64::NAN, 100.0), None);
}
