//! Unit tests for MACD indicator

use probix::indicators::momentum::{calculate_macd, calculate_macd_series};
use probix::indicators::IndicatorError;

use crate::fixtures::{create_flat_candles, create_uptrend_candles};

#[test]
fn test_macd_empty_series() {
    assert_eq!(
        calculate_macd(&[], 12, 26, 9).unwrap_err(),
        IndicatorError::EmptySeries
    );
}

#[test]
fn test_macd_zero_period() {
    let candles = create_flat_candles(30, 100.0);
    assert_eq!(
        calculate_macd(&candles, 12, 0, 9).unwrap_err(),
        IndicatorError::InvalidPeriod(0)
    );
}

#[test]
fn test_macd_flat_is_zero() {
    let candles = create_flat_candles(60, 100.0);
    let macd = calculate_macd(&candles, 12, 26, 9).unwrap();
    assert_eq!(macd.macd, 0.0);
    assert_eq!(macd.signal, 0.0);
    assert_eq!(macd.histogram, 0.0);
}

#[test]
fn test_macd_single_candle_has_value() {
    let candles = create_flat_candles(1, 100.0);
    let macd = calculate_macd(&candles, 12, 26, 9).unwrap();
    assert_eq!(macd.histogram, 0.0);
}

#[test]
fn test_macd_uptrend_is_positive() {
    let candles = create_uptrend_candles(50, 100.0, 0.01);
    let macd = calculate_macd(&candles, 12, 26, 9).unwrap();
    assert!(macd.macd > 0.0);
    assert!(macd.histogram > 0.0);
    assert_eq!(macd.period, Some((12, 26, 9)));
}

#[test]
fn test_macd_series_aligned() {
    let candles = create_uptrend_candles(40, 100.0, 0.01);
    let series = calculate_macd_series(&candles, 12, 26, 9).unwrap();
    assert_eq!(series.macd.len(), 40);
    assert_eq!(series.signal.len(), 40);
    assert_eq!(series.histogram.len(), 40);
    for i in 0..40 {
        assert!((series.histogram[i] - (series.macd[i] - series.signal[i])).abs() < 1e-12);
    }
}
