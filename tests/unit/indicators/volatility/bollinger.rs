//! Unit tests for Bollinger Bands

use probix::indicators::volatility::{band_position, calculate_bollinger_bands};
use probix::indicators::IndicatorError;

use crate::fixtures::{assert_close, create_candles_from_closes, create_flat_candles};

#[test]
fn test_bollinger_insufficient_data() {
    let candles = create_flat_candles(19, 100.0);
    assert_eq!(
        calculate_bollinger_bands(&candles, 20, 2.0).unwrap_err(),
        IndicatorError::InsufficientData {
            required: 20,
            actual: 19
        }
    );
}

#[test]
fn test_bollinger_period_one_rejected() {
    let candles = create_flat_candles(20, 100.0);
    assert_eq!(
        calculate_bollinger_bands(&candles, 1, 2.0).unwrap_err(),
        IndicatorError::InvalidPeriod(1)
    );
}

#[test]
fn test_bollinger_known_values() {
    let closes: Vec<f64> = (1..=20).map(|v| v as f64).collect();
    let candles = create_candles_from_closes(&closes);
    let bands = calculate_bollinger_bands(&candles, 20, 2.0).unwrap();
    assert_close(bands.middle, 10.5, 1e-12);
    assert_close(bands.upper, 22.332_159_566, 1e-6);
    assert_close(bands.lower, -1.332_159_566, 1e-6);
    assert_close(bands.upper - bands.lower, 4.0 * 35f64.sqrt(), 1e-9);
}

#[test]
fn test_bollinger_flat_collapses() {
    let candles = create_flat_candles(30, 100.0);
    let bands = calculate_bollinger_bands(&candles, 20, 2.0).unwrap();
    assert_eq!(bands.upper, 100.0);
    assert_eq!(bands.lower, 100.0);
}

#[test]
fn test_band_position() {
    assert_eq!(band_position(100.0, 90.0, 110.0), 0.5);
    assert_eq!(band_position(90.0, 90.0, 110.0), 0.0);
    assert_eq!(band_position(120.0, 90.0, 110.0), 1.0);
    assert_eq!(band_position(80.0, 90.0, 110.0), 0.0);
    assert_eq!(band_position(100.0, 100.0, 100.0), 0.5);
    assert_eq!(band_position(f64::NAN, 90.0, 110.0), 0.5);
}
