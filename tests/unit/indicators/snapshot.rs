//! Unit tests for indicator snapshots

use probix::config::IndicatorPeriods;
use probix::indicators::snapshot::compute_snapshot;
use probix::models::indicators::IndicatorKind;

use crate::fixtures::{create_flat_candles, create_uptrend_candles};

#[test]
fn test_snapshot_short_series_uses_neutral_defaults() {
    let candles = create_uptrend_candles(5, 100.0, 0.01);
    let price = candles.last().unwrap().close;
    let snapshot = compute_snapshot(&candles, &IndicatorPeriods::default());

    assert_eq!(snapshot.price, price);
    assert_eq!(snapshot.rsi, 50.0);
    assert_eq!(snapshot.bb_upper, price);
    assert_eq!(snapshot.bb_middle, price);
    assert_eq!(snapshot.bb_lower, price);
    assert_eq!(snapshot.atr, 0.0);
    assert!(snapshot.is_degraded(IndicatorKind::Rsi));
    assert!(snapshot.is_degraded(IndicatorKind::Bollinger));
    assert!(snapshot.is_degraded(IndicatorKind::Atr));
    // seeded EMAs and MACD exist from the first bar
    assert!(!snapshot.is_degraded(IndicatorKind::Macd));
    assert!(!snapshot.is_degraded(IndicatorKind::Ema));
}

#[test]
fn test_snapshot_flat_series() {
    let candles = create_flat_candles(60, 100.0);
    let snapshot = compute_snapshot(&candles, &IndicatorPeriods::default());

    assert_eq!(snapshot.rsi, 50.0);
    assert_eq!(snapshot.macd_histogram, 0.0);
    assert_eq!(snapshot.ema_short, 100.0);
    assert_eq!(snapshot.ema_long, 100.0);
    // zero-loss fallback
    assert_eq!(snapshot.degraded, vec![IndicatorKind::Rsi]);
}

#[test]
fn test_snapshot_empty_series() {
    let snapshot = compute_snapshot(&[], &IndicatorPeriods::default());
    assert_eq!(snapshot.price, 0.0);
    assert!(snapshot.is_degraded(IndicatorKind::Macd));
    assert!(snapshot.is_degraded(IndicatorKind::Ema));
}
