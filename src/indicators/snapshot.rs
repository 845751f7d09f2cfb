//! Last-value snapshot of every indicator over one series

use tracing::debug;

use crate::config::IndicatorPeriods;
use crate::indicators::momentum::{calculate_macd, calculate_rsi, NEUTRAL_RSI};
use crate::indicators::trend::calculate_ema;
use crate::indicators::volatility::{calculate_atr, calculate_bollinger_bands};
use crate::models::indicators::{Candle, IndicatorKind, IndicatorSnapshot};

/// Compute every indicator, substituting neutral defaults where a value is undefined.
///
/// Neutral defaults: RSI 50, MACD 0/0/0, bands collapsed onto the last close,
/// EMAs equal to the last close, ATR 0. RSI is also marked degraded when the
/// zero-loss fallback applied.
pub fn compute_snapshot(candles: &[Candle], periods: &IndicatorPeriods) -> IndicatorSnapshot {
    let price = candles.last().map(|c| c.close).unwrap_or(0.0);
    let mut degraded = Vec::new();

    let rsi = match calculate_rsi(candles, periods.rsi) {
        Ok(rsi) => {
            if rsi.zero_loss {
                degraded.push(IndicatorKind::Rsi);
            }
            rsi.value
        }
        Err(e) => {
            debug!(error = %e, "Snapshot: RSI undefined, using neutral {}", NEUTRAL_RSI);
            degraded.push(IndicatorKind::Rsi);
            NEUTRAL_RSI
        }
    };

    let (macd_line, macd_signal, macd_histogram) = match calculate_macd(
        candles,
        periods.macd_fast,
        periods.macd_slow,
        periods.macd_signal,
    ) {
        Ok(macd) => (macd.macd, macd.signal, macd.histogram),
        Err(e) => {
            debug!(error = %e, "Snapshot: MACD undefined, using zero");
            degraded.push(IndicatorKind::Macd);
            (0.0, 0.0, 0.0)
        }
    };

    let (bb_middle, bb_upper, bb_lower) =
        match calculate_bollinger_bands(candles, periods.bollinger, periods.bollinger_std_dev) {
            Ok(bands) => (bands.middle, bands.upper, bands.lower),
            Err(e) => {
                debug!(error = %e, "Snapshot: Bollinger undefined, collapsing bands on price");
                degraded.push(IndicatorKind::Bollinger);
                (price, price, price)
            }
        };

    let ema_short = calculate_ema(candles, periods.ema_short).map(|e| e.value);
    let ema_long = calculate_ema(candles, periods.ema_long).map(|e| e.value);
    let (ema_short, ema_long) = match (ema_short, ema_long) {
        (Ok(short), Ok(long)) => (short, long),
        (Err(e), _) | (_, Err(e)) => {
            debug!(error = %e, "Snapshot: EMA undefined, using price");
            degraded.push(IndicatorKind::Ema);
            (price, price)
        }
    };

    let atr = match calculate_atr(candles, periods.atr) {
        Ok(atr) => atr.value,
        Err(e) => {
            debug!(error = %e, "Snapshot: ATR undefined, using zero");
            degraded.push(IndicatorKind::Atr);
            0.0
        }
    };

    IndicatorSnapshot {
        price,
        rsi,
        macd_line,
        macd_signal,
        macd_histogram,
        bb_middle,
        bb_upper,
        bb_lower,
        ema_short,
        ema_long,
        atr,
        degraded,
    }
}
