//! Series arithmetic shared by indicators, the regime classifier and the risk engine.

/// Simple moving average of the trailing `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Single EMA step with smoothing factor `2 / (period + 1)`
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let alpha = 2.0 / (period as f64 + 1.0);
    alpha * value + (1.0 - alpha) * previous
}

/// Exponential moving average over the whole input, seeded by the first value.
///
/// One output per input; no look-ahead.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    if let Some(&first) = iter.next() {
        out.push(first);
        let mut prev = first;
        for &value in iter {
            prev = ema_from_previous(value, prev, period);
            out.push(prev);
        }
    }
    out
}

/// Last EMA value
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 {
        return None;
    }
    ema_series(values, period).last().copied()
}

/// Sample standard deviation (n - 1 denominator) of all values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = variance.sqrt();
    std.is_finite().then_some(std)
}

/// Sample standard deviation of the trailing `period` values
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 || values.len() < period {
        return None;
    }
    sample_std_dev(&values[values.len() - period..])
}

/// Bar-over-bar fractional change; bars following a zero value are skipped
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// Standard deviation of percentage returns, expressed in percent
pub fn return_volatility_pct(closes: &[f64]) -> Option<f64> {
    sample_std_dev(&pct_change(closes)).map(|std| std * 100.0)
}

/// Return volatility over the trailing `window` returns, in percent
pub fn rolling_return_volatility_pct(closes: &[f64], window: usize) -> Option<f64> {
    standard_deviation(&pct_change(closes), window).map(|std| std * 100.0)
}

/// True range of a bar given the previous close
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let high_low = high - low;
    let high_close = (high - prev_close).abs();
    let low_close = (low - prev_close).abs();
    high_low.max(high_close).max(low_close)
}
