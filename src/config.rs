//! Engine configuration
//!
//! Indicator periods, composite weights, thresholds and risk tiers. Loaded once
//! at process start (defaults, then an optional JSON file, then environment
//! overrides) and treated as read-only afterwards.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{RiskLevel, StopLossMethod, Timeframe};

const WEIGHT_TOLERANCE: f64 = 0.001;

/// Deployment environment from `APP_ENV` (defaults to "sandbox")
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPeriods {
    pub rsi: u32,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
    pub bollinger: u32,
    pub bollinger_std_dev: f64,
    pub ema_short: u32,
    pub ema_long: u32,
    pub atr: u32,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            rsi: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger: 20,
            bollinger_std_dev: 2.0,
            ema_short: 10,
            ema_long: 20,
            atr: 14,
        }
    }
}

/// Per-indicator weights of the up-probability composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWeights {
    pub rsi: f64,
    pub macd: f64,
    pub bollinger: f64,
    pub ema: f64,
    /// Configured but not part of the composite sum
    pub atr: f64,
}

impl Default for IndicatorWeights {
    fn default() -> Self {
        Self {
            rsi: 0.25,
            macd: 0.25,
            bollinger: 0.20,
            ema: 0.20,
            atr: 0.10,
        }
    }
}

impl IndicatorWeights {
    /// Sum of the weights that enter the composite
    pub fn composite_total(&self) -> f64 {
        self.rsi + self.macd + self.bollinger + self.ema
    }

    /// Sum of every configured weight, ATR included
    pub fn total(&self) -> f64 {
        self.composite_total() + self.atr
    }
}

/// How the composite treats weights that do not sum to 1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// Raw weighted sum; with the default weights the composite tops out at 90
    #[default]
    AsConfigured,
    /// Weighted sum divided by the composite weight total
    Normalized,
}

impl FromStr for WeightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "as_configured" | "raw" => Ok(WeightPolicy::AsConfigured),
            "normalized" => Ok(WeightPolicy::Normalized),
            other => Err(format!("unknown weight policy: {}", other)),
        }
    }
}

/// Blend of the per-timeframe RSI values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeframeWeights {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl Default for TimeframeWeights {
    fn default() -> Self {
        Self {
            short: 0.5,
            medium: 0.3,
            long: 0.2,
        }
    }
}

impl TimeframeWeights {
    pub fn total(&self) -> f64 {
        self.short + self.medium + self.long
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Up-probability above which the short-term outlook is "strongly bullish";
    /// its mirror `100 - strong_signal` marks "strongly bearish"
    pub strong_signal: f64,
    pub buy: f64,
    pub sell: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            strong_signal: 75.0,
            buy: 60.0,
            sell: 40.0,
        }
    }
}

/// Mapping of the MACD histogram onto a probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdScoring {
    pub bullish_base: f64,
    pub bearish_base: f64,
    pub max_offset: f64,
    pub histogram_scale: f64,
}

impl Default for MacdScoring {
    fn default() -> Self {
        Self {
            bullish_base: 70.0,
            bearish_base: 30.0,
            max_offset: 29.0,
            histogram_scale: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeThresholds {
    pub strong_trend_pct: f64,
    pub high_volatility_pct: f64,
    pub ranging_change_pct: f64,
    pub ranging_volatility_pct: f64,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            strong_trend_pct: 5.0,
            high_volatility_pct: 5.0,
            ranging_change_pct: 2.0,
            ranging_volatility_pct: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    pub base_position: f64,
    pub fib_extension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub max_stop_pct: f64,
    pub min_stop_pct: f64,
    pub fallback_stop_pct: f64,
    pub atr_volatility_high_pct: f64,
    pub atr_volatility_medium_pct: f64,
    pub atr_multiplier_high: f64,
    pub atr_multiplier_medium: f64,
    pub atr_multiplier_base: f64,
    pub swing_lookback: usize,
    pub swing_points: usize,
    pub swing_buffer_pct: f64,
    pub take_profit_lookback: usize,
    pub max_take_profit_pct: f64,
    pub fallback_take_profit_pct: f64,
    pub low: TierParams,
    pub medium: TierParams,
    pub high: TierParams,
    pub position_volatility_window: usize,
    pub position_volatility_high_pct: f64,
    pub position_volatility_medium_pct: f64,
    pub position_factor_high: f64,
    pub position_factor_medium: f64,
    pub min_position: f64,
    pub max_position: f64,
    pub fallback_position: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_stop_pct: 0.10,
            min_stop_pct: 0.005,
            fallback_stop_pct: 0.02,
            atr_volatility_high_pct: 5.0,
            atr_volatility_medium_pct: 3.0,
            atr_multiplier_high: 2.0,
            atr_multiplier_medium: 1.5,
            atr_multiplier_base: 1.0,
            swing_lookback: 20,
            swing_points: 3,
            swing_buffer_pct: 0.01,
            take_profit_lookback: 30,
            max_take_profit_pct: 0.50,
            fallback_take_profit_pct: 0.05,
            // high tier targets furthest but sizes smallest
            low: TierParams {
                base_position: 0.30,
                fib_extension: 1.618,
            },
            medium: TierParams {
                base_position: 0.50,
                fib_extension: 2.618,
            },
            high: TierParams {
                base_position: 0.10,
                fib_extension: 3.618,
            },
            position_volatility_window: 20,
            position_volatility_high_pct: 5.0,
            position_volatility_medium_pct: 3.0,
            position_factor_high: 0.5,
            position_factor_medium: 0.7,
            min_position: 0.05,
            max_position: 1.0,
            fallback_position: 0.10,
        }
    }
}

impl RiskConfig {
    pub fn tier(&self, tier: RiskLevel) -> &TierParams {
        match tier {
            RiskLevel::Low => &self.low,
            RiskLevel::Medium => &self.medium,
            RiskLevel::High => &self.high,
        }
    }
}

/// Bars requested per timeframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesLimits {
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

impl Default for SeriesLimits {
    fn default() -> Self {
        Self {
            short: Timeframe::Short.default_limit(),
            medium: Timeframe::Medium.default_limit(),
            long: Timeframe::Long.default_limit(),
        }
    }
}

impl SeriesLimits {
    pub fn get(&self, timeframe: Timeframe) -> usize {
        match timeframe {
            Timeframe::Short => self.short,
            Timeframe::Medium => self.medium,
            Timeframe::Long => self.long,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorPeriods,
    pub weights: IndicatorWeights,
    pub weight_policy: WeightPolicy,
    pub timeframe_weights: TimeframeWeights,
    pub thresholds: SignalThresholds,
    pub macd_scoring: MacdScoring,
    pub regime: RegimeThresholds,
    /// Series the market regime is classified on
    pub regime_timeframe: Timeframe,
    pub risk: RiskConfig,
    pub stop_method: StopLossMethod,
    pub cache_ttl_seconds: u64,
    pub limits: SeriesLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorPeriods::default(),
            weights: IndicatorWeights::default(),
            weight_policy: WeightPolicy::default(),
            timeframe_weights: TimeframeWeights::default(),
            thresholds: SignalThresholds::default(),
            macd_scoring: MacdScoring::default(),
            regime: RegimeThresholds::default(),
            regime_timeframe: Timeframe::Short,
            risk: RiskConfig::default(),
            stop_method: StopLossMethod::default(),
            cache_ttl_seconds: 300,
            limits: SeriesLimits::default(),
        }
    }
}

/// Non-fatal configuration inconsistency, surfaced at startup
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    WeightsDoNotSumToOne { total: f64 },
    UnusedAtrWeight { weight: f64 },
    TimeframeWeightsDoNotSumToOne { total: f64 },
    InvertedRsiThresholds { oversold: f64, overbought: f64 },
    InvertedDirectionThresholds { buy: f64, sell: f64 },
    InvertedEmaPeriods { short: u32, long: u32 },
    InvertedMacdPeriods { fast: u32, slow: u32 },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::WeightsDoNotSumToOne { total } => write!(
                f,
                "composite indicator weights sum to {:.2}, not 1.0; up-probability is bounded by {:.0}",
                total,
                total * 100.0
            ),
            ConfigWarning::UnusedAtrWeight { weight } => write!(
                f,
                "ATR weight {:.2} is configured but not included in the composite",
                weight
            ),
            ConfigWarning::TimeframeWeightsDoNotSumToOne { total } => {
                write!(f, "timeframe RSI weights sum to {:.2}, not 1.0", total)
            }
            ConfigWarning::InvertedRsiThresholds { oversold, overbought } => write!(
                f,
                "RSI oversold threshold {} is not below overbought threshold {}",
                oversold, overbought
            ),
            ConfigWarning::InvertedDirectionThresholds { buy, sell } => write!(
                f,
                "buy threshold {} is not above sell threshold {}",
                buy, sell
            ),
            ConfigWarning::InvertedEmaPeriods { short, long } => write!(
                f,
                "short EMA period {} is not below long EMA period {}",
                short, long
            ),
            ConfigWarning::InvertedMacdPeriods { fast, slow } => write!(
                f,
                "MACD fast period {} is not below slow period {}",
                fast, slow
            ),
        }
    }
}

impl EngineConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Load a JSON config file; missing sections take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then `PROBIX_CONFIG` (JSON file) if set, then individual
    /// `PROBIX_*` overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same layering as [`EngineConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("PROBIX_CONFIG") {
            Some(path) => {
                info!(path = %path, "Config: loading {}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if let Some(period) = parse_override(&lookup, "PROBIX_RSI_PERIOD") {
            config.indicators.rsi = period;
        }
        if let Some(ttl) = parse_override(&lookup, "PROBIX_CACHE_TTL_SECONDS") {
            config.cache_ttl_seconds = ttl;
        }
        if let Some(method) = parse_override(&lookup, "PROBIX_STOP_METHOD") {
            config.stop_method = method;
        }
        if let Some(policy) = parse_override(&lookup, "PROBIX_WEIGHT_POLICY") {
            config.weight_policy = policy;
        }
        if let Some(timeframe) = parse_override(&lookup, "PROBIX_REGIME_TIMEFRAME") {
            config.regime_timeframe = timeframe;
        }
        if let Some(threshold) = parse_override(&lookup, "PROBIX_STRONG_SIGNAL_THRESHOLD") {
            config.thresholds.strong_signal = threshold;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let composite = self.weights.composite_total();
        if (composite - 1.0).abs() > WEIGHT_TOLERANCE {
            warnings.push(ConfigWarning::WeightsDoNotSumToOne { total: composite });
        }
        if self.weights.atr != 0.0 {
            warnings.push(ConfigWarning::UnusedAtrWeight {
                weight: self.weights.atr,
            });
        }

        let blend = self.timeframe_weights.total();
        if (blend - 1.0).abs() > WEIGHT_TOLERANCE {
            warnings.push(ConfigWarning::TimeframeWeightsDoNotSumToOne { total: blend });
        }

        let t = &self.thresholds;
        if t.rsi_oversold >= t.rsi_overbought {
            warnings.push(ConfigWarning::InvertedRsiThresholds {
                oversold: t.rsi_oversold,
                overbought: t.rsi_overbought,
            });
        }
        if t.buy <= t.sell {
            warnings.push(ConfigWarning::InvertedDirectionThresholds {
                buy: t.buy,
                sell: t.sell,
            });
        }

        let p = &self.indicators;
        if p.ema_short >= p.ema_long {
            warnings.push(ConfigWarning::InvertedEmaPeriods {
                short: p.ema_short,
                long: p.ema_long,
            });
        }
        if p.macd_fast >= p.macd_slow {
            warnings.push(ConfigWarning::InvertedMacdPeriods {
                fast: p.macd_fast,
                slow: p.macd_slow,
            });
        }

        warnings
    }

    /// Validate and log every warning; returns them for the caller
    pub fn log_warnings(&self) -> Vec<ConfigWarning> {
        let warnings = self.validate();
        for warning in &warnings {
            warn!(policy = ?self.weight_policy, "Config: {}", warning);
        }
        warnings
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key = key, value = %raw, "Config: ignoring unparsable override {}", key);
            None
        }
    }
}
