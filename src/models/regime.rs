use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Qualitative market state of a reference series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum MarketRegime {
    StrongUptrend { high_volatility: bool },
    StrongDowntrend { high_volatility: bool },
    Ranging { high_volatility: bool },
    WeakUptrend,
    WeakDowntrend,
    Indeterminate,
    ClassificationFailed,
}

impl MarketRegime {
    pub fn trend_direction(&self) -> Option<TrendDirection> {
        match self {
            MarketRegime::StrongUptrend { .. } | MarketRegime::WeakUptrend => {
                Some(TrendDirection::Up)
            }
            MarketRegime::StrongDowntrend { .. } | MarketRegime::WeakDowntrend => {
                Some(TrendDirection::Down)
            }
            _ => None,
        }
    }

    pub fn is_strong_trend(&self) -> bool {
        matches!(
            self,
            MarketRegime::StrongUptrend { .. } | MarketRegime::StrongDowntrend { .. }
        )
    }

    pub fn is_ranging(&self) -> bool {
        matches!(self, MarketRegime::Ranging { .. })
    }

    pub fn is_high_volatility(&self) -> bool {
        match self {
            MarketRegime::StrongUptrend { high_volatility }
            | MarketRegime::StrongDowntrend { high_volatility }
            | MarketRegime::Ranging { high_volatility } => *high_volatility,
            _ => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketRegime::StrongUptrend { high_volatility: false } => "strong uptrend",
            MarketRegime::StrongUptrend { high_volatility: true } => {
                "strong uptrend-high-volatility"
            }
            MarketRegime::StrongDowntrend { high_volatility: false } => "strong downtrend",
            MarketRegime::StrongDowntrend { high_volatility: true } => {
                "strong downtrend-high-volatility"
            }
            MarketRegime::Ranging { high_volatility: false } => "ranging",
            MarketRegime::Ranging { high_volatility: true } => "ranging-high-volatility",
            MarketRegime::WeakUptrend => "weak uptrend",
            MarketRegime::WeakDowntrend => "weak downtrend",
            MarketRegime::Indeterminate => "indeterminate",
            MarketRegime::ClassificationFailed => "classification failed",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
