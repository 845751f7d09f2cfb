use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::Candle;

/// The three horizons an assessment is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Short,
    Medium,
    Long,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Short, Timeframe::Medium, Timeframe::Long];

    /// Candle interval conventionally used for this horizon
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::Short => "1h",
            Timeframe::Medium => "4h",
            Timeframe::Long => "1d",
        }
    }

    /// Number of bars fetched by default
    pub fn default_limit(&self) -> usize {
        match self {
            Timeframe::Short => 100,
            Timeframe::Medium => 50,
            Timeframe::Long => 30,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Short => write!(f, "short ({})", self.interval()),
            Timeframe::Medium => write!(f, "medium ({})", self.interval()),
            Timeframe::Long => write!(f, "long ({})", self.interval()),
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" | "1h" => Ok(Timeframe::Short),
            "medium" | "4h" => Ok(Timeframe::Medium),
            "long" | "1d" => Ok(Timeframe::Long),
            other => Err(format!("unknown timeframe: {}", other)),
        }
    }
}

/// The three OHLCV series of one symbol
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeframeSeries {
    #[serde(default)]
    pub short: Vec<Candle>,
    #[serde(default)]
    pub medium: Vec<Candle>,
    #[serde(default)]
    pub long: Vec<Candle>,
}

impl TimeframeSeries {
    pub fn new(short: Vec<Candle>, medium: Vec<Candle>, long: Vec<Candle>) -> Self {
        Self { short, medium, long }
    }

    pub fn get(&self, timeframe: Timeframe) -> &[Candle] {
        match timeframe {
            Timeframe::Short => &self.short,
            Timeframe::Medium => &self.medium,
            Timeframe::Long => &self.long,
        }
    }

    /// First timeframe whose series is empty
    pub fn first_missing(&self) -> Option<Timeframe> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| self.get(*tf).is_empty())
    }
}
