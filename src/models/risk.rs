use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of the hypothetical trade the risk parameters are computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopLossMethod {
    #[default]
    Atr,
    Bollinger,
    Swing,
}

impl FromStr for StopLossMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atr" => Ok(StopLossMethod::Atr),
            "bollinger" => Ok(StopLossMethod::Bollinger),
            "swing" => Ok(StopLossMethod::Swing),
            other => Err(format!("unknown stop-loss method: {}", other)),
        }
    }
}

/// Risk classification of an assessment; also used as the risk tier that
/// drives take-profit distance and base position size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Score below 40 is low, below 70 medium, anything else high
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            RiskLevel::Low
        } else if score < 70.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low risk - standard position size suitable",
            RiskLevel::Medium => "medium risk - moderate position size advised",
            RiskLevel::High => "high risk - light position or stay on the sidelines",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Additive 0-100 score; `None` when evaluation failed
    pub score: Option<f64>,
    pub description: String,
}

impl RiskAssessment {
    pub const EVALUATION_FAILED: &'static str = "evaluation failed - trade conservatively";

    pub fn from_score(score: f64) -> Self {
        let level = RiskLevel::from_score(score);
        Self {
            level,
            score: Some(score),
            description: level.description().to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            level: RiskLevel::High,
            score: None,
            description: Self::EVALUATION_FAILED.to_string(),
        }
    }
}
