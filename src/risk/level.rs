//! Overall risk level from signal clarity, regime and reward:risk

use tracing::warn;

use crate::models::regime::MarketRegime;
use crate::models::risk::RiskAssessment;
use crate::risk::error::RiskError;

/// Regime contribution: trending markets are the least risky, ranging ones the most
pub fn regime_risk(regime: &MarketRegime) -> f64 {
    if regime.is_strong_trend() {
        5.0
    } else if regime.is_ranging() {
        25.0
    } else {
        15.0
    }
}

pub fn reward_risk_term(ratio: f64) -> f64 {
    if ratio >= 3.0 {
        5.0
    } else if ratio >= 2.0 {
        10.0
    } else {
        20.0
    }
}

/// Additive 0-100 risk score; probabilities near 50 score highest
pub fn risk_score(probability: f64, regime: &MarketRegime, ratio: f64) -> Result<f64, RiskError> {
    if !probability.is_finite() {
        return Err(RiskError::NonFinite("probability"));
    }
    if ratio.is_nan() {
        return Err(RiskError::NonFinite("reward:risk ratio"));
    }

    let clarity = 50.0 - (probability - 50.0).abs();
    Ok(clarity + regime_risk(regime) + reward_risk_term(ratio))
}

pub fn evaluate_risk_level(probability: f64, regime: &MarketRegime, ratio: f64) -> RiskAssessment {
    match risk_score(probability, regime, ratio) {
        Ok(score) => RiskAssessment::from_score(score),
        Err(e) => {
            warn!(error = %e, "RiskLevel: evaluation failed, assuming high risk");
            RiskAssessment::failed()
        }
    }
}
