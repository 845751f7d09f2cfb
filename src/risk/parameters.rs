//! Trade parameters bundled for one side and tier

use serde::{Deserialize, Serialize};

use crate::config::{IndicatorPeriods, RiskConfig};
use crate::models::indicators::Candle;
use crate::models::risk::{RiskLevel, StopLossMethod, TradeSide};
use crate::risk::position::calculate_position_size;
use crate::risk::stop_loss::calculate_stop_loss;
use crate::risk::take_profit::calculate_take_profit;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeParameters {
    pub side: TradeSide,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size: f64,
}

/// Computes stop, target and size from one risk configuration
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
    periods: IndicatorPeriods,
}

impl RiskEngine {
    pub fn new(config: RiskConfig, periods: IndicatorPeriods) -> Self {
        Self { config, periods }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn stop_loss(&self, candles: &[Candle], side: TradeSide, method: StopLossMethod) -> f64 {
        calculate_stop_loss(candles, side, method, &self.config, &self.periods)
    }

    pub fn take_profit(&self, candles: &[Candle], side: TradeSide, tier: RiskLevel) -> f64 {
        calculate_take_profit(candles, side, tier, &self.config)
    }

    pub fn position_size(&self, candles: &[Candle], tier: RiskLevel) -> f64 {
        calculate_position_size(candles, tier, &self.config)
    }

    /// All three parameters; each falls back independently on failure
    pub fn trade_parameters(
        &self,
        candles: &[Candle],
        side: TradeSide,
        method: StopLossMethod,
        tier: RiskLevel,
    ) -> TradeParameters {
        TradeParameters {
            side,
            stop_loss: self.stop_loss(candles, side, method),
            take_profit: self.take_profit(candles, side, tier),
            position_size: self.position_size(candles, tier),
        }
    }
}
