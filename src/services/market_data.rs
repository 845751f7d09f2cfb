//! Market data provider interface and an in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::indicators::Candle;
use crate::models::timeframe::{Timeframe, TimeframeSeries};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketDataError {
    #[error("no {timeframe} candles for {symbol}")]
    NotFound { symbol: String, timeframe: Timeframe },

    #[error("market data provider error: {0}")]
    Provider(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the most recent `limit` candles of a symbol, oldest first
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

/// Candles held in memory, keyed by symbol and timeframe
#[derive(Debug, Default)]
pub struct StaticMarketDataProvider {
    candles: RwLock<HashMap<(String, Timeframe), Vec<Candle>>>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the series of one symbol and timeframe
    pub async fn insert(&self, symbol: &str, timeframe: Timeframe, candles: Vec<Candle>) {
        let mut map = self.candles.write().await;
        map.insert((symbol.to_string(), timeframe), candles);
    }

    /// Replace all three series of one symbol
    pub async fn set(&self, symbol: &str, series: TimeframeSeries) {
        let TimeframeSeries { short, medium, long } = series;
        let mut map = self.candles.write().await;
        map.insert((symbol.to_string(), Timeframe::Short), short);
        map.insert((symbol.to_string(), Timeframe::Medium), medium);
        map.insert((symbol.to_string(), Timeframe::Long), long);
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let map = self.candles.read().await;
        let candles = map
            .get(&(symbol.to_string(), timeframe))
            .filter(|c| !c.is_empty())
            .ok_or_else(|| MarketDataError::NotFound {
                symbol: symbol.to_string(),
                timeframe,
            })?;

        let start = candles.len().saturating_sub(limit);
        debug!(
            symbol = %symbol,
            timeframe = %timeframe,
            found = candles.len(),
            returned = candles.len() - start,
            "StaticMarketDataProvider: get_candles"
        );
        Ok(candles[start..].to_vec())
    }
}
