//! Assessment service: fetches the three series, evaluates and memoizes

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::cache::{AssessmentCache, AssessmentKey, Clock, SystemClock};
use crate::config::EngineConfig;
use crate::models::signal::ProbabilityResult;
use crate::models::timeframe::{Timeframe, TimeframeSeries};
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::{EvaluationOptions, ProbabilityEngine};
use crate::signals::error::AssessmentError;

pub struct AssessmentService {
    provider: Arc<dyn MarketDataProvider>,
    engine: Arc<ProbabilityEngine>,
    cache: Arc<AssessmentCache>,
}

impl AssessmentService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        engine: Arc<ProbabilityEngine>,
        cache: Arc<AssessmentCache>,
    ) -> Self {
        Self {
            provider,
            engine,
            cache,
        }
    }

    /// Service with a wall-clock cache using the configured TTL
    pub fn from_config(provider: Arc<dyn MarketDataProvider>, config: EngineConfig) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        provider: Arc<dyn MarketDataProvider>,
        config: EngineConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = AssessmentCache::new(config.cache_ttl(), clock);
        Self::new(
            provider,
            Arc::new(ProbabilityEngine::new(config)),
            Arc::new(cache),
        )
    }

    pub fn engine(&self) -> &ProbabilityEngine {
        &self.engine
    }

    pub fn cache(&self) -> &AssessmentCache {
        &self.cache
    }

    /// Fetch short, medium and long series concurrently
    pub async fn fetch_series(&self, symbol: &str) -> Result<TimeframeSeries, AssessmentError> {
        let limits = &self.engine.config().limits;
        let (short, medium, long) = tokio::try_join!(
            self.provider
                .get_candles(symbol, Timeframe::Short, limits.get(Timeframe::Short)),
            self.provider
                .get_candles(symbol, Timeframe::Medium, limits.get(Timeframe::Medium)),
            self.provider
                .get_candles(symbol, Timeframe::Long, limits.get(Timeframe::Long)),
        )?;
        Ok(TimeframeSeries::new(short, medium, long))
    }

    /// Assess with the configured options, served from cache while fresh
    pub async fn assess(&self, symbol: &str) -> Result<Arc<ProbabilityResult>, AssessmentError> {
        self.assess_with(symbol, self.engine.default_options()).await
    }

    pub async fn assess_with(
        &self,
        symbol: &str,
        options: EvaluationOptions,
    ) -> Result<Arc<ProbabilityResult>, AssessmentError> {
        let key = AssessmentKey::new(symbol, options);
        self.cache
            .get_or_compute(key, || self.compute(symbol, options))
            .await
    }

    /// Assess without reading or writing the cache
    pub async fn assess_fresh(
        &self,
        symbol: &str,
        options: EvaluationOptions,
    ) -> Result<ProbabilityResult, AssessmentError> {
        self.compute(symbol, options).await
    }

    async fn compute(
        &self,
        symbol: &str,
        options: EvaluationOptions,
    ) -> Result<ProbabilityResult, AssessmentError> {
        let series = self.fetch_series(symbol).await?;
        self.engine.evaluate_with(symbol, &series, options)
    }

    /// Assess every symbol concurrently, most bullish first.
    ///
    /// Symbols without a result are logged and left out.
    pub async fn assess_watchlist(&self, symbols: &[String]) -> Vec<Arc<ProbabilityResult>> {
        let outcomes = join_all(symbols.iter().map(|symbol| self.assess(symbol))).await;

        let mut results: Vec<Arc<ProbabilityResult>> = symbols
            .iter()
            .zip(outcomes)
            .filter_map(|(symbol, outcome)| match outcome {
                Ok(result) => Some(result),
                Err(e) if e.is_no_data() => {
                    debug!(symbol = %symbol, error = %e, "AssessmentService: no data, skipping");
                    None
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "AssessmentService: assessment failed");
                    None
                }
            })
            .collect();

        results.sort_by(|a, b| b.up_probability.total_cmp(&a.up_probability));
        info!(
            requested = symbols.len(),
            assessed = results.len(),
            "AssessmentService: watch list evaluated"
        );
        results
    }

    /// Watch-list results whose short-term outlook is strongly bullish or bearish
    pub async fn critical_signals(&self, symbols: &[String]) -> Vec<Arc<ProbabilityResult>> {
        self.assess_watchlist(symbols)
            .await
            .into_iter()
            .filter(|r| r.short_term_recommendation.outlook.is_strong())
            .collect()
    }
}
