//! Unit tests for the assessment service

use chrono::Duration as ChronoDuration;
use probix::cache::ManualClock;
use probix::config::EngineConfig;
use probix::models::signal::ShortTermOutlook;
use probix::models::timeframe::Timeframe;
use probix::services::assessment::AssessmentService;
use probix::services::market_data::{MarketDataError, StaticMarketDataProvider};
use probix::signals::error::AssessmentError;
use std::sync::Arc;

use crate::fixtures::{downtrend_series, flat_series, uptrend_series};

async fn provider() -> Arc<StaticMarketDataProvider> {
    let provider = Arc::new(StaticMarketDataProvider::new());
    provider.set("BTC", uptrend_series()).await;
    provider.set("ETH", flat_series()).await;
    provider.set("SOL", downtrend_series()).await;
    provider
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_assess_is_memoized() {
    let provider = provider().await;
    let clock = Arc::new(ManualClock::default());
    let service =
        AssessmentService::with_clock(provider.clone(), EngineConfig::default(), clock.clone());

    let first = service.assess("BTC").await.unwrap();
    provider.set("BTC", flat_series()).await;

    let second = service.assess("BTC").await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let fresh = service
        .assess_fresh("BTC", service.engine().default_options())
        .await
        .unwrap();
    assert!(fresh.up_probability < first.up_probability);

    clock.advance(ChronoDuration::seconds(301));
    let third = service.assess("BTC").await.unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.up_probability, fresh.up_probability);
}

#[tokio::test]
async fn test_unknown_symbol() {
    let service = AssessmentService::from_config(provider().await, EngineConfig::default());
    let err = service.assess("DOGE").await.unwrap_err();
    assert!(err.is_no_data());
    assert!(matches!(
        err,
        AssessmentError::MarketData(MarketDataError::NotFound { .. })
    ));
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn test_fetch_series_respects_limits() {
    let provider = Arc::new(StaticMarketDataProvider::new());
    provider
        .insert(
            "BTC",
            Timeframe::Short,
            crate::fixtures::create_uptrend_candles(150, 100.0, 0.001),
        )
        .await;
    provider
        .insert("BTC", Timeframe::Medium, crate::fixtures::create_flat_candles(80, 100.0))
        .await;
    provider
        .insert("BTC", Timeframe::Long, crate::fixtures::create_flat_candles(80, 100.0))
        .await;

    let service = AssessmentService::from_config(provider, EngineConfig::default());
    let series = service.fetch_series("BTC").await.unwrap();
    assert_eq!(series.short.len(), 100);
    assert_eq!(series.medium.len(), 50);
    assert_eq!(series.long.len(), 30);
}

#[tokio::test]
async fn test_watchlist_ranked_and_skips_missing() {
    let service = AssessmentService::from_config(provider().await, EngineConfig::default());
    let results = service
        .assess_watchlist(&symbols(&["ETH", "DOGE", "BTC", "SOL"]))
        .await;

    let ranked: Vec<&str> = results.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(ranked, vec!["BTC", "SOL", "ETH"]);
    assert_eq!(service.cache().len(), 3);
}

#[tokio::test]
async fn test_critical_signals() {
    let service = AssessmentService::from_config(provider().await, EngineConfig::default());
    // nothing clears the default 75 threshold
    assert!(service
        .critical_signals(&symbols(&["BTC", "ETH", "SOL"]))
        .await
        .is_empty());

    let mut config = EngineConfig::default();
    config.thresholds.strong_signal = 62.0;
    let service = AssessmentService::from_config(provider().await, config);
    let critical = service
        .critical_signals(&symbols(&["BTC", "ETH", "SOL"]))
        .await;
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].symbol, "BTC");
    assert_eq!(
        critical[0].short_term_recommendation.outlook,
        ShortTermOutlook::StronglyBullish
    );
}
