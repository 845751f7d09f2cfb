//! Unit tests for assessment memoization

use chrono::Duration as ChronoDuration;
use probix::cache::{AssessmentCache, AssessmentKey, ManualClock};
use probix::config::{EngineConfig, WeightPolicy};
use probix::models::risk::StopLossMethod;
use probix::models::timeframe::Timeframe;
use probix::signals::engine::{EvaluationOptions, ProbabilityEngine};
use probix::signals::error::AssessmentError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::fixtures::{flat_series, uptrend_series};

fn options(stop_method: StopLossMethod) -> EvaluationOptions {
    EvaluationOptions {
        stop_method,
        weight_policy: WeightPolicy::AsConfigured,
    }
}

fn setup() -> (AssessmentCache, Arc<ManualClock>, ProbabilityEngine) {
    let clock = Arc::new(ManualClock::default());
    let cache = AssessmentCache::new(Duration::from_secs(300), clock.clone());
    (cache, clock, ProbabilityEngine::new(EngineConfig::default()))
}

#[tokio::test]
async fn test_same_arc_within_ttl() {
    let (cache, clock, engine) = setup();
    let calls = AtomicUsize::new(0);
    let key = AssessmentKey::new("BTC", options(StopLossMethod::Atr));

    let first = cache
        .get_or_compute(key.clone(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            engine.evaluate("BTC", &uptrend_series())
        })
        .await
        .unwrap();

    clock.advance(ChronoDuration::seconds(120));

    // different data would give a different result; the cached one is served
    let second = cache
        .get_or_compute(key, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            engine.evaluate("BTC", &flat_series())
        })
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_recomputes_after_ttl() {
    let (cache, clock, engine) = setup();
    let key = AssessmentKey::new("BTC", options(StopLossMethod::Atr));

    let first = cache
        .get_or_compute(key.clone(), || async { engine.evaluate("BTC", &uptrend_series()) })
        .await
        .unwrap();

    clock.advance(ChronoDuration::seconds(301));

    let second = cache
        .get_or_compute(key, || async { engine.evaluate("BTC", &flat_series()) })
        .await
        .unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(second.up_probability < first.up_probability);
}

#[tokio::test]
async fn test_options_are_part_of_the_key() {
    let (cache, _clock, engine) = setup();
    let atr = AssessmentKey::new("BTC", options(StopLossMethod::Atr));
    let swing = AssessmentKey::new("BTC", options(StopLossMethod::Swing));

    let a = cache
        .get_or_compute(atr, || async { engine.evaluate("BTC", &uptrend_series()) })
        .await
        .unwrap();
    let b = cache
        .get_or_compute(swing, || async { engine.evaluate("BTC", &uptrend_series()) })
        .await
        .unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.invalidate_symbol("BTC"), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_errors_not_cached() {
    let (cache, _clock, engine) = setup();
    let key = AssessmentKey::new("BTC", options(StopLossMethod::Atr));

    let err = cache
        .get_or_compute(key.clone(), || async {
            Err(AssessmentError::MissingSeries(Timeframe::Long))
        })
        .await
        .unwrap_err();
    assert!(err.is_no_data());
    assert!(cache.get(&key).is_none());

    let result = cache
        .get_or_compute(key.clone(), || async { engine.evaluate("BTC", &uptrend_series()) })
        .await;
    assert!(result.is_ok());
    assert!(cache.get(&key).is_some());
    assert!(cache.invalidate(&key));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_compute_once() {
    let clock = Arc::new(ManualClock::default());
    let cache = Arc::new(AssessmentCache::new(Duration::from_secs(300), clock));
    let engine = Arc::new(ProbabilityEngine::new(EngineConfig::default()));
    let calls = Arc::new(AtomicUsize::new(0));
    let key = AssessmentKey::new("BTC", options(StopLossMethod::Atr));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let cache = cache.clone();
            let engine = engine.clone();
            let calls = calls.clone();
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .get_or_compute(key, move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        engine.evaluate("BTC", &uptrend_series())
                    })
                    .await
            })
        })
        .collect();

    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.unwrap().unwrap());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
    assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));

    // a caller arriving after the insert is a plain hit
    let late_calls = AtomicUsize::new(0);
    let late = cache
        .get_or_compute(key, || async {
            late_calls.fetch_add(1, Ordering::SeqCst);
            engine.evaluate("BTC", &flat_series())
        })
        .await
        .unwrap();
    assert!(Arc::ptr_eq(&late, &results[0]));
    assert_eq!(late_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_waiters_recompute_after_failure() {
    let (cache, _clock, engine) = setup();
    let cache = Arc::new(cache);
    let engine = Arc::new(engine);
    let calls = Arc::new(AtomicUsize::new(0));
    let key = AssessmentKey::new("ETH", options(StopLossMethod::Atr));

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            let engine = engine.clone();
            let calls = calls.clone();
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .get_or_compute(key, move || async move {
                        // only the first computation fails
                        let n = calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        if n == 0 {
                            Err(AssessmentError::MissingSeries(Timeframe::Short))
                        } else {
                            engine.evaluate("ETH", &uptrend_series())
                        }
                    })
                    .await
            })
        })
        .collect();

    let mut ok = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            ok += 1;
        }
    }

    assert_eq!(ok, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_default_ttl_from_config() {
    let cache = AssessmentCache::with_system_clock(EngineConfig::default().cache_ttl());
    assert_eq!(cache.ttl(), Duration::from_secs(300));
}
