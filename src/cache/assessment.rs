//! Memoization of assessments per symbol and evaluation options

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::ttl::TtlCache;
use crate::config::WeightPolicy;
use crate::models::risk::StopLossMethod;
use crate::models::signal::ProbabilityResult;
use crate::signals::engine::EvaluationOptions;
use crate::signals::error::AssessmentError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentKey {
    pub symbol: String,
    pub stop_method: StopLossMethod,
    pub weight_policy: WeightPolicy,
}

impl AssessmentKey {
    pub fn new(symbol: impl Into<String>, options: EvaluationOptions) -> Self {
        Self {
            symbol: symbol.into(),
            stop_method: options.stop_method,
            weight_policy: options.weight_policy,
        }
    }
}

pub struct AssessmentCache {
    inner: TtlCache<AssessmentKey, ProbabilityResult>,
    // one in-flight computation per key
    in_flight: Mutex<HashMap<AssessmentKey, Arc<AsyncMutex<()>>>>,
}

impl AssessmentCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: TtlCache::new(ttl, clock),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_system_clock(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }

    pub fn get(&self, key: &AssessmentKey) -> Option<Arc<ProbabilityResult>> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: AssessmentKey, result: ProbabilityResult) -> Arc<ProbabilityResult> {
        self.inner.insert(key, result)
    }

    /// Cached result if still fresh, otherwise compute and store it.
    ///
    /// Concurrent misses on the same key are single-flight: the first caller
    /// computes while the others wait on a per-key lock, then read its entry.
    /// Errors are returned as-is and never stored, so after a failed
    /// computation the next waiter computes again.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: AssessmentKey,
        compute: F,
    ) -> Result<Arc<ProbabilityResult>, AssessmentError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ProbabilityResult, AssessmentError>>,
    {
        if let Some(hit) = self.inner.get(&key) {
            debug!(symbol = %key.symbol, "AssessmentCache: hit");
            return Ok(hit);
        }

        let flight = self.flight_lock(&key);
        let outcome = {
            let _guard = flight.lock().await;
            match self.inner.get(&key) {
                Some(hit) => {
                    debug!(symbol = %key.symbol, "AssessmentCache: hit after waiting");
                    Ok(hit)
                }
                None => {
                    debug!(symbol = %key.symbol, "AssessmentCache: miss, computing");
                    compute()
                        .await
                        .map(|value| self.inner.insert(key.clone(), value))
                }
            }
        };

        self.release_flight(&key, &flight);
        outcome
    }

    fn flight_lock(&self, key: &AssessmentKey) -> Arc<AsyncMutex<()>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Forget the key's lock once no other caller holds a handle to it
    fn release_flight(&self, key: &AssessmentKey, flight: &Arc<AsyncMutex<()>>) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let idle = in_flight
            .get(key)
            .is_some_and(|lock| Arc::ptr_eq(lock, flight) && Arc::strong_count(lock) <= 2);
        if idle {
            in_flight.remove(key);
        }
    }

    pub fn invalidate(&self, key: &AssessmentKey) -> bool {
        self.inner.invalidate(key)
    }

    /// Drop every entry of `symbol`, whatever its options
    pub fn invalidate_symbol(&self, symbol: &str) -> usize {
        self.inner.retain(|key| key.symbol != symbol)
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.purge_expired()
    }

    pub fn clear(&self) {
        self.inner.clear()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl()
    }
}
