// crates/trustlens-reputation/src/aggregator.rs
//
// Review aggregation: append a user review to a domain's aggregate and
// recompute its averages.
//
// Submissions for the same domain are serialized twice over:
//   - within this process, by a per-domain async mutex;
//   - across independent writers sharing the store, by compare-and-swap,
//     re-reading and re-applying the append whenever the stored aggregate
//     changed underneath us.
// A lost race therefore never drops a review.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;

use trustlens_core::error::TrustLensError;
use trustlens_core::review::{DomainAggregate, Review, ReviewScores};
use trustlens_core::traits::AggregateStore;

/// Compare-and-swap attempts before a submission is reported as failed.
pub const DEFAULT_MAX_SUBMIT_ATTEMPTS: u32 = 8;

/// Persists user reviews per domain and maintains their running averages.
pub struct ReviewAggregator {
    store: Arc<dyn AggregateStore>,
    key_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    max_attempts: u32,
}

impl ReviewAggregator {
    pub fn new(store: Arc<dyn AggregateStore>) -> Self {
        Self {
            store,
            key_locks: Mutex::new(HashMap::new()),
            max_attempts: DEFAULT_MAX_SUBMIT_ATTEMPTS,
        }
    }

    /// Override the compare-and-swap retry budget (minimum 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Read the persisted aggregate for a domain. Never creates one.
    pub async fn get_aggregate(&self, domain: &str) -> Result<Option<DomainAggregate>, TrustLensError> {
        self.store.get_aggregate(domain).await
    }

    /// List domains that have received at least one review.
    pub async fn reviewed_domains(&self) -> Result<Vec<String>, TrustLensError> {
        self.store.list_domains().await
    }

    /// Append a review for `domain` and return the recomputed aggregate.
    ///
    /// Scores must lie in 0-100; out-of-range input is rejected with
    /// `Validation` and nothing is written. The review timestamp is taken at
    /// append time.
    pub async fn submit_review(
        &self,
        domain: &str,
        scores: ReviewScores,
    ) -> Result<DomainAggregate, TrustLensError> {
        scores.validate()?;

        let lock = self.key_lock(domain);
        let _guard = lock.lock().await;

        for attempt in 1..=self.max_attempts {
            let current = self.store.get_aggregate(domain).await?;
            let review = Review::new(scores, Utc::now())?;
            let updated = DomainAggregate::appended(current.as_ref(), review);

            if self
                .store
                .compare_and_swap(domain, current.as_ref(), &updated)
                .await?
            {
                tracing::info!(
                    domain,
                    total_reviews = updated.total_reviews,
                    avg_overall = updated.avg_overall,
                    "Review recorded"
                );
                return Ok(updated);
            }

            tracing::debug!(
                domain,
                attempt,
                "Aggregate changed during submission, retrying"
            );
        }

        tracing::warn!(
            domain,
            attempts = self.max_attempts,
            "Giving up on review submission after repeated write conflicts"
        );
        Err(TrustLensError::Storage(format!(
            "aggregate for {} kept changing; gave up after {} attempts",
            domain, self.max_attempts
        )))
    }

    /// Fetch (or create) the in-process lock for a domain.
    fn key_lock(&self, domain: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .key_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .entry(domain.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}
