// crates/trustlens-store/src/memory.rs
//
// In-memory aggregate store implementing the `AggregateStore` trait.
//
// Used by tests and by sessions that do not need reviews to outlive the
// process. The whole map sits behind one RwLock, so a compare-and-swap is
// a single critical section.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use trustlens_core::error::TrustLensError;
use trustlens_core::review::DomainAggregate;
use trustlens_core::traits::AggregateStore;

/// HashMap-backed aggregate store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    aggregates: RwLock<HashMap<String, DomainAggregate>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of domains with a stored aggregate.
    pub fn len(&self) -> usize {
        self.aggregates.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Return whether no aggregates are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> TrustLensError {
    TrustLensError::Storage("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl AggregateStore for MemoryStore {
    async fn get_aggregate(&self, domain: &str) -> Result<Option<DomainAggregate>, TrustLensError> {
        let map = self.aggregates.read().map_err(|_| poisoned())?;
        Ok(map.get(domain).cloned())
    }

    async fn compare_and_swap(
        &self,
        domain: &str,
        expected: Option<&DomainAggregate>,
        new: &DomainAggregate,
    ) -> Result<bool, TrustLensError> {
        let mut map = self.aggregates.write().map_err(|_| poisoned())?;
        if map.get(domain) != expected {
            return Ok(false);
        }
        map.insert(domain.to_string(), new.clone());
        Ok(true)
    }

    async fn list_domains(&self) -> Result<Vec<String>, TrustLensError> {
        let map = self.aggregates.read().map_err(|_| poisoned())?;
        let mut domains: Vec<String> = map.keys().cloned().collect();
        domains.sort();
        Ok(domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trustlens_core::review::{Review, ReviewScores};

    fn aggregate(score: i32) -> DomainAggregate {
        let scores = ReviewScores {
            accuracy: score,
            bias: score,
            trustworthiness: score,
        };
        DomainAggregate::appended(None, Review::new(scores, Utc::now()).unwrap())
    }

    #[tokio::test]
    async fn missing_domain_reads_none() {
        let store = MemoryStore::new();
        assert!(store.get_aggregate("example.com").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn cas_inserts_when_expected_absent() {
        let store = MemoryStore::new();
        let agg = aggregate(50);
        assert!(store.compare_and_swap("example.com", None, &agg).await.unwrap());
        assert_eq!(store.get_aggregate("example.com").await.unwrap(), Some(agg));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn cas_rejects_stale_expectation() {
        let store = MemoryStore::new();
        let first = aggregate(50);
        let second = aggregate(90);
        assert!(store.compare_and_swap("example.com", None, &first).await.unwrap());

        // A writer that still believes the key is empty must lose.
        assert!(!store.compare_and_swap("example.com", None, &second).await.unwrap());
        assert_eq!(store.get_aggregate("example.com").await.unwrap(), Some(first.clone()));

        assert!(store
            .compare_and_swap("example.com", Some(&first), &second)
            .await
            .unwrap());
        assert_eq!(store.get_aggregate("example.com").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn list_domains_is_sorted() {
        let store = MemoryStore::new();
        let agg = aggregate(70);
        for domain in ["zeta.org", "alpha.com", "mid.net"] {
            store.compare_and_swap(domain, None, &agg).await.unwrap();
        }
        assert_eq!(
            store.list_domains().await.unwrap(),
            vec!["alpha.com", "mid.net", "zeta.org"]
        );
    }
}
