// crates/trustlens-reputation/src/lens.rs
//
// TrustLens: the entry point a rendering surface talks to.
//
// Owns the resolver, aggregator and merge service, all sharing one
// explicitly constructed trust database. The popup-style surface uses
// `lookup` and `submit_review`; the page-notification surface uses
// `notice`, which only ever shows base data for known sources.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use trustlens_core::error::TrustLensError;
use trustlens_core::record::{MergedRecord, TrustStatus, DEFAULT_DOMAIN_KEY};
use trustlens_core::review::{DomainAggregate, ReviewScores};
use trustlens_core::traits::AggregateStore;

use crate::aggregator::ReviewAggregator;
use crate::merge::MergeService;
use crate::resolver::{DomainResolver, MatchMode};
use crate::trust_db::TrustStore;

/// Result of looking up a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    /// Resolved domain key (may be "default").
    pub domain: String,
    /// Merged record, `None` when the trust database has no entry for `domain`.
    pub record: Option<MergedRecord>,
}

/// Compact badge for the page-notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub domain: String,
    pub name: String,
    pub trust_score: Option<u8>,
    pub status: TrustStatus,
}

pub struct TrustLens {
    trust_store: Arc<TrustStore>,
    resolver: DomainResolver,
    aggregator: Arc<ReviewAggregator>,
    merger: MergeService,
}

impl TrustLens {
    pub fn new(
        trust_store: Arc<TrustStore>,
        store: Arc<dyn AggregateStore>,
        mode: MatchMode,
        max_submit_attempts: u32,
    ) -> Self {
        let aggregator =
            Arc::new(ReviewAggregator::new(store).with_max_attempts(max_submit_attempts));
        Self {
            resolver: DomainResolver::new(trust_store.clone(), mode),
            merger: MergeService::new(trust_store.clone(), aggregator.clone()),
            aggregator,
            trust_store,
        }
    }

    /// Load the trust database, degrading to an empty one on failure.
    ///
    /// In degraded mode every URL resolves to "default" and lookups report
    /// no data; nothing else is affected.
    pub fn load_trust_store(path: impl AsRef<Path>) -> Arc<TrustStore> {
        match TrustStore::load(path.as_ref()) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!("{}. Running without trust data.", e);
                Arc::new(TrustStore::empty())
            }
        }
    }

    pub fn trust_store(&self) -> &TrustStore {
        &self.trust_store
    }

    /// Resolve a URL to its trust database key.
    pub fn resolve(&self, url: &str) -> String {
        self.resolver.resolve(url)
    }

    /// Resolve `url` and merge its record. Missing records are not an error.
    pub async fn lookup(&self, url: &str) -> Result<Lookup, TrustLensError> {
        let domain = self.resolve(url);
        let record = match self.merger.merge(&domain).await {
            Ok(record) => Some(record),
            Err(TrustLensError::UnknownDomain(_)) => {
                tracing::debug!(domain = %domain, "No trust data for source");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Lookup { domain, record })
    }

    /// Merge the record for an already-resolved domain key.
    pub async fn merged(&self, domain: &str) -> Result<MergedRecord, TrustLensError> {
        self.merger.merge(domain).await
    }

    /// Submit a review for an already-resolved domain key.
    pub async fn submit_review(
        &self,
        domain: &str,
        scores: ReviewScores,
    ) -> Result<DomainAggregate, TrustLensError> {
        self.aggregator.submit_review(domain, scores).await
    }

    /// Resolve `url` and submit three 1-10 slider ratings for it.
    ///
    /// Returns the resolved domain key with the updated aggregate.
    pub async fn rate_url(
        &self,
        url: &str,
        accuracy: i32,
        bias: i32,
        trustworthiness: i32,
    ) -> Result<(String, DomainAggregate), TrustLensError> {
        let scores = ReviewScores::from_slider(accuracy, bias, trustworthiness)?;
        let domain = self.resolve(url);
        let aggregate = self.submit_review(&domain, scores).await?;
        Ok((domain, aggregate))
    }

    pub async fn aggregate(&self, domain: &str) -> Result<Option<DomainAggregate>, TrustLensError> {
        self.aggregator.get_aggregate(domain).await
    }

    pub async fn reviewed_domains(&self) -> Result<Vec<String>, TrustLensError> {
        self.aggregator.reviewed_domains().await
    }

    /// Badge for the page-notification surface, from base data only.
    ///
    /// `None` for sources that resolve to "default" or have no record.
    pub fn notice(&self, url: &str) -> Option<Notice> {
        let domain = self.resolve(url);
        if domain == DEFAULT_DOMAIN_KEY {
            return None;
        }
        let record = self.trust_store.get(&domain)?;
        Some(Notice {
            name: record.name.clone(),
            trust_score: record.trust_score,
            status: TrustStatus::from_score(record.trust_score),
            domain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustlens_core::record::TrustRecord;
    use trustlens_store::MemoryStore;

    fn record(name: &str, trust_score: Option<u8>) -> TrustRecord {
        TrustRecord {
            name: name.to_string(),
            trust_score,
            reputation: 60,
            accuracy: 60,
            bias: 60,
            transparency: 60,
            user_engagement: 60,
            total_reviews: 40,
        }
    }

    fn lens() -> TrustLens {
        let trust_store = Arc::new(TrustStore::from_records([
            ("example-news.com".to_string(), record("Example News", Some(72))),
            ("default".to_string(), record("Unknown Source", None)),
        ]));
        TrustLens::new(
            trust_store,
            Arc::new(MemoryStore::new()),
            MatchMode::Substring,
            4,
        )
    }

    #[tokio::test]
    async fn lookup_known_and_default() {
        let lens = lens();
        let hit = lens.lookup("https://www.example-news.com/story").await.unwrap();
        assert_eq!(hit.domain, "example-news.com");
        assert_eq!(hit.record.unwrap().status, TrustStatus::Moderate);

        let miss = lens.lookup("https://unlisted-site.org/").await.unwrap();
        assert_eq!(miss.domain, "default");
        assert_eq!(miss.record.unwrap().status, TrustStatus::Unknown);
    }

    #[tokio::test]
    async fn lookup_without_record_is_none() {
        let trust_store = Arc::new(TrustStore::from_records([(
            "example-news.com".to_string(),
            record("Example News", Some(72)),
        )]));
        let lens = TrustLens::new(
            trust_store,
            Arc::new(MemoryStore::new()),
            MatchMode::Label,
            4,
        );
        let miss = lens.lookup("https://unlisted-site.org/").await.unwrap();
        assert_eq!(miss.domain, "default");
        assert!(miss.record.is_none());
    }

    #[tokio::test]
    async fn rate_url_updates_lookup() {
        let lens = lens();
        let (domain, aggregate) = lens
            .rate_url("https://example-news.com/a", 9, 9, 9)
            .await
            .unwrap();
        assert_eq!(domain, "example-news.com");
        assert_eq!(aggregate.avg_overall, 90);

        let merged = lens.merged("example-news.com").await.unwrap();
        assert_eq!(merged.trust_score, Some(90));
        assert_eq!(merged.total_reviews, 41);
        assert_eq!(
            lens.reviewed_domains().await.unwrap(),
            vec!["example-news.com"]
        );
    }

    #[tokio::test]
    async fn rate_url_rejects_bad_slider() {
        let lens = lens();
        let err = lens
            .rate_url("https://example-news.com/a", 11, 5, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, TrustLensError::Validation(_)));
        assert!(lens.aggregate("example-news.com").await.unwrap().is_none());
    }

    #[test]
    fn notice_only_for_known_sources() {
        let lens = lens();
        let notice = lens.notice("https://www.example-news.com/").unwrap();
        assert_eq!(notice.name, "Example News");
        assert_eq!(notice.trust_score, Some(72));
        assert_eq!(notice.status, TrustStatus::Moderate);
        assert!(lens.notice("https://unlisted-site.org/").is_none());
    }

    #[test]
    fn missing_database_degrades_to_empty() {
        let path = std::env::temp_dir().join("trustlens_missing_database.json");
        let store = TrustLens::load_trust_store(&path);
        assert!(store.is_empty());
    }
}
