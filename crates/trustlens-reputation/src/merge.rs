// crates/trustlens-reputation/src/merge.rs
//
// Blends a domain's static trust record with its user review aggregate.

use std::sync::Arc;

use trustlens_core::error::TrustLensError;
use trustlens_core::record::{MergedRecord, TrustRecord, TrustStatus};
use trustlens_core::review::DomainAggregate;

use crate::aggregator::ReviewAggregator;
use crate::trust_db::TrustStore;

/// Combine a base record with an optional aggregate.
///
/// With no aggregate (or an empty one) the base record passes through
/// unchanged. Otherwise `trust_score`, `accuracy` and `bias` come from the
/// aggregate averages and review counts are summed. `status` always follows
/// the effective trust score.
pub fn merge_records(base: &TrustRecord, aggregate: Option<&DomainAggregate>) -> MergedRecord {
    let aggregate = aggregate.filter(|a| !a.is_empty());

    let (trust_score, accuracy, bias, user_reviews) = match aggregate {
        Some(a) => (
            Some(a.avg_overall),
            a.avg_accuracy,
            a.avg_bias,
            a.total_reviews,
        ),
        None => (base.trust_score, base.accuracy, base.bias, 0),
    };

    MergedRecord {
        name: base.name.clone(),
        trust_score,
        reputation: base.reputation,
        accuracy,
        bias,
        transparency: base.transparency,
        user_engagement: base.user_engagement,
        total_reviews: base.total_reviews.saturating_add(user_reviews),
        user_reviews,
        status: TrustStatus::from_score(trust_score),
    }
}

/// Produces merged records on demand. Nothing it returns is persisted.
pub struct MergeService {
    trust_store: Arc<TrustStore>,
    aggregator: Arc<ReviewAggregator>,
}

impl MergeService {
    pub fn new(trust_store: Arc<TrustStore>, aggregator: Arc<ReviewAggregator>) -> Self {
        Self {
            trust_store,
            aggregator,
        }
    }

    /// Merge the base record and review aggregate for `domain`.
    ///
    /// Fails with `UnknownDomain` when the trust database has no entry.
    pub async fn merge(&self, domain: &str) -> Result<MergedRecord, TrustLensError> {
        let base = self
            .trust_store
            .get(domain)
            .ok_or_else(|| TrustLensError::UnknownDomain(domain.to_string()))?;
        let aggregate = self.aggregator.get_aggregate(domain).await?;
        Ok(merge_records(base, aggregate.as_ref()))
    }
}
