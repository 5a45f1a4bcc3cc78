// crates/trustlens-core/src/traits.rs

use async_trait::async_trait;

use crate::error::TrustLensError;
use crate::review::DomainAggregate;

/// Trait for the persisted per-domain review aggregate store.
///
/// Implemented by trustlens-store (RocksDB and in-memory backends). Values
/// are keyed by domain string. The only write operation is a
/// compare-and-swap so that independent writers sharing one store cannot
/// silently drop each other's appends.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// Retrieve the aggregate for a domain. Never creates a record.
    async fn get_aggregate(&self, domain: &str) -> Result<Option<DomainAggregate>, TrustLensError>;

    /// Store `new` for `domain` only if the current value equals `expected`
    /// (`None` meaning "no aggregate stored yet").
    ///
    /// Returns `Ok(false)` without writing when the stored value changed.
    async fn compare_and_swap(
        &self,
        domain: &str,
        expected: Option<&DomainAggregate>,
        new: &DomainAggregate,
    ) -> Result<bool, TrustLensError>;

    /// List every domain that has a stored aggregate, sorted.
    async fn list_domains(&self) -> Result<Vec<String>, TrustLensError>;
}
