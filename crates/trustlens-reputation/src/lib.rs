// crates/trustlens-reputation/src/lib.rs
//
// trustlens-reputation: Domain resolution, trust database, review
// aggregation, and score merging for TrustLens.
//
// A page URL is resolved to a trust database key, the static record for
// that key is blended with the locally persisted user review aggregate,
// and the result is handed to whatever surface renders it.

pub mod aggregator;
pub mod lens;
pub mod merge;
pub mod resolver;
pub mod trust_db;

pub use aggregator::{ReviewAggregator, DEFAULT_MAX_SUBMIT_ATTEMPTS};
pub use lens::{Lookup, Notice, TrustLens};
pub use merge::{merge_records, MergeService};
pub use resolver::{DomainResolver, MatchMode};
pub use trust_db::TrustStore;
