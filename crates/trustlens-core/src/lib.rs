// crates/trustlens-core/src/lib.rs
//
// trustlens-core: Core types, traits, and error taxonomy for TrustLens.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the static trust record, user reviews and their per-domain
// aggregate, the merged view handed to the presentation layer, and the
// storage trait the aggregate store implements.

pub mod error;
pub mod record;
pub mod review;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use trustlens_core::TrustRecord;`

// Record types
pub use record::{MergedRecord, TrustRecord, TrustStatus, DEFAULT_DOMAIN_KEY};

// Review types
pub use review::{round_mean, DomainAggregate, Review, ReviewScores};

// Error type
pub use error::TrustLensError;

// Traits
pub use traits::AggregateStore;
