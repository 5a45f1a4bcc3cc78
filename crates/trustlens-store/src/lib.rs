// crates/trustlens-store/src/lib.rs
//
// trustlens-store: Storage layer for TrustLens review aggregates.
//
// Provides a RocksDB-backed `AggregateStore` for on-disk persistence and an
// in-memory `AggregateStore` for tests and ephemeral sessions. Both apply
// compare-and-swap writes atomically per domain key.

pub mod memory;
pub mod rocks;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::MemoryStore;
pub use rocks::RocksStore;
