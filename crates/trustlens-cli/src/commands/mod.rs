// crates/trustlens-cli/src/commands/mod.rs
//
// Command module declarations for the TrustLens CLI.

pub mod domains;
pub mod lookup;
pub mod notice;
pub mod resolve;
pub mod review;
pub mod reviews;
