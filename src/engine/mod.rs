//! The duplicate-detection engine.
//!
//! Pipeline for one file: video gate -> key derivation -> identity hash ->
//! aggregation table -> bucket. The submodules split along those seams:
//!
//! - [`key`]: canonical key derivation and the video gate
//! - [`identity`]: BLAKE3 content-identity hashing
//! - [`table`]: the concurrent first-writer-wins aggregation table
//! - [`partition`]: per-file bucket filing and scan accumulators
//! - [`scan`]: the rayon worker pool that drives it all

pub mod identity;
pub mod key;
pub mod partition;
pub mod scan;
pub mod table;

pub use identity::{hash_to_hex, identity_hash, IdentityHash};
pub use key::{derive, passes_video_gate, CanonicalKey, Rejection, CONTAINER_ALLOWLIST};
pub use partition::{classify_file, Bucket, DuplicatePair, ScanContext, ScanOutcome, Summary};
pub use scan::{default_workers, scan, ScanConfig};
pub use table::{AggregationTable, InsertOutcome};
