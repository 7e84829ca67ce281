//! Batch image mutation with size-targeted re-encoding.
//!
//! `mottle` walks an image corpus, appends randomized trailer generations to
//! each file's raw bytes, crops the decoded result by random margins, and
//! re-encodes it under an optional byte budget, reporting a SHA-256
//! fingerprint of every file before and after.

pub mod batch;
pub mod config;
pub mod crop;
pub mod encode;
pub mod error;
pub mod fingerprint;
pub mod mutate;
pub mod report;
pub mod walk;

pub use config::Config;
pub use crop::CropSpec;
pub use encode::{Encoded, OutputFormat};
pub use error::MottleError;
pub use fingerprint::FingerprintPair;
pub use mutate::MutationChain;
pub use report::ReportLine;

/// Name of the per-directory output folder. Directories whose name contains
/// this segment are never traversed as input.
pub const OUTPUT_DIR: &str = "modified";
