use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::fingerprint::FingerprintPair;

/// One per-file audit line: the source path relative to the corpus root plus
/// its fingerprint pair. A failed result hash leaves the field empty rather
/// than suppressing the line.
#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    pub path: PathBuf,
    #[serde(flatten)]
    pub hashes: FingerprintPair,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "file: {} original: {} modified: {}",
            self.path.display(),
            self.hashes.original,
            self.hashes.modified
        )
    }
}
