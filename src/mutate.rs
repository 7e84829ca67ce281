//! Content mutation: trailer injection and the multi-generation chain.
//!
//! [`append_marker`] appends a timestamped trailer to a byte buffer without
//! interpreting its format; intermediate generations of the chain therefore
//! need not decode as valid images. Only the final generation's buffer is
//! handed on to the crop stage.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rand::rngs::StdRng;
use rand::Rng;
use tempfile::Builder;
use tracing::{debug, warn};

use crate::MottleError;

/// Exclusive upper bound for the random integers embedded in each trailer.
pub const MARKER_BOUND: u32 = 10_000;

/// Prefix for the per-file scratch directories holding intermediate
/// generations.
pub const SCRATCH_PREFIX: &str = "mottle-gen";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append a trailer to `data`: a human-readable block with the current
/// wall-clock time and a random integer, then a JSON record with the same
/// timestamp and a second independent draw. The input bytes are preserved as
/// a prefix; the output is always strictly longer.
pub fn append_marker(data: &[u8], rng: &mut StdRng) -> Vec<u8> {
    let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let note = format!(
        "\n# time: {stamp}\n# random: {}\n",
        rng.gen_range(0..MARKER_BOUND)
    );
    let record = serde_json::json!({
        "time": stamp,
        "random": rng.gen_range(0..MARKER_BOUND),
    });

    let mut out = Vec::with_capacity(data.len() + note.len() + 64);
    out.extend_from_slice(data);
    out.extend_from_slice(note.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(record.to_string().as_bytes());
    out
}

/// Drives 1..N sequential trailer mutations over a source file.
///
/// Generations before the last round-trip through an ephemeral scratch
/// directory so each mutation reads a durable input; the directory is removed
/// when the chain returns, whatever happens downstream.
#[derive(Debug, Clone)]
pub struct MutationChain {
    max_generations: u32,
    scratch_root: Option<PathBuf>,
}

impl MutationChain {
    /// A chain drawing its generation count uniformly from
    /// `[1, max_generations]`. Zero is treated as one.
    pub fn new(max_generations: u32) -> Self {
        Self {
            max_generations: max_generations.max(1),
            scratch_root: None,
        }
    }

    /// Stage intermediate generations under `root` instead of the system
    /// temp directory.
    pub fn scratch_in(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Run the chain and return the final generation's bytes.
    ///
    /// A failed staging write or read-back is logged and that generation is
    /// skipped; the chain continues from the last good buffer. Only an
    /// unreadable source fails the whole chain.
    pub fn run(&self, source: &Path, rng: &mut StdRng) -> Result<Vec<u8>, MottleError> {
        let generations = rng.gen_range(1..=self.max_generations);
        debug!("{}: {generations} generation(s)", source.display());

        let bytes = fs::read(source)?;
        let mut current = append_marker(&bytes, rng);
        if generations == 1 {
            return Ok(current);
        }

        // Removed on drop, before crop/encode ever see the final buffer.
        let scratch = match &self.scratch_root {
            Some(root) => Builder::new().prefix(SCRATCH_PREFIX).tempdir_in(root)?,
            None => Builder::new().prefix(SCRATCH_PREFIX).tempdir()?,
        };
        for generation in 1..generations {
            let stage = scratch.path().join(format!("gen{generation}"));
            if let Err(err) = fs::write(&stage, &current) {
                warn!("generation {generation}: staging write failed, skipping: {err}");
                continue;
            }
            match fs::read(&stage) {
                Ok(staged) => current = append_marker(&staged, rng),
                Err(err) => {
                    warn!("generation {generation}: staging read failed, skipping: {err}")
                }
            }
        }

        Ok(current)
    }
}
