//! Per-directory batch driver: output-folder reset, the per-file pipeline,
//! and report emission.

use std::fs;
use std::io;
use std::path::Path;

use indicatif::ProgressBar;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::crop::{self, CropSpec};
use crate::encode::{self, OutputFormat};
use crate::fingerprint::{self, FingerprintPair};
use crate::mutate::MutationChain;
use crate::report::ReportLine;
use crate::walk;
use crate::{Config, MottleError, OUTPUT_DIR};

/// Process every grouped directory under the configured root.
///
/// Per-file errors are logged and the batch moves on; only traversal errors
/// abort the run. Returns the report lines in processing order.
pub fn run(config: &Config, rng: &mut StdRng) -> Result<Vec<ReportLine>, MottleError> {
    let groups = walk::group_by_directory(&config.root)?;
    let mut reports = Vec::new();

    for (dir, files) in &groups {
        let out_dir = dir.join(OUTPUT_DIR);
        if let Err(err) = reset_output_dir(&out_dir) {
            // Best-effort: writes below fail per file if the dir is unusable.
            warn!("preparing {}: {err}", out_dir.display());
        }

        let bar = if config.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(files.len() as u64)
        };
        for file in files {
            match process_file(config, file, &out_dir, rng) {
                Ok(line) => {
                    if !config.quiet {
                        bar.println(line.to_string());
                    }
                    reports.push(line);
                }
                Err(err) => warn!("skipping {}: {err}", file.display()),
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        if !config.quiet {
            println!(
                "finished directory: {}",
                relative_to(dir, &config.root).display()
            );
        }
    }

    Ok(reports)
}

/// Mutate, crop, re-encode, and fingerprint a single source file.
fn process_file(
    config: &Config,
    source: &Path,
    out_dir: &Path,
    rng: &mut StdRng,
) -> Result<ReportLine, MottleError> {
    let format = OutputFormat::from_path(source)?;
    let original = fingerprint::file_digest(source)?;

    let mutated = MutationChain::new(config.max_generations).run(source, rng)?;
    let cropped = crop::crop_inset(&mutated, CropSpec::draw(rng))?;
    let encoded = encode::encode(&cropped, format, config.budget_bytes())?;

    fs::create_dir_all(out_dir)?;
    let name = source.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name")
    })?;
    let dest = out_dir.join(name);
    fs::write(&dest, &encoded.bytes)?;

    if encoded.over_budget {
        if let Some(budget) = config.budget_bytes() {
            warn!(
                "{}: exceeded size target ({} > {budget} bytes), output kept",
                dest.display(),
                encoded.bytes.len()
            );
        }
    }
    debug!(
        "{}: wrote {} bytes (quality {:?})",
        dest.display(),
        encoded.bytes.len(),
        encoded.quality
    );

    // A failed result hash still yields a line; the empty field marks it.
    let modified = fingerprint::file_digest(&dest).unwrap_or_else(|err| {
        warn!("hashing {}: {err}", dest.display());
        String::new()
    });

    Ok(ReportLine {
        path: relative_to(source, &config.root).to_path_buf(),
        hashes: FingerprintPair { original, modified },
    })
}

/// Delete and recreate a directory's output folder so each pass starts empty.
fn reset_output_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    fs::create_dir(dir)
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel,
        Ok(_) => Path::new("."),
        Err(_) => path,
    }
}
