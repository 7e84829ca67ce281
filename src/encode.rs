//! Size-targeted re-encoding.
//!
//! JPEG output under a budget is found by binary search over the integer
//! quality range, assuming encoded size is non-decreasing in quality. Real
//! encoders are not perfectly monotonic; the search only ever returns a
//! buffer that was measured to fit, so a violation costs quality, never the
//! budget. PNG has no continuous quality knob: a single best-compression
//! encode is made and an overshoot is flagged rather than retried.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;

use crate::MottleError;

/// Quality used for JPEG output when no size budget is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;
/// Bounds of the JPEG quality search range.
pub const MIN_JPEG_QUALITY: u8 = 1;
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Output encoding, derived from the source file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Derive the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, MottleError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            other => Err(MottleError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// An encoded image plus the parameters that produced it.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Chosen quality; `None` for PNG, which has no quality parameter.
    pub quality: Option<u8>,
    /// Set when a PNG output could not be brought under its budget. The
    /// caller persists the bytes anyway and reports the overshoot.
    pub over_budget: bool,
}

/// Encode `img` as `format`, optionally under a byte budget.
pub fn encode(
    img: &DynamicImage,
    format: OutputFormat,
    budget: Option<u64>,
) -> Result<Encoded, MottleError> {
    match (format, budget) {
        (OutputFormat::Jpeg, None) => {
            let rgb = flatten(img);
            Ok(Encoded {
                bytes: jpeg_bytes(&rgb, DEFAULT_JPEG_QUALITY)?,
                quality: Some(DEFAULT_JPEG_QUALITY),
                over_budget: false,
            })
        }
        (OutputFormat::Jpeg, Some(budget)) => jpeg_under_budget(img, budget),
        (OutputFormat::Png, None) => Ok(Encoded {
            bytes: png_bytes(img)?,
            quality: None,
            over_budget: false,
        }),
        (OutputFormat::Png, Some(budget)) => {
            let bytes = png_bytes(img)?;
            let over_budget = bytes.len() as u64 > budget;
            Ok(Encoded {
                bytes,
                quality: None,
                over_budget,
            })
        }
    }
}

/// Binary search for the highest JPEG quality whose output fits `budget`.
///
/// The quality-1 floor is measured first; if even that exceeds the budget the
/// target is infeasible for this image. Each in-budget probe replaces the
/// current best, and the best measured buffer itself is returned.
fn jpeg_under_budget(img: &DynamicImage, budget: u64) -> Result<Encoded, MottleError> {
    let rgb = flatten(img);
    let floor = jpeg_bytes(&rgb, MIN_JPEG_QUALITY)?;
    if floor.len() as u64 > budget {
        return Err(MottleError::TargetTooSmall {
            floor: floor.len() as u64,
            budget,
        });
    }

    let (mut low, mut high) = (MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);
    let mut best: Option<(u8, Vec<u8>)> = None;
    while low <= high {
        let mid = (low + high) / 2;
        let probe = jpeg_bytes(&rgb, mid)?;
        if probe.len() as u64 <= budget {
            best = Some((mid, probe));
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    // The floor fit, so the search normally lands somewhere; a non-monotonic
    // encoder could still leave no probe in budget, and the measured floor is
    // the fallback.
    let (quality, bytes) = best.unwrap_or((MIN_JPEG_QUALITY, floor));
    Ok(Encoded {
        bytes,
        quality: Some(quality),
        over_budget: false,
    })
}

// JPEG has no alpha channel; decoded PNG sources arrive as RGBA.
fn flatten(img: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageRgb8(img.to_rgb8())
}

fn jpeg_bytes(rgb: &DynamicImage, quality: u8) -> Result<Vec<u8>, MottleError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    rgb.write_with_encoder(encoder)?;
    Ok(buf)
}

fn png_bytes(img: &DynamicImage) -> Result<Vec<u8>, MottleError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(buf)
}
