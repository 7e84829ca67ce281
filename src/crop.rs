//! Margin-inset cropping of a decoded generation buffer.

use image::{DynamicImage, GenericImageView};
use rand::rngs::StdRng;
use rand::Rng;

use crate::MottleError;

/// Inclusive bounds for a drawn crop margin, in pixels.
pub const MARGIN_MIN: u32 = 1;
pub const MARGIN_MAX: u32 = 20;

/// A pair of pixel margins insetting the image bounds on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSpec {
    pub margin_x: u32,
    pub margin_y: u32,
}

impl CropSpec {
    /// Draw both margins independently and uniformly from
    /// [`MARGIN_MIN`, `MARGIN_MAX`].
    pub fn draw(rng: &mut StdRng) -> Self {
        Self {
            margin_x: rng.gen_range(MARGIN_MIN..=MARGIN_MAX),
            margin_y: rng.gen_range(MARGIN_MIN..=MARGIN_MAX),
        }
    }
}

/// Decode `bytes` (format sniffed from content, not extension) and crop the
/// image to its bounds inset by `spec`. Fails when the bytes do not decode or
/// when the margins leave a non-positive rectangle, i.e. the image is no
/// larger than twice the drawn margin along either axis.
pub fn crop_inset(bytes: &[u8], spec: CropSpec) -> Result<DynamicImage, MottleError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    if width <= 2 * spec.margin_x || height <= 2 * spec.margin_y {
        return Err(MottleError::InvalidCrop {
            width,
            height,
            margin_x: spec.margin_x,
            margin_y: spec.margin_y,
        });
    }
    Ok(img.crop_imm(
        spec.margin_x,
        spec.margin_y,
        width - 2 * spec.margin_x,
        height - 2 * spec.margin_y,
    ))
}
