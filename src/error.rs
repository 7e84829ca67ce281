use thiserror::Error;

#[derive(Error, Debug)]
pub enum MottleError {
    /// Decode or encode failure from the image codecs.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The drawn margins leave a non-positive crop rectangle.
    #[error("invalid crop region: margins {margin_x}/{margin_y} leave nothing of a {width}x{height} image")]
    InvalidCrop {
        width: u32,
        height: u32,
        margin_x: u32,
        margin_y: u32,
    },

    /// The minimum-quality encoding already exceeds the size budget.
    #[error("target too small: minimum-quality output is {floor} bytes, budget is {budget}")]
    TargetTooSmall { floor: u64, budget: u64 },

    /// File extension outside the supported set.
    #[error("unsupported format: {0:?}")]
    UnsupportedFormat(String),

    /// Corpus traversal failure. Aborts the whole batch.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
