use thiserror::Error;

/// Errors reported by the mosaic pipeline and its exporters
#[derive(Debug, Error)]
pub enum MosaicError {
    /// A parameter is outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Column or row count is zero
    #[error("Invalid dimensions: {cols}x{rows}")]
    InvalidDimensions { cols: u32, rows: u32 },

    /// No image loaded or the grid has not been built yet
    #[error("Nothing to export: load an image and set valid dimensions first")]
    EmptyGrid,

    /// Raster export would exceed the pixel ceiling
    #[error(
        "Image too large to export as PNG ({width}x{height}, max {max_pixels} pixels). \
         Reduce the output size or export SVG instead"
    )]
    ExportTooLarge {
        width: u64,
        height: u64,
        max_pixels: u64,
    },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MosaicError>;
