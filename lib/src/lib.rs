//! Dice Mosaic - image to dice mosaic converter
//!
//! Turns an image into a grid of six-sided dice: the image is downsampled to
//! one luminance value per die, contrast-stretched, and each value picks the
//! face whose pip density matches it. The same grid feeds an interactive
//! preview, a PNG export, an SVG export in millimeters and a tab-separated
//! legend for building the mosaic by hand.
//!
//! # Example
//! ```no_run
//! use dice_mosaic::{ExportFormat, LegendInfo, MosaicPipeline};
//!
//! let input = image::open("photo.jpg").unwrap().to_rgb8();
//! let mut pipeline = MosaicPipeline::new();
//! pipeline.load_image(input, "photo");
//! let svg = pipeline.export(ExportFormat::Svg, &LegendInfo::now("photo")).unwrap();
//! std::fs::write("photo.svg", svg).unwrap();
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod legend;
pub mod level;
pub mod luminance;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod vector;

// Re-export main types for convenience
pub use compositor::{PreviewLayout, PreviewOutcome, PREVIEW_DISABLED_MESSAGE};
pub use config::MosaicParameters;
pub use error::{MosaicError, Result};
pub use export::ExportFormat;
pub use legend::LegendInfo;
pub use level::DieLevel;
pub use luminance::{Grid, quantize};
pub use pipeline::{MosaicPipeline, SourceImage};
pub use render::{DieColors, RenderTarget, draw_die};
