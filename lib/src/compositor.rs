use crate::error::{MosaicError, Result};
use crate::luminance::Grid;
use crate::raster::{RasterTarget, check_export_size};
use crate::render::{DieColors, RenderTarget, draw_die};
use crate::vector::VectorDocument;

/// Margin kept around the preview mosaic, in device pixels
pub const PREVIEW_PADDING: f32 = 40.0;

/// Shown instead of the preview when dice would be too small to see
pub const PREVIEW_DISABLED_MESSAGE: &str =
    "Preview disabled due to high dice count.\nYou can still export the image, SVG or TXT.";

/// Placement of the mosaic inside a preview viewport
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PreviewLayout {
    /// Side of one die in device pixels, never below 1
    pub square_size: f32,
    /// Top-left corner of the mosaic, centering it in the viewport
    pub offset_x: f32,
    pub offset_y: f32,
}

impl PreviewLayout {
    /// Fit a `cols x rows` mosaic into a viewport, keeping square dice
    pub fn fit(viewport_width: f32, viewport_height: f32, cols: u32, rows: u32) -> Self {
        let cols_f = cols.max(1) as f32;
        let rows_f = rows.max(1) as f32;

        let max_w = (viewport_width - PREVIEW_PADDING * 2.0) / cols_f;
        let max_h = (viewport_height - PREVIEW_PADDING * 2.0) / rows_f;
        let square_size = max_w.min(max_h).max(1.0);

        Self {
            square_size,
            offset_x: (viewport_width - cols_f * square_size) / 2.0,
            offset_y: (viewport_height - rows_f * square_size) / 2.0,
        }
    }

    /// Whether dice are large enough to be drawn
    pub fn is_legible(&self) -> bool {
        self.square_size > 1.0
    }
}

/// What a preview pass did
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PreviewOutcome {
    /// No grid to show
    Empty,
    /// Every die was drawn with this layout
    Drawn(PreviewLayout),
    /// Too many dice for the viewport, nothing was drawn
    Suppressed,
}

/// Draw every cell of the grid as a die
///
/// Walks the grid row-major and places die (`col`, `row`) at
/// `origin + (col, row) * cell_size`. Level-dependent drawing is left to
/// [`draw_die`].
///
/// # Arguments
/// * `grid` - Quantized luminance grid
/// * `invert` - Inverted level mapping and colors
/// * `target` - Surface to draw on
/// * `cell_size` - Die side in target units
/// * `origin` - Top-left corner of the mosaic in target units
pub fn compose<T: RenderTarget + ?Sized>(
    grid: &Grid,
    invert: bool,
    target: &mut T,
    cell_size: f32,
    origin: (f32, f32),
) {
    let cols = grid.cols().max(1) as usize;
    let colors = DieColors::for_invert(invert);

    for (index, level) in grid.levels(invert).enumerate() {
        let col = (index % cols) as f32;
        let row = (index / cols) as f32;
        draw_die(
            target,
            origin.0 + col * cell_size,
            origin.1 + row * cell_size,
            cell_size,
            level,
            colors,
        );
    }
}

/// Draw the interactive preview, centered in the viewport
///
/// Returns [`PreviewOutcome::Suppressed`] without drawing anything when the
/// dice would be one pixel or smaller; the caller shows
/// [`PREVIEW_DISABLED_MESSAGE`] and resets its view instead.
pub fn draw_preview<T: RenderTarget + ?Sized>(
    grid: &Grid,
    invert: bool,
    viewport: (f32, f32),
    target: &mut T,
) -> PreviewOutcome {
    if grid.is_empty() {
        return PreviewOutcome::Empty;
    }

    let layout = PreviewLayout::fit(viewport.0, viewport.1, grid.cols(), grid.rows());
    if !layout.is_legible() {
        return PreviewOutcome::Suppressed;
    }

    compose(
        grid,
        invert,
        target,
        layout.square_size,
        (layout.offset_x, layout.offset_y),
    );
    PreviewOutcome::Drawn(layout)
}

/// Render the grid into a raster buffer of `cols * tile x rows * tile` pixels
///
/// Dice are drawn edge to edge. The pixel ceiling is checked before the
/// buffer is allocated.
pub fn render_raster(grid: &Grid, invert: bool, tile_size: u32) -> Result<RasterTarget> {
    if grid.is_empty() {
        return Err(MosaicError::EmptyGrid);
    }
    if tile_size == 0 {
        return Err(MosaicError::InvalidParameter(
            "tile size must be at least 1 pixel".to_string(),
        ));
    }

    let width = grid.cols() as u64 * tile_size as u64;
    let height = grid.rows() as u64 * tile_size as u64;
    check_export_size(width, height)?;

    let mut target = RasterTarget::new(width as u32, height as u32)?;
    compose(grid, invert, &mut target, tile_size as f32, (0.0, 0.0));
    log::debug!(
        "Rendered {}x{} dice to {}x{} raster",
        grid.cols(),
        grid.rows(),
        width,
        height
    );
    Ok(target)
}

/// Render the grid into a vector document, one `die_size_mm` cell per die
pub fn render_vector(grid: &Grid, invert: bool, die_size_mm: f32) -> Result<VectorDocument> {
    if grid.is_empty() {
        return Err(MosaicError::EmptyGrid);
    }
    if !die_size_mm.is_finite() || die_size_mm <= 0.0 {
        return Err(MosaicError::InvalidParameter(format!(
            "die size must be a finite value > 0, got {}",
            die_size_mm
        )));
    }

    let mut document = VectorDocument::new(
        grid.cols() as f32 * die_size_mm,
        grid.rows() as f32 * die_size_mm,
    );
    compose(grid, invert, &mut document, die_size_mm, (0.0, 0.0));
    Ok(document)
}
