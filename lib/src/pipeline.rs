use crate::compositor::{PreviewOutcome, draw_preview, render_raster, render_vector};
use crate::config::{MosaicParameters, initial_grid_size};
use crate::error::{MosaicError, Result};
use crate::export::{ExportFormat, export_file_name, write_export};
use crate::legend::{LegendInfo, render_legend};
use crate::luminance::{Grid, quantize};
use crate::raster::DEFAULT_TILE_SIZE;
use crate::render::RenderTarget;
use image::RgbImage;
use std::path::Path;

/// A decoded source image and the name exports are derived from
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: RgbImage,
    /// File name without extension
    pub name: String,
}

impl SourceImage {
    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.image.dimensions();
        width as f32 / height.max(1) as f32
    }
}

/// Pipeline state shared by the preview and the exporters
///
/// Parameter setters only mark the grid dirty; the next [`refresh`] (called
/// by the preview and by every export) re-quantizes once, however many
/// edits happened in between. Exports always refresh first, so they never
/// read a grid that is older than the current parameters.
///
/// [`refresh`]: MosaicPipeline::refresh
#[derive(Debug)]
pub struct MosaicPipeline {
    source: Option<SourceImage>,
    params: MosaicParameters,
    tile_size: u32,
    grid: Grid,
    dirty: bool,
}

impl Default for MosaicPipeline {
    fn default() -> Self {
        Self {
            source: None,
            params: MosaicParameters::default(),
            tile_size: DEFAULT_TILE_SIZE,
            grid: Grid::empty(),
            dirty: false,
        }
    }
}

impl MosaicPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the source image
    ///
    /// Picks a default grid size for the image and resets contrast.
    pub fn load_image(&mut self, image: RgbImage, name: impl Into<String>) {
        let (width, height) = image.dimensions();
        let (cols, rows) = initial_grid_size(width, height, self.params.die_size_mm);
        let name = name.into();

        log::info!(
            "Loaded {} ({}x{}), defaulting to {}x{} dice",
            name,
            width,
            height,
            cols,
            rows
        );

        self.params.cols = cols;
        self.params.rows = rows;
        self.params.contrast = 1.0;
        self.source = Some(SourceImage { image, name });
        self.dirty = true;
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn params(&self) -> &MosaicParameters {
        &self.params
    }

    /// The most recently committed grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Replace all parameters at once
    pub fn set_params(&mut self, params: MosaicParameters) -> Result<()> {
        params.validate()?;
        if params.cols != self.params.cols
            || params.rows != self.params.rows
            || params.contrast != self.params.contrast
            || params.invert != self.params.invert
        {
            self.dirty = true;
        }
        self.params = params;
        Ok(())
    }

    pub fn set_cols(&mut self, cols: u32) {
        if cols != self.params.cols {
            self.params.cols = cols;
            self.dirty = true;
        }
    }

    pub fn set_rows(&mut self, rows: u32) {
        if rows != self.params.rows {
            self.params.rows = rows;
            self.dirty = true;
        }
    }

    pub fn set_contrast(&mut self, contrast: f32) -> Result<()> {
        self.set_params(MosaicParameters {
            contrast,
            ..self.params.clone()
        })
    }

    pub fn set_invert(&mut self, invert: bool) {
        if invert != self.params.invert {
            self.params.invert = invert;
            self.dirty = true;
        }
    }

    /// Die size only affects vector export and reporting, no re-quantization
    pub fn set_die_size(&mut self, die_size_mm: f32) -> Result<()> {
        self.set_params(MosaicParameters {
            die_size_mm,
            ..self.params.clone()
        })
    }

    pub fn set_die_unit_price(&mut self, die_unit_price: f32) -> Result<()> {
        self.set_params(MosaicParameters {
            die_unit_price,
            ..self.params.clone()
        })
    }

    pub fn set_tile_size(&mut self, tile_size: u32) -> Result<()> {
        if tile_size == 0 {
            return Err(MosaicError::InvalidParameter(
                "tile size must be at least 1 pixel".to_string(),
            ));
        }
        self.tile_size = tile_size;
        Ok(())
    }

    /// Re-quantize if anything changed since the last run
    ///
    /// # Returns
    /// `true` if the grid was rebuilt
    pub fn refresh(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        self.grid = match &self.source {
            Some(source) => quantize(
                &source.image,
                self.params.cols,
                self.params.rows,
                self.params.contrast,
            ),
            None => Grid::empty(),
        };

        log::debug!(
            "Quantized grid: {}x{} ({} cells), contrast {:.2}",
            self.grid.cols(),
            self.grid.rows(),
            self.grid.len(),
            self.params.contrast
        );
        true
    }

    /// Draw the interactive preview into `target`
    pub fn draw_preview<T: RenderTarget + ?Sized>(
        &mut self,
        viewport: (f32, f32),
        target: &mut T,
    ) -> PreviewOutcome {
        self.refresh();
        draw_preview(&self.grid, self.params.invert, viewport, target)
    }

    /// Encode an export of the current mosaic
    pub fn export(&mut self, format: ExportFormat, info: &LegendInfo) -> Result<Vec<u8>> {
        self.refresh();
        if self.grid.is_empty() {
            return Err(MosaicError::EmptyGrid);
        }

        let invert = self.params.invert;
        let bytes = match format {
            ExportFormat::Png => render_raster(&self.grid, invert, self.tile_size)?.encode_png()?,
            ExportFormat::Text => render_legend(&self.grid, &self.params, info)?.into_bytes(),
            ExportFormat::Svg => render_vector(&self.grid, invert, self.params.die_size_mm)?
                .to_svg()
                .into_bytes(),
        };

        log::debug!("Encoded {:?} export ({} bytes)", format, bytes.len());
        Ok(bytes)
    }

    /// Suggested file name for an export, `None` without a source image
    pub fn export_file_name(&self, format: ExportFormat) -> Option<String> {
        self.source.as_ref().map(|source| {
            export_file_name(
                &source.name,
                self.params.cols,
                self.params.rows,
                self.params.invert,
                format,
            )
        })
    }

    /// Encode an export and write it to `path`
    ///
    /// Nothing is written when encoding fails.
    pub fn save_export(&mut self, path: &Path, format: ExportFormat) -> Result<()> {
        let name = self
            .source
            .as_ref()
            .map(|source| source.name.clone())
            .ok_or(MosaicError::EmptyGrid)?;
        let bytes = self.export(format, &LegendInfo::now(name))?;
        write_export(path, &bytes)
    }
}
