use crate::error::{MosaicError, Result};
use crate::render::{RenderTarget, WHITE};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use std::io::Cursor;

/// Pixels per die side in raster exports
pub const DEFAULT_TILE_SIZE: u32 = 40;

/// Largest raster export accepted, in pixels (8192 x 8192)
pub const MAX_EXPORT_PIXELS: u64 = 8192 * 8192;

/// Reject buffer sizes over [`MAX_EXPORT_PIXELS`] before anything is allocated
pub fn check_export_size(width: u64, height: u64) -> Result<()> {
    if width.saturating_mul(height) > MAX_EXPORT_PIXELS {
        log::warn!("Rejecting {}x{} raster export", width, height);
        return Err(MosaicError::ExportTooLarge {
            width,
            height,
            max_pixels: MAX_EXPORT_PIXELS,
        });
    }
    Ok(())
}

/// Raster render target backed by an RGB pixel buffer
///
/// Starts out white. Shapes are snapped to whole pixels.
#[derive(Debug, Clone)]
pub struct RasterTarget {
    image: RgbImage,
}

impl RasterTarget {
    /// Allocate a white buffer of `width x height` pixels
    ///
    /// Fails with [`MosaicError::ExportTooLarge`] above the pixel ceiling and
    /// with [`MosaicError::InvalidDimensions`] for an empty buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MosaicError::InvalidDimensions {
                cols: width,
                rows: height,
            });
        }
        check_export_size(width as u64, height as u64)?;
        Ok(Self {
            image: RgbImage::from_pixel(width, height, WHITE),
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Encode the buffer as PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let (width, height) = self.image.dimensions();
        check_export_size(width as u64, height as u64)?;

        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        log::debug!("Encoded {}x{} PNG ({} bytes)", width, height, bytes.len());
        Ok(bytes)
    }
}

impl RenderTarget for RasterTarget {
    fn fill_rounded_rect(&mut self, x: f32, y: f32, size: f32, radius: f32, color: Rgb<u8>) {
        let x0 = x.round() as i32;
        let y0 = y.round() as i32;
        let side = size.round() as i32;
        if side <= 0 {
            return;
        }
        let r = (radius.round() as i32).clamp(0, side / 2);

        // A cross of two rectangles plus one disc per corner
        if side - 2 * r > 0 {
            draw_filled_rect_mut(
                &mut self.image,
                Rect::at(x0 + r, y0).of_size(side as u32 - 2 * r as u32, side as u32),
                color,
            );
            draw_filled_rect_mut(
                &mut self.image,
                Rect::at(x0, y0 + r).of_size(side as u32, side as u32 - 2 * r as u32),
                color,
            );
        }
        if r > 0 {
            let near = r;
            let far = side - 1 - r;
            for (dx, dy) in [(near, near), (far, near), (near, far), (far, far)] {
                draw_filled_circle_mut(&mut self.image, (x0 + dx, y0 + dy), r, color);
            }
        }
    }

    /// Fills every pixel whose center lies strictly within `radius` of
    /// `(cx, cy)`, so the disc spans `2 * radius` pixels across
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
        if radius <= 0.0 {
            return;
        }
        let (width, height) = self.image.dimensions();
        let x_start = (cx - radius).floor().max(0.0) as u32;
        let y_start = (cy - radius).floor().max(0.0) as u32;
        let x_end = ((cx + radius).ceil().max(0.0) as u32).min(width);
        let y_end = ((cy + radius).ceil().max(0.0) as u32).min(height);
        let radius_sq = radius * radius;

        for y in y_start..y_end {
            let dy = y as f32 + 0.5 - cy;
            for x in x_start..x_end {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy < radius_sq {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }
}
