use crate::error::{MosaicError, Result};
use crate::level::DieLevel;
use image::RgbImage;

/// Midpoint of the output range, where a normalized value of 0.5 lands
const MID_GRAY: f32 = 128.0;

/// Row-major grid of contrast-adjusted luminance values, one per die
///
/// Always holds exactly `cols * rows` values. A grid is rebuilt wholesale on
/// every quantization and never patched in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    cols: u32,
    rows: u32,
    values: Vec<f32>,
}

impl Grid {
    /// The "nothing to render" grid
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a grid from precomputed values
    ///
    /// Fails when `values.len() != cols * rows`.
    pub fn from_values(cols: u32, rows: u32, values: Vec<f32>) -> Result<Self> {
        if values.len() as u64 != cols as u64 * rows as u64 {
            return Err(MosaicError::InvalidParameter(format!(
                "grid of {}x{} needs {} values, got {}",
                cols,
                rows,
                cols as u64 * rows as u64,
                values.len()
            )));
        }
        if values.is_empty() {
            return Ok(Self::empty());
        }
        Ok(Self { cols, rows, values })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Luminance of the cell at (`col`, `row`), `None` when out of bounds
    pub fn get(&self, col: u32, row: u32) -> Option<f32> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.values.get((row * self.cols + col) as usize).copied()
    }

    pub fn level_at(&self, col: u32, row: u32, invert: bool) -> Option<DieLevel> {
        self.get(col, row)
            .map(|value| DieLevel::from_luminance(value, invert))
    }

    /// Die levels in row-major order
    pub fn levels(&self, invert: bool) -> impl Iterator<Item = DieLevel> + '_ {
        self.values
            .iter()
            .map(move |&value| DieLevel::from_luminance(value, invert))
    }

    /// Rows of luminance values, top to bottom
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f32]> {
        // chunks() panics on zero, and an empty grid has no rows anyway
        self.values.chunks(self.cols.max(1) as usize)
    }
}

/// Calculate luminance from RGB channel values
///
/// Formula: L = 0.2126*R + 0.7152*G + 0.0722*B (ITU-R BT.709)
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Half-open range of source pixels covered by output cell `cell`
///
/// Box footprint when downsampling; when upsampling several cells share one
/// source pixel (nearest neighbour).
fn footprint(cell: u32, cells: u32, source: u32) -> (u32, u32) {
    let start = (cell as u64 * source as u64 / cells as u64) as u32;
    let end = ((cell as u64 + 1) * source as u64 / cells as u64) as u32;
    (start, end.max(start + 1).min(source))
}

/// Average luminance of every output cell, row-major
///
/// Channels are summed as integers so a uniform footprint averages back to
/// exactly its pixel value.
fn sample_cells(image: &RgbImage, cols: u32, rows: u32) -> Vec<f32> {
    let (width, height) = image.dimensions();
    let mut samples = Vec::with_capacity(cols as usize * rows as usize);

    for row in 0..rows {
        let (y0, y1) = footprint(row, rows, height);
        for col in 0..cols {
            let (x0, x1) = footprint(col, cols, width);
            let mut sum = [0u64; 3];

            for y in y0..y1 {
                for x in x0..x1 {
                    let pixel = image.get_pixel(x, y);
                    sum[0] += pixel[0] as u64;
                    sum[1] += pixel[1] as u64;
                    sum[2] += pixel[2] as u64;
                }
            }

            let count = ((x1 - x0) as u64 * (y1 - y0) as u64) as f64;
            samples.push(luminance(
                (sum[0] as f64 / count) as f32,
                (sum[1] as f64 / count) as f32,
                (sum[2] as f64 / count) as f32,
            ));
        }
    }

    samples
}

/// Converts an image into a grid of contrast-normalized luminance values
///
/// 1. Box-resample the image to exactly `cols x rows` samples
/// 2. BT.709 luminance per sample, tracking min and max
/// 3. Stretch to [0, 1] (a flat image maps to 0.5 everywhere)
/// 4. Apply contrast around mid gray and clamp to [0, 255]
///
/// # Arguments
/// * `image` - Source RGB image
/// * `cols` / `rows` - Grid size
/// * `contrast` - Contrast multiplier, 1.0 leaves the stretched range as is
///
/// # Returns
/// A grid of `cols * rows` values, or an empty grid when either dimension
/// (of the grid or of the image) is zero
pub fn quantize(image: &RgbImage, cols: u32, rows: u32, contrast: f32) -> Grid {
    let (width, height) = image.dimensions();
    if cols == 0 || rows == 0 || width == 0 || height == 0 {
        return Grid::empty();
    }

    let samples = sample_cells(image, cols, rows);

    let (min, max) = samples
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &l| {
            (min.min(l), max.max(l))
        });
    let range = max - min;

    let values = samples
        .into_iter()
        .map(|l| {
            let norm = if range > 0.0 {
                ((l - min) / range).clamp(0.0, 1.0)
            } else {
                0.5
            };
            (MID_GRAY + (norm - 0.5) * 255.0 * contrast).clamp(0.0, 255.0)
        })
        .collect();

    Grid { cols, rows, values }
}

/// Number of dice needed for each face, indexed by `level - 1`
pub fn level_histogram(grid: &Grid, invert: bool) -> [u64; 6] {
    let mut counts = [0u64; 6];
    for level in grid.levels(invert) {
        counts[level.index()] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            let v = (x * 255 / (width - 1)) as u8;
            Rgb([v, v, v])
        })
    }

    #[test]
    fn test_luminance_coefficients() {
        assert!((luminance(255.0, 0.0, 0.0) - 54.213).abs() < 1e-3);
        assert!((luminance(0.0, 255.0, 0.0) - 182.376).abs() < 1e-3);
        assert!((luminance(0.0, 0.0, 255.0) - 18.411).abs() < 1e-3);
    }

    #[test]
    fn test_grid_length_matches_dimensions() {
        let img = gradient(64, 48);
        let grid = quantize(&img, 13, 7, 1.0);
        assert_eq!(grid.len(), 13 * 7);
        assert_eq!((grid.cols(), grid.rows()), (13, 7));
    }

    #[test]
    fn test_zero_dimensions_give_empty_grid() {
        let img = gradient(16, 16);
        assert!(quantize(&img, 0, 10, 1.0).is_empty());
        assert!(quantize(&img, 10, 0, 1.0).is_empty());
        assert_eq!(quantize(&img, 0, 0, 1.0).len(), 0);
    }

    #[test]
    fn test_flat_image_maps_to_mid_gray() {
        let img = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
        let grid = quantize(&img, 10, 10, 1.0);
        assert_eq!(grid.len(), 100);
        assert!(grid.values().iter().all(|&v| v == 128.0));
        assert!(grid.levels(false).all(|l| l.value() == 3));
        assert!(grid.levels(true).all(|l| l.value() == 4));
    }

    #[test]
    fn test_flat_image_with_uneven_footprints() {
        // 7 pixels into 3 cells gives footprints of 2, 2 and 3 pixels
        let img = RgbImage::from_pixel(7, 7, Rgb([10, 200, 33]));
        let grid = quantize(&img, 3, 3, 2.5);
        assert!(grid.values().iter().all(|&v| v == 128.0));
    }

    #[test]
    fn test_normalization_stretches_to_full_range() {
        let img = gradient(256, 4);
        let grid = quantize(&img, 8, 1, 1.0);
        let values = grid.values();
        // min normalizes to 0 -> 128 - 127.5, max to 1 -> 128 + 127.5 (clamped)
        assert!((values[0] - 0.5).abs() < 1e-4);
        assert_eq!(values[7], 255.0);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_zero_contrast_flattens() {
        let img = gradient(64, 4);
        let grid = quantize(&img, 8, 2, 0.0);
        assert!(grid.values().iter().all(|&v| v == 128.0));
    }

    #[test]
    fn test_high_contrast_clamps() {
        let img = gradient(64, 4);
        let grid = quantize(&img, 8, 1, 10.0);
        assert_eq!(grid.values()[0], 0.0);
        assert_eq!(grid.values()[7], 255.0);
    }

    #[test]
    fn test_upsampling_repeats_nearest_pixel() {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        let grid = quantize(&img, 4, 1, 1.0);
        assert_eq!(grid.get(0, 0), grid.get(1, 0));
        assert_eq!(grid.get(2, 0), grid.get(3, 0));
        assert!(grid.get(0, 0) < grid.get(3, 0));
    }

    #[test]
    fn test_deterministic() {
        let img = gradient(97, 61);
        let a = quantize(&img, 11, 9, 1.3);
        let b = quantize(&img, 11, 9, 1.3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_grid_accessors() {
        let grid = Grid::from_values(2, 2, vec![255.0, 0.0, 128.0, 90.0]).unwrap();
        assert_eq!(grid.get(1, 0), Some(0.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.level_at(0, 1, false).map(DieLevel::value), Some(3));
        assert_eq!(grid.rows_iter().count(), 2);
        assert_eq!(level_histogram(&grid, false), [1, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_from_values_rejects_length_mismatch() {
        assert!(Grid::from_values(3, 3, vec![0.0; 8]).is_err());
        assert!(Grid::from_values(0, 5, vec![]).unwrap().is_empty());
    }
}
