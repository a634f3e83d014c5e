use crate::error::{MosaicError, Result};

/// Source pixels per die when picking a grid size for a freshly loaded image
pub const PIXELS_PER_DIE: u32 = 10;

/// Longest side of the physical mosaic suggested on image load, in centimeters
pub const MAX_PHYSICAL_CM: f32 = 200.0;

/// Parameters for one mosaic pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicParameters {
    /// Grid size
    pub cols: u32, // dice per row
    pub rows: u32, // dice per column

    /// Physical side of one die in millimeters (vector export and cost reporting)
    pub die_size_mm: f32, // default 16.0

    /// Quantization
    pub contrast: f32, // >= 0, default 1.0
    pub invert: bool,  // default false

    /// Price of a single die, only used for cost reporting
    pub die_unit_price: f32, // default 0.0
}

impl Default for MosaicParameters {
    fn default() -> Self {
        Self {
            cols: 0,
            rows: 0,
            die_size_mm: 16.0,
            contrast: 1.0,
            invert: false,
            die_unit_price: 0.0,
        }
    }
}

impl MosaicParameters {
    /// Validates the configuration parameters
    ///
    /// A zero column or row count is accepted here: it simply produces an
    /// empty grid and nothing gets rendered.
    pub fn validate(&self) -> Result<()> {
        if !self.contrast.is_finite() || self.contrast < 0.0 {
            return Err(MosaicError::InvalidParameter(format!(
                "contrast must be a finite value >= 0, got {}",
                self.contrast
            )));
        }
        if !self.die_size_mm.is_finite() || self.die_size_mm <= 0.0 {
            return Err(MosaicError::InvalidParameter(format!(
                "die size must be a finite value > 0, got {}",
                self.die_size_mm
            )));
        }
        if !self.die_unit_price.is_finite() || self.die_unit_price < 0.0 {
            return Err(MosaicError::InvalidParameter(format!(
                "die unit price must be a finite value >= 0, got {}",
                self.die_unit_price
            )));
        }
        Ok(())
    }

    pub fn has_valid_dimensions(&self) -> bool {
        self.cols > 0 && self.rows > 0
    }

    pub fn total_dice(&self) -> u64 {
        self.cols as u64 * self.rows as u64
    }

    pub fn total_price(&self) -> f64 {
        self.total_dice() as f64 * self.die_unit_price as f64
    }

    /// Physical width and height of the finished mosaic in centimeters
    pub fn physical_size_cm(&self) -> (f32, f32) {
        (
            self.cols as f32 * self.die_size_mm / 10.0,
            self.rows as f32 * self.die_size_mm / 10.0,
        )
    }
}

/// Default grid size for a newly loaded image
///
/// One die per [`PIXELS_PER_DIE`] source pixels, scaled down proportionally
/// when either side would exceed [`MAX_PHYSICAL_CM`] of dice.
///
/// # Arguments
/// * `image_width` / `image_height` - Source image size in pixels
/// * `die_size_mm` - Physical side of one die
///
/// # Returns
/// `(cols, rows)`, each at least 1
pub fn initial_grid_size(image_width: u32, image_height: u32, die_size_mm: f32) -> (u32, u32) {
    let mut cols = (image_width / PIXELS_PER_DIE).max(1);
    let mut rows = (image_height / PIXELS_PER_DIE).max(1);

    let dice_per_cm = 10.0 / die_size_mm;
    let max_dice = ((MAX_PHYSICAL_CM * dice_per_cm).floor() as u32).max(1);

    if cols > max_dice || rows > max_dice {
        let scale = (max_dice as f32 / cols as f32).min(max_dice as f32 / rows as f32);
        cols = ((cols as f32 * scale).floor() as u32).max(1);
        rows = ((rows as f32 * scale).floor() as u32).max(1);
    }

    (cols, rows)
}

/// Row count that keeps `aspect` (width / height) for a given column count
pub fn rows_for_cols(cols: u32, aspect: f32) -> u32 {
    if aspect <= 0.0 || !aspect.is_finite() {
        return cols;
    }
    ((cols as f32 / aspect).round() as u32).max(1)
}

/// Column count that keeps `aspect` (width / height) for a given row count
pub fn cols_for_rows(rows: u32, aspect: f32) -> u32 {
    if aspect <= 0.0 || !aspect.is_finite() {
        return rows;
    }
    ((rows as f32 * aspect).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MosaicParameters::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.die_size_mm, 16.0);
        assert_eq!(config.contrast, 1.0);
        assert!(!config.invert);
    }

    #[test]
    fn test_invalid_contrast() {
        let mut config = MosaicParameters::default();
        config.contrast = -0.1;
        assert!(config.validate().is_err());

        config.contrast = f32::NAN;
        assert!(config.validate().is_err());

        config.contrast = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_die_size() {
        let mut config = MosaicParameters::default();
        config.die_size_mm = 0.0;
        assert!(config.validate().is_err());

        config.die_size_mm = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_dimensions_are_not_a_validation_error() {
        let config = MosaicParameters {
            cols: 0,
            rows: 10,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(!config.has_valid_dimensions());
        assert_eq!(config.total_dice(), 0);
        assert_eq!(config.total_price(), 0.0);
    }

    #[test]
    fn test_totals() {
        let config = MosaicParameters {
            cols: 30,
            rows: 20,
            die_unit_price: 0.5,
            ..Default::default()
        };
        assert_eq!(config.total_dice(), 600);
        assert!((config.total_price() - 300.0).abs() < 1e-9);
        assert_eq!(config.physical_size_cm(), (48.0, 32.0));
    }

    #[test]
    fn test_initial_grid_size_small_image() {
        assert_eq!(initial_grid_size(640, 480, 16.0), (64, 48));
        assert_eq!(initial_grid_size(5, 5, 16.0), (1, 1));
    }

    #[test]
    fn test_initial_grid_size_capped_at_200cm() {
        // 16mm dice: floor(2000 / 16) = 125 dice max per side
        let (cols, rows) = initial_grid_size(4000, 2000, 16.0);
        assert_eq!(cols, 125);
        assert_eq!(rows, 62);
    }

    #[test]
    fn test_aspect_helpers() {
        assert_eq!(rows_for_cols(40, 2.0), 20);
        assert_eq!(cols_for_rows(20, 1.5), 30);
        assert_eq!(rows_for_cols(1, 4.0), 1);
        assert_eq!(rows_for_cols(10, 0.0), 10);
    }
}
