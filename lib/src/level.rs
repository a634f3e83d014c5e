//! Die level lookup
//!
//! Maps a grid luminance value to one of the six die faces. Every render
//! target goes through [`DieLevel::from_luminance`]; there is no other copy
//! of the threshold table.

use std::fmt;

/// Lower luminance bound of each band, brightest first
///
/// `LEVEL_THRESHOLDS[i]` is the smallest value that still maps to level `i + 1`.
/// Anything below the last entry is level 6.
pub const LEVEL_THRESHOLDS: [f32; 5] = [
    213.0, // 1: brightest
    170.0, // 2
    128.0, // 3
    85.0,  // 4
    43.0,  // 5
];

/// A die face, 1 (one pip, brightest) through 6 (six pips, darkest)
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DieLevel(u8);

impl DieLevel {
    pub const MIN: DieLevel = DieLevel(1);
    pub const MAX: DieLevel = DieLevel(6);

    /// All six faces in order
    pub const ALL: [DieLevel; 6] = [
        DieLevel(1),
        DieLevel(2),
        DieLevel(3),
        DieLevel(4),
        DieLevel(5),
        DieLevel(6),
    ];

    /// Build a level from its pip count, `None` outside 1..=6
    pub fn new(value: u8) -> Option<Self> {
        (1..=6).contains(&value).then_some(DieLevel(value))
    }

    /// Get the die level for a grid luminance value
    ///
    /// # Arguments
    /// * `value` - Contrast-adjusted luminance, nominally [0, 255]
    /// * `invert` - Flip the value via `255 - value` before the lookup
    ///
    /// # Returns
    /// The die face representing this luminance band
    pub fn from_luminance(value: f32, invert: bool) -> Self {
        let effective = if invert { 255.0 - value } else { value };

        for (i, &threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
            if effective >= threshold {
                return DieLevel(i as u8 + 1);
            }
        }
        DieLevel::MAX
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Number of pips on this face (equal to the level)
    pub fn pip_count(self) -> usize {
        self.0 as usize
    }

    /// Zero-based index, handy for per-face tallies
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for DieLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(value: f32, invert: bool) -> u8 {
        DieLevel::from_luminance(value, invert).value()
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(level(255.0, false), 1);
        assert_eq!(level(213.0, false), 1);
        assert_eq!(level(212.0, false), 2);
        assert_eq!(level(170.0, false), 2);
        assert_eq!(level(169.0, false), 3);
        assert_eq!(level(128.0, false), 3);
        assert_eq!(level(127.0, false), 4);
        assert_eq!(level(85.0, false), 4);
        assert_eq!(level(84.0, false), 5);
        assert_eq!(level(43.0, false), 5);
        assert_eq!(level(42.0, false), 6);
        assert_eq!(level(0.0, false), 6);
    }

    #[test]
    fn test_fractional_values_fall_below_threshold() {
        assert_eq!(level(212.999, false), 2);
        assert_eq!(level(127.5, false), 4);
    }

    #[test]
    fn test_inverted() {
        // 255 - 0 = 255 -> brightest
        assert_eq!(level(0.0, true), 1);
        assert_eq!(level(255.0, true), 6);
        // 255 - 128 = 127 crosses into the level 4 band
        assert_eq!(level(128.0, false), 3);
        assert_eq!(level(128.0, true), 4);
    }

    #[test]
    fn test_deterministic() {
        for v in 0..=255 {
            let v = v as f32;
            for invert in [false, true] {
                assert_eq!(
                    DieLevel::from_luminance(v, invert),
                    DieLevel::from_luminance(v, invert)
                );
            }
        }
    }

    #[test]
    fn test_every_level_reachable() {
        let mut seen = [false; 6];
        for v in 0..=255 {
            seen[DieLevel::from_luminance(v as f32, false).index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(DieLevel::new(0).is_none());
        assert!(DieLevel::new(7).is_none());
        assert_eq!(DieLevel::new(4).map(DieLevel::pip_count), Some(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(DieLevel::ALL[5].to_string(), "6");
    }
}
