//! Die face rendering
//!
//! One die is a rounded square plus a pip pattern. The geometry is expressed
//! relative to the die size, so the same code draws the interactive preview,
//! the raster export and the vector export. Surfaces only need to implement
//! [`RenderTarget`].

use crate::level::DieLevel;
use image::Rgb;

/// Corner radius of a die face as a fraction of its size
pub const CORNER_RADIUS_RATIO: f32 = 0.2;

/// Pip diameter as a fraction of the die size (pixel targets)
pub const PIP_DIAMETER_RATIO: f32 = 0.2;

/// Inset of the corner and edge pips from the die border, as a fraction of its size
pub const PIP_OFFSET_RATIO: f32 = 0.25;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// A surface dice can be drawn on
///
/// Coordinates are real-valued and expressed in the target's own units
/// (device pixels, raster pixels or millimeters). Colors are always passed
/// in; targets keep no current fill state between calls.
pub trait RenderTarget {
    /// Fill a square with rounded corners
    fn fill_rounded_rect(&mut self, x: f32, y: f32, size: f32, radius: f32, color: Rgb<u8>);

    /// Fill a circle centered at (`cx`, `cy`)
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb<u8>);

    /// Pip radius for a die of `size` units
    fn pip_radius(&self, size: f32) -> f32 {
        size * PIP_DIAMETER_RATIO / 2.0
    }
}

/// Face and pip colors of a die
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DieColors {
    pub face: Rgb<u8>,
    pub pip: Rgb<u8>,
}

impl DieColors {
    /// White dice with black pips, or the reverse when inverted
    pub fn for_invert(invert: bool) -> Self {
        if invert {
            Self {
                face: BLACK,
                pip: WHITE,
            }
        } else {
            Self {
                face: WHITE,
                pip: BLACK,
            }
        }
    }
}

/// Pip anchor positions on a die face
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pip {
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    MiddleLeft,
    MiddleRight,
}

impl Pip {
    /// Center of this pip for a die whose top-left corner is (`x`, `y`)
    pub fn position(self, x: f32, y: f32, size: f32) -> (f32, f32) {
        let offset = size * PIP_OFFSET_RATIO;
        let left = x + offset;
        let right = x + size - offset;
        let top = y + offset;
        let bottom = y + size - offset;
        let cx = x + size / 2.0;
        let cy = y + size / 2.0;

        match self {
            Pip::Center => (cx, cy),
            Pip::TopLeft => (left, top),
            Pip::TopRight => (right, top),
            Pip::BottomLeft => (left, bottom),
            Pip::BottomRight => (right, bottom),
            Pip::MiddleLeft => (left, cy),
            Pip::MiddleRight => (right, cy),
        }
    }
}

/// Pip patterns for levels 1 through 6
///
/// Odd levels carry the center pip, 2+ add the top-left/bottom-right
/// diagonal, 4+ add the other diagonal and 6 adds both edge midpoints.
const PIP_LAYOUTS: [&[Pip]; 6] = [
    &[Pip::Center],
    &[Pip::TopLeft, Pip::BottomRight],
    &[Pip::Center, Pip::TopLeft, Pip::BottomRight],
    &[Pip::TopLeft, Pip::BottomRight, Pip::TopRight, Pip::BottomLeft],
    &[
        Pip::Center,
        Pip::TopLeft,
        Pip::BottomRight,
        Pip::TopRight,
        Pip::BottomLeft,
    ],
    &[
        Pip::TopLeft,
        Pip::BottomRight,
        Pip::TopRight,
        Pip::BottomLeft,
        Pip::MiddleLeft,
        Pip::MiddleRight,
    ],
];

/// Pips to draw for a die level
pub fn pip_layout(level: DieLevel) -> &'static [Pip] {
    PIP_LAYOUTS[level.index()]
}

/// Draw one die into a render target
///
/// # Arguments
/// * `target` - Surface to draw on
/// * `x` / `y` - Top-left corner of the die
/// * `size` - Side length of the die
/// * `level` - Face to draw
/// * `colors` - Face and pip fill
pub fn draw_die<T: RenderTarget + ?Sized>(
    target: &mut T,
    x: f32,
    y: f32,
    size: f32,
    level: DieLevel,
    colors: DieColors,
) {
    target.fill_rounded_rect(x, y, size, size * CORNER_RADIUS_RATIO, colors.face);

    let radius = target.pip_radius(size);
    for pip in pip_layout(level) {
        let (px, py) = pip.position(x, y, size);
        target.fill_circle(px, py, radius, colors.pip);
    }
}
