use crate::render::RenderTarget;
use image::Rgb;

/// Smallest and largest pip radius in vector exports, in millimeters
pub const MIN_PIP_RADIUS_MM: f32 = 0.5;
pub const MAX_PIP_RADIUS_MM: f32 = 2.5;

/// Pip radius as a fraction of the die size before clamping
pub const PIP_RADIUS_RATIO: f32 = 0.12;

/// A recorded vector shape
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    RoundedRect {
        x: f32,
        y: f32,
        size: f32,
        radius: f32,
        fill: Rgb<u8>,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        fill: Rgb<u8>,
    },
}

/// Vector render target in millimeter coordinates
///
/// Records shapes in draw order and serializes them as SVG.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorDocument {
    width_mm: f32,
    height_mm: f32,
    shapes: Vec<Shape>,
}

impl VectorDocument {
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
            shapes: Vec::new(),
        }
    }

    pub fn width_mm(&self) -> f32 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f32 {
        self.height_mm
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn circle_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count()
    }

    /// Serialize the document as an SVG string
    ///
    /// Width and height carry millimeter units; the view box uses the same
    /// numbers without units so one user unit is one millimeter.
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(128 + self.shapes.len() * 96);

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#,
            w = self.width_mm,
            h = self.height_mm,
        ));

        for shape in &self.shapes {
            match shape {
                Shape::RoundedRect {
                    x,
                    y,
                    size,
                    radius,
                    fill,
                } => {
                    svg.push_str(&format!(
                        r#"<rect x="{x}" y="{y}" width="{size}" height="{size}" fill="{fill}" rx="{radius}" ry="{radius}"/>"#,
                        fill = hex_color(*fill),
                    ));
                }
                Shape::Circle {
                    cx,
                    cy,
                    radius,
                    fill,
                } => {
                    svg.push_str(&format!(
                        r#"<circle cx="{cx}" cy="{cy}" r="{radius}" fill="{fill}"/>"#,
                        fill = hex_color(*fill),
                    ));
                }
            }
        }

        svg.push_str("</svg>");
        svg
    }
}

impl RenderTarget for VectorDocument {
    fn fill_rounded_rect(&mut self, x: f32, y: f32, size: f32, radius: f32, color: Rgb<u8>) {
        self.shapes.push(Shape::RoundedRect {
            x,
            y,
            size,
            radius,
            fill: color,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
        self.shapes.push(Shape::Circle {
            cx,
            cy,
            radius,
            fill: color,
        });
    }

    /// Print output: absolute radius in millimeters, kept legible for small
    /// dice and bounded for large ones
    fn pip_radius(&self, size: f32) -> f32 {
        (size * PIP_RADIUS_RATIO).clamp(MIN_PIP_RADIUS_MM, MAX_PIP_RADIUS_MM)
    }
}

/// `#rrggbb` notation for a color
pub fn hex_color(color: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BLACK, WHITE};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pip_radius_clamped() {
        let doc = VectorDocument::new(10.0, 10.0);
        assert_eq!(doc.pip_radius(2.0), 0.5);
        assert_eq!(doc.pip_radius(100.0), 2.5);
        assert!((doc.pip_radius(10.0) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(WHITE), "#ffffff");
        assert_eq!(hex_color(Rgb([1, 171, 16])), "#01ab10");
    }

    #[test]
    fn test_to_svg() {
        let mut doc = VectorDocument::new(32.0, 16.0);
        doc.fill_rounded_rect(16.0, 0.0, 16.0, 3.2, WHITE);
        doc.fill_circle(24.0, 8.0, 1.92, BLACK);

        assert_eq!(
            doc.to_svg(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="32mm" height="16mm" viewBox="0 0 32 16">"#,
                r##"<rect x="16" y="0" width="16" height="16" fill="#ffffff" rx="3.2" ry="3.2"/>"##,
                r##"<circle cx="24" cy="8" r="1.92" fill="#000000"/>"##,
                "</svg>"
            )
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = VectorDocument::new(0.0, 0.0);
        assert_eq!(doc.circle_count(), 0);
        assert!(doc.to_svg().ends_with("</svg>"));
    }
}
