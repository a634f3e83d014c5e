use dice_mosaic::RenderTarget;
use eframe::egui;
use image::Rgb;

/// Wheel zoom step and bounds
const ZOOM_FACTOR: f32 = 1.05;
const MIN_ZOOM: f32 = 0.2;
const MAX_ZOOM: f32 = 10.0;

/// Pan and zoom applied on top of the fitted preview layout
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    pub zoom: f32,
    pub pan: egui::Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: egui::Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Map a layout position to viewport-local coordinates
    pub fn apply(&self, x: f32, y: f32) -> egui::Pos2 {
        egui::pos2(self.pan.x + x * self.zoom, self.pan.y + y * self.zoom)
    }

    /// Zoom one wheel step around `cursor` (viewport-local), keeping the
    /// point under the cursor fixed
    pub fn zoom_at(&mut self, cursor: egui::Pos2, zoom_in: bool) {
        let old_zoom = self.zoom;
        let new_zoom = if zoom_in {
            old_zoom * ZOOM_FACTOR
        } else {
            old_zoom / ZOOM_FACTOR
        }
        .clamp(MIN_ZOOM, MAX_ZOOM);

        let world_x = (cursor.x - self.pan.x) / old_zoom;
        let world_y = (cursor.y - self.pan.y) / old_zoom;

        self.zoom = new_zoom;
        self.pan = egui::vec2(cursor.x - world_x * new_zoom, cursor.y - world_y * new_zoom);
    }

    pub fn pan_by(&mut self, delta: egui::Vec2) {
        self.pan += delta;
    }
}

/// Render target drawing straight into an egui painter
pub struct EguiTarget<'a> {
    painter: &'a egui::Painter,
    /// Screen position of the viewport's top-left corner
    origin: egui::Pos2,
    view: ViewTransform,
}

impl<'a> EguiTarget<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2, view: ViewTransform) -> Self {
        Self {
            painter,
            origin,
            view,
        }
    }

    fn to_screen(&self, x: f32, y: f32) -> egui::Pos2 {
        self.origin + self.view.apply(x, y).to_vec2()
    }
}

fn color32(color: Rgb<u8>) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}

impl RenderTarget for EguiTarget<'_> {
    fn fill_rounded_rect(&mut self, x: f32, y: f32, size: f32, radius: f32, color: Rgb<u8>) {
        let side = size * self.view.zoom;
        let rect = egui::Rect::from_min_size(self.to_screen(x, y), egui::vec2(side, side));
        self.painter
            .rect_filled(rect, radius * self.view.zoom, color32(color));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
        self.painter.circle_filled(
            self.to_screen(cx, cy),
            radius * self.view.zoom,
            color32(color),
        );
    }
}
