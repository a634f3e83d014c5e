use crate::preview::{EguiTarget, ViewTransform};
use dice_mosaic::config::{cols_for_rows, rows_for_cols};
use dice_mosaic::export::base_name;
use dice_mosaic::luminance::level_histogram;
use dice_mosaic::{ExportFormat, MosaicPipeline, PREVIEW_DISABLED_MESSAGE, PreviewOutcome};
use eframe::egui;

/// Largest grid size the form accepts per side
const MAX_DICE_PER_SIDE: u32 = 5000;

/// Status line under the menu bar
enum Status {
    Info(String),
    Error(String),
}

/// Main application state for the dice mosaic GUI
pub struct DiceApp {
    /// Source image, parameters and the quantized grid
    pipeline: MosaicPipeline,

    /// Form values, pushed into the pipeline when they change
    cols: u32,
    rows: u32,
    die_size_mm: f32,
    die_unit_price: f32,
    contrast: f32,
    invert: bool,
    /// Keep the source aspect ratio when editing cols or rows
    lock_aspect: bool,

    /// Pan and zoom of the preview
    view: ViewTransform,

    status: Option<Status>,
}

impl Default for DiceApp {
    fn default() -> Self {
        let pipeline = MosaicPipeline::new();
        let params = pipeline.params().clone();
        Self {
            pipeline,
            cols: params.cols,
            rows: params.rows,
            die_size_mm: params.die_size_mm,
            die_unit_price: params.die_unit_price,
            contrast: params.contrast,
            invert: params.invert,
            lock_aspect: true,
            view: ViewTransform::default(),
            status: None,
        }
    }
}

impl DiceApp {
    /// Create a new dice mosaic application
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Load an image from file path
    pub fn load_image(&mut self, path: &std::path::Path) {
        match image::open(path) {
            Ok(img) => {
                self.pipeline.load_image(img.to_rgb8(), base_name(path));
                self.sync_form();
                self.view.reset();
                self.status = None;
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                self.status = Some(Status::Error(format!("Failed to load image: {}", e)));
            }
        }
    }

    /// Copy the pipeline parameters back into the form
    fn sync_form(&mut self) {
        let params = self.pipeline.params();
        self.cols = params.cols;
        self.rows = params.rows;
        self.die_size_mm = params.die_size_mm;
        self.die_unit_price = params.die_unit_price;
        self.contrast = params.contrast;
        self.invert = params.invert;
    }

    fn aspect_ratio(&self) -> Option<f32> {
        self.pipeline.source().map(|source| source.aspect_ratio())
    }

    /// Ask for a destination and write one export
    fn export(&mut self, format: ExportFormat) {
        let Some(file_name) = self.pipeline.export_file_name(format) else {
            self.status = Some(Status::Error(
                "Make sure an image is loaded and valid dimensions are set.".to_string(),
            ));
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(&file_name)
            .save_file()
        else {
            return;
        };

        self.status = Some(match self.pipeline.save_export(&path, format) {
            Ok(()) => Status::Info(format!("Saved {}", path.display())),
            Err(e) => Status::Error(e.to_string()),
        });
    }

    /// Render the parameter form
    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Controls");
        ui.separator();

        let has_image = self.pipeline.source().is_some();

        ui.collapsing("Grid Size", |ui| {
            ui.add_enabled_ui(has_image, |ui| {
                ui.checkbox(&mut self.lock_aspect, "Keep aspect ratio");

                let cols_changed = ui
                    .add(
                        egui::DragValue::new(&mut self.cols)
                            .range(1..=MAX_DICE_PER_SIDE)
                            .prefix("Columns: "),
                    )
                    .changed();
                let rows_changed = ui
                    .add(
                        egui::DragValue::new(&mut self.rows)
                            .range(1..=MAX_DICE_PER_SIDE)
                            .prefix("Rows: "),
                    )
                    .changed();

                if let Some(aspect) = self.aspect_ratio().filter(|_| self.lock_aspect) {
                    if cols_changed {
                        self.rows = rows_for_cols(self.cols, aspect);
                    } else if rows_changed {
                        self.cols = cols_for_rows(self.rows, aspect);
                    }
                }
                if cols_changed || rows_changed {
                    self.pipeline.set_cols(self.cols);
                    self.pipeline.set_rows(self.rows);
                }
            });
        });

        ui.add_space(8.0);

        ui.collapsing("Dice", |ui| {
            if ui
                .add(
                    egui::DragValue::new(&mut self.die_size_mm)
                        .range(1.0..=100.0)
                        .speed(0.1)
                        .suffix(" mm")
                        .prefix("Die size: "),
                )
                .on_hover_text("Physical side of one die, used for SVG export and size")
                .changed()
                && let Err(e) = self.pipeline.set_die_size(self.die_size_mm)
            {
                self.status = Some(Status::Error(e.to_string()));
            }

            if ui
                .add(
                    egui::DragValue::new(&mut self.die_unit_price)
                        .range(0.0..=1000.0)
                        .speed(0.01)
                        .prefix("Price per die: $"),
                )
                .changed()
                && let Err(e) = self.pipeline.set_die_unit_price(self.die_unit_price)
            {
                self.status = Some(Status::Error(e.to_string()));
            }
        });

        ui.add_space(8.0);

        ui.collapsing("Rendering", |ui| {
            if ui
                .add(egui::Slider::new(&mut self.contrast, 0.0..=3.0).text("Contrast"))
                .on_hover_text("Stretch luminance around mid gray")
                .changed()
                && let Err(e) = self.pipeline.set_contrast(self.contrast)
            {
                self.status = Some(Status::Error(e.to_string()));
            }

            if ui
                .checkbox(&mut self.invert, "Invert Colors")
                .on_hover_text("Black dice with white pips, bright areas get more pips")
                .changed()
            {
                self.pipeline.set_invert(self.invert);
            }
        });

        ui.add_space(16.0);
        ui.separator();

        self.render_summary(ui);
    }

    /// Totals, physical size and dice per face
    fn render_summary(&self, ui: &mut egui::Ui) {
        let params = self.pipeline.params();
        let (width_cm, height_cm) = params.physical_size_cm();

        ui.label(format!("Number of Dice: {}", params.total_dice()));
        ui.label(format!("Total price: ${:.2}", params.total_price()));
        ui.label(format!("Size: {:.1} x {:.1} cm", width_cm, height_cm));

        let grid = self.pipeline.grid();
        if !grid.is_empty() {
            ui.add_space(4.0);
            let counts = level_histogram(grid, params.invert);
            for (face, count) in counts.iter().enumerate() {
                ui.label(format!("Face {}: {}", face + 1, count));
            }
        }
    }

    /// Paint the mosaic preview and handle pan/zoom
    fn render_preview(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(18));

        if response.dragged() {
            self.view.pan_by(response.drag_delta());
        }
        if let Some(hover) = response.hover_pos() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.view.zoom_at((hover - rect.min).to_pos2(), scroll > 0.0);
            }
        }

        let mut target = EguiTarget::new(&painter, rect.min, self.view);
        let outcome = self
            .pipeline
            .draw_preview((rect.width(), rect.height()), &mut target);

        match outcome {
            PreviewOutcome::Suppressed => {
                self.view.reset();
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    PREVIEW_DISABLED_MESSAGE,
                    egui::FontId::proportional(20.0),
                    egui::Color32::WHITE,
                );
            }
            PreviewOutcome::Empty if self.pipeline.source().is_none() => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Open an image to start",
                    egui::FontId::proportional(16.0),
                    egui::Color32::GRAY,
                );
            }
            PreviewOutcome::Empty | PreviewOutcome::Drawn(_) => {}
        }
    }
}

impl eframe::App for DiceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Consume pending parameter edits once per frame
        self.pipeline.refresh();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif"])
                            .pick_file()
                        {
                            self.load_image(&path);
                        }
                        ui.close();
                    }

                    ui.separator();

                    for format in ExportFormat::ALL {
                        if ui.button(format!("Export {}...", format.label())).clicked() {
                            self.export(format);
                            ui.close();
                        }
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(250.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_controls(ui);
                });
            });

        // Central panel: preview
        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.status {
                Some(Status::Error(msg)) => {
                    ui.colored_label(egui::Color32::RED, msg);
                }
                Some(Status::Info(msg)) => {
                    ui.label(msg);
                }
                None => {}
            }
            if self.status.is_some() {
                if ui.button("Dismiss").clicked() {
                    self.status = None;
                }
                ui.separator();
            }

            self.render_preview(ui);
        });
    }
}
