mod app;
mod preview;

use app::DiceApp;
use dice_mosaic::compositor::render_raster;
use dice_mosaic::Grid;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Dice Mosaic")
            .with_icon(load_icon()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Dice Mosaic",
        options,
        Box::new(|cc| Ok(Box::new(DiceApp::new(cc)))),
    )
}

/// Application icon: a single five drawn by the raster exporter
fn load_icon() -> egui::IconData {
    let icon_size = 32;

    // 50 falls in the five-pip band
    let die = Grid::from_values(1, 1, vec![50.0])
        .and_then(|grid| render_raster(&grid, false, icon_size));

    match die {
        Ok(target) => {
            let rgba = image::DynamicImage::ImageRgb8(target.into_image()).to_rgba8();
            egui::IconData {
                rgba: rgba.into_raw(),
                width: icon_size,
                height: icon_size,
            }
        }
        Err(e) => {
            log::warn!("Failed to render icon: {}", e);
            egui::IconData::default()
        }
    }
}
