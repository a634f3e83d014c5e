/// Basic example: Convert a simple test image to a dice mosaic
///
/// This creates a test image with a gradient and a bright disc and writes
/// the PNG, SVG and TXT exports next to the working directory
use dice_mosaic::{ExportFormat, MosaicPipeline};
use image::{Rgb, RgbImage};
use std::path::Path;

fn main() -> dice_mosaic::Result<()> {
    env_logger::init();

    println!("Dice Mosaic - Basic Example");
    println!("===========================\n");

    // Horizontal gradient with a white disc in the middle
    let width = 400;
    let height = 300;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 80.0;

    let img = RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        if (dx * dx + dy * dy).sqrt() < radius {
            Rgb([255, 255, 255])
        } else {
            let gray = (x * 255 / (width - 1)) as u8;
            Rgb([gray, gray / 2, gray])
        }
    });

    println!("Created test image: {}x{}", width, height);

    let mut pipeline = MosaicPipeline::new();
    pipeline.load_image(img, "basic");
    pipeline.set_contrast(1.2)?;
    pipeline.set_die_unit_price(0.05)?;

    let params = pipeline.params();
    println!("Processing with parameters:");
    println!("  - Grid: {}x{} dice", params.cols, params.rows);
    println!("  - Contrast: {}", params.contrast);
    println!("  - Total price: ${:.2}", params.total_price());
    println!();

    for format in ExportFormat::ALL {
        let Some(name) = pipeline.export_file_name(format) else {
            continue;
        };
        pipeline.save_export(Path::new(&name), format)?;
        println!("✓ Saved {} to: {}", format.label(), name);
    }

    println!("\nDice mosaic complete!");
    Ok(())
}
