//! Tab-separated dice legend
//!
//! A plain text reference for assembling the mosaic by hand: a `#` comment
//! header with the export settings, then one line per row of dice with the
//! face to place in each column.

use crate::config::MosaicParameters;
use crate::error::{MosaicError, Result};
use crate::level::DieLevel;
use crate::luminance::{Grid, level_histogram};
use chrono::{DateTime, Utc};

/// Export context that is not part of the mosaic parameters
#[derive(Debug, Clone)]
pub struct LegendInfo {
    /// Source image name without extension
    pub image_name: String,
    pub exported_at: DateTime<Utc>,
}

impl LegendInfo {
    pub fn now(image_name: impl Into<String>) -> Self {
        Self {
            image_name: image_name.into(),
            exported_at: Utc::now(),
        }
    }
}

fn header_lines(grid: &Grid, params: &MosaicParameters, info: &LegendInfo) -> Vec<String> {
    let total_dice = grid.cols() as u64 * grid.rows() as u64;
    let total_price = total_dice as f64 * params.die_unit_price as f64;
    let faces = level_histogram(grid, params.invert);

    vec![
        "# Dice Mosaic Reference".to_string(),
        format!("# Original image: {}", info.image_name),
        format!(
            "# Export date: {}",
            info.exported_at.format("%Y-%m-%d %H:%M:%S")
        ),
        format!(
            "# Dimensions: {} x {} (columns x rows)",
            grid.cols(),
            grid.rows()
        ),
        format!("# Total dice: {}", total_dice),
        format!(
            "# Invert colors: {}",
            if params.invert { "Yes" } else { "No" }
        ),
        format!("# Contrast: {:.2}", params.contrast),
        format!("# Dice size: {} mm", params.die_size_mm),
        format!("# Dice value: ${:.2}", params.die_unit_price),
        format!("# Total estimated cost: ${:.2}", total_price),
        format!(
            "# Dice per face: 1={} 2={} 3={} 4={} 5={} 6={}",
            faces[0], faces[1], faces[2], faces[3], faces[4], faces[5]
        ),
        String::new(),
    ]
}

/// Render the legend for a grid
///
/// Grid dimensions come from the grid itself so the text always matches
/// the dice that were quantized; `params` supplies invert, contrast, die
/// size and price.
pub fn render_legend(grid: &Grid, params: &MosaicParameters, info: &LegendInfo) -> Result<String> {
    if grid.is_empty() {
        return Err(MosaicError::EmptyGrid);
    }

    let mut lines = header_lines(grid, params, info);
    let cols = grid.cols() as usize;

    let mut column_header = vec![String::new()];
    column_header.extend((1..=cols).map(|i| format!("D{}", i)));
    lines.push(column_header.join("\t"));

    let mut separator = vec!["--"];
    separator.extend(std::iter::repeat_n("---", cols));
    lines.push(separator.join("\t"));

    for (y, row) in grid.rows_iter().enumerate() {
        let mut cells = Vec::with_capacity(cols + 1);
        cells.push(format!("L{}", y + 1));
        cells.extend(
            row.iter()
                .map(|&value| DieLevel::from_luminance(value, params.invert).to_string()),
        );
        lines.push(cells.join("\t"));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn info() -> LegendInfo {
        LegendInfo {
            image_name: "portrait".to_string(),
            exported_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        }
    }

    #[test]
    fn test_render_legend() {
        let grid = Grid::from_values(3, 2, vec![255.0, 128.0, 0.0, 200.0, 90.0, 50.0]).unwrap();
        let params = MosaicParameters {
            cols: 3,
            rows: 2,
            die_unit_price: 0.25,
            ..Default::default()
        };

        let text = render_legend(&grid, &params, &info()).unwrap();
        let expected = [
            "# Dice Mosaic Reference",
            "# Original image: portrait",
            "# Export date: 2024-03-09 14:05:07",
            "# Dimensions: 3 x 2 (columns x rows)",
            "# Total dice: 6",
            "# Invert colors: No",
            "# Contrast: 1.00",
            "# Dice size: 16 mm",
            "# Dice value: $0.25",
            "# Total estimated cost: $1.50",
            "# Dice per face: 1=1 2=1 3=1 4=1 5=1 6=1",
            "",
            "\tD1\tD2\tD3",
            "--\t---\t---\t---",
            "L1\t1\t3\t6",
            "L2\t2\t4\t5",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_legend_inverted() {
        let grid = Grid::from_values(2, 1, vec![128.0, 255.0]).unwrap();
        let params = MosaicParameters {
            invert: true,
            contrast: 1.5,
            ..Default::default()
        };

        let text = render_legend(&grid, &params, &info()).unwrap();
        assert!(text.contains("# Invert colors: Yes"));
        assert!(text.contains("# Contrast: 1.50"));
        assert!(text.ends_with("L1\t4\t6"));
    }

    #[test]
    fn test_render_legend_empty_grid() {
        let result = render_legend(&Grid::empty(), &MosaicParameters::default(), &info());
        assert!(matches!(result, Err(MosaicError::EmptyGrid)));
    }
}
