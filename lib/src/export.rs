use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Export artifact kinds
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Raster image (PNG)
    Png,
    /// Tab-separated dice legend
    Text,
    /// Vector image in millimeters
    Svg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Text, ExportFormat::Svg];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Text => "txt",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG image",
            ExportFormat::Text => "Text legend",
            ExportFormat::Svg => "SVG image",
        }
    }
}

/// File name for an export: `{base}_{cols}x{rows}_{normal|inverted}.{ext}`
pub fn export_file_name(
    base_name: &str,
    cols: u32,
    rows: u32,
    invert: bool,
    format: ExportFormat,
) -> String {
    format!(
        "{}_{}x{}_{}.{}",
        base_name,
        cols,
        rows,
        if invert { "inverted" } else { "normal" },
        format.extension()
    )
}

/// File name of `path` without its extension
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mosaic".to_string())
}

/// Write an encoded export to `path`
///
/// Bytes go to a sibling `.partial` file that is renamed over `path` once
/// complete, so a failed write never leaves a truncated export behind.
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    let partial = partial_path(path);

    if let Err(e) = fs::write(&partial, bytes).and_then(|_| fs::rename(&partial, path)) {
        let _ = fs::remove_file(&partial);
        log::warn!("Failed to write {}: {}", path.display(), e);
        return Err(e.into());
    }

    log::info!("Exported {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("cat", 64, 48, false, ExportFormat::Png),
            "cat_64x48_normal.png"
        );
        assert_eq!(
            export_file_name("cat", 64, 48, true, ExportFormat::Text),
            "cat_64x48_inverted.txt"
        );
        assert_eq!(
            export_file_name("cat", 1, 2, true, ExportFormat::Svg),
            "cat_1x2_inverted.svg"
        );
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("/tmp/holiday.photo.jpg")), "holiday.photo");
        assert_eq!(base_name(Path::new("portrait")), "portrait");
        assert_eq!(base_name(Path::new("/")), "mosaic");
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_export(&path, b"hello").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn test_write_export_missing_directory_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        assert!(write_export(&path, b"data").is_err());
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }
}
