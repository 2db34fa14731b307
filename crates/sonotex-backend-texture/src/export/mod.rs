//! Writing recorded drawings to disk.
//!
//! The output format follows the file extension: `.svg` writes vector
//! output, `.png` rasterizes first.

pub mod svg;

use std::path::Path;

use thiserror::Error;

use crate::canvas::RecordingCanvas;
use crate::color::Color;
use crate::png::{self, PngConfig, PngError};
use crate::raster::{rasterize, RasterError};

pub use svg::render_svg;

/// Errors from exporting a drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported output extension '{0}' (expected .svg or .png)")]
    UnsupportedFormat(String),

    #[error("raster error: {0}")]
    Raster(#[from] RasterError),

    #[error("PNG error: {0}")]
    Png(#[from] PngError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    /// Format implied by a path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            _ => Err(ExportError::UnsupportedFormat(ext)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }
}

/// What was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub format: ExportFormat,
    pub bytes: usize,
    /// BLAKE3 hash of the file contents.
    pub hash: String,
}

/// Encode a drawing in memory.
pub fn encode(
    canvas: &RecordingCanvas,
    background: Color,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Svg => Ok(render_svg(canvas, background).into_bytes()),
        ExportFormat::Png => {
            let buffer = rasterize(canvas, background)?;
            let (data, _) = png::write_rgba_to_vec_with_hash(&buffer, &PngConfig::default())?;
            Ok(data)
        }
    }
}

/// Write a drawing to `path` in the format its extension names.
pub fn save(
    canvas: &RecordingCanvas,
    background: Color,
    path: &Path,
) -> Result<ExportSummary, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let data = encode(canvas, background, format)?;
    std::fs::write(path, &data)?;
    log::info!("wrote {} ({} bytes)", path.display(), data.len());

    Ok(ExportSummary {
        format,
        bytes: data.len(),
        hash: png::hash_png(&data),
    })
}
