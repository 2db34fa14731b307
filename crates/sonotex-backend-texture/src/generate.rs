//! Main entry point for texture grid generation.
//!
//! Validates a [`RenderConfig`], walks the grid over a [`RecordingCanvas`],
//! and hands back the drawing with a per-cell report. Saving is a separate
//! step so callers can inspect or re-export a drawing.

use std::path::Path;

use sonotex_spec::{
    validate_config, RenderConfig, SoundDescriptor, SpecError, ValidationWarning, WarningCode,
};
use thiserror::Error;

use crate::canvas::RecordingCanvas;
use crate::clip::ClipCompositor;
use crate::color::Color;
use crate::error::TextureError;
use crate::export::{self, ExportError, ExportSummary};
use crate::feed::DescriptorFeed;
use crate::grid::{GridWalker, WalkReport};
use crate::texture::TextureComposer;

/// Errors from grid generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    Config(#[from] SpecError),

    #[error("texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// A finished drawing and what went into it.
#[derive(Debug, Clone)]
pub struct GridDrawing {
    pub canvas: RecordingCanvas,
    pub background: Color,
    pub report: WalkReport,
    /// Descriptors left over after every cell was drawn.
    pub unused_descriptors: usize,
    pub warnings: Vec<ValidationWarning>,
}

/// Draw the configured grid from `descriptors`, in row-major order.
pub fn generate_texture_grid(
    config: &RenderConfig,
    descriptors: Vec<SoundDescriptor>,
) -> Result<GridDrawing, GenerateError> {
    let mut warnings = validate_config(config).into_result()?;

    let walker = GridWalker::new(config.grid.clone())?;
    let background = Color::from_rgb8(config.canvas.background);
    let ink = Color::from_rgb8(config.canvas.ink);
    let compositor = ClipCompositor::new(TextureComposer::new(config.style.clone()), ink)
        .with_background(background);

    let mut canvas = RecordingCanvas::new(config.canvas.width as f64, config.canvas.height as f64);
    let mut feed = DescriptorFeed::new(descriptors);
    let report = walker.walk(&mut canvas, &mut feed, &compositor, config.seed)?;
    let unused_descriptors = feed.remaining();

    if report.defaulted_cells > 0 {
        warnings.push(ValidationWarning::new(
            WarningCode::ShortFeed,
            format!(
                "{} of {} cells had no descriptor and were drawn with defaults",
                report.defaulted_cells,
                report.cells.len()
            ),
        ));
    }
    if unused_descriptors > 0 {
        warnings.push(ValidationWarning::new(
            WarningCode::UnusedRows,
            format!(
                "{} descriptor rows did not fit the {}x{} grid",
                unused_descriptors, config.grid.columns, config.grid.rows
            ),
        ));
    }

    log::info!(
        "drew {} cells ({} defaulted, {} commands)",
        report.cells.len(),
        report.defaulted_cells,
        canvas.commands().len()
    );

    Ok(GridDrawing {
        canvas,
        background,
        report,
        unused_descriptors,
        warnings,
    })
}

/// Write a drawing to `path`; the extension picks SVG or PNG.
pub fn save_grid_drawing(drawing: &GridDrawing, path: &Path) -> Result<ExportSummary, GenerateError> {
    Ok(export::save(&drawing.canvas, drawing.background, path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonotex_spec::{GridSpec, Point, ShapeKind};

    fn small_config() -> RenderConfig {
        RenderConfig {
            grid: GridSpec::new(ShapeKind::Square, 2, 2, 40.0, Point::new(100.0, 100.0)),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_short_feed_is_reported() {
        let drawing =
            generate_texture_grid(&small_config(), vec![SoundDescriptor::default()]).unwrap();
        assert_eq!(drawing.report.cells.len(), 4);
        assert_eq!(drawing.report.defaulted_cells, 3);
        assert!(drawing
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::ShortFeed));
        assert!(drawing.canvas.is_balanced());
    }

    #[test]
    fn test_extra_rows_are_reported() {
        let drawing =
            generate_texture_grid(&small_config(), vec![SoundDescriptor::default(); 6]).unwrap();
        assert_eq!(drawing.unused_descriptors, 2);
        assert!(drawing
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::UnusedRows));
    }

    #[test]
    fn test_invalid_config_draws_nothing() {
        let mut config = small_config();
        config.grid.rows = 0;
        assert!(matches!(
            generate_texture_grid(&config, Vec::new()),
            Err(GenerateError::Config(SpecError::Invalid(_)))
        ));
    }
}
