//! Render command implementation
//!
//! Draws the configured grid from a descriptor table and writes SVG or PNG.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use sonotex_backend_texture::export::{self, ExportSummary};
use sonotex_backend_texture::{
    generate_texture_grid, save_grid_drawing, Canvas, Color, GenerateError, GridWalker,
    RecordingCanvas,
};
use sonotex_spec::{validate_config, SpecError, ValidationWarning};

use super::json_output::{
    error_codes, warnings_to_json, CommandOutput, JsonError, RenderResult,
};
use super::print_warnings;
use crate::input::{load_run, LoadedRun, Overrides};

/// What a render produced.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub summary: ExportSummary,
    pub cells: usize,
    pub defaulted_cells: usize,
    pub warnings: Vec<ValidationWarning>,
}

/// Draw and save a loaded run.
pub fn render_run(run: &LoadedRun, out: &Path, outlines_only: bool) -> Result<RenderOutcome, GenerateError> {
    if outlines_only {
        return render_outlines(run, out);
    }

    let (descriptors, mut warnings) = run.descriptors();
    let drawing = generate_texture_grid(&run.config, descriptors)?;
    let summary = save_grid_drawing(&drawing, out)?;
    warnings.extend(drawing.warnings);

    Ok(RenderOutcome {
        summary,
        cells: drawing.report.cells.len(),
        defaulted_cells: drawing.report.defaulted_cells,
        warnings,
    })
}

fn render_outlines(run: &LoadedRun, out: &Path) -> Result<RenderOutcome, GenerateError> {
    let config = &run.config;
    let warnings = validate_config(config).into_result()?;
    let walker = GridWalker::new(config.grid.clone())?;

    let mut canvas = RecordingCanvas::new(config.canvas.width as f64, config.canvas.height as f64);
    canvas.set_fill(None);
    canvas.set_stroke(Some(Color::from_rgb8(config.canvas.ink)));
    walker.walk_outlines(&mut canvas, config.style.outline_stroke_width);

    let summary = export::save(&canvas, Color::from_rgb8(config.canvas.background), out)?;
    Ok(RenderOutcome {
        summary,
        cells: config.grid.cell_count(),
        defaulted_cells: 0,
        warnings,
    })
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 if the configuration is invalid or drawing fails
pub fn run(
    config_path: Option<&str>,
    overrides: &Overrides,
    out: &str,
    outlines_only: bool,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(config_path, overrides, out, outlines_only)
    } else {
        run_human(config_path, overrides, out, outlines_only)
    }
}

fn run_human(
    config_path: Option<&str>,
    overrides: &Overrides,
    out: &str,
    outlines_only: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    let run = load_run(config_path.map(Path::new), overrides)?;
    let grid = &run.config.grid;
    println!("{} {}", "Rendering:".cyan().bold(), out);
    println!(
        "{} {} {}x{} r={} seed={}",
        "Grid:".dimmed(),
        grid.shape,
        grid.columns,
        grid.rows,
        grid.radius,
        run.config.seed
    );
    println!("{} {}", "Config hash:".dimmed(), &run.config_hash[..16]);

    let outcome = match render_run(&run, Path::new(out), outlines_only) {
        Ok(outcome) => outcome,
        Err(GenerateError::Config(SpecError::Invalid(errors))) => {
            println!("\n{}", "Errors:".red().bold());
            for error in &errors {
                println!("  {} {}", "x".red(), error);
            }
            println!(
                "\n{} Configuration has {} error(s)",
                "FAILED".red().bold(),
                errors.len()
            );
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to render {}", out)),
    };

    print_warnings(&outcome.warnings);

    let duration_ms = start.elapsed().as_millis() as u64;
    println!(
        "\n{} {} cells ({} defaulted) -> {} [{} bytes, {}] ({}ms)",
        "SUCCESS".green().bold(),
        outcome.cells,
        outcome.defaulted_cells,
        out,
        outcome.summary.bytes,
        &outcome.summary.hash[..16],
        duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(
    config_path: Option<&str>,
    overrides: &Overrides,
    out: &str,
    outlines_only: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    let run = match load_run(config_path.map(Path::new), overrides) {
        Ok(run) => run,
        Err(e) => {
            let error = JsonError::new(error_codes::INPUT, format!("{:#}", e));
            CommandOutput::<RenderResult>::failure(vec![error], vec![], None).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    match render_run(&run, Path::new(out), outlines_only) {
        Ok(outcome) => {
            let result = RenderResult {
                output: out.to_string(),
                format: outcome.summary.format.as_str().to_string(),
                bytes: outcome.summary.bytes,
                output_hash: outcome.summary.hash.clone(),
                cells: outcome.cells,
                defaulted_cells: outcome.defaulted_cells,
                duration_ms: start.elapsed().as_millis() as u64,
            };
            CommandOutput::success(result, run.config_hash, warnings_to_json(&outcome.warnings))
                .print()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let errors = match &e {
                GenerateError::Config(SpecError::Invalid(errors)) => {
                    errors.iter().map(JsonError::from).collect()
                }
                GenerateError::Export(_) => {
                    vec![JsonError::new(error_codes::EXPORT_ERROR, e.to_string())]
                }
                _ => vec![JsonError::new(error_codes::GENERATION_ERROR, e.to_string())],
            };
            CommandOutput::<RenderResult>::failure(errors, vec![], Some(run.config_hash)).print()?;
            Ok(ExitCode::from(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("sounds.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "timbreType,timbreIntensity,pitchType,pitchIntensity").unwrap();
        writeln!(file, "organic,2,low,2").unwrap();
        writeln!(file, "mechanical,3,high,3").unwrap();
        path
    }

    fn small(input: Option<std::path::PathBuf>) -> Overrides {
        Overrides {
            columns: Some(2),
            rows: Some(2),
            origin: Some((60.0, 60.0)),
            input,
            ..Overrides::default()
        }
    }

    #[test]
    fn test_render_run_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let run = load_run(None, &small(Some(table(dir.path())))).unwrap();
        let out = dir.path().join("grid.svg");

        let outcome = render_run(&run, &out, false).unwrap();
        assert_eq!(outcome.cells, 4);
        assert_eq!(outcome.defaulted_cells, 2);
        assert!(out.exists());
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.code == sonotex_spec::WarningCode::ShortFeed));
    }

    #[test]
    fn test_render_outlines_only() {
        let dir = tempfile::tempdir().unwrap();
        let run = load_run(None, &small(None)).unwrap();
        let out = dir.path().join("outlines.svg");

        let outcome = render_run(&run, &out, true).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert_eq!(outcome.cells, 4);
        assert_eq!(svg.matches("<path").count(), 4);
        assert!(!svg.contains("<clipPath"));
    }

    #[test]
    fn test_invalid_grid_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut overrides = small(None);
        overrides.rows = Some(0);
        let run = load_run(None, &overrides).unwrap();

        let err = render_run(&run, &dir.path().join("grid.svg"), false).unwrap_err();
        assert!(matches!(err, GenerateError::Config(SpecError::Invalid(_))));
        assert!(!dir.path().join("grid.svg").exists());
    }
}
