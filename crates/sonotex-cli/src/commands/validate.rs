//! Validate command implementation
//!
//! Checks a configuration and its descriptor table without drawing anything.

use anyhow::Result;
use colored::Colorize;
use sonotex_spec::{check_records, validate_config, ValidationResult};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    error_codes, warnings_to_json, CommandOutput, JsonError, ValidateResult,
};
use super::print_warnings;
use crate::input::{load_run, LoadedRun, Overrides};

/// Validate the configuration and the table rows against the grid size.
pub fn check_run(run: &LoadedRun) -> ValidationResult {
    let mut result = validate_config(&run.config);
    result.merge(check_records(&run.records, run.config.grid.cell_count()));
    result
}

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: Option<&str>, overrides: &Overrides, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config_path, overrides)
    } else {
        run_human(config_path, overrides)
    }
}

fn run_human(config_path: Option<&str>, overrides: &Overrides) -> Result<ExitCode> {
    let start = Instant::now();

    println!(
        "{} {}",
        "Validating:".cyan().bold(),
        config_path.unwrap_or("(default configuration)")
    );

    let run = load_run(config_path.map(Path::new), overrides)?;
    if let Some(input) = &run.config.input {
        println!(
            "{} {} ({} rows)",
            "Input:".dimmed(),
            input.display(),
            run.records.len()
        );
    }

    let result = check_run(&run);
    let duration_ms = start.elapsed().as_millis() as u64;

    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            println!("  {} {}", "x".red(), error);
        }
    }
    print_warnings(&result.warnings);

    if result.is_ok() {
        println!(
            "\n{} Configuration is valid ({}ms)",
            "SUCCESS".green().bold(),
            duration_ms
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Configuration has {} error(s) ({}ms)",
            "FAILED".red().bold(),
            result.errors.len(),
            duration_ms
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(config_path: Option<&str>, overrides: &Overrides) -> Result<ExitCode> {
    let start = Instant::now();

    let run = match load_run(config_path.map(Path::new), overrides) {
        Ok(run) => run,
        Err(e) => {
            let error = JsonError::new(error_codes::INPUT, format!("{:#}", e));
            CommandOutput::<ValidateResult>::failure(vec![error], vec![], None).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    let result = check_run(&run);
    let warnings = warnings_to_json(&result.warnings);

    if result.is_ok() {
        let summary = ValidateResult {
            cells: run.config.grid.cell_count(),
            rows: run.records.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        CommandOutput::success(summary, run.config_hash, warnings).print()?;
        Ok(ExitCode::SUCCESS)
    } else {
        let errors = result.errors.iter().map(JsonError::from).collect();
        CommandOutput::<ValidateResult>::failure(errors, warnings, Some(run.config_hash))
            .print()?;
        Ok(ExitCode::from(1))
    }
}
