//! CLI command implementations

pub mod json_output;
pub mod render;
pub mod validate;

use colored::Colorize;
use sonotex_spec::ValidationWarning;

/// Print warnings in the shared human-readable style.
pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}
