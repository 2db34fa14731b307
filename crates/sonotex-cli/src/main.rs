//! Sonotex CLI - render sound descriptors as clipped texture grids
//!
//! This binary provides commands for validating configurations and
//! rendering descriptor tables to SVG or PNG.

mod cli_args;

use std::process::ExitCode;

use clap::Parser;
use cli_args::{Cli, Commands};
use sonotex_cli::commands;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            source,
            out,
            outlines_only,
            json,
        } => commands::render::run(
            source.config.as_deref(),
            &source.overrides(),
            &out,
            outlines_only,
            json,
        ),
        Commands::Validate { source, json } => {
            commands::validate::run(source.config.as_deref(), &source.overrides(), json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
