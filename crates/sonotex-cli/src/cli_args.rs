//! CLI argument definitions for the Sonotex command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sonotex_cli::input::Overrides;

/// Sonotex - render sound descriptors as clipped texture grids
#[derive(Parser)]
#[command(name = "sonotex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a descriptor table to an SVG or PNG file
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file; the extension selects the format (.svg or .png)
        #[arg(short, long)]
        out: String,

        /// Draw only the cell outlines, without textures or descriptors
        #[arg(long)]
        outlines_only: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration and descriptor table without drawing
    Validate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Configuration file, descriptor table, and per-field overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to a JSON configuration file (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Descriptor table (CSV); overrides the configuration's input
    #[arg(short, long)]
    pub input: Option<String>,

    /// Cell shape (square or hexagon)
    #[arg(long)]
    pub shape: Option<String>,

    /// Number of columns
    #[arg(long)]
    pub columns: Option<u32>,

    /// Number of rows
    #[arg(long)]
    pub rows: Option<u32>,

    /// Cell radius in canvas units
    #[arg(long)]
    pub radius: Option<f64>,

    /// Center of the first cell, as X,Y
    #[arg(long, value_parser = parse_point)]
    pub origin: Option<(f64, f64)>,

    /// Seed for zigzag jitter
    #[arg(long)]
    pub seed: Option<u32>,
}

impl SourceArgs {
    /// The per-field overrides to apply on top of the configuration.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            shape: self.shape.clone(),
            columns: self.columns,
            rows: self.rows,
            radius: self.radius,
            origin: self.origin,
            seed: self.seed,
            input: self.input.as_ref().map(PathBuf::from),
        }
    }
}

/// Parse `X,Y` into a coordinate pair.
pub(crate) fn parse_point(text: &str) -> Result<(f64, f64), String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", text))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate '{}'", x.trim()))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate '{}'", y.trim()))?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("65,97"), Ok((65.0, 97.0)));
        assert_eq!(parse_point(" 1.5 , -2 "), Ok((1.5, -2.0)));
        assert!(parse_point("65").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_render_flags() {
        let cli = Cli::try_parse_from([
            "sonotex", "render", "--input", "data.csv", "--out", "grid.svg", "--shape", "hex",
            "--columns", "3", "--origin", "10,20", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Render { source, out, .. } => {
                assert_eq!(out, "grid.svg");
                assert_eq!(source.input.as_deref(), Some("data.csv"));
                assert_eq!(source.columns, Some(3));
                assert_eq!(source.origin, Some((10.0, 20.0)));

                let overrides = source.overrides();
                assert_eq!(overrides.input, Some(PathBuf::from("data.csv")));
                assert_eq!(overrides.shape.as_deref(), Some("hex"));
                assert_eq!(overrides.rows, None);
            }
            _ => panic!("expected render"),
        }
    }
}
