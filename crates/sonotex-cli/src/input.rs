//! Loading configuration and descriptor tables for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use sonotex_spec::{
    canonical_config_hash, load_descriptor_table, DescriptorRecord, Point, RenderConfig,
    ShapeKind, SoundDescriptor, ValidationWarning,
};

/// Command-line values that replace configuration fields.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub shape: Option<String>,
    pub columns: Option<u32>,
    pub rows: Option<u32>,
    pub radius: Option<f64>,
    pub origin: Option<(f64, f64)>,
    pub seed: Option<u32>,
    pub input: Option<PathBuf>,
}

impl Overrides {
    /// Apply every set field to `config`.
    pub fn apply(&self, config: &mut RenderConfig) -> Result<()> {
        if let Some(name) = &self.shape {
            config.grid.shape = match ShapeKind::from_name(name) {
                Some(shape) => shape,
                None => bail!("unknown shape '{}' (expected square or hexagon)", name),
            };
        }
        if let Some(columns) = self.columns {
            config.grid.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(radius) = self.radius {
            config.grid.radius = radius;
        }
        if let Some((x, y)) = self.origin {
            config.grid.origin = Point::new(x, y);
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        Ok(())
    }
}

/// Everything a command needs before drawing.
#[derive(Debug, Clone)]
pub struct LoadedRun {
    pub config: RenderConfig,
    /// Canonical hash of the effective configuration.
    pub config_hash: String,
    /// Table rows, empty when no input was given.
    pub records: Vec<DescriptorRecord>,
}

impl LoadedRun {
    /// Resolve every record, collecting the warnings for replaced values.
    pub fn descriptors(&self) -> (Vec<SoundDescriptor>, Vec<ValidationWarning>) {
        let mut warnings = Vec::new();
        let descriptors = self
            .records
            .iter()
            .map(|record| {
                let (descriptor, w) = record.resolve();
                warnings.extend(w);
                descriptor
            })
            .collect();
        (descriptors, warnings)
    }
}

/// Load the configuration file, or defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(RenderConfig::default()),
    }
}

/// Read and parse a descriptor table.
pub fn load_records(path: &Path) -> Result<Vec<DescriptorRecord>> {
    load_descriptor_table(path)
        .with_context(|| format!("Failed to read descriptor table: {}", path.display()))
}

/// Load config, apply overrides, and read the table the config points at.
pub fn load_run(config_path: Option<&Path>, overrides: &Overrides) -> Result<LoadedRun> {
    let mut config = load_config(config_path)?;
    overrides.apply(&mut config)?;

    let config_hash = canonical_config_hash(&config).context("Failed to hash configuration")?;
    let records = match &config.input {
        Some(path) => load_records(path)?,
        None => {
            log::warn!("no descriptor table given; every cell uses the default descriptor");
            Vec::new()
        }
    };

    Ok(LoadedRun {
        config,
        config_hash,
        records,
    })
}
