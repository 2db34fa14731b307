//! Sonotex data model.
//!
//! This crate holds everything the texture engine consumes but does not
//! compute: sound descriptors and their table format, the grid layout, the
//! run configuration, and the validation that guards them.
//!
//! # Example
//!
//! ```
//! use sonotex_spec::{parse_descriptor_table, validate_config, RenderConfig};
//!
//! let config = RenderConfig::from_json(
//!     r#"{"grid": {"columns": 2, "rows": 2, "radius": 40.0}}"#,
//! ).unwrap();
//! assert!(validate_config(&config).is_ok());
//!
//! let records = parse_descriptor_table(
//!     "timbreType,timbreIntensity,pitchType,pitchIntensity\norganic,2,low,2\n",
//! ).unwrap();
//! let (descriptor, warnings) = records[0].resolve();
//! assert_eq!(descriptor.timbre_intensity(), 2);
//! assert!(warnings.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`config`]: Run configuration loaded from JSON
//! - [`descriptor`]: Sound descriptors and class fallbacks
//! - [`error`]: Error and warning types
//! - [`grid`]: Points, shapes, and grid layout
//! - [`hash`]: Canonical configuration hashing
//! - [`table`]: Descriptor table parsing
//! - [`validation`]: Up-front configuration checks

pub mod config;
pub mod descriptor;
pub mod error;
pub mod grid;
pub mod hash;
pub mod table;
pub mod validation;

pub use config::{CanvasSpec, MarkerSizes, RenderConfig, TextureStyle, WiggleParams, ZigZagParams};
pub use descriptor::{DescriptorRecord, PitchType, SoundDescriptor, TimbreType, MAX_INTENSITY};
pub use error::{
    ErrorCode, SpecError, TableError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use grid::{GridSpec, Point, ShapeKind};
pub use hash::{canonical_config_hash, canonical_value_hash};
pub use table::{check_records, load_descriptor_table, parse_descriptor_table};
pub use validation::{
    validate_canvas, validate_config, validate_grid, validate_style, MAX_CANVAS_SIZE,
};
