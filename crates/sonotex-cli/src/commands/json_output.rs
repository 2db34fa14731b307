//! JSON output types for machine-readable CLI output.
//!
//! These back the `--json` flag on `render` and `validate`.

use serde::{Deserialize, Serialize};
use sonotex_spec::{ValidationError, ValidationWarning};

/// Error codes for CLI-level failures. Validation errors keep their own
/// `E0xx` codes.
pub mod error_codes {
    /// Configuration or table could not be loaded
    pub const INPUT: &str = "CLI_001";
    /// Drawing failed
    pub const GENERATION_ERROR: &str = "CLI_010";
    /// Output could not be written
    pub const EXPORT_ERROR: &str = "CLI_011";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    pub message: String,
    /// Configuration path of the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

impl From<&ValidationError> for JsonError {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            path: error.path.clone(),
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ValidationWarning> for JsonWarning {
    fn from(warning: &ValidationWarning) -> Self {
        Self {
            code: warning.code.to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}

/// Convert a list of warnings.
pub fn warnings_to_json(warnings: &[ValidationWarning]) -> Vec<JsonWarning> {
    warnings.iter().map(JsonWarning::from).collect()
}

/// Summary of a successful render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    pub output: String,
    pub format: String,
    pub bytes: usize,
    /// BLAKE3 hash of the written file.
    pub output_hash: String,
    pub cells: usize,
    pub defaulted_cells: usize,
    pub duration_ms: u64,
}

/// Summary of a validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResult {
    pub cells: usize,
    pub rows: usize,
    pub duration_ms: u64,
}

/// Top-level envelope shared by every `--json` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
}

impl<T> CommandOutput<T> {
    pub fn success(result: T, config_hash: String, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
            config_hash: Some(config_hash),
        }
    }

    pub fn failure(
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
        config_hash: Option<String>,
    ) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
            config_hash,
        }
    }
}

impl<T: Serialize> CommandOutput<T> {
    /// Print as pretty JSON on stdout.
    pub fn print(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}
