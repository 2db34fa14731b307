//! Error types for configuration validation and descriptor-table parsing.

use thiserror::Error;

/// Error codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Grid errors (E001-E009)
    /// E001: Grid column count is zero
    InvalidColumns,
    /// E002: Grid row count is zero
    InvalidRows,
    /// E003: Cell radius is not a positive finite number
    InvalidRadius,
    /// E004: Grid origin has a non-finite coordinate
    InvalidOrigin,

    // Canvas errors (E010-E019)
    /// E010: Canvas width or height is zero
    InvalidCanvasSize,

    // Style errors (E020-E029)
    /// E020: A stroke width is negative or non-finite
    InvalidStrokeWidth,
    /// E021: A marker size is not a positive finite number
    InvalidMarkerSize,
    /// E022: Zigzag offset bounds are inverted or negative
    InvalidZigZagOffsets,
    /// E023: Zigzag density is zero
    InvalidZigZagDensity,
    /// E024: Wiggle wave length or amplitude is not positive
    InvalidWiggle,
    /// E025: Wiggle curve squaring is outside [0, 1]
    InvalidCurveSquaring,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidColumns => "E001",
            ErrorCode::InvalidRows => "E002",
            ErrorCode::InvalidRadius => "E003",
            ErrorCode::InvalidOrigin => "E004",
            ErrorCode::InvalidCanvasSize => "E010",
            ErrorCode::InvalidStrokeWidth => "E020",
            ErrorCode::InvalidMarkerSize => "E021",
            ErrorCode::InvalidZigZagOffsets => "E022",
            ErrorCode::InvalidZigZagDensity => "E023",
            ErrorCode::InvalidWiggle => "E024",
            ErrorCode::InvalidCurveSquaring => "E025",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for recoverable data issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Fewer descriptor rows than grid cells
    ShortFeed,
    /// W002: More descriptor rows than grid cells
    UnusedRows,
    /// W003: Intensity outside `1..=MAX_INTENSITY` clamped into range
    ClampedIntensity,
    /// W004: Unrecognized timbre class
    UnknownTimbre,
    /// W005: Unrecognized pitch class
    UnknownPitch,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::ShortFeed => "W001",
            WarningCode::UnusedRows => "W002",
            WarningCode::ClampedIntensity => "W003",
            WarningCode::UnknownTimbre => "W004",
            WarningCode::UnknownPitch => "W005",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "grid.radius").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Location of the issue (e.g., "row 3").
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a location.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for configuration operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Configuration validation failed with one or more errors.
    #[error("configuration invalid: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Descriptor table could not be parsed.
    #[error("descriptor table error: {0}")]
    Table(#[from] TableError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from parsing a descriptor table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table has no header row.
    #[error("descriptor table is empty (missing header row)")]
    MissingHeader,

    /// A required column is absent from the header.
    #[error("descriptor table is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A data row has fewer fields than the header requires.
    #[error("row {row}: expected at least {expected} fields, found {found}")]
    ShortRow {
        /// 1-based data row number.
        row: usize,
        /// Number of fields required to reach every named column.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },

    /// An intensity field is not a non-negative integer.
    #[error("row {row}: column '{column}' is not a non-negative integer: '{value}'")]
    InvalidIntensity {
        /// 1-based data row number.
        row: usize,
        /// Column name.
        column: &'static str,
        /// Raw field text.
        value: String,
    },

    /// A quoted field is never closed.
    #[error("row {row}: unterminated quoted field")]
    UnterminatedQuote {
        /// 1-based data row number.
        row: usize,
    },
}

/// Result of configuration or data validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Appends everything from another result.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error);
        }
        self.warnings.extend(other.warnings);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, SpecError> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(SpecError::Invalid(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
