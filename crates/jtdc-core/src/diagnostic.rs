//! Diagnostic codes and error reporting
//!
//! IMPORTANT: Diagnostic codes are versioned and stable.
//! NEVER rename or remove codes - they are part of the public API.
//! Add new codes with new names only.

use serde::{Deserialize, Serialize};

/// Diagnostic code registry (v1)
///
/// These codes are STABLE and VERSIONED.
/// Do NOT rename or remove codes - only add new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    // Schema authoring errors (1xxx)
    /// Schema node is not a JSON object
    SchemaNotObject,

    /// Keyword value has the wrong JSON type
    SchemaKeywordType,

    /// Keyword value is outside the keyword's meta-schema enumeration
    SchemaKeywordEnum,

    /// Keyword is not supported by this compiler
    SchemaUnsupportedKeyword,

    // Data validation failures (2xxx)
    /// Value does not conform to the declared type
    ValidationTypeMismatch,

    // Input problems (3xxx)
    /// Input document could not be read or parsed
    InputParseError,

    // General warnings (9xxx)
    /// General informational message
    Info,

    /// General warning message
    Warning,
}

impl DiagnosticCode {
    /// Get the diagnostic code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchemaNotObject => "SCHEMA_NOT_OBJECT",
            Self::SchemaKeywordType => "SCHEMA_KEYWORD_TYPE",
            Self::SchemaKeywordEnum => "SCHEMA_KEYWORD_ENUM",
            Self::SchemaUnsupportedKeyword => "SCHEMA_UNSUPPORTED_KEYWORD",
            Self::ValidationTypeMismatch => "VALIDATION_TYPE_MISMATCH",
            Self::InputParseError => "INPUT_PARSE_ERROR",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Warning - should be reviewed but not blocking
    Warn,

    /// Error - blocking issue that should fail CI
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where a diagnostic applies: a document, a place in the data, a place in the schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Document or schema file, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// JSON Pointer into the validated data
    pub instance_path: String,

    /// JSON Pointer into the schema
    pub schema_path: String,
}

impl Location {
    /// Create a location from data and schema pointers
    pub fn new(instance_path: impl Into<String>, schema_path: impl Into<String>) -> Self {
        Self {
            file: None,
            instance_path: instance_path.into(),
            schema_path: schema_path.into(),
        }
    }

    /// Set the file
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}", file)?;
        }
        let instance = if self.instance_path.is_empty() { "/" } else { &self.instance_path };
        write!(f, "#{} (schema #{})", instance, self.schema_path)
    }
}

/// A diagnostic message with structured metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable diagnostic code
    pub code: DiagnosticCode,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Location (best-effort)
    pub location: Option<Location>,

    /// Expected value (for comparison diagnostics)
    pub expected: Option<String>,

    /// Actual value (for comparison diagnostics)
    pub actual: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with minimal fields
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            location: None,
            expected: None,
            actual: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set expected/actual values
    pub fn with_comparison(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}
