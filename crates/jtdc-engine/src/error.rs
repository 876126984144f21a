//! Compile-time and evaluation errors

use crate::codegen::Name;
use crate::keyword::SchemaType;
use jtdc_core::{Diagnostic, DiagnosticCode, Location, Severity};

/// A schema that cannot be compiled
///
/// Every variant is a schema-authoring error; compilation stops at the first one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("schema at #{schema_path} must be an object")]
    NotObject { schema_path: String },

    #[error("keyword '{keyword}' at #{schema_path} must be a {expected}")]
    KeywordType {
        keyword: String,
        expected: SchemaType,
        schema_path: String,
    },

    #[error("keyword '{keyword}' at #{schema_path} must be one of [{allowed}], got {found}")]
    KeywordEnum {
        keyword: String,
        allowed: String,
        found: String,
        schema_path: String,
    },

    #[error("keyword '{keyword}' at #{schema_path} is not supported")]
    UnsupportedKeyword { keyword: String, schema_path: String },

    #[error("invalid value for keyword '{keyword}' at #{schema_path}: {message}")]
    InvalidKeywordValue {
        keyword: String,
        message: String,
        schema_path: String,
    },

    #[error("invalid data path '{0}': must be empty or start with '/'")]
    InvalidDataPath(String),
}

impl CompileError {
    /// Stable diagnostic code for this error
    pub fn code(&self) -> DiagnosticCode {
        match self {
            Self::NotObject { .. } => DiagnosticCode::SchemaNotObject,
            Self::KeywordType { .. } | Self::InvalidKeywordValue { .. } => {
                DiagnosticCode::SchemaKeywordType
            }
            Self::KeywordEnum { .. } => DiagnosticCode::SchemaKeywordEnum,
            Self::UnsupportedKeyword { .. } => DiagnosticCode::SchemaUnsupportedKeyword,
            Self::InvalidDataPath(_) => DiagnosticCode::InputParseError,
        }
    }

    /// Schema location of the offending node, if known
    pub fn schema_path(&self) -> Option<&str> {
        match self {
            Self::NotObject { schema_path }
            | Self::KeywordType { schema_path, .. }
            | Self::KeywordEnum { schema_path, .. }
            | Self::UnsupportedKeyword { schema_path, .. }
            | Self::InvalidKeywordValue { schema_path, .. } => Some(schema_path),
            Self::InvalidDataPath(_) => None,
        }
    }

    /// Convert into a report diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::new(self.code(), Severity::Error, self.to_string());
        if let Some(schema_path) = self.schema_path() {
            diag = diag.with_location(Location::new("", schema_path));
        }
        if let Self::KeywordEnum { allowed, found, .. } = self {
            diag = diag.with_comparison(format!("one of [{}]", allowed), found.clone());
        }
        diag
    }
}

/// A compiled predicate that cannot be evaluated
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("name '{0}' is not bound to a data value")]
    UnboundData(Name),

    #[error("name '{0}' is not bound to a helper")]
    UnknownHelper(Name),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        let err = CompileError::KeywordEnum {
            keyword: "type".into(),
            allowed: "\"int8\"".into(),
            found: "\"int64\"".into(),
            schema_path: "/type".into(),
        };
        assert_eq!(err.code(), DiagnosticCode::SchemaKeywordEnum);
        assert_eq!(err.schema_path(), Some("/type"));
        assert!(err.to_string().contains("int64"));

        let diag = err.to_diagnostic();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.actual.as_deref(), Some("\"int64\""));
    }

    #[test]
    fn keyword_type_message() {
        let err = CompileError::KeywordType {
            keyword: "nullable".into(),
            expected: SchemaType::Boolean,
            schema_path: "/nullable".into(),
        };
        assert_eq!(err.to_string(), "keyword 'nullable' at #/nullable must be a boolean");
    }
}
