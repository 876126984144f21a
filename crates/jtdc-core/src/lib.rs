//! jtdc Core
//!
//! Core domain model with stable, versioned types.
//! Never rename diagnostic codes - they are part of the public API.

pub mod config;
pub mod data;
pub mod date;
pub mod diagnostic;
pub mod report;
pub mod schema;

pub use config::{Config, CodeOptions, ConfigError, SeverityThreshold, CONFIG_FILE_NAME};
pub use data::{Data, Kind};
pub use date::valid_date_time;
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, Location};
pub use report::{Report, ReportSummary, ReportVersion};
pub use schema::{IntRange, IntType, TypeSchema, TypeTag, UnknownTypeTag};
