use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jtdc_core::{
    Config, Data, Diagnostic, DiagnosticCode, Location, Report, Severity, TypeTag,
    CONFIG_FILE_NAME,
};
use jtdc_engine::{Compiler, Validator};
use serde_json::Value;

/// jtdc - JSON Type Definition `type` keyword compiler
#[derive(Parser)]
#[command(name = "jtdc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: jtdc.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated validator source for a schema
    Compile {
        /// Schema file (JSON)
        schema: PathBuf,

        /// Treat the schema as an object of field name to schema node
        #[arg(long)]
        fields: bool,

        /// Write the source to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate JSON documents against a schema
    Validate {
        /// Schema file (JSON)
        schema: PathBuf,

        /// Documents to validate
        #[arg(required = true)]
        data: Vec<PathBuf>,

        /// Treat the schema as an object of field name to schema node
        #[arg(long)]
        fields: bool,

        /// Output file for report.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the supported type tags
    Tags,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Compile { schema, fields, output } => {
            compile_command(&config, &schema, fields, output.as_deref())
        }
        Commands::Validate { schema, data, fields, output } => {
            validate_command(&config, &schema, &data, fields, output.as_deref(), cli.verbose)
        }
        Commands::Tags => {
            tags_command();
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    let config = if let Some(config_path) = path {
        Config::from_file(config_path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        Config::from_file(Path::new(CONFIG_FILE_NAME))?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    tracing::debug!(
        all_errors = config.all_errors,
        redact = config.redact_sensitive_data,
        "loaded config"
    );
    Ok(config)
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn build_validator(config: &Config, schema_path: &Path, fields: bool) -> Result<Validator> {
    let schema = read_json(schema_path)?;
    let compiler = Compiler::new(config.clone());

    let result = if fields {
        let map = schema
            .as_object()
            .ok_or_else(|| anyhow::anyhow!("{}: --fields expects a JSON object", schema_path.display()))?;
        compiler.compile_fields(map)
    } else {
        compiler.compile(&schema)
    };

    result.map_err(|e| {
        let diag = e.to_diagnostic();
        anyhow::anyhow!("{}: [{}] {}", schema_path.display(), diag.code, diag.message)
    })
}

/// Compile command - print the generated source
fn compile_command(config: &Config, schema: &Path, fields: bool, output: Option<&Path>) -> Result<()> {
    let validator = build_validator(config, schema, fields)?;
    let source = validator.source();

    match output {
        Some(path) => {
            std::fs::write(path, &source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Source written to:".green(), path.display());
        }
        None => print!("{}", source),
    }

    Ok(())
}

/// Validate command - check documents and report failures
fn validate_command(
    config: &Config,
    schema: &Path,
    data: &[PathBuf],
    fields: bool,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let validator = build_validator(config, schema, fields)?;

    if verbose {
        eprintln!(
            "{} {} checks, {} shared helpers",
            "Compiled".cyan(),
            validator.checks().len(),
            validator.scope().len()
        );
    }

    let mut report = Report::new();
    for path in data {
        let diagnostics = validate_document(&validator, path)?;

        if verbose {
            if diagnostics.is_empty() {
                eprintln!("  {} {}", "✓".green(), path.display());
            } else {
                eprintln!("  {} {} ({} failures)", "✗".red(), path.display(), diagnostics.len());
            }
        }
        report.add_document(diagnostics);
    }

    if let Some(path) = output {
        report.save_to_file(path)?;
        if verbose {
            eprintln!("{} {}", "Report saved to:".green(), path.display());
        }
    }

    print_report_summary(&report);

    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn validate_document(validator: &Validator, path: &Path) -> Result<Vec<Diagnostic>> {
    let file = path.display().to_string();

    let value = match read_json(path) {
        Ok(value) => value,
        Err(e) => {
            let diag = Diagnostic::new(
                DiagnosticCode::InputParseError,
                Severity::Error,
                format!("{:#}", e),
            )
            .with_location(Location::new("", "").with_file(file));
            return Ok(vec![diag]);
        }
    };

    let data = Data::from(value);
    let errors = validator.validate(&data)?;
    tracing::debug!(file = %file, failures = errors.len(), "validated document");

    Ok(validator
        .diagnostics(&errors, &data)
        .into_iter()
        .map(|mut diag| {
            diag.location = diag.location.map(|loc| loc.with_file(file.clone()));
            diag
        })
        .collect())
}

/// Tags command - list type tags and integer ranges
fn tags_command() {
    println!("{}", "Type tags:".bold());
    for tag in TypeTag::ALL {
        match tag.int_type() {
            Some(int_type) => println!("  {:<10} {}", tag.as_str().green(), int_type.range()),
            None => println!("  {}", tag.as_str().green()),
        }
    }
}

fn print_report_summary(report: &Report) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Validation Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("Version: {}", report.version);
    println!("Timestamp: {}", report.timestamp);
    println!();

    println!("{}", "Summary:".bold());
    println!(
        "  Documents: {} checked, {} valid",
        report.summary.documents_checked, report.summary.documents_valid
    );
    println!("  Total diagnostics: {}", report.summary.total);

    if report.summary.errors > 0 {
        println!("  Errors:   {}", format!("{}", report.summary.errors).red().bold());
    } else {
        println!("  Errors:   {}", format!("{}", report.summary.errors).green());
    }

    if report.summary.warnings > 0 {
        println!("  Warnings: {}", format!("{}", report.summary.warnings).yellow());
    } else {
        println!("  Warnings: {}", format!("{}", report.summary.warnings).green());
    }

    println!("  Info:     {}", report.summary.info);
    println!();

    if report.diagnostics.is_empty() {
        println!("{}", "✓ No issues found!".green().bold());
        return;
    }

    println!("{}", "Diagnostics:".bold());
    for diag in &report.diagnostics {
        let severity_str = match diag.severity {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warn => "WARN".yellow().bold(),
            Severity::Info => "INFO".cyan(),
        };

        println!("  [{}] {}: {}", severity_str, diag.code, diag.message);

        if let Some(loc) = &diag.location {
            println!("    at {}", loc);
        }

        if let Some(exp) = &diag.expected {
            println!("    Expected: {}", exp);
        }
        if let Some(act) = &diag.actual {
            println!("    Actual:   {}", act);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_document_reports_failures() {
        let schema = serde_json::json!({"id": {"type": "uint16"}, "at": {"type": "timestamp"}});
        let validator = Compiler::default()
            .compile_fields(schema.as_object().unwrap())
            .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": 70000, "at": "2024-01-01T00:00:00Z"}}"#).unwrap();

        let diags = validate_document(&validator, file.path()).unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::ValidationTypeMismatch);
        let loc = diags[0].location.as_ref().unwrap();
        assert_eq!(loc.instance_path, "/id");
        assert!(loc.file.is_some());
    }

    #[test]
    fn unreadable_document_becomes_diagnostic() {
        let validator = Compiler::default()
            .compile(&serde_json::json!({"type": "string"}))
            .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let diags = validate_document(&validator, file.path()).unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::InputParseError);
    }

    #[test]
    fn compile_errors_name_the_schema_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "int64"}}"#).unwrap();

        let err = build_validator(&Config::default(), file.path(), false).unwrap_err();
        assert!(err.to_string().contains("SCHEMA_KEYWORD_ENUM"));
    }

    #[test]
    fn loads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "all_errors = false").unwrap();

        let config = load_config(Some(file.path()), false).unwrap();
        assert!(!config.all_errors);
    }
}
