//! # Check Subcommand
//!
//! Validates a JSON document against a node-configuration schema file
//! (JSON or YAML, chosen by extension) and prints every violation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use jnav_schema::{check_with, load_schema, SchemaError, Violations};

use crate::{GlobalOpts, EXIT_FAILURE, EXIT_OK};

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// One line per violation.
    #[default]
    Text,
    /// A JSON array of `{path, kind}` objects.
    Json,
}

/// Arguments for the `jnav check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON document to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Schema file (`.json`, or YAML for any other extension).
    #[arg(long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when the document conforms, 1 on violations.
/// Unreadable or unparseable inputs are errors.
pub fn run_check(args: &CheckArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let schema = load_schema(&args.schema)?;
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    tracing::info!(
        file = %args.file.display(),
        schema = %args.schema.display(),
        entries = schema.len(),
        "checking document"
    );

    let violations = match check_with(&source, &schema, opts.syntax()) {
        Ok(()) => Violations::default(),
        Err(SchemaError::ValidationFailed { violations }) => violations,
        Err(e) => {
            return Err(e).with_context(|| format!("cannot check {}", args.file.display()));
        }
    };

    match args.format {
        Format::Json => {
            let text = if opts.pretty {
                serde_json::to_string_pretty(&violations)?
            } else {
                serde_json::to_string(&violations)?
            };
            writeln!(out, "{text}")?;
        }
        Format::Text if violations.is_empty() => {
            writeln!(out, "OK: {}", args.file.display())?;
        }
        Format::Text => {
            writeln!(
                out,
                "FAIL: {} ({} violation(s))",
                args.file.display(),
                violations.len()
            )?;
            writeln!(out, "{violations}")?;
        }
    }

    Ok(if violations.is_empty() { EXIT_OK } else { EXIT_FAILURE })
}
