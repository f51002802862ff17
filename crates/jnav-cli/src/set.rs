//! # Set Subcommand
//!
//! Writes a value at a path and saves the document, either in place or to
//! `--out`. VALUE is parsed as JSON (`42`, `true`, `"text"`, `{"k": 1}`)
//! unless `--string` is given, in which case it is stored verbatim.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use jnav_core::Value;

use crate::{open_document, path_failure, GlobalOpts, EXIT_OK};

/// Arguments for the `jnav set` subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// JSON document to modify.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Path of the node to write; missing containers are created.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Value to write, as JSON.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Store VALUE as a plain string instead of parsing it as JSON.
    #[arg(long)]
    pub string: bool,

    /// Write the result here instead of overwriting FILE.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Parse the VALUE argument.
pub fn parse_value(text: &str, verbatim: bool) -> Result<Value> {
    if verbatim {
        return Ok(Value::from(text));
    }
    serde_json::from_str(text)
        .with_context(|| format!("VALUE {text:?} is not valid JSON (use --string for plain text)"))
}

/// Execute the set subcommand.
pub fn run_set(args: &SetArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let value = parse_value(&args.value, args.string)?;
    let mut doc = open_document(&args.file, opts)?;

    if let Err(e) = doc.set(&args.path, value) {
        return path_failure(e, out);
    }

    let target = match &args.out {
        Some(path) => {
            doc.save_to(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            path
        }
        None => {
            doc.save()
                .with_context(|| format!("failed to write {}", args.file.display()))?;
            &args.file
        }
    };
    tracing::info!(path = %args.path, file = %target.display(), "value written");
    writeln!(out, "OK: set {} in {}", args.path, target.display())?;
    Ok(EXIT_OK)
}
