//! # Remove Subcommand
//!
//! Removes the member named by the last path segment. A trailing subscript
//! removes the whole array member, not one element.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{open_document, path_failure, GlobalOpts, EXIT_OK};

/// Arguments for the `jnav remove` subcommand.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// JSON document to modify.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Path of the member to remove.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Write the result here instead of overwriting FILE.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Execute the remove subcommand.
pub fn run_remove(args: &RemoveArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let mut doc = open_document(&args.file, opts)?;

    let removed = match doc.remove(&args.path) {
        Ok(removed) => removed,
        Err(e) => return path_failure(e, out),
    };

    let target = args.out.as_ref().unwrap_or(&args.file);
    doc.save_to(target)
        .with_context(|| format!("failed to write {}", target.display()))?;
    tracing::info!(path = %args.path, file = %target.display(), "member removed");

    writeln!(out, "OK: removed {} ({})", args.path, removed.kind_name())?;
    Ok(EXIT_OK)
}
