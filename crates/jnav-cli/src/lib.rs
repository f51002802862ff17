//! # jnav-cli — Path-Addressed JSON from the Command Line
//!
//! Provides the `jnav` binary: read, write, remove, and inspect nodes of a
//! JSON file by path, and check a file against a node-configuration schema.
//!
//! ## Subcommands
//!
//! - `jnav get` — Print the node at a path, optionally as a typed scalar.
//! - `jnav set` — Write a value at a path, creating missing containers.
//! - `jnav remove` — Remove the member at a path.
//! - `jnav inspect` — Show existence, emptiness, type, size, and members.
//! - `jnav check` — Validate a file against a JSON or YAML schema.
//!
//! ```bash
//! jnav get config.json server.routes[0].path --as string
//! jnav set config.json server.port 8081
//! jnav check config.json --schema config.schema.yaml --format json
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` validation failure or unresolvable path, `2`
//! operational error (unreadable file, bad JSON, bad schema).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here take parsed args.
//! - Handlers write their report to a caller-supplied writer.
//! - Handler functions delegate to `jnav-core` / `jnav-schema`.

pub mod check;
pub mod get;
pub mod inspect;
pub mod remove;
pub mod set;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use jnav_core::{Document, PathSyntax, TreeError};

/// Exit code for success.
pub const EXIT_OK: u8 = 0;
/// Exit code for a validation failure or an unresolvable path.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for an operational error.
pub const EXIT_ERROR: u8 = 2;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOpts {
    /// Path segment separator.
    pub separator: char,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for GlobalOpts {
    fn default() -> Self {
        Self {
            separator: PathSyntax::DEFAULT.separator,
            pretty: false,
        }
    }
}

impl GlobalOpts {
    pub fn syntax(&self) -> PathSyntax {
        PathSyntax::with_separator(self.separator)
    }
}

/// Load `file` with the configured path syntax.
pub fn open_document(file: &Path, opts: &GlobalOpts) -> Result<Document> {
    let doc = Document::open(file)
        .with_context(|| format!("failed to load document {}", file.display()))?;
    Ok(doc.syntax_of(opts.syntax()))
}

/// Report a path-level failure and map it to [`EXIT_FAILURE`].
///
/// Document-level failures (I/O, parse) are not path failures and are
/// returned as errors instead.
pub(crate) fn path_failure(err: TreeError, out: &mut dyn Write) -> Result<u8> {
    match err {
        TreeError::Io(_) | TreeError::Parse(_) | TreeError::NoFilePath => Err(err.into()),
        other => {
            writeln!(out, "FAIL: {other}")?;
            Ok(EXIT_FAILURE)
        }
    }
}
