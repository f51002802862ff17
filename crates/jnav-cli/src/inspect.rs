//! # Inspect Subcommand
//!
//! Reports what the navigation queries say about one path without reading
//! its value: existence, emptiness, type mask, array size, and member
//! names. Exits `1` when the path does not resolve.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use jnav_core::{Document, TypeMask};
use serde::{Serialize, Serializer};

use crate::{open_document, GlobalOpts, EXIT_FAILURE, EXIT_OK};

/// Arguments for the `jnav inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// JSON document to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Path of the node to inspect.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Query results for one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub path: String,
    pub exists: bool,
    pub empty: bool,
    #[serde(rename = "type", serialize_with = "mask_text")]
    pub type_mask: TypeMask,
    pub size: u32,
    pub members: Vec<String>,
}

/// Same text as the plain report, so an empty mask reads `UNKNOWN`.
fn mask_text<S: Serializer>(mask: &TypeMask, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(mask)
}

impl Inspection {
    pub fn of(doc: &Document, path: &str) -> Self {
        Self {
            path: path.to_string(),
            exists: doc.exist(path),
            empty: doc.empty(path),
            type_mask: doc.type_of(path),
            size: doc.size(path),
            members: doc.members(path),
        }
    }
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let doc = open_document(&args.file, opts)?;
    let report = Inspection::of(&doc, &args.path);

    if args.json {
        let text = if opts.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        writeln!(out, "{text}")?;
    } else {
        writeln!(out, "path:    {}", report.path)?;
        writeln!(out, "exists:  {}", report.exists)?;
        writeln!(out, "empty:   {}", report.empty)?;
        writeln!(out, "type:    {}", report.type_mask)?;
        writeln!(out, "size:    {}", report.size)?;
        writeln!(out, "members: {}", report.members.join(", "))?;
    }

    Ok(if report.exists { EXIT_OK } else { EXIT_FAILURE })
}
