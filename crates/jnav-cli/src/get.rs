//! # Get Subcommand
//!
//! Prints the node at a path. With `--as value` (the default) the raw
//! subtree is printed as JSON, `null` included. Any other `--as` reads the
//! node through typed coercion, so range and kind checks apply.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use jnav_core::{Document, TreeError, Value};

use crate::{open_document, path_failure, GlobalOpts, EXIT_OK};

/// How to read the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReadAs {
    /// The raw subtree as JSON.
    #[default]
    Value,
    String,
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    Uint,
    /// 64-bit float.
    Float,
    Bool,
}

/// Arguments for the `jnav get` subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// JSON document to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Path of the node, e.g. `users[0].name`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Read the node as this type.
    #[arg(long = "as", value_enum, default_value_t = ReadAs::Value)]
    pub read_as: ReadAs,
}

/// Execute the get subcommand.
pub fn run_get(args: &GetArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let doc = open_document(&args.file, opts)?;
    match render(&doc, &args.path, args.read_as, opts.pretty) {
        Ok(text) => {
            writeln!(out, "{text}")?;
            Ok(EXIT_OK)
        }
        Err(e) => path_failure(e, out),
    }
}

fn render(doc: &Document, path: &str, read_as: ReadAs, pretty: bool) -> Result<String, TreeError> {
    let text = match read_as {
        ReadAs::Value => {
            let node = doc.resolve(path)?;
            json_text(node, pretty)?
        }
        ReadAs::String => doc.get::<String>(path)?,
        ReadAs::Int => doc.get::<i64>(path)?.to_string(),
        ReadAs::Uint => doc.get::<u64>(path)?.to_string(),
        ReadAs::Float => doc.get::<f64>(path)?.to_string(),
        ReadAs::Bool => doc.get::<bool>(path)?.to_string(),
    };
    Ok(text)
}

fn json_text(node: &Value, pretty: bool) -> Result<String, TreeError> {
    let text = if pretty {
        serde_json::to_string_pretty(node)?
    } else {
        serde_json::to_string(node)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::parse(r#"{"a": {"n": 300, "s": "hi", "x": null, "f": 1.5, "list": [true]}}"#).unwrap()
    }

    #[test]
    fn renders_each_read_mode() {
        let doc = doc();
        assert_eq!(render(&doc, "a.n", ReadAs::Value, false).unwrap(), "300");
        assert_eq!(render(&doc, "a.s", ReadAs::String, false).unwrap(), "hi");
        assert_eq!(render(&doc, "a.n", ReadAs::Int, false).unwrap(), "300");
        assert_eq!(render(&doc, "a.n", ReadAs::Uint, false).unwrap(), "300");
        assert_eq!(render(&doc, "a.f", ReadAs::Float, false).unwrap(), "1.5");
        assert_eq!(render(&doc, "a.list[0]", ReadAs::Bool, false).unwrap(), "true");
        assert_eq!(render(&doc, "a.x", ReadAs::Value, false).unwrap(), "null");
        assert_eq!(render(&doc, "a.list", ReadAs::Value, false).unwrap(), "[true]");
    }

    #[test]
    fn typed_reads_fail_on_mismatch() {
        let doc = doc();
        assert!(matches!(
            render(&doc, "a.s", ReadAs::Int, false),
            Err(TreeError::KindMismatch { .. })
        ));
        assert!(matches!(
            render(&doc, "a.x", ReadAs::String, false),
            Err(TreeError::NullNode { .. })
        ));
        assert!(matches!(
            render(&doc, "a.zzz", ReadAs::Value, false),
            Err(TreeError::MissingNode { .. })
        ));
    }

    #[test]
    fn pretty_value_output() {
        let text = render(&doc(), "a.list", ReadAs::Value, true).unwrap();
        assert!(text.contains('\n'));
    }
}
