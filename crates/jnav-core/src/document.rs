//! # Documents
//!
//! A [`Document`] owns one value tree, the [`PathSyntax`] used to address
//! it, and optionally the file it was loaded from.
//!
//! Text parsing and serialization go through `serde_json`; the document
//! never looks at JSON text itself. Saved files are always pretty-printed.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::coerce::FromValue;
use crate::error::TreeError;
use crate::kind::TypeMask;
use crate::path::PathSyntax;
use crate::tree;
use crate::value::Value;

/// A JSON document addressed by path strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
    syntax: PathSyntax,
    file_path: Option<PathBuf>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty object document with the default path syntax.
    pub fn new() -> Self {
        Self::with_syntax(PathSyntax::DEFAULT)
    }

    /// An empty object document using `separator` between path segments.
    pub fn with_separator(separator: char) -> Self {
        Self::with_syntax(PathSyntax::with_separator(separator))
    }

    pub fn with_syntax(syntax: PathSyntax) -> Self {
        Self {
            root: Value::object(),
            syntax,
            file_path: None,
        }
    }

    /// Parse `text` with the default path syntax.
    pub fn parse(text: &str) -> Result<Self, TreeError> {
        let mut doc = Self::new();
        doc.replace(text)?;
        Ok(doc)
    }

    /// Associate `path` with a new document and load it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let mut doc = Self::new();
        doc.load_from(path)?;
        Ok(doc)
    }

    /// Builder form of [`Document::set_syntax`].
    pub fn syntax_of(mut self, syntax: PathSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn syntax(&self) -> PathSyntax {
        self.syntax
    }

    pub fn set_syntax(&mut self, syntax: PathSyntax) {
        self.syntax = syntax;
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    // -- Text ---------------------------------------------------------------

    /// Replace the whole tree with the parse of `text`.
    ///
    /// On a parse error the current tree is kept.
    pub fn replace(&mut self, text: &str) -> Result<(), TreeError> {
        self.root = serde_json::from_str(text)?;
        Ok(())
    }

    /// Serialize the whole tree.
    pub fn to_json(&self, pretty: bool) -> Result<String, TreeError> {
        let text = if pretty {
            serde_json::to_string_pretty(&self.root)?
        } else {
            serde_json::to_string(&self.root)?
        };
        Ok(text)
    }

    // -- Files --------------------------------------------------------------

    /// Reload from the associated file.
    pub fn load(&mut self) -> Result<(), TreeError> {
        let path = self.file_path.clone().ok_or(TreeError::NoFilePath)?;
        self.read_file(&path)
    }

    /// Load from `path` and make it the associated file.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<(), TreeError> {
        let path = path.as_ref();
        self.read_file(path)?;
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save to the associated file.
    pub fn save(&self) -> Result<(), TreeError> {
        let path = self.file_path.as_deref().ok_or(TreeError::NoFilePath)?;
        self.write_file(path)
    }

    /// Save to `path` and make it the associated file.
    pub fn save_to(&mut self, path: impl AsRef<Path>) -> Result<(), TreeError> {
        let path = path.as_ref();
        self.write_file(path)?;
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    fn read_file(&mut self, path: &Path) -> Result<(), TreeError> {
        let text = fs::read_to_string(path)?;
        self.replace(&text)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded document");
        Ok(())
    }

    fn write_file(&self, path: &Path) -> Result<(), TreeError> {
        let mut text = self.to_json(true)?;
        text.push('\n');
        fs::write(path, &text)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "saved document");
        Ok(())
    }

    // -- Paths --------------------------------------------------------------

    /// See [`tree::get`].
    pub fn get<T: FromValue>(&self, path: &str) -> Result<T, TreeError> {
        tree::get(&self.root, path, self.syntax)
    }

    /// See [`tree::resolve`].
    pub fn resolve(&self, path: &str) -> Result<&Value, TreeError> {
        tree::resolve(&self.root, path, self.syntax)
    }

    /// See [`tree::get_vec`].
    pub fn get_vec<T: FromValue>(&self, path: &str) -> Result<Vec<T>, TreeError> {
        tree::get_vec(&self.root, path, self.syntax)
    }

    /// See [`tree::set`].
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), TreeError> {
        tree::set(&mut self.root, value, path, self.syntax)
    }

    /// See [`tree::set_vec`].
    pub fn set_vec<I>(&mut self, path: &str, values: I) -> Result<(), TreeError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        tree::set_vec(&mut self.root, values, path, self.syntax)
    }

    /// See [`tree::remove`].
    pub fn remove(&mut self, path: &str) -> Result<Value, TreeError> {
        tree::remove(&mut self.root, path, self.syntax)
    }

    pub fn exist(&self, path: &str) -> bool {
        tree::exist(&self.root, path, self.syntax)
    }

    pub fn empty(&self, path: &str) -> bool {
        tree::empty(&self.root, path, self.syntax)
    }

    pub fn size(&self, path: &str) -> u32 {
        tree::size(&self.root, path, self.syntax)
    }

    pub fn type_of(&self, path: &str) -> TypeMask {
        tree::type_of(&self.root, path, self.syntax)
    }

    /// Member names of the object at `path`, in document order.
    pub fn members(&self, path: &str) -> Vec<String> {
        tree::list_members(&self.root, path, self.syntax)
    }
}

impl FromStr for Document {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self {
            root,
            ..Self::new()
        }
    }
}
