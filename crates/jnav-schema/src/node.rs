//! # Node Configuration
//!
//! A [`Schema`] maps paths to [`NodeConfig`] rules. Entries are checked in
//! insertion order. A config with `children` describes the members of an
//! object node, or the members of every object item of an array node.
//!
//! ## File Format
//!
//! Schemas load from JSON or YAML. Every field except `type` is optional;
//! hooks are code and never come from a file.
//!
//! ```yaml
//! user.name:
//!   type: STRING
//! items:
//!   type: ARRAY
//!   min_items: 1
//!   children:
//!     id: { type: INT }
//!     note: { type: STRING, optional: true, empty_allowed: true }
//! ```

use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use jnav_core::{Document, TreeError, TypeMask};
use serde::Deserialize;

use crate::check::SchemaError;
use crate::violation::Violation;

/// Custom check run on a node that passed its structural checks.
///
/// Receives the document, the node's full path, and the violation list to
/// append to. A returned error is logged and does not stop the run.
pub type ValidationHook =
    Arc<dyn Fn(&Document, &str, &mut Vec<Violation>) -> Result<(), TreeError> + Send + Sync>;

/// Path-to-rule mapping, checked in insertion order.
pub type Schema = IndexMap<String, NodeConfig>;

fn default_true() -> bool {
    true
}

/// Validation rule for one node.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// Absence is not an error.
    #[serde(default)]
    pub optional: bool,
    /// `null` is not an error.
    #[serde(default)]
    pub nullable: bool,
    /// Empty strings and empty arrays are not errors.
    #[serde(default)]
    pub empty_allowed: bool,
    /// Accepted kinds; the node matches when any bit overlaps.
    #[serde(rename = "type")]
    pub expected: TypeMask,
    #[serde(default)]
    pub min_items: Option<u32>,
    #[serde(default)]
    pub max_items: Option<u32>,
    /// Object members not listed in `children` are tolerated.
    #[serde(default = "default_true")]
    pub allow_unknown: bool,
    #[serde(skip)]
    pub callback: Option<ValidationHook>,
    #[serde(default)]
    pub children: Option<Schema>,
}

impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConfig")
            .field("optional", &self.optional)
            .field("nullable", &self.nullable)
            .field("empty_allowed", &self.empty_allowed)
            .field("expected", &self.expected)
            .field("min_items", &self.min_items)
            .field("max_items", &self.max_items)
            .field("allow_unknown", &self.allow_unknown)
            .field("callback", &self.callback.as_ref().map(|_| "<hook>"))
            .field("children", &self.children)
            .finish()
    }
}

impl NodeConfig {
    /// A required, non-null, non-empty node of the given kinds.
    pub fn new(expected: TypeMask) -> Self {
        Self {
            optional: false,
            nullable: false,
            empty_allowed: false,
            expected,
            min_items: None,
            max_items: None,
            allow_unknown: true,
            callback: None,
            children: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn allow_empty(mut self) -> Self {
        self.empty_allowed = true;
        self
    }

    /// Bound the item count of an array node.
    pub fn items(mut self, range: impl RangeBounds<u32>) -> Self {
        self.min_items = match range.start_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => Some(n.saturating_add(1)),
            Bound::Unbounded => None,
        };
        self.max_items = match range.end_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => Some(n.saturating_sub(1)),
            Bound::Unbounded => None,
        };
        self
    }

    /// Report object members not listed in `children`.
    pub fn strict(mut self) -> Self {
        self.allow_unknown = false;
        self
    }

    pub fn children<K, I>(mut self, children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, NodeConfig)>,
    {
        self.children = Some(children.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    pub fn hook(mut self, hook: ValidationHook) -> Self {
        self.callback = Some(hook);
        self
    }

    /// Attach a closure as the hook.
    pub fn hook_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Document, &str, &mut Vec<Violation>) -> Result<(), TreeError> + Send + Sync + 'static,
    {
        self.hook(Arc::new(f))
    }
}

/// Parse a schema from JSON text.
pub fn schema_from_json(text: &str) -> Result<Schema, SchemaError> {
    serde_json::from_str(text).map_err(|e| SchemaError::SchemaLoad {
        name: "<json>".to_string(),
        reason: e.to_string(),
    })
}

/// Parse a schema from YAML text.
pub fn schema_from_yaml(text: &str) -> Result<Schema, SchemaError> {
    serde_yaml::from_str(text).map_err(|e| SchemaError::SchemaLoad {
        name: "<yaml>".to_string(),
        reason: e.to_string(),
    })
}

/// Load a schema file. `.json` files are read as JSON, anything else as YAML.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| SchemaError::SchemaLoad {
        name: name.clone(),
        reason: format!("cannot read schema file: {e}"),
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&text).map_err(|e| e.to_string())
    };

    let schema: Schema = parsed.map_err(|reason| SchemaError::SchemaLoad { name, reason })?;
    tracing::debug!(path = %path.display(), entries = schema.len(), "loaded schema");
    Ok(schema)
}
