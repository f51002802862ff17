//! # Schema Checking
//!
//! Recursive descent over a [`Schema`], applying each [`NodeConfig`] to the
//! node at its path and accumulating [`Violation`]s.
//!
//! ## Per-node Order
//!
//! 1. Absent: `MissingNode` unless optional. Stop.
//! 2. `null`: `UnableToGet` unless nullable. Stop.
//! 3. Kind not in the expected mask: `BadFormat`. Stop.
//! 4. Structural rules, chosen by the configured mask. Only an exact
//!    `STRING`, `ARRAY` or `OBJECT` mask has any:
//!    - `STRING`: empty string.
//!    - `ARRAY`: empty array, item counts, strict item members, then
//!      `children` on every item (a non-object item is `BadFormat`).
//!    - `OBJECT`: strict members, then `children`.
//! 5. The hook, only if step 4 appended nothing. That includes
//!    violations found anywhere below the node.
//!
//! A failing node never stops its siblings. The run holds no state between
//! calls, so checking the same input twice gives identical results.

use jnav_core::{Document, Map, PathSyntax, TreeError, TypeMask, Value};
use thiserror::Error;

use crate::node::{NodeConfig, Schema};
use crate::violation::{ErrorKind, Violation, Violations};

/// Error from a check run or from loading a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The source text was empty.
    #[error("source document is empty")]
    EmptySource,

    /// The source text is not a valid JSON document.
    #[error("source document could not be parsed: {0}")]
    Parse(#[from] TreeError),

    /// The document did not conform to the schema.
    #[error("validation failed with {} violation(s):\n{violations}", .violations.len())]
    ValidationFailed {
        /// Every violation, in discovery order.
        violations: Violations,
    },

    /// The schema file could not be read or parsed.
    #[error("schema load error for '{name}': {reason}")]
    SchemaLoad {
        /// Schema file name or source label.
        name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },
}

impl SchemaError {
    /// The violations of a failed run, if this is one.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::ValidationFailed { violations } => Some(violations),
            _ => None,
        }
    }
}

/// Parse `source` and check it against `schema` with the default path syntax.
pub fn check(source: &str, schema: &Schema) -> Result<(), SchemaError> {
    check_with(source, schema, PathSyntax::DEFAULT)
}

/// Parse `source` and check it against `schema`, addressing paths with `syntax`.
pub fn check_with(source: &str, schema: &Schema, syntax: PathSyntax) -> Result<(), SchemaError> {
    if source.trim().is_empty() {
        return Err(SchemaError::EmptySource);
    }
    let doc = Document::parse(source)?.syntax_of(syntax);
    let violations = check_document(&doc, schema);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::ValidationFailed { violations })
    }
}

/// Check an already parsed document and return every violation found.
pub fn check_document(doc: &Document, schema: &Schema) -> Violations {
    let mut errors = Vec::new();
    for (path, config) in schema {
        check_node(doc, path, config, &mut errors);
    }
    tracing::debug!(
        entries = schema.len(),
        violations = errors.len(),
        "schema check finished"
    );
    Violations::from(errors)
}

/// Check one node and its configured descendants, appending to `errors`.
pub fn check_node(doc: &Document, path: &str, config: &NodeConfig, errors: &mut Vec<Violation>) {
    let value = match doc.resolve(path) {
        Ok(value) => value,
        Err(_) => {
            if !config.optional {
                errors.push(Violation::new(path, ErrorKind::MissingNode));
            }
            return;
        }
    };

    if value.is_null() {
        if !config.nullable {
            errors.push(Violation::new(path, ErrorKind::UnableToGet));
        }
        return;
    }

    if !config.expected.matches(value.type_mask()) {
        errors.push(Violation::new(path, ErrorKind::BadFormat));
        return;
    }

    let before = errors.len();
    match value {
        Value::String(s) if config.expected == TypeMask::STRING => {
            if s.is_empty() && !config.empty_allowed {
                errors.push(Violation::new(path, ErrorKind::BadValue));
            }
        }
        Value::Array(items) if config.expected == TypeMask::ARRAY => {
            check_array(doc, path, items, config, errors);
        }
        Value::Object(members) if config.expected == TypeMask::OBJECT => {
            if let Some(children) = &config.children {
                if !config.allow_unknown {
                    unknown_members(doc.syntax(), path, members, children, errors);
                }
                check_children(doc, path, children, errors);
            }
        }
        _ => {}
    }

    if errors.len() > before {
        return;
    }
    if let Some(hook) = &config.callback {
        if let Err(e) = hook(doc, path, errors) {
            tracing::debug!(path, error = %e, "validation hook failed");
        }
    }
}

fn check_array(
    doc: &Document,
    path: &str,
    items: &[Value],
    config: &NodeConfig,
    errors: &mut Vec<Violation>,
) {
    check_items(path, items.len(), config, errors);
    let Some(children) = &config.children else {
        return;
    };
    let syntax = doc.syntax();

    if !config.allow_unknown {
        for (i, item) in items.iter().enumerate() {
            if let Value::Object(members) = item {
                let item_path = syntax.element_path(path, i);
                unknown_members(syntax, &item_path, members, children, errors);
            }
        }
    }

    for (i, item) in items.iter().enumerate() {
        let item_path = syntax.element_path(path, i);
        if item.is_object() {
            check_children(doc, &item_path, children, errors);
        } else {
            errors.push(Violation::new(item_path, ErrorKind::BadFormat));
        }
    }
}

fn check_items(path: &str, len: usize, config: &NodeConfig, errors: &mut Vec<Violation>) {
    if len == 0 && !config.empty_allowed {
        errors.push(Violation::new(path, ErrorKind::EmptyArray));
        return;
    }
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    if config.min_items.is_some_and(|min| len < min) {
        errors.push(Violation::new(path, ErrorKind::TooFewItems));
    }
    if config.max_items.is_some_and(|max| len > max) {
        errors.push(Violation::new(path, ErrorKind::TooManyItems));
    }
}

fn unknown_members(
    syntax: PathSyntax,
    path: &str,
    members: &Map,
    children: &Schema,
    errors: &mut Vec<Violation>,
) {
    for name in members.keys().filter(|name| !children.contains_key(*name)) {
        errors.push(Violation::new(
            syntax.member_path(path, name),
            ErrorKind::UnexpectedNode,
        ));
    }
}

fn check_children(doc: &Document, path: &str, children: &Schema, errors: &mut Vec<Violation>) {
    let syntax = doc.syntax();
    for (name, child) in children {
        check_node(doc, &syntax.member_path(path, name), child, errors);
    }
}
