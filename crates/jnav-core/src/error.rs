//! # Error Hierarchy
//!
//! Structured error types for path navigation, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every navigation failure names the path prefix that was reached when
//! the failure happened, so a caller can tell `a.b` from `a.b.c` without
//! re-walking the tree.

use thiserror::Error;

/// Top-level error type for tree navigation and document I/O.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A path segment has an empty name (e.g. `a..b` or a leading separator).
    #[error("invalid path \"{path}\": empty segment name")]
    InvalidPath {
        /// The full path as supplied by the caller.
        path: String,
    },

    /// A path segment carries an unparseable array subscript.
    #[error("malformed path \"{path}\": {source}")]
    MalformedPath {
        /// The full path as supplied by the caller.
        path: String,
        /// What was wrong with the segment.
        #[source]
        source: PathError,
    },

    /// A member along the path is absent.
    #[error("missing node at \"{path}\"")]
    MissingNode {
        /// Path prefix up to and including the absent member.
        path: String,
    },

    /// The node exists but holds `null`.
    #[error("node at \"{path}\" is null")]
    NullNode {
        /// Path of the null node.
        path: String,
    },

    /// Member access on something that is not an object.
    #[error("node at \"{path}\" is not an object")]
    NotAnObject {
        /// Path of the node that was expected to be an object.
        path: String,
    },

    /// Index access on something that is not an array.
    #[error("node at \"{path}\" is not an array")]
    NotAnArray {
        /// Path of the node that was expected to be an array.
        path: String,
    },

    /// An array index or a numeric conversion is out of bounds.
    #[error("out of range at \"{path}\": {reason}")]
    OutOfRange {
        /// Path of the offending node.
        path: String,
        /// Index/length pair or numeric bound that was violated.
        reason: String,
    },

    /// The stored value kind cannot be read as the requested type.
    #[error("node at \"{path}\" holds {found}, cannot read as {expected}")]
    KindMismatch {
        /// Path of the offending node.
        path: String,
        /// Requested Rust type.
        expected: &'static str,
        /// Stored value kind.
        found: &'static str,
    },

    /// A write needs to descend through a node that is not a container.
    #[error("type conflict at \"{path}\": cannot descend into {found}")]
    TypeConflict {
        /// Path of the node that blocked the write.
        path: String,
        /// Stored value kind of the blocking node.
        found: &'static str,
    },

    /// The document has no file path to load from or save to.
    #[error("document has no associated file path")]
    NoFilePath,

    /// Malformed JSON input.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error during load or save.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TreeError {
    /// The path this error refers to, when it refers to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::InvalidPath { path }
            | Self::MalformedPath { path, .. }
            | Self::MissingNode { path }
            | Self::NullNode { path }
            | Self::NotAnObject { path }
            | Self::NotAnArray { path }
            | Self::OutOfRange { path, .. }
            | Self::KindMismatch { path, .. }
            | Self::TypeConflict { path, .. } => Some(path),
            Self::NoFilePath | Self::Parse(_) | Self::Io(_) => None,
        }
    }

    /// Returns true when the error means "nothing is stored there".
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingNode { .. })
    }
}

/// Errors while parsing a single path segment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The text between the brackets is not a base-10 integer.
    #[error("array subscript \"{0}\" is not a non-negative integer")]
    BadIndex(String),

    /// An opening bracket has no matching closing bracket.
    #[error("unterminated array subscript in \"{0}\"")]
    Unterminated(String),

    /// Characters follow the closing bracket.
    #[error("unexpected text after array subscript in \"{0}\"")]
    TrailingText(String),
}

/// Errors while converting a stored value into a requested Rust type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// The stored numeric value does not fit the requested width.
    #[error("value {value} does not fit in {target}")]
    OutOfRange {
        /// The stored value, rendered for diagnostics.
        value: String,
        /// The requested Rust type.
        target: &'static str,
    },

    /// The stored kind is incompatible with the requested type.
    #[error("{found} cannot be read as {expected}")]
    KindMismatch {
        /// The requested Rust type.
        expected: &'static str,
        /// The stored value kind.
        found: &'static str,
    },
}

impl CoercionError {
    /// Attach the node path, producing the matching [`TreeError`].
    pub fn at(self, path: impl Into<String>) -> TreeError {
        let path = path.into();
        match self {
            Self::OutOfRange { value, target } => TreeError::OutOfRange {
                path,
                reason: format!("value {value} does not fit in {target}"),
            },
            Self::KindMismatch { expected, found } => TreeError::KindMismatch {
                path,
                expected,
                found,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_node_display_names_path() {
        let err = TreeError::MissingNode {
            path: "missing.node".to_string(),
        };
        assert!(format!("{err}").contains("missing.node"));
        assert!(err.is_missing());
        assert_eq!(err.path(), Some("missing.node"));
    }

    #[test]
    fn malformed_path_carries_source() {
        let err = TreeError::MalformedPath {
            path: "a[x]".to_string(),
            source: PathError::BadIndex("x".to_string()),
        };
        let msg = format!("{err}");
        assert!(msg.contains("a[x]"));
        assert!(msg.contains("not a non-negative integer"));
    }

    #[test]
    fn coercion_out_of_range_maps_to_tree_error() {
        let err = CoercionError::OutOfRange {
            value: "300".to_string(),
            target: "u8",
        }
        .at("a.b");
        match err {
            TreeError::OutOfRange { path, reason } => {
                assert_eq!(path, "a.b");
                assert!(reason.contains("300"));
                assert!(reason.contains("u8"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn coercion_kind_mismatch_maps_to_tree_error() {
        let err = CoercionError::KindMismatch {
            expected: "bool",
            found: "string",
        }
        .at("flag");
        assert!(matches!(
            err,
            TreeError::KindMismatch {
                expected: "bool",
                found: "string",
                ..
            }
        ));
    }

    #[test]
    fn io_and_parse_errors_have_no_path() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(TreeError::Parse(parse).path().is_none());
        assert!(TreeError::NoFilePath.path().is_none());
    }
}
