//! # Violations
//!
//! The `(path, kind)` records a check run produces. They are accumulated in
//! discovery order across the whole run, never deduplicated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a single check failure.
///
/// Discriminants are stable and double as numeric codes in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorKind {
    /// The node is present but `null`, and the config is not nullable.
    UnableToGet = 1,
    /// The node's kind is not in the expected type mask, or an array item
    /// that must be an object is not one.
    BadFormat = 2,
    /// A strict object has a member its config does not list.
    UnexpectedNode = 3,
    /// A required node is absent.
    MissingNode = 4,
    /// An array that may not be empty is empty.
    EmptyArray = 5,
    /// An array has more items than allowed.
    TooManyItems = 6,
    /// An array has fewer items than required.
    TooFewItems = 7,
    /// The value itself is rejected (empty string, hook rule).
    BadValue = 8,
    /// A numeric value is outside its allowed range.
    OutOfRange = 9,
}

impl ErrorKind {
    /// Numeric code of this kind.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnableToGet => "UnableToGet",
            Self::BadFormat => "BadFormat",
            Self::UnexpectedNode => "UnexpectedNode",
            Self::MissingNode => "MissingNode",
            Self::EmptyArray => "EmptyArray",
            Self::TooManyItems => "TooManyItems",
            Self::TooFewItems => "TooFewItems",
            Self::BadValue => "BadValue",
            Self::OutOfRange => "OutOfRange",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Full path of the failing node.
    pub path: String,
    pub kind: ErrorKind,
}

impl Violation {
    pub fn new(path: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): {}", self.kind)
        } else {
            write!(f, "  {}: {}", self.path, self.kind)
        }
    }
}

/// Ordered collection of violations from one check run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
