//! # Path Syntax
//!
//! A path addresses a node as a sequence of member names separated by one
//! separator character (`.` by default). Any segment may carry a trailing
//! `name[index]` subscript, meaning "element `index` of the array-valued
//! member `name`". The index is a non-negative base-10 integer.
//!
//! ```text
//! users[0].address.city
//! ^^^^^ ^  ^^^^^^^ ^^^^
//! name  |  name    name
//!       index
//! ```
//!
//! Paths are never materialized up front. [`Segments`] cuts one head
//! segment at a time off the remaining text, so an error always names the
//! deepest segment that was reached.

use crate::error::{PathError, TreeError};

/// Separator and subscript delimiters for path strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSyntax {
    /// Member separator.
    pub separator: char,
    /// Opening subscript delimiter.
    pub open: char,
    /// Closing subscript delimiter.
    pub close: char,
}

impl PathSyntax {
    /// `.` separator with `[` `]` subscripts.
    pub const DEFAULT: Self = Self {
        separator: '.',
        open: '[',
        close: ']',
    };

    /// Default subscripts with a custom separator.
    pub const fn with_separator(separator: char) -> Self {
        Self {
            separator,
            ..Self::DEFAULT
        }
    }

    /// Path of the array element `index` under `base`.
    pub fn element_path(&self, base: &str, index: usize) -> String {
        format!("{base}{}{index}{}", self.open, self.close)
    }

    /// Path of the member `name` under `base`. An empty base is the root.
    pub fn member_path(&self, base: &str, name: &str) -> String {
        if base.is_empty() {
            name.to_owned()
        } else {
            format!("{base}{}{name}", self.separator)
        }
    }
}

impl Default for PathSyntax {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One parsed path component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Member name. Never empty once accepted by [`Segments`].
    pub name: &'a str,
    /// Array subscript, if the segment had one.
    pub index: Option<u64>,
}

/// Split `path` at the first `separator`.
///
/// Without a separator the whole path is the head and the tail is empty.
pub fn split_head(path: &str, separator: char) -> (&str, &str) {
    path.split_once(separator).unwrap_or((path, ""))
}

/// Parse `name` or `name[index]`.
///
/// The name is not checked for emptiness here; that is the caller's
/// contract and [`Segments`] reports it as [`TreeError::InvalidPath`].
pub fn parse_segment(text: &str, open: char, close: char) -> Result<Segment<'_>, PathError> {
    let Some(start) = text.find(open) else {
        return Ok(Segment {
            name: text,
            index: None,
        });
    };

    let name = &text[..start];
    let after = &text[start + open.len_utf8()..];
    let end = after
        .find(close)
        .ok_or_else(|| PathError::Unterminated(text.to_owned()))?;
    if !after[end + close.len_utf8()..].is_empty() {
        return Err(PathError::TrailingText(text.to_owned()));
    }

    let digits = &after[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::BadIndex(digits.to_owned()));
    }
    let index = digits
        .parse::<u64>()
        .map_err(|_| PathError::BadIndex(digits.to_owned()))?;

    Ok(Segment {
        name,
        index: Some(index),
    })
}

/// A segment together with its position in the full path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    pub segment: Segment<'a>,
    /// Path prefix up to and including this segment's member name, without
    /// its subscript.
    pub member: &'a str,
    /// Path prefix up to and including this segment.
    pub reached: &'a str,
    /// Unparsed remainder after this segment.
    pub rest: &'a str,
}

impl Step<'_> {
    /// Returns true for the terminal segment.
    #[inline]
    pub fn is_last(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Lazy head-by-head iterator over a path.
///
/// Yields one [`Step`] per segment. After the first error the iterator is
/// exhausted.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    path: &'a str,
    consumed: usize,
    syntax: PathSyntax,
    done: bool,
}

impl<'a> Segments<'a> {
    pub fn new(path: &'a str, syntax: PathSyntax) -> Self {
        Self {
            path,
            consumed: 0,
            syntax,
            done: false,
        }
    }

    /// The full path being walked.
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// The not-yet-parsed tail.
    pub fn rest(&self) -> &'a str {
        let path = self.path;
        if self.done {
            ""
        } else {
            &path[self.consumed..]
        }
    }

    pub fn syntax(&self) -> PathSyntax {
        self.syntax
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<Step<'a>, TreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let path = self.path;

        let remaining = &path[self.consumed..];
        let (head, tail) = split_head(remaining, self.syntax.separator);
        let head_start = self.consumed;
        let head_end = head_start + head.len();
        let reached = &path[..head_end];

        if tail.is_empty() {
            self.done = true;
            // A trailing separator leaves an empty final segment.
            if head_end < path.len() {
                return Some(Err(TreeError::InvalidPath {
                    path: path.to_owned(),
                }));
            }
        } else {
            self.consumed = head_end + self.syntax.separator.len_utf8();
        }

        let segment = match parse_segment(head, self.syntax.open, self.syntax.close) {
            Ok(segment) => segment,
            Err(source) => {
                self.done = true;
                return Some(Err(TreeError::MalformedPath {
                    path: path.to_owned(),
                    source,
                }));
            }
        };
        if segment.name.is_empty() {
            self.done = true;
            return Some(Err(TreeError::InvalidPath {
                path: path.to_owned(),
            }));
        }

        Some(Ok(Step {
            segment,
            member: &path[..head_start + segment.name.len()],
            reached,
            rest: tail,
        }))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = (String, Option<u64>)> {
        ("[a-z_][a-z0-9_]{0,7}", proptest::option::of(0u64..10_000))
    }

    proptest! {
        /// Rendering segments and parsing them back yields the same segments.
        #[test]
        fn rendered_paths_parse_back(segs in prop::collection::vec(segment(), 1..6)) {
            let text = segs
                .iter()
                .map(|(name, index)| match index {
                    Some(i) => format!("{name}[{i}]"),
                    None => name.clone(),
                })
                .collect::<Vec<_>>()
                .join(".");
            let parsed: Vec<(String, Option<u64>)> = Segments::new(&text, PathSyntax::DEFAULT)
                .map(|s| s.map(|s| (s.segment.name.to_owned(), s.segment.index)))
                .collect::<Result<_, _>>()
                .unwrap();
            prop_assert_eq!(parsed, segs);
        }

        /// The last step always reaches the whole path.
        #[test]
        fn last_step_reaches_full_path(segs in prop::collection::vec(segment(), 1..6)) {
            let text = segs.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>().join(".");
            let last = Segments::new(&text, PathSyntax::DEFAULT).last().unwrap().unwrap();
            prop_assert_eq!(last.reached, text.as_str());
            prop_assert!(last.is_last());
        }
    }
}
