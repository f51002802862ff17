//! # Reusable Hooks
//!
//! Ready-made [`ValidationHook`]s for value-level rules that the structural
//! checks do not cover. Each hook reads the node through the document's
//! path API, so it sees the same syntax the check run uses.

use std::sync::Arc;

use jnav_core::{Document, TreeError, Value};

use crate::node::ValidationHook;
use crate::violation::{ErrorKind, Violation};

/// Wrap a closure as a [`ValidationHook`].
pub fn custom<F>(f: F) -> ValidationHook
where
    F: Fn(&Document, &str, &mut Vec<Violation>) -> Result<(), TreeError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Integer nodes must lie in `min..=max`; otherwise `OutOfRange`.
///
/// A non-integer node is `BadFormat`.
pub fn integer_range(min: i64, max: i64) -> ValidationHook {
    let (min, max) = (i128::from(min), i128::from(max));
    custom(move |doc, path, errors| {
        match doc.resolve(path)?.as_i128() {
            Some(n) if (min..=max).contains(&n) => {}
            Some(_) => errors.push(Violation::new(path, ErrorKind::OutOfRange)),
            None => errors.push(Violation::new(path, ErrorKind::BadFormat)),
        }
        Ok(())
    })
}

/// String nodes must have `min..=max` characters; otherwise `BadValue`.
///
/// A non-string node is `BadFormat`.
pub fn string_length(min: usize, max: usize) -> ValidationHook {
    custom(move |doc, path, errors| {
        match doc.resolve(path)? {
            Value::String(s) => {
                if !(min..=max).contains(&s.chars().count()) {
                    errors.push(Violation::new(path, ErrorKind::BadValue));
                }
            }
            _ => errors.push(Violation::new(path, ErrorKind::BadFormat)),
        }
        Ok(())
    })
}

/// String nodes must equal one of `allowed`; otherwise `BadValue`.
pub fn one_of<I, S>(allowed: I) -> ValidationHook
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    custom(move |doc, path, errors| {
        let value = doc.get::<String>(path)?;
        if !allowed.contains(&value) {
            errors.push(Violation::new(path, ErrorKind::BadValue));
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(hook: &ValidationHook, source: &str, path: &str) -> Result<Vec<ErrorKind>, TreeError> {
        let doc = Document::parse(source).unwrap();
        let mut errors = Vec::new();
        hook(&doc, path, &mut errors)?;
        Ok(errors.into_iter().map(|v| v.kind).collect())
    }

    #[test]
    fn integer_range_bounds_are_inclusive() {
        let hook = integer_range(1, 65535);
        assert!(run(&hook, r#"{"p": 1}"#, "p").unwrap().is_empty());
        assert!(run(&hook, r#"{"p": 65535}"#, "p").unwrap().is_empty());
        assert_eq!(run(&hook, r#"{"p": 0}"#, "p").unwrap(), [ErrorKind::OutOfRange]);
        assert_eq!(
            run(&hook, r#"{"p": 18446744073709551615}"#, "p").unwrap(),
            [ErrorKind::OutOfRange]
        );
        assert_eq!(run(&hook, r#"{"p": 1.5}"#, "p").unwrap(), [ErrorKind::BadFormat]);
    }

    #[test]
    fn string_length_counts_chars() {
        let hook = string_length(2, 3);
        assert!(run(&hook, r#"{"s": "ab"}"#, "s").unwrap().is_empty());
        assert!(run(&hook, r#"{"s": "äöü"}"#, "s").unwrap().is_empty());
        assert_eq!(run(&hook, r#"{"s": "abcd"}"#, "s").unwrap(), [ErrorKind::BadValue]);
        assert_eq!(run(&hook, r#"{"s": 3}"#, "s").unwrap(), [ErrorKind::BadFormat]);
    }

    #[test]
    fn one_of_matches_exactly() {
        let hook = one_of(["debug", "info"]);
        assert!(run(&hook, r#"{"l": "info"}"#, "l").unwrap().is_empty());
        assert_eq!(run(&hook, r#"{"l": "INFO"}"#, "l").unwrap(), [ErrorKind::BadValue]);
        assert!(matches!(
            run(&hook, r#"{"l": 1}"#, "l"),
            Err(TreeError::KindMismatch { .. })
        ));
    }

    #[test]
    fn unresolvable_path_is_an_error() {
        let hook = integer_range(0, 1);
        assert!(matches!(
            run(&hook, r#"{}"#, "absent"),
            Err(TreeError::MissingNode { .. })
        ));
    }
}
