//! # Tree Navigation
//!
//! Path-driven read, write, and removal on a [`Value`] tree.
//!
//! ## Reads
//!
//! [`resolve`] walks one segment at a time. Every segment is a member
//! lookup on an object; a subscripted segment then indexes into the
//! array-valued member. The first failure stops the walk and names the
//! deepest path prefix reached.
//!
//! ## Writes
//!
//! [`set`] auto-vivifies: absent intermediate members are created as
//! objects (or, for a subscripted segment, as a one-element array holding
//! a new object). At the terminal segment a subscript only decides between
//! overwrite (index in bounds) and append (index at or past the end); it
//! never pads gaps.
//!
//! Writes are atomic. New containers are built detached and linked only
//! after the remainder of the write succeeded, and existing nodes are
//! touched only at the terminal segment, so a failed `set` leaves the tree
//! unchanged.

use crate::coerce::FromValue;
use crate::error::TreeError;
use crate::kind::TypeMask;
use crate::path::{PathSyntax, Segments, Step};
use crate::value::Value;

/// Label used in errors that refer to the root node.
pub const ROOT_LABEL: &str = "(root)";

fn label(path: &str) -> String {
    if path.is_empty() {
        ROOT_LABEL.to_owned()
    } else {
        path.to_owned()
    }
}

fn next_step<'a>(steps: &mut Segments<'a>) -> Result<Step<'a>, TreeError> {
    match steps.next() {
        Some(step) => step,
        None => Err(TreeError::InvalidPath {
            path: steps.path().to_owned(),
        }),
    }
}

fn out_of_range(step: &Step<'_>, index: u64, len: usize) -> TreeError {
    TreeError::OutOfRange {
        path: step.reached.to_owned(),
        reason: format!("index {index} out of bounds for length {len}"),
    }
}

fn element<'v>(member: &'v Value, index: u64, step: &Step<'_>) -> Result<&'v Value, TreeError> {
    let items = member.as_array().ok_or_else(|| TreeError::NotAnArray {
        path: step.member.to_owned(),
    })?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .ok_or_else(|| out_of_range(step, index, items.len()))
}

/// Resolve the node at `path`, without any conversion.
///
/// Unlike [`get`], a `null` leaf resolves successfully.
pub fn resolve<'v>(root: &'v Value, path: &str, syntax: PathSyntax) -> Result<&'v Value, TreeError> {
    let mut node = root;
    let mut node_path = "";
    for step in Segments::new(path, syntax) {
        let step = step?;
        let members = node.as_object().ok_or_else(|| TreeError::NotAnObject {
            path: label(node_path),
        })?;
        let member = members
            .get(step.segment.name)
            .ok_or_else(|| TreeError::MissingNode {
                path: step.member.to_owned(),
            })?;
        node = match step.segment.index {
            None => member,
            Some(index) => element(member, index, &step)?,
        };
        node_path = step.reached;
    }
    Ok(node)
}

/// Read the node at `path` as `T`.
///
/// Fails with [`TreeError::NullNode`] when the leaf is `null`, and with
/// [`TreeError::OutOfRange`] / [`TreeError::KindMismatch`] when the leaf
/// cannot be converted.
pub fn get<T: FromValue>(root: &Value, path: &str, syntax: PathSyntax) -> Result<T, TreeError> {
    let leaf = resolve(root, path, syntax)?;
    if leaf.is_null() {
        return Err(TreeError::NullNode {
            path: path.to_owned(),
        });
    }
    T::from_value(leaf).map_err(|e| e.at(path))
}

/// Read every element of the array at `path` as `T`, in order.
///
/// An unresolvable path or a non-array leaf yields an empty vector. The
/// first element that cannot be read aborts the whole read.
pub fn get_vec<T: FromValue>(root: &Value, path: &str, syntax: PathSyntax) -> Result<Vec<T>, TreeError> {
    let len = resolve(root, path, syntax)
        .ok()
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    (0..len)
        .map(|i| get(root, &syntax.element_path(path, i), syntax))
        .collect()
}

/// Write `value` at `path`, creating intermediate containers as needed.
pub fn set(
    root: &mut Value,
    value: impl Into<Value>,
    path: &str,
    syntax: PathSyntax,
) -> Result<(), TreeError> {
    let mut steps = Segments::new(path, syntax);
    set_in(root, value.into(), &mut steps, "")
}

/// Write each of `values` to `path[0]`, `path[1]`, ... in order.
///
/// In-bounds elements are overwritten and the rest appended. Elements past
/// the end of `values` are left alone. Stops at the first failing write.
pub fn set_vec<I>(root: &mut Value, values: I, path: &str, syntax: PathSyntax) -> Result<(), TreeError>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    for (i, value) in values.into_iter().enumerate() {
        set(root, value, &syntax.element_path(path, i), syntax)?;
    }
    Ok(())
}

/// Build a new object holding the rest of the write, returning it detached.
fn vivify(value: Value, steps: &mut Segments<'_>, node_path: &str) -> Result<Value, TreeError> {
    let mut fresh = Value::object();
    set_in(&mut fresh, value, steps, node_path)?;
    tracing::trace!(path = %label(node_path), "auto-vivified object");
    Ok(fresh)
}

fn set_in(
    node: &mut Value,
    value: Value,
    steps: &mut Segments<'_>,
    node_path: &str,
) -> Result<(), TreeError> {
    if node.is_null() {
        *node = vivify(value, steps, node_path)?;
        return Ok(());
    }

    let found = node.kind_name();
    let Some(members) = node.as_object_mut() else {
        return Err(TreeError::TypeConflict {
            path: label(node_path),
            found,
        });
    };

    let step = next_step(steps)?;
    let name = step.segment.name;

    if step.is_last() {
        match step.segment.index {
            None => {
                members.insert(name.to_owned(), value);
            }
            Some(index) => match members.get_mut(name) {
                Some(Value::Array(items)) => {
                    match usize::try_from(index).ok().and_then(|i| items.get_mut(i)) {
                        Some(slot) => *slot = value,
                        None => items.push(value),
                    }
                }
                Some(other) => {
                    return Err(TreeError::TypeConflict {
                        path: step.member.to_owned(),
                        found: other.kind_name(),
                    });
                }
                None => {
                    members.insert(name.to_owned(), Value::Array(vec![value]));
                }
            },
        }
        return Ok(());
    }

    match step.segment.index {
        None => match members.get_mut(name) {
            Some(child) => set_in(child, value, steps, step.reached),
            None => {
                let child = vivify(value, steps, step.reached)?;
                members.insert(name.to_owned(), child);
                Ok(())
            }
        },
        Some(index) => match members.get_mut(name) {
            Some(Value::Array(items)) => {
                match usize::try_from(index).ok().and_then(|i| items.get_mut(i)) {
                    Some(child) => set_in(child, value, steps, step.reached),
                    None => {
                        let child = vivify(value, steps, step.reached)?;
                        items.push(child);
                        Ok(())
                    }
                }
            }
            Some(other) => Err(TreeError::TypeConflict {
                path: step.member.to_owned(),
                found: other.kind_name(),
            }),
            None => {
                let child = vivify(value, steps, step.reached)?;
                members.insert(name.to_owned(), Value::Array(vec![child]));
                Ok(())
            }
        },
    }
}

/// Remove the member named by the terminal segment and return it.
///
/// A terminal subscript is ignored: `arr[2]` removes the whole `arr`
/// member. Individual array elements cannot be removed by path.
pub fn remove(root: &mut Value, path: &str, syntax: PathSyntax) -> Result<Value, TreeError> {
    let mut steps = Segments::new(path, syntax);
    let mut node = root;
    let mut node_path = "";
    loop {
        let step = next_step(&mut steps)?;
        let members = node.as_object_mut().ok_or_else(|| TreeError::NotAnObject {
            path: label(node_path),
        })?;

        if step.is_last() {
            return members
                .shift_remove(step.segment.name)
                .ok_or_else(|| TreeError::MissingNode {
                    path: step.member.to_owned(),
                });
        }

        let member = members
            .get_mut(step.segment.name)
            .ok_or_else(|| TreeError::MissingNode {
                path: step.member.to_owned(),
            })?;
        node = match step.segment.index {
            None => member,
            Some(index) => {
                let items = member.as_array_mut().ok_or_else(|| TreeError::NotAnArray {
                    path: step.member.to_owned(),
                })?;
                let len = items.len();
                usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get_mut(i))
                    .ok_or_else(|| out_of_range(&step, index, len))?
            }
        };
        node_path = step.reached;
    }
}

/// Returns true when every segment of `path` resolves.
pub fn exist(root: &Value, path: &str, syntax: PathSyntax) -> bool {
    resolve(root, path, syntax).is_ok()
}

/// Returns true when `path` resolves to `null`.
pub fn empty(root: &Value, path: &str, syntax: PathSyntax) -> bool {
    matches!(resolve(root, path, syntax), Ok(Value::Null))
}

/// Element count of the array at `path`; 0 when unresolved or not an array.
pub fn size(root: &Value, path: &str, syntax: PathSyntax) -> u32 {
    resolve(root, path, syntax)
        .ok()
        .and_then(Value::as_array)
        .map_or(0, |items| u32::try_from(items.len()).unwrap_or(u32::MAX))
}

/// Classification of the node at `path`; `UNKNOWN` when unresolved.
pub fn type_of(root: &Value, path: &str, syntax: PathSyntax) -> TypeMask {
    resolve(root, path, syntax).map_or(TypeMask::UNKNOWN, Value::type_mask)
}

/// Member names of the object at `path`; empty when unresolved or not an object.
pub fn list_members(root: &Value, path: &str, syntax: PathSyntax) -> Vec<String> {
    resolve(root, path, syntax)
        .ok()
        .and_then(Value::as_object)
        .map(|members| members.keys().cloned().collect())
        .unwrap_or_default()
}
