//! # jnav-core — Path-Addressed JSON Value Trees
//!
//! This crate holds everything needed to read, write, and remove nodes of a
//! JSON-like document by a path string such as `users[0].address.city`.
//! The schema checker in `jnav-schema` is built entirely on top of it.
//!
//! ## Key Design Principles
//!
//! 1. **Exact numeric kinds.** [`Value`] keeps signed, unsigned, `f32`,
//!    and `f64` apart. Classification for schema matching goes through the
//!    bitwise [`TypeMask`], so a schema can ask for "any integer" while a
//!    stored node is one concrete kind.
//!
//! 2. **One generic getter.** [`tree::get`] is generic over [`FromValue`];
//!    width and range checks live in [`coerce`], not in a getter per type.
//!
//! 3. **Lazy paths.** [`Segments`] cuts one head segment at a time, so every
//!    error names the deepest path prefix that was reached.
//!
//! 4. **Atomic writes.** [`tree::set`] auto-vivifies missing containers but
//!    links them in only once the whole write has succeeded.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jnav-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No global state: path syntax is passed explicitly or carried by a
//!   [`Document`].

pub mod coerce;
pub mod document;
pub mod error;
pub mod kind;
pub mod path;
pub mod tree;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use coerce::{coerce, FromValue};
pub use document::Document;
pub use error::{CoercionError, PathError, TreeError};
pub use kind::TypeMask;
pub use path::{PathSyntax, Segment, Segments, Step};
pub use value::{Map, Value};
