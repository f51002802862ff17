//! # jnav-schema — Declarative Node Checks
//!
//! Applies a path-keyed map of [`NodeConfig`] rules to a parsed
//! [`jnav_core::Document`] and reports every failing node as a
//! [`Violation`].
//!
//! ## Checking (`check`)
//!
//! [`check`] parses source text and runs the schema; [`check_document`]
//! runs it against a document you already hold. Rules cover presence,
//! nullability, emptiness, type-mask matching, array item counts, strict
//! objects, and per-item or per-member child schemas.
//!
//! ## Hooks (`hooks`)
//!
//! A node may carry a [`ValidationHook`] for value-level rules. The
//! [`hooks`] module ships range, length, and enumeration hooks.
//!
//! ## Crate Policy
//!
//! - Depends only on `jnav-core` internally.
//! - Checks never stop early: the full violation list is always returned.
//! - A check run holds no state between calls.

pub mod check;
pub mod hooks;
pub mod node;
pub mod violation;

pub use check::{check, check_document, check_node, check_with, SchemaError};
pub use node::{load_schema, schema_from_json, schema_from_yaml, NodeConfig, Schema, ValidationHook};
pub use violation::{ErrorKind, Violation, Violations};
