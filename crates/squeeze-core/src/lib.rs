#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for squeeze programs.
//!
//! Three layers:
//! - **IR**: `Node`/`NodeKind` trees shared through `Arc`, addressed by `PathFragment`
//! - **Spine**: immutable path-aware handles with copy-on-write replacement
//! - **Types**: value types with integer ranges, and the oracle rewrites query

pub mod build;
mod fragment;
pub mod invariants;
mod node;
mod serde_int;
mod spine;
pub mod types;

#[cfg(test)]
mod types_tests;

pub use fragment::PathFragment;
pub use node::{Node, NodeKind, NodeRef, OpCode};
pub use spine::{Descendants, Spine, Visit};
pub use types::{IntRange, Type};

/// Parse an IR program from its JSON form.
///
/// Input whose root is not a `Program` is reported as a data error here,
/// before any spine gets the chance to treat it as a programming error.
pub fn parse_program(json: &str) -> Result<NodeRef, serde_json::Error> {
    let node: NodeRef = serde_json::from_str(json)?;
    if !node.is_program() {
        return Err(serde::de::Error::custom(format!(
            "expected a Program at the root, found {}",
            node.name()
        )));
    }
    Ok(node)
}
