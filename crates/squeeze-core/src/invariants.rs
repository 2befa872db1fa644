//! Invariant checks excluded from coverage reports.
//!
//! Violations are programming errors in the caller or in a plugin, never
//! recoverable conditions, so every helper here panics with the offending
//! node kind and position.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::fragment::PathFragment;
use crate::node::Node;
use crate::types::{IntRange, Type};

pub(crate) fn ensure_program_root(node: &Node) {
    if !node.is_program() {
        panic!(
            "Spine: root node should be a Program, but got {}",
            node.name()
        );
    }
}

pub(crate) fn ensure_root_replacement(node: &Node) {
    if !node.is_program() {
        panic!(
            "Spine: attempt to replace the root node with node of kind {}",
            node.name()
        );
    }
}

pub(crate) fn nested_block(parent: &Node, fragment: PathFragment) -> ! {
    panic!(
        "Spine: attempt to insert a Block into a Block (at {} under {})",
        fragment,
        parent.name()
    )
}

pub(crate) fn missing_fragment(node: &Node, fragment: PathFragment) -> ! {
    panic!(
        "Spine: node of kind {} has no child at {}",
        node.name(),
        fragment
    )
}

/// Integer range of `ty`; panics when a rewrite receives a non-integer type.
pub fn expect_integer<'a>(ty: &'a Type, node: &Node) -> &'a IntRange {
    match ty {
        Type::Integer(range) => range,
        other => panic!(
            "unexpected type {} for {} operand (expected integer)",
            other,
            node.name()
        ),
    }
}
