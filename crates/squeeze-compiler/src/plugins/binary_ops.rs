//! Rewrites of binary operators.

use std::sync::Arc;

use squeeze_core::build::{binary_op, mutating_binary_op, op};
use squeeze_core::{Node, NodeKind, NodeRef, Spine};

use crate::plugin::{GolfRewrite, golf_fn};
use crate::signature::Signature;

/// `a ∘ b` to `b ∘' a` for every op with a flipped counterpart.
///
/// Lowered infix operators only carry their own spelling, so those are
/// flipped only when commutative.
pub fn flip_binary_ops() -> Arc<dyn GolfRewrite> {
    golf_fn("flip_binary_ops", |spine| match &spine.node().kind {
        NodeKind::Op { op: code, args } => match (code.flip(), args.as_slice()) {
            (Some(flipped), [a, b]) => vec![op(flipped, vec![b.clone(), a.clone()])],
            _ => Vec::new(),
        },
        NodeKind::BinaryOp {
            op: code,
            name,
            precedence,
            right_associative,
            left,
            right,
        } if code.is_commutative() => vec![binary_op(
            *code,
            name.clone(),
            *precedence,
            *right_associative,
            right.clone(),
            left.clone(),
        )],
        _ => Vec::new(),
    })
}

/// `a = a ∘ b` to `a ∘= b` for the infix operators named in `names`.
///
/// The target must be the same identifier, or an index into the same
/// identifier with a structurally equal index.
pub fn add_mutating_binary_op(names: &[&str]) -> Arc<dyn GolfRewrite> {
    Arc::new(AddMutatingBinaryOp {
        name: format!("add_mutating_binary_op({})", names.join(", ")),
        names: names.iter().map(|n| (*n).to_owned()).collect(),
    })
}

struct AddMutatingBinaryOp {
    name: String,
    names: Vec<String>,
}

impl AddMutatingBinaryOp {
    fn rewrite(&self, node: &Node) -> Option<NodeRef> {
        let NodeKind::Assignment { variable, expr } = &node.kind else {
            return None;
        };
        let NodeKind::BinaryOp {
            op: code,
            name,
            left,
            right,
            ..
        } = &expr.kind
        else {
            return None;
        };
        if !self.names.iter().any(|n| n == name) || !same_target(variable, left) {
            return None;
        }
        Some(mutating_binary_op(
            *code,
            name.clone(),
            variable.clone(),
            right.clone(),
        ))
    }
}

impl GolfRewrite for AddMutatingBinaryOp {
    fn name(&self) -> &str {
        &self.name
    }

    fn golf<'a>(&'a self, spine: &'a Spine) -> Box<dyn Iterator<Item = NodeRef> + 'a> {
        Box::new(self.rewrite(spine.node()).into_iter())
    }
}

fn same_target(variable: &Node, left: &Node) -> bool {
    match (&variable.kind, &left.kind) {
        (NodeKind::Identifier { name: a }, NodeKind::Identifier { name: b }) => a == b,
        (
            NodeKind::IndexCall {
                collection: c1,
                index: i1,
            },
            NodeKind::IndexCall {
                collection: c2,
                index: i2,
            },
        ) => {
            c1.as_identifier().is_some()
                && c1.as_identifier() == c2.as_identifier()
                && Signature::of(i1) == Signature::of(i2)
        }
        _ => false,
    }
}
