//! Lowering of IR operators to target shapes.

use std::sync::Arc;

use indexmap::IndexMap;
use squeeze_core::build::{binary_op, call, unary_op};
use squeeze_core::{NodeKind, NodeRef, OpCode};

use crate::legacy::NodePath;
use crate::plugin::{MutatingRewrite, Rewrite, rewrite_fn};

/// Builds the replacement for an op from its arguments; `None` keeps it.
pub type OpMapper = Arc<dyn Fn(&[NodeRef]) -> Option<NodeRef> + Send + Sync>;

/// Rewrites `Op` nodes whose opcode has an entry in `table`.
pub fn map_ops(name: impl Into<String>, table: IndexMap<OpCode, OpMapper>) -> Arc<dyn Rewrite> {
    rewrite_fn(name, move |node, _| {
        let NodeKind::Op { op, args } = &node.kind else {
            return None;
        };
        table.get(op).and_then(|mapper| mapper(args.as_slice()))
    })
}

/// Lowers ops to calls: `add(a, b)` becomes `+(a, b)` for `(Add, "+")`.
pub fn map_to_calls(entries: &[(OpCode, &str)]) -> Arc<dyn Rewrite> {
    let table = entries
        .iter()
        .map(|(code, name)| {
            let name = (*name).to_owned();
            let mapper: OpMapper =
                Arc::new(move |args: &[NodeRef]| Some(call(name.clone(), args.to_vec())));
            (*code, mapper)
        })
        .collect();
    map_ops("map_to_calls", table)
}

/// An infix or prefix spelling of an operator.
#[derive(Debug, Clone, Copy)]
pub struct Infix {
    pub op: OpCode,
    pub name: &'static str,
    pub precedence: u8,
    pub right_associative: bool,
}

impl Infix {
    pub const fn left(op: OpCode, name: &'static str, precedence: u8) -> Self {
        Self {
            op,
            name,
            precedence,
            right_associative: false,
        }
    }

    pub const fn right(op: OpCode, name: &'static str, precedence: u8) -> Self {
        Self {
            op,
            name,
            precedence,
            right_associative: true,
        }
    }
}

/// Lowers one-argument ops to `UnaryOp` and two-argument ops to `BinaryOp`.
pub fn map_to_infix(entries: &[Infix]) -> Arc<dyn Rewrite> {
    let table = entries
        .iter()
        .map(|infix| {
            let infix = *infix;
            let mapper: OpMapper = Arc::new(move |args: &[NodeRef]| match args {
                [arg] => Some(unary_op(infix.op, infix.name, infix.precedence, arg.clone())),
                [left, right] => Some(binary_op(
                    infix.op,
                    infix.name,
                    infix.precedence,
                    infix.right_associative,
                    left.clone(),
                    right.clone(),
                )),
                _ => None,
            });
            (infix.op, mapper)
        })
        .collect();
    map_ops("map_to_infix", table)
}

/// Collapses a `Block` of exactly one statement into that statement,
/// except directly under another `Block`.
pub fn unwrap_single_block() -> Arc<dyn MutatingRewrite> {
    Arc::new(UnwrapSingleBlock)
}

struct UnwrapSingleBlock;

impl MutatingRewrite for UnwrapSingleBlock {
    fn name(&self) -> &str {
        "unwrap_single_block"
    }

    fn exit(&self, path: &mut NodePath<'_>) {
        if path.parent_kind() == Some("Block") {
            return;
        }
        let NodeKind::Block { children } = &path.node().kind else {
            return;
        };
        if let [only] = children.as_slice() {
            let only = only.clone();
            path.replace_with(only);
        }
    }
}
