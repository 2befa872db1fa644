//! Output statements.

use std::sync::Arc;

use indexmap::IndexMap;
use squeeze_core::build::{op, print, text};
use squeeze_core::{Node, NodeKind, NodeRef, OpCode, PathFragment};

use super::ops::{OpMapper, map_ops};
use crate::plugin::{GolfRewrite, Rewrite, golf_fn};

/// `println(x)` to `print(text_concat(x, "\n"))`.
pub fn println_to_print() -> Arc<dyn Rewrite> {
    let mapper: OpMapper = Arc::new(|args: &[NodeRef]| {
        let [x] = args else {
            return None;
        };
        Some(print(op(OpCode::TextConcat, vec![x.clone(), text("\n")])))
    });
    map_ops("println_to_print", IndexMap::from([(OpCode::Println, mapper)]))
}

/// Trailing output whitespace is ignored, so the last print of the program
/// may use whichever of `print`/`println` is shorter in the target.
///
/// With `to_println` the last `print` becomes `println`; otherwise the
/// other way round.
pub fn golf_last_print(to_println: bool) -> Arc<dyn GolfRewrite> {
    let (from, to) = if to_println {
        (OpCode::Print, OpCode::Println)
    } else {
        (OpCode::Println, OpCode::Print)
    };
    golf_fn("golf_last_print", move |spine| {
        let program = spine.node();
        let NodeKind::Program { body } = &program.kind else {
            return Vec::new();
        };
        let new_body = match &body.kind {
            NodeKind::Block { children } => {
                let Some(last) = children.last() else {
                    return Vec::new();
                };
                let Some(new_last) = switch(last, from, to) else {
                    return Vec::new();
                };
                let Some(block) = body.with_child(
                    PathFragment::Index("children", children.len() - 1),
                    new_last,
                ) else {
                    return Vec::new();
                };
                Arc::new(block)
            }
            _ => match switch(body, from, to) {
                Some(statement) => statement,
                None => return Vec::new(),
            },
        };
        program
            .with_child(PathFragment::Field("body"), new_body)
            .map(Arc::new)
            .into_iter()
            .collect()
    })
}

fn switch(node: &Node, from: OpCode, to: OpCode) -> Option<NodeRef> {
    node.as_op(from).map(|args| op(to, args.to_vec()))
}
