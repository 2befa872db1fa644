//! Canonical structural signatures for search deduplication.
//!
//! The walk skips type annotations, which are a cache and not part of a
//! program's identity, and writes integers by value with an `n` suffix.

use squeeze_core::{Node, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Signature(String);

impl Signature {
    pub(crate) fn of(node: &Node) -> Self {
        let mut out = String::new();
        write_node(node, &mut out);
        Signature(out)
    }

    #[cfg(test)]
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

fn write_node(node: &Node, out: &mut String) {
    out.push_str(node.name());
    match &node.kind {
        NodeKind::Integer { value } => out.push_str(&format!(" {value}n")),
        NodeKind::Text { value } => out.push_str(&format!(" {value:?}")),
        NodeKind::Identifier { name } => out.push_str(&format!(" {name:?}")),
        NodeKind::Op { op, .. } => out.push_str(&format!(" {op}")),
        NodeKind::BinaryOp {
            op,
            name,
            precedence,
            right_associative,
            ..
        } => out.push_str(&format!(
            " {op} {name:?} {precedence} {right_associative}"
        )),
        NodeKind::UnaryOp {
            op,
            name,
            precedence,
            ..
        } => out.push_str(&format!(" {op} {name:?} {precedence}")),
        NodeKind::MutatingBinaryOp { op, name, .. } => {
            out.push_str(&format!(" {op} {name:?}"))
        }
        _ => {}
    }
    let slots = node.slots();
    if slots.is_empty() {
        return;
    }
    out.push('(');
    for (fragment, child) in slots {
        out.push_str(&format!("{fragment}="));
        write_node(child, out);
        out.push(';');
    }
    out.push(')');
}
