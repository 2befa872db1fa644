//! The IR itself as a target: an s-expression dump of the program.
//!
//! Only the type-annotation pass runs before emission, so `Variants` nodes
//! survive and print as `{a | b}`.

use squeeze_compiler::LanguageImpl;
use squeeze_compiler::emit::{
    DOUBLE_QUOTED, EmitError, TokenTree, detokenize_with, emit_text_literal, join_groups,
};
use squeeze_core::{Node, NodeKind, NodeRef};

use crate::sexpr::{self, list};

pub struct Ir;

impl LanguageImpl for Ir {
    fn name(&self) -> &'static str {
        "ir"
    }

    fn extension(&self) -> &'static str {
        "sq"
    }

    fn is_identity(&self) -> bool {
        true
    }

    fn emit(&self, program: &Node) -> Result<TokenTree, EmitError> {
        emit(program)
    }

    fn detokenize(&self, tree: &TokenTree) -> String {
        detokenize_with(tree, |prev, next| {
            prev == '|' || next == '|' || !(sexpr::is_bracket(prev) || sexpr::is_bracket(next))
        })
    }
}

fn emit_all<'a>(nodes: impl IntoIterator<Item = &'a NodeRef>) -> Result<Vec<TokenTree>, EmitError> {
    nodes.into_iter().map(|n| emit(n)).collect()
}

fn emit(node: &Node) -> Result<TokenTree, EmitError> {
    Ok(match &node.kind {
        NodeKind::Program { body } => emit(body)?,
        NodeKind::Variants { alternatives } => TokenTree::group([
            TokenTree::from("{"),
            join_groups(emit_all(alternatives)?, "|"),
            TokenTree::from("}"),
        ]),
        NodeKind::Integer { value } => value.to_string().into(),
        NodeKind::Text { value } => emit_text_literal(value, &[DOUBLE_QUOTED])
            .ok_or_else(|| EmitError::rejected(node, "no quoting option fits"))?
            .into(),
        NodeKind::Identifier { name } => format!("${name}").into(),
        NodeKind::Op { op, args } => list(op.name(), emit_all(args)?),
        NodeKind::BinaryOp {
            name, left, right, ..
        } => list(name.as_str(), [emit(left)?, emit(right)?]),
        NodeKind::UnaryOp { name, arg, .. } => list(name.as_str(), [emit(arg)?]),
        NodeKind::MutatingBinaryOp {
            name,
            variable,
            right,
            ..
        } => list(format!("{name}="), [emit(variable)?, emit(right)?]),
        _ => list(
            snake_case(node.name()),
            emit_all(node.slots().into_iter().map(|(_, child)| child))?,
        ),
    })
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
