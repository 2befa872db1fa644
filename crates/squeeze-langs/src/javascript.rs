//! JavaScript.
//!
//! Operators are lowered to infix form as a phase, so the search works on
//! the infix tree and can introduce compound assignments.

use std::sync::Arc;

use indexmap::IndexMap;
use squeeze_compiler::emit::{
    DOUBLE_QUOTED, EmitError, TextOption, TokenTree, detokenize_with, emit_int_literal,
    emit_text_literal, if_chain, is_ident_char, join_groups, needs_parens, no_restriction,
};
use squeeze_compiler::plugins::ops::{
    Infix, OpMapper, map_ops, map_to_calls, map_to_infix, unwrap_single_block,
};
use squeeze_compiler::plugins::{arithmetic, binary_ops};
use squeeze_compiler::{GolfRewrite, LanguageImpl, Phase, Plugin, Rewrite};
use squeeze_core::build::{binary_op, call, index_call};
use squeeze_core::{Node, NodeKind, NodeRef, OpCode, PathFragment};

const INT_BASES: &[(u32, &str)] = &[(10, ""), (16, "0x")];

const TEXT_OPTIONS: &[TextOption] = &[
    DOUBLE_QUOTED,
    TextOption {
        open: "'",
        close: "'",
        escapes: &[('\\', "\\\\"), ('\n', "\\n"), ('\r', "\\r"), ('\'', "\\'")],
        forbidden: no_restriction,
    },
];

const DIVISION: u8 = 14;

const INFIX: &[Infix] = &[
    Infix::right(OpCode::Pow, "**", 16),
    Infix::left(OpCode::Neg, "-", 15),
    Infix::left(OpCode::Not, "!", 15),
    Infix::left(OpCode::Mul, "*", DIVISION),
    Infix::left(OpCode::Rem, "%", DIVISION),
    Infix::left(OpCode::Add, "+", 13),
    Infix::left(OpCode::Sub, "-", 13),
    Infix::left(OpCode::TextConcat, "+", 13),
    Infix::left(OpCode::Lt, "<", 11),
    Infix::left(OpCode::Leq, "<=", 11),
    Infix::left(OpCode::Geq, ">=", 11),
    Infix::left(OpCode::Gt, ">", 11),
    Infix::left(OpCode::Eq, "==", 10),
    Infix::left(OpCode::Neq, "!=", 10),
    Infix::left(OpCode::BitAnd, "&", 9),
    Infix::left(OpCode::BitXor, "^", 8),
    Infix::left(OpCode::BitOr, "|", 7),
    Infix::left(OpCode::And, "&&", 6),
    Infix::left(OpCode::Or, "||", 5),
];

const CALLS: &[(OpCode, &str)] = &[(OpCode::Print, "write"), (OpCode::Println, "print")];

pub struct JavaScript {
    phases: Vec<Phase>,
    golf_plugins: Vec<Arc<dyn GolfRewrite>>,
    emit_plugins: Vec<Plugin>,
}

impl JavaScript {
    pub fn new() -> Self {
        Self {
            phases: vec![
                Phase::new(vec![arithmetic::mod_to_rem(), arithmetic::div_to_trunc_div()]),
                Phase::new(vec![lower_ops(), map_to_infix(INFIX), map_to_calls(CALLS)]),
            ],
            golf_plugins: vec![
                arithmetic::fold_constants(),
                binary_ops::flip_binary_ops(),
                binary_ops::add_mutating_binary_op(&[
                    "+", "-", "*", "%", "**", "&", "|", "^", "&&", "||",
                ]),
            ],
            emit_plugins: vec![unwrap_single_block().into()],
        }
    }
}

impl Default for JavaScript {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageImpl for JavaScript {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn extension(&self) -> &'static str {
        "js"
    }

    fn emit(&self, program: &Node) -> Result<TokenTree, EmitError> {
        emit(program)
    }

    /// `a- -b` and `a+ +b` keep their space, unlike other punctuation.
    fn detokenize(&self, tree: &TokenTree) -> String {
        detokenize_with(tree, |prev, next| {
            (is_ident_char(prev) && is_ident_char(next))
                || (prev == '-' && next == '-')
                || (prev == '+' && next == '+')
        })
    }

    fn phases(&self) -> &[Phase] {
        &self.phases
    }

    fn golf_plugins(&self) -> &[Arc<dyn GolfRewrite>] {
        &self.golf_plugins
    }

    fn emit_plugins(&self) -> &[Plugin] {
        &self.emit_plugins
    }
}

fn division(a: &NodeRef, b: &NodeRef) -> NodeRef {
    binary_op(OpCode::Div, "/", DIVISION, false, a.clone(), b.clone())
}

/// Ops with a non-operator spelling: indexing and integer division.
fn lower_ops() -> Arc<dyn Rewrite> {
    let indexing: OpMapper = Arc::new(|args: &[NodeRef]| match args {
        [collection, index] => Some(index_call(collection.clone(), index.clone())),
        _ => None,
    });
    let floor: OpMapper = Arc::new(|args: &[NodeRef]| match args {
        [a, b] => Some(call("Math.floor", vec![division(a, b)])),
        _ => None,
    });
    let trunc: OpMapper = Arc::new(|args: &[NodeRef]| match args {
        [a, b] => Some(call("Math.trunc", vec![division(a, b)])),
        _ => None,
    });
    map_ops(
        "lower_ops",
        IndexMap::from([
            (OpCode::ListGet, Arc::clone(&indexing)),
            (OpCode::TableGet, indexing),
            (OpCode::Div, floor),
            (OpCode::TruncDiv, trunc),
        ]),
    )
}

fn group<const N: usize>(items: [TokenTree; N]) -> TokenTree {
    TokenTree::group(items)
}

fn emit_all(nodes: &[NodeRef], sep: &str) -> Result<TokenTree, EmitError> {
    let groups = nodes
        .iter()
        .map(|n| emit(n))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(join_groups(groups, sep))
}

fn parenthesized(inner: TokenTree) -> TokenTree {
    group([TokenTree::from("("), inner, TokenTree::from(")")])
}

/// `expr` as an operand of `parent`, parenthesized where precedence needs it.
fn operand(expr: &Node, parent: &Node, fragment: &'static str) -> Result<TokenTree, EmitError> {
    let inner = emit(expr)?;
    let wrap = needs_parens(expr, parent, Some(PathFragment::Field(fragment)))
        || matches!(expr.kind, NodeKind::ConditionalOp { .. })
        || (fragment == "left" && is_exponent(parent) && is_negative(expr));
    Ok(if wrap { parenthesized(inner) } else { inner })
}

fn is_exponent(node: &Node) -> bool {
    matches!(node.kind, NodeKind::BinaryOp { op: OpCode::Pow, .. })
}

/// `-2**2` is a syntax error.
fn is_negative(node: &Node) -> bool {
    match &node.kind {
        NodeKind::UnaryOp { .. } => true,
        NodeKind::Integer { value } => value.sign() == num_bigint::Sign::Minus,
        _ => false,
    }
}

/// `expr` as the receiver of a member access or call.
fn receiver(expr: &Node) -> Result<TokenTree, EmitError> {
    let inner = emit(expr)?;
    let bare = matches!(
        expr.kind,
        NodeKind::Identifier { .. }
            | NodeKind::Text { .. }
            | NodeKind::List { .. }
            | NodeKind::FunctionCall { .. }
            | NodeKind::IndexCall { .. }
    );
    Ok(if bare { inner } else { parenthesized(inner) })
}

/// A loop or branch body; statements of a multi-statement block are braced.
fn body(node: &Node) -> Result<TokenTree, EmitError> {
    match &node.kind {
        NodeKind::Block { children } if children.len() != 1 => Ok(group([
            TokenTree::from("{"),
            emit_all(children, ";")?,
            TokenTree::from("}"),
        ])),
        _ => emit(node),
    }
}

fn variable(variable: Option<&NodeRef>) -> Result<TokenTree, EmitError> {
    variable.map_or(Ok(TokenTree::from("_")), |v| emit(v))
}

fn emit(node: &Node) -> Result<TokenTree, EmitError> {
    Ok(match &node.kind {
        NodeKind::Program { body } => emit(body)?,
        NodeKind::Block { children } => emit_all(children, ";")?,
        NodeKind::Integer { value } => emit_int_literal(value, INT_BASES).into(),
        NodeKind::Text { value } => emit_text_literal(value, TEXT_OPTIONS)
            .ok_or_else(|| EmitError::rejected(node, "no quoting option fits"))?
            .into(),
        NodeKind::Identifier { name } => name.as_str().into(),
        NodeKind::BinaryOp {
            name, left, right, ..
        } => group([
            operand(left, node, "left")?,
            TokenTree::from(name.as_str()),
            operand(right, node, "right")?,
        ]),
        NodeKind::UnaryOp { name, arg, .. } => {
            group([TokenTree::from(name.as_str()), operand(arg, node, "arg")?])
        }
        NodeKind::MutatingBinaryOp {
            name,
            variable,
            right,
            ..
        } => group([
            emit(variable)?,
            TokenTree::from(format!("{name}=")),
            emit(right)?,
        ]),
        NodeKind::Assignment { variable, expr } => {
            group([emit(variable)?, TokenTree::from("="), emit(expr)?])
        }
        // Undeclared assignment creates a global.
        NodeKind::VarDeclarationWithAssignment { assignment } => {
            if !matches!(assignment.kind, NodeKind::Assignment { .. }) {
                return Err(EmitError::rejected(
                    node,
                    format!("declaration cannot contain {}", assignment.name()),
                ));
            }
            emit(assignment)?
        }
        NodeKind::FunctionCall { func, args } => group([
            emit(func)?,
            TokenTree::from("("),
            emit_all(args, ",")?,
            TokenTree::from(")"),
        ]),
        NodeKind::IndexCall { collection, index } => group([
            receiver(collection)?,
            TokenTree::from("["),
            emit(index)?,
            TokenTree::from("]"),
        ]),
        NodeKind::RangeIndexCall {
            collection,
            low,
            high,
            step,
        } => {
            if !step.is_int(1) {
                return Err(EmitError::rejected(node, "step not equal one"));
            }
            group([
                receiver(collection)?,
                TokenTree::from(".slice("),
                emit(low)?,
                TokenTree::from(","),
                emit(high)?,
                TokenTree::from(")"),
            ])
        }
        NodeKind::Op {
            op: OpCode::TextLength | OpCode::ListLength,
            args,
        } => match args.as_slice() {
            [x] => group([receiver(x)?, TokenTree::from(".length")]),
            _ => return Err(EmitError::unsupported(node)),
        },
        NodeKind::Op {
            op: OpCode::ListFind,
            args,
        } => match args.as_slice() {
            [list, x] => group([
                receiver(list)?,
                TokenTree::from(".indexOf("),
                emit(x)?,
                TokenTree::from(")"),
            ]),
            _ => return Err(EmitError::unsupported(node)),
        },
        NodeKind::List { items } => group([
            TokenTree::from("["),
            emit_all(items, ",")?,
            TokenTree::from("]"),
        ]),
        NodeKind::Table { pairs } => group([
            TokenTree::from("{"),
            emit_all(pairs, ",")?,
            TokenTree::from("}"),
        ]),
        NodeKind::KeyValue { key, value } => group([emit(key)?, TokenTree::from(":"), emit(value)?]),
        NodeKind::If { .. } => if_statement(node)?,
        NodeKind::ConditionalOp {
            condition,
            consequent,
            alternate,
        } => group([
            operand(condition, node, "condition")?,
            TokenTree::from("?"),
            emit(consequent)?,
            TokenTree::from(":"),
            emit(alternate)?,
        ]),
        NodeKind::While { condition, body: inner } => group([
            TokenTree::from("while("),
            emit(condition)?,
            TokenTree::from(")"),
            body(inner)?,
        ]),
        NodeKind::ForRange {
            variable: var,
            low,
            high,
            step,
            body: inner,
        } => {
            let var = variable(var.as_ref())?;
            let increment = if step.is_int(1) {
                group([var.clone(), TokenTree::from("++")])
            } else {
                group([var.clone(), TokenTree::from("+="), emit(step)?])
            };
            group([
                TokenTree::from("for("),
                var.clone(),
                TokenTree::from("="),
                emit(low)?,
                TokenTree::from(";"),
                var,
                TokenTree::from("<"),
                emit(high)?,
                TokenTree::from(";"),
                increment,
                TokenTree::from(")"),
                body(inner)?,
            ])
        }
        NodeKind::ForEach {
            variable: var,
            collection,
            body: inner,
        } => group([
            TokenTree::from("for("),
            variable(var.as_ref())?,
            TokenTree::from("of"),
            emit(collection)?,
            TokenTree::from(")"),
            body(inner)?,
        ]),
        _ => return Err(EmitError::unsupported(node)),
    })
}

/// `if(c)a;else if(d)b;else e`; a braced branch needs no `;` before `else`.
fn if_statement(node: &Node) -> Result<TokenTree, EmitError> {
    let Some(chain) = if_chain(node) else {
        return Err(EmitError::unsupported(node));
    };
    let last = chain.branches.len() - 1;
    let mut out = Vec::new();
    for (i, (condition, consequent)) in chain.branches.iter().enumerate() {
        if i > 0 {
            out.push(TokenTree::from("else"));
        }
        out.push(TokenTree::from("if("));
        out.push(emit(condition)?);
        out.push(TokenTree::from(")"));
        if i < last || chain.alternate.is_some() {
            out.push(branch(consequent)?);
        } else {
            out.push(body(consequent)?);
        }
    }
    if let Some(alternate) = chain.alternate {
        out.push(TokenTree::from("else"));
        out.push(body(alternate)?);
    }
    Ok(TokenTree::Group(out))
}

/// A branch followed by `else`.
fn branch(node: &Node) -> Result<TokenTree, EmitError> {
    let inner = body(node)?;
    Ok(if ends_in_open_if(node) {
        group([TokenTree::from("{"), inner, TokenTree::from("}")])
    } else if ends_in_braces(node) {
        inner
    } else {
        group([inner, TokenTree::from(";")])
    })
}

/// Whether the statement ends in an `if` without `else`, which would capture
/// a following `else`.
fn ends_in_open_if(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Block { children } => match children.as_slice() {
            [only] => ends_in_open_if(only),
            _ => false,
        },
        NodeKind::If { alternate, .. } => alternate.as_deref().is_none_or(ends_in_open_if),
        NodeKind::While { body, .. }
        | NodeKind::ForRange { body, .. }
        | NodeKind::ForEach { body, .. } => ends_in_open_if(body),
        _ => false,
    }
}

/// Whether the emitted statement closes with a block brace, so `;` before
/// `else` would end the `if`.
fn ends_in_braces(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Block { children } => match children.as_slice() {
            [only] => ends_in_braces(only),
            _ => true,
        },
        NodeKind::If { alternate, .. } => alternate.as_deref().is_some_and(ends_in_braces),
        NodeKind::While { body, .. }
        | NodeKind::ForRange { body, .. }
        | NodeKind::ForEach { body, .. } => ends_in_braces(body),
        _ => false,
    }
}
