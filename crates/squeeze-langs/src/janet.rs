//! Janet.

use std::sync::Arc;

use indexmap::IndexMap;
use squeeze_compiler::emit::{
    DOUBLE_QUOTED, EmitError, TextOption, TokenTree, emit_int_literal, emit_text_literal,
    if_chain,
};
use squeeze_compiler::plugins::ops::{OpMapper, map_ops, map_to_calls};
use squeeze_compiler::plugins::{arithmetic, binary_ops, print, tables};
use squeeze_compiler::{GolfRewrite, LanguageImpl, Phase, Plugin, Rewrite};
use squeeze_core::build::call;
use squeeze_core::{Node, NodeKind, NodeRef, OpCode};

use crate::sexpr::{self, list};

const INT_BASES: &[(u32, &str)] = &[(10, ""), (16, "0x"), (36, "36r")];

const TEXT_OPTIONS: &[TextOption] = &[
    DOUBLE_QUOTED,
    TextOption {
        open: "`\n",
        close: "\n`",
        escapes: &[],
        forbidden: has_backtick,
    },
    TextOption {
        open: "``\n",
        close: "\n``",
        escapes: &[],
        forbidden: has_double_backtick,
    },
    TextOption {
        open: "`",
        close: "`",
        escapes: &[],
        forbidden: unfit_for_short_backticks,
    },
];

fn has_backtick(s: &str) -> bool {
    s.contains('`')
}

fn has_double_backtick(s: &str) -> bool {
    s.contains("``")
}

/// A one-backtick string cannot be empty, and a newline right inside
/// either delimiter would be dropped by the reader.
fn unfit_for_short_backticks(s: &str) -> bool {
    s.is_empty() || s.contains('`') || s.starts_with('\n') || s.ends_with('\n')
}

const CALLS: &[(OpCode, &str)] = &[
    (OpCode::Add, "+"),
    (OpCode::Sub, "-"),
    (OpCode::Mul, "*"),
    (OpCode::Div, "div"),
    (OpCode::Mod, "mod"),
    (OpCode::Rem, "%"),
    (OpCode::Pow, "math/pow"),
    (OpCode::Neg, "-"),
    (OpCode::Lt, "<"),
    (OpCode::Leq, "<="),
    (OpCode::Eq, "="),
    (OpCode::Neq, "not="),
    (OpCode::Geq, ">="),
    (OpCode::Gt, ">"),
    (OpCode::And, "and"),
    (OpCode::Or, "or"),
    (OpCode::Not, "not"),
    (OpCode::BitAnd, "band"),
    (OpCode::BitOr, "bor"),
    (OpCode::BitXor, "bxor"),
    (OpCode::TextConcat, "string"),
    (OpCode::TextLength, "length"),
    (OpCode::ListGet, "in"),
    (OpCode::ListLength, "length"),
    (OpCode::TableGet, "in"),
    (OpCode::Print, "prin"),
    (OpCode::Println, "print"),
];

pub struct Janet {
    phases: Vec<Phase>,
    golf_plugins: Vec<Arc<dyn GolfRewrite>>,
    emit_plugins: Vec<Plugin>,
}

impl Janet {
    pub fn new() -> Self {
        Self {
            phases: vec![Phase::new(vec![tables::table_to_list_lookup()])],
            golf_plugins: vec![
                arithmetic::fold_constants(),
                binary_ops::flip_binary_ops(),
                arithmetic::equality_to_inequality(),
                // `prin` is shorter than `print`
                print::golf_last_print(false),
            ],
            emit_plugins: vec![index_of().into(), map_to_calls(CALLS).into()],
        }
    }
}

impl Default for Janet {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageImpl for Janet {
    fn name(&self) -> &'static str {
        "janet"
    }

    fn extension(&self) -> &'static str {
        "janet"
    }

    fn emit(&self, program: &Node) -> Result<TokenTree, EmitError> {
        statements(program, false)
    }

    fn detokenize(&self, tree: &TokenTree) -> String {
        sexpr::detokenize(tree)
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

/// `list_find(list, x)` to `(index-of x list)`.
fn index_of() -> Arc<dyn Rewrite> {
    let mapper: OpMapper = Arc::new(|args: &[NodeRef]| match args {
        [list, x] => Some(call("index-of", vec![x.clone(), list.clone()])),
        _ => None,
    });
    map_ops("index_of", IndexMap::from([(OpCode::ListFind, mapper)]))
}

fn emit_all(nodes: &[NodeRef]) -> Result<Vec<TokenTree>, EmitError> {
    nodes.iter().map(|n| emit(n)).collect()
}

/// Statements of a body spliced in place, or wrapped in `(do ...)` where a
/// single form is expected.
fn statements(node: &Node, needs_do: bool) -> Result<TokenTree, EmitError> {
    match &node.kind {
        NodeKind::Program { body } => statements(body, false),
        NodeKind::Block { children } if needs_do => Ok(list("do", emit_all(children)?)),
        NodeKind::Block { children } => Ok(TokenTree::Group(emit_all(children)?)),
        _ => emit(node),
    }
}

fn variable(variable: Option<&NodeRef>) -> Result<TokenTree, EmitError> {
    variable.map_or(Ok(TokenTree::from("_")), |v| emit(v))
}

fn emit(node: &Node) -> Result<TokenTree, EmitError> {
    Ok(match &node.kind {
        NodeKind::Block { .. } => statements(node, false)?,
        NodeKind::While { condition, body } => {
            list("while", [emit(condition)?, statements(body, false)?])
        }
        NodeKind::ForRange {
            variable: var,
            low,
            high,
            step,
            body,
        } => {
            let var = variable(var.as_ref())?;
            if step.is_int(1) {
                list(
                    "for",
                    [var, emit(low)?, emit(high)?, statements(body, false)?],
                )
            } else {
                let binding = TokenTree::group([
                    TokenTree::from("["),
                    var,
                    TokenTree::from(":range"),
                    TokenTree::from("["),
                    emit(low)?,
                    emit(high)?,
                    emit(step)?,
                    TokenTree::from("]"),
                    TokenTree::from("]"),
                ]);
                list("loop", [binding, statements(body, false)?])
            }
        }
        NodeKind::ForEach {
            variable: var,
            collection,
            body,
        } => list(
            "each",
            [variable(var.as_ref())?, emit(collection)?, statements(body, false)?],
        ),
        NodeKind::If { .. } | NodeKind::ConditionalOp { .. } => conditional(node)?,
        NodeKind::VarDeclarationWithAssignment { assignment } => {
            let NodeKind::Assignment { variable, expr } = &assignment.kind else {
                return Err(EmitError::rejected(
                    node,
                    format!("declaration cannot contain {}", assignment.name()),
                ));
            };
            list("var", [emit(variable)?, emit(expr)?])
        }
        NodeKind::Assignment { variable, expr } => list("set", [emit(variable)?, emit(expr)?]),
        NodeKind::Identifier { name } => name.as_str().into(),
        NodeKind::Text { value } => emit_text_literal(value, TEXT_OPTIONS)
            .ok_or_else(|| EmitError::rejected(node, "no quoting option fits"))?
            .into(),
        NodeKind::Integer { value } => emit_int_literal(value, INT_BASES).into(),
        NodeKind::FunctionCall { func, args } => list(emit(func)?, emit_all(args)?),
        NodeKind::RangeIndexCall {
            collection,
            low,
            high,
            step,
        } => {
            if !step.is_int(1) {
                return Err(EmitError::rejected(node, "step not equal one"));
            }
            if low.is_int(0) {
                list("take", [emit(high)?, emit(collection)?])
            } else {
                list("slice", [emit(collection)?, emit(low)?, emit(high)?])
            }
        }
        NodeKind::List { items } => TokenTree::group([
            TokenTree::from("@["),
            TokenTree::Group(emit_all(items)?),
            TokenTree::from("]"),
        ]),
        NodeKind::Table { pairs } => TokenTree::group([
            TokenTree::from("@{"),
            TokenTree::Group(emit_all(pairs)?),
            TokenTree::from("}"),
        ]),
        NodeKind::KeyValue { key, value } => TokenTree::group([emit(key)?, emit(value)?]),
        _ => return Err(EmitError::unsupported(node)),
    })
}

/// `if`, or `cond` for an `else if` chain. Statement branches holding
/// several statements are wrapped in `do`.
fn conditional(node: &Node) -> Result<TokenTree, EmitError> {
    let Some(chain) = if_chain(node) else {
        return Err(EmitError::unsupported(node));
    };
    let expression = matches!(node.kind, NodeKind::ConditionalOp { .. });
    let branch = |n: &Node| {
        if expression {
            emit(n)
        } else {
            statements(n, true)
        }
    };
    let mut items = Vec::with_capacity(chain.branches.len() * 2 + 1);
    for (condition, consequent) in &chain.branches {
        items.push(emit(condition)?);
        items.push(branch(consequent)?);
    }
    if let Some(alternate) = chain.alternate {
        items.push(branch(alternate)?);
    }
    let head = if chain.branches.len() > 1 { "cond" } else { "if" };
    Ok(list(head, items))
}
