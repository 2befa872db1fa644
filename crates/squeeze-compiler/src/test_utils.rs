//! A small call-syntax language for exercising the pipeline.

use std::sync::Arc;

use squeeze_core::{Node, NodeKind, NodeRef, PathFragment, Spine};

use crate::emit::{
    EmitError, TextOption, TokenTree, emit_int_literal, emit_text_literal, join_groups,
    needs_parens,
};
use crate::language::{Lang, LanguageImpl};
use crate::phases::{Phase, apply_rewrite};
use crate::plugin::{GolfRewrite, Plugin, Rewrite};

/// Double quotes without escapes: texts containing `"` are rejected.
const PLAIN_QUOTED: TextOption = TextOption {
    open: "\"",
    close: "\"",
    escapes: &[],
    forbidden: has_quote,
};

fn has_quote(s: &str) -> bool {
    s.contains('"')
}

/// Renders ops as calls (`add(1,2)`), statements separated by `;`.
#[derive(Default)]
pub struct TestLang {
    identity: bool,
    phases: Vec<Phase>,
    golf_plugins: Vec<Arc<dyn GolfRewrite>>,
    emit_plugins: Vec<Plugin>,
}

impl TestLang {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity() -> Self {
        Self {
            identity: true,
            ..Self::default()
        }
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn golf(mut self, plugin: Arc<dyn GolfRewrite>) -> Self {
        self.golf_plugins.push(plugin);
        self
    }

    pub fn emit_plugin(mut self, plugin: impl Into<Plugin>) -> Self {
        self.emit_plugins.push(plugin.into());
        self
    }

    pub fn into_lang(self) -> Lang {
        Arc::new(self)
    }
}

impl LanguageImpl for TestLang {
    fn name(&self) -> &'static str {
        "test"
    }

    fn extension(&self) -> &'static str {
        "test"
    }

    fn is_identity(&self) -> bool {
        self.identity
    }

    fn emit(&self, program: &Node) -> Result<TokenTree, EmitError> {
        emit_node(program)
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

fn emit_all(nodes: &[NodeRef], sep: &str) -> Result<TokenTree, EmitError> {
    let groups = nodes
        .iter()
        .map(|n| emit_node(n))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(join_groups(groups, sep))
}

fn emit_operand(
    expr: &Node,
    parent: &Node,
    fragment: PathFragment,
) -> Result<TokenTree, EmitError> {
    let inner = emit_node(expr)?;
    if needs_parens(expr, parent, Some(fragment)) {
        return Ok(TokenTree::group([TokenTree::from("("), inner, TokenTree::from(")")]));
    }
    Ok(inner)
}

pub fn emit_node(node: &Node) -> Result<TokenTree, EmitError> {
    Ok(match &node.kind {
        NodeKind::Program { body } => emit_node(body)?,
        NodeKind::Block { children } => emit_all(children, ";")?,
        NodeKind::Integer { value } => emit_int_literal(value, &[(10, "")]).into(),
        NodeKind::Text { value } => emit_text_literal(value, &[PLAIN_QUOTED])
            .ok_or_else(|| EmitError::rejected(node, "no quoting option fits"))?
            .into(),
        NodeKind::Identifier { name } => name.as_str().into(),
        NodeKind::Op { op, args } => TokenTree::group([
            TokenTree::from(op.name()),
            TokenTree::from("("),
            emit_all(args, ",")?,
            TokenTree::from(")"),
        ]),
        NodeKind::FunctionCall { func, args } => TokenTree::group([
            emit_node(func)?,
            TokenTree::from("("),
            emit_all(args, ",")?,
            TokenTree::from(")"),
        ]),
        NodeKind::BinaryOp {
            name, left, right, ..
        } => TokenTree::group([
            emit_operand(left, node, PathFragment::Field("left"))?,
            TokenTree::from(name.as_str()),
            emit_operand(right, node, PathFragment::Field("right"))?,
        ]),
        NodeKind::UnaryOp { name, arg, .. } => TokenTree::group([
            TokenTree::from(name.as_str()),
            emit_operand(arg, node, PathFragment::Field("arg"))?,
        ]),
        NodeKind::MutatingBinaryOp {
            name,
            variable,
            right,
            ..
        } => TokenTree::group([
            emit_node(variable)?,
            TokenTree::from(format!("{name}=")),
            emit_node(right)?,
        ]),
        NodeKind::Assignment { variable, expr } => TokenTree::group([
            emit_node(variable)?,
            TokenTree::from("="),
            emit_node(expr)?,
        ]),
        NodeKind::IndexCall { collection, index } => TokenTree::group([
            emit_node(collection)?,
            TokenTree::from("["),
            emit_node(index)?,
            TokenTree::from("]"),
        ]),
        NodeKind::List { items } => TokenTree::group([
            TokenTree::from("["),
            emit_all(items, ",")?,
            TokenTree::from("]"),
        ]),
        _ => return Err(EmitError::unsupported(node)),
    })
}

/// Emits `program` with [`TestLang`]'s emitter and the default detokenizer.
pub fn render(program: &Node) -> String {
    crate::emit::detokenize(&emit_node(program).expect("test program emits"))
}

/// The node at the first pre-order position where `pred` holds.
pub fn find(program: &NodeRef, pred: impl Fn(&Node) -> bool) -> Spine {
    Spine::from_program(Arc::clone(program))
        .descendants()
        .find(|s| pred(s.node()))
        .expect("matching node")
}

/// `program` after one pass of `plugin`, rendered.
pub fn rewritten(program: &NodeRef, plugin: &dyn Rewrite) -> String {
    render(&apply_rewrite(program, plugin))
}

/// Every whole program `plugin` proposes for `program`, rendered, in
/// pre-order of the rewritten position.
pub fn golfed(program: &NodeRef, plugin: &dyn GolfRewrite) -> Vec<String> {
    Spine::from_program(Arc::clone(program))
        .descendants()
        .flat_map(|site| {
            plugin
                .golf(&site)
                .map(|node| render(site.replaced_with(node).root().node()))
                .collect::<Vec<_>>()
        })
        .collect()
}
