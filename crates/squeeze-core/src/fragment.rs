//! Child addressing: path fragments and the per-kind slot tables.
//!
//! The slot order defined here is the canonical pre-order used by every
//! traversal in the workspace.

use std::fmt;

use crate::node::{Node, NodeKind, NodeRef};

/// Address of one child position under a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathFragment {
    /// Single-child field, e.g. `body`.
    Field(&'static str),
    /// Slot of an array-valued field, e.g. `children[2]`.
    Index(&'static str, usize),
}

impl PathFragment {
    pub fn field(self) -> &'static str {
        match self {
            PathFragment::Field(name) | PathFragment::Index(name, _) => name,
        }
    }
}

impl fmt::Display for PathFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathFragment::Field(name) => f.write_str(name),
            PathFragment::Index(name, index) => write!(f, "{name}[{index}]"),
        }
    }
}

use PathFragment::{Field, Index};

fn many<'a>(
    name: &'static str,
    nodes: &'a [NodeRef],
) -> impl Iterator<Item = (PathFragment, &'a NodeRef)> {
    nodes
        .iter()
        .enumerate()
        .map(move |(i, n)| (Index(name, i), n))
}

fn many_mut<'a>(
    name: &'static str,
    nodes: &'a mut [NodeRef],
) -> impl Iterator<Item = (PathFragment, &'a mut NodeRef)> {
    nodes
        .iter_mut()
        .enumerate()
        .map(move |(i, n)| (Index(name, i), n))
}

impl Node {
    /// Every present child with its fragment, in canonical order.
    pub fn slots(&self) -> Vec<(PathFragment, &NodeRef)> {
        let mut out = Vec::new();
        match &self.kind {
            NodeKind::Program { body } => out.push((Field("body"), body)),
            NodeKind::Block { children } => out.extend(many("children", children)),
            NodeKind::Variants { alternatives } => out.extend(many("alternatives", alternatives)),
            NodeKind::Integer { .. } | NodeKind::Text { .. } | NodeKind::Identifier { .. } => {}
            NodeKind::Op { args, .. } => out.extend(many("args", args)),
            NodeKind::FunctionCall { func, args } => {
                out.push((Field("func"), func));
                out.extend(many("args", args));
            }
            NodeKind::BinaryOp { left, right, .. } => {
                out.push((Field("left"), left));
                out.push((Field("right"), right));
            }
            NodeKind::UnaryOp { arg, .. } => out.push((Field("arg"), arg)),
            NodeKind::MutatingBinaryOp {
                variable, right, ..
            } => {
                out.push((Field("variable"), variable));
                out.push((Field("right"), right));
            }
            NodeKind::Assignment { variable, expr } => {
                out.push((Field("variable"), variable));
                out.push((Field("expr"), expr));
            }
            NodeKind::VarDeclarationWithAssignment { assignment } => {
                out.push((Field("assignment"), assignment))
            }
            NodeKind::IndexCall { collection, index } => {
                out.push((Field("collection"), collection));
                out.push((Field("index"), index));
            }
            NodeKind::RangeIndexCall {
                collection,
                low,
                high,
                step,
            } => {
                out.push((Field("collection"), collection));
                out.push((Field("low"), low));
                out.push((Field("high"), high));
                out.push((Field("step"), step));
            }
            NodeKind::List { items } => out.extend(many("items", items)),
            NodeKind::Table { pairs } => out.extend(many("pairs", pairs)),
            NodeKind::KeyValue { key, value } => {
                out.push((Field("key"), key));
                out.push((Field("value"), value));
            }
            NodeKind::If {
                condition,
                consequent,
                alternate,
            } => {
                out.push((Field("condition"), condition));
                out.push((Field("consequent"), consequent));
                if let Some(alternate) = alternate {
                    out.push((Field("alternate"), alternate));
                }
            }
            NodeKind::ConditionalOp {
                condition,
                consequent,
                alternate,
            } => {
                out.push((Field("condition"), condition));
                out.push((Field("consequent"), consequent));
                out.push((Field("alternate"), alternate));
            }
            NodeKind::While { condition, body } => {
                out.push((Field("condition"), condition));
                out.push((Field("body"), body));
            }
            NodeKind::ForRange {
                variable,
                low,
                high,
                step,
                body,
            } => {
                if let Some(variable) = variable {
                    out.push((Field("variable"), variable));
                }
                out.push((Field("low"), low));
                out.push((Field("high"), high));
                out.push((Field("step"), step));
                out.push((Field("body"), body));
            }
            NodeKind::ForEach {
                variable,
                collection,
                body,
            } => {
                if let Some(variable) = variable {
                    out.push((Field("variable"), variable));
                }
                out.push((Field("collection"), collection));
                out.push((Field("body"), body));
            }
        }
        out
    }

    /// Mutable counterpart of [`Node::slots`], same order.
    pub fn slots_mut(&mut self) -> Vec<(PathFragment, &mut NodeRef)> {
        let mut out = Vec::new();
        match &mut self.kind {
            NodeKind::Program { body } => out.push((Field("body"), body)),
            NodeKind::Block { children } => out.extend(many_mut("children", children)),
            NodeKind::Variants { alternatives } => {
                out.extend(many_mut("alternatives", alternatives))
            }
            NodeKind::Integer { .. } | NodeKind::Text { .. } | NodeKind::Identifier { .. } => {}
            NodeKind::Op { args, .. } => out.extend(many_mut("args", args)),
            NodeKind::FunctionCall { func, args } => {
                out.push((Field("func"), func));
                out.extend(many_mut("args", args));
            }
            NodeKind::BinaryOp { left, right, .. } => {
                out.push((Field("left"), left));
                out.push((Field("right"), right));
            }
            NodeKind::UnaryOp { arg, .. } => out.push((Field("arg"), arg)),
            NodeKind::MutatingBinaryOp {
                variable, right, ..
            } => {
                out.push((Field("variable"), variable));
                out.push((Field("right"), right));
            }
            NodeKind::Assignment { variable, expr } => {
                out.push((Field("variable"), variable));
                out.push((Field("expr"), expr));
            }
            NodeKind::VarDeclarationWithAssignment { assignment } => {
                out.push((Field("assignment"), assignment))
            }
            NodeKind::IndexCall { collection, index } => {
                out.push((Field("collection"), collection));
                out.push((Field("index"), index));
            }
            NodeKind::RangeIndexCall {
                collection,
                low,
                high,
                step,
            } => {
                out.push((Field("collection"), collection));
                out.push((Field("low"), low));
                out.push((Field("high"), high));
                out.push((Field("step"), step));
            }
            NodeKind::List { items } => out.extend(many_mut("items", items)),
            NodeKind::Table { pairs } => out.extend(many_mut("pairs", pairs)),
            NodeKind::KeyValue { key, value } => {
                out.push((Field("key"), key));
                out.push((Field("value"), value));
            }
            NodeKind::If {
                condition,
                consequent,
                alternate,
            } => {
                out.push((Field("condition"), condition));
                out.push((Field("consequent"), consequent));
                if let Some(alternate) = alternate {
                    out.push((Field("alternate"), alternate));
                }
            }
            NodeKind::ConditionalOp {
                condition,
                consequent,
                alternate,
            } => {
                out.push((Field("condition"), condition));
                out.push((Field("consequent"), consequent));
                out.push((Field("alternate"), alternate));
            }
            NodeKind::While { condition, body } => {
                out.push((Field("condition"), condition));
                out.push((Field("body"), body));
            }
            NodeKind::ForRange {
                variable,
                low,
                high,
                step,
                body,
            } => {
                if let Some(variable) = variable {
                    out.push((Field("variable"), variable));
                }
                out.push((Field("low"), low));
                out.push((Field("high"), high));
                out.push((Field("step"), step));
                out.push((Field("body"), body));
            }
            NodeKind::ForEach {
                variable,
                collection,
                body,
            } => {
                if let Some(variable) = variable {
                    out.push((Field("variable"), variable));
                }
                out.push((Field("collection"), collection));
                out.push((Field("body"), body));
            }
        }
        out
    }

    pub fn child_fragments(&self) -> Vec<PathFragment> {
        self.slots().into_iter().map(|(f, _)| f).collect()
    }

    pub fn child(&self, fragment: PathFragment) -> Option<&NodeRef> {
        self.slots()
            .into_iter()
            .find(|(f, _)| *f == fragment)
            .map(|(_, n)| n)
    }

    pub fn child_mut(&mut self, fragment: PathFragment) -> Option<&mut NodeRef> {
        self.slots_mut()
            .into_iter()
            .find(|(f, _)| *f == fragment)
            .map(|(_, n)| n)
    }

    /// Shallow copy with the slot at `fragment` replaced.
    ///
    /// Returns `None` if the fragment does not exist on this node's shape.
    /// All other children stay pointer-identical.
    pub fn with_child(&self, fragment: PathFragment, new_child: NodeRef) -> Option<Node> {
        let mut copy = self.clone();
        *copy.child_mut(fragment)? = new_child;
        Some(copy)
    }

    /// Direct children in canonical order.
    pub fn children(&self) -> impl Iterator<Item = &NodeRef> {
        self.slots().into_iter().map(|(_, n)| n)
    }
}
