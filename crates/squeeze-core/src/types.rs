//! Value types and the type/range oracle.
//!
//! Rewrites ask [`type_of`] for the type of a node in the context of its
//! program. Integer types carry a closed range whose ends may be unbounded,
//! which is what lets plugins prove facts such as "the divisor is never
//! negative".

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeKind, NodeRef, OpCode};
use crate::spine::Spine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Void,
    Boolean,
    Integer(IntRange),
    Text,
    List { item: Box<Type> },
    Table { key: Box<Type>, value: Box<Type> },
}

/// Closed integer range; `None` on either side means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntRange {
    #[serde(default, with = "crate::serde_int::opt")]
    pub low: Option<BigInt>,
    #[serde(default, with = "crate::serde_int::opt")]
    pub high: Option<BigInt>,
}

impl IntRange {
    pub fn new(low: Option<BigInt>, high: Option<BigInt>) -> Self {
        Self { low, high }
    }

    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub fn bounded(low: impl Into<BigInt>, high: impl Into<BigInt>) -> Self {
        Self::new(Some(low.into()), Some(high.into()))
    }

    pub fn constant(value: impl Into<BigInt>) -> Self {
        let value = value.into();
        Self::new(Some(value.clone()), Some(value))
    }

    pub fn at_least(low: impl Into<BigInt>) -> Self {
        Self::new(Some(low.into()), None)
    }

    pub fn is_constant(&self) -> bool {
        matches!((&self.low, &self.high), (Some(l), Some(h)) if l == h)
    }

    pub fn constant_value(&self) -> Option<&BigInt> {
        match (&self.low, &self.high) {
            (Some(l), Some(h)) if l == h => Some(l),
            _ => None,
        }
    }

    /// `0 <= low`.
    pub fn is_non_negative(&self) -> bool {
        self.low.as_ref().is_some_and(|l| !l.is_negative())
    }

    pub fn union(&self, other: &IntRange) -> IntRange {
        let low = match (&self.low, &other.low) {
            (Some(a), Some(b)) => Some(a.min(b).clone()),
            _ => None,
        };
        let high = match (&self.high, &other.high) {
            (Some(a), Some(b)) => Some(a.max(b).clone()),
            _ => None,
        };
        IntRange::new(low, high)
    }

    pub fn add(&self, other: &IntRange) -> IntRange {
        IntRange::new(
            zip_bounds(&self.low, &other.low, |a, b| a + b),
            zip_bounds(&self.high, &other.high, |a, b| a + b),
        )
    }

    pub fn neg(&self) -> IntRange {
        IntRange::new(self.high.as_ref().map(|h| -h), self.low.as_ref().map(|l| -l))
    }

    pub fn sub(&self, other: &IntRange) -> IntRange {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &IntRange) -> IntRange {
        if self.constant_value().is_some_and(Zero::is_zero)
            || other.constant_value().is_some_and(Zero::is_zero)
        {
            return IntRange::constant(0);
        }
        if let (Some(a), Some(b), Some(c), Some(d)) = (&self.low, &self.high, &other.low, &other.high)
        {
            let products = [a * c, a * d, b * c, b * d];
            let low = products.iter().min().cloned();
            let high = products.iter().max().cloned();
            return IntRange::new(low, high);
        }
        if self.is_non_negative() && other.is_non_negative() {
            return IntRange::new(zip_bounds(&self.low, &other.low, |a, b| a * b), None);
        }
        IntRange::unbounded()
    }
}

fn zip_bounds(
    a: &Option<BigInt>,
    b: &Option<BigInt>,
    f: impl Fn(&BigInt, &BigInt) -> BigInt,
) -> Option<BigInt> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        _ => None,
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.low {
            Some(l) => write!(f, "{l}")?,
            None => f.write_str("-oo")?,
        }
        f.write_str("..")?;
        match &self.high {
            Some(h) => write!(f, "{h}"),
            None => f.write_str("oo"),
        }
    }
}

impl Type {
    pub fn integer(low: impl Into<BigInt>, high: impl Into<BigInt>) -> Type {
        Type::Integer(IntRange::bounded(low, high))
    }

    pub fn any_integer() -> Type {
        Type::Integer(IntRange::unbounded())
    }

    pub fn list(item: Type) -> Type {
        Type::List {
            item: Box::new(item),
        }
    }

    pub fn table(key: Type, value: Type) -> Type {
        Type::Table {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn as_int_range(&self) -> Option<&IntRange> {
        match self {
            Type::Integer(range) => Some(range),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.as_int_range().is_some_and(IntRange::is_constant)
    }

    /// Least common type: integer ranges merge, otherwise `self` wins.
    pub fn union(&self, other: &Type) -> Type {
        match (self, other) {
            (Type::Integer(a), Type::Integer(b)) => Type::Integer(a.union(b)),
            (Type::List { item: a }, Type::List { item: b }) => Type::list(a.union(b)),
            (Type::Table { key: k1, value: v1 }, Type::Table { key: k2, value: v2 }) => {
                Type::table(k1.union(k2), v1.union(v2))
            }
            (a, _) => a.clone(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Boolean => f.write_str("boolean"),
            Type::Integer(range) => write!(f, "integer[{range}]"),
            Type::Text => f.write_str("text"),
            Type::List { item } => write!(f, "list<{item}>"),
            Type::Table { key, value } => write!(f, "table<{key}, {value}>"),
        }
    }
}

/// Type of `node` in the program that `context` belongs to.
///
/// A present `ty` annotation is trusted as-is; everything else is derived
/// from the node's shape.
pub fn type_of(node: &Node, context: &Spine) -> Type {
    Inference::new(context.program()).type_of(node)
}

/// Type of `node` in `program`, for callers that hold no spine.
pub fn type_in_program(node: &Node, program: &NodeRef) -> Type {
    Inference::new(program).type_of(node)
}

/// Fills in `ty` on every expression node that has none.
///
/// Annotations are a cache: later rewrites may drop them and the oracle
/// recomputes on demand.
pub fn annotate(program: &NodeRef) -> NodeRef {
    let inference = Inference::new(program);
    Spine::from_program(Arc::clone(program))
        .with_replacer(|node, _| {
            if node.ty.is_some() || !node.is_expression() {
                return None;
            }
            let ty = inference.type_of(node);
            Some(Arc::new(node.clone().with_ty(ty)))
        })
        .node()
        .clone()
}

struct Inference<'a> {
    program: &'a NodeRef,
    /// Identifiers whose assignments are being resolved, to cut cycles
    /// such as `x = x + 1`.
    resolving: RefCell<Vec<String>>,
}

impl<'a> Inference<'a> {
    fn new(program: &'a NodeRef) -> Self {
        Self {
            program,
            resolving: RefCell::new(Vec::new()),
        }
    }

    fn type_of(&self, node: &Node) -> Type {
        if let Some(ty) = &node.ty {
            return ty.clone();
        }
        match &node.kind {
            NodeKind::Integer { value } => Type::Integer(IntRange::constant(value.clone())),
            NodeKind::Text { .. } => Type::Text,
            NodeKind::Identifier { name } => self.identifier(name),
            NodeKind::Op { op, args } => self.op(*op, args),
            NodeKind::BinaryOp {
                op, left, right, ..
            } => self.op(*op, &[left.clone(), right.clone()]),
            NodeKind::UnaryOp { op, arg, .. } => self.op(*op, std::slice::from_ref(arg)),
            NodeKind::FunctionCall { .. } => Type::any_integer(),
            NodeKind::List { items } => Type::list(self.union_all(items.iter()).unwrap_or(Type::Void)),
            NodeKind::Table { pairs } => {
                let mut key: Option<Type> = None;
                let mut value: Option<Type> = None;
                for pair in pairs {
                    if let NodeKind::KeyValue { key: k, value: v } = &pair.kind {
                        let (kt, vt) = (self.type_of(k), self.type_of(v));
                        key = Some(key.map_or(kt.clone(), |t| t.union(&kt)));
                        value = Some(value.map_or(vt.clone(), |t| t.union(&vt)));
                    }
                }
                Type::table(key.unwrap_or(Type::Void), value.unwrap_or(Type::Void))
            }
            NodeKind::IndexCall { collection, .. } => self.element(&self.type_of(collection)),
            NodeKind::RangeIndexCall { collection, .. } => self.type_of(collection),
            NodeKind::ConditionalOp {
                consequent,
                alternate,
                ..
            } => self.type_of(consequent).union(&self.type_of(alternate)),
            NodeKind::Variants { alternatives } => alternatives
                .first()
                .map_or(Type::Void, |alt| self.type_of(alt)),
            NodeKind::Program { .. }
            | NodeKind::Block { .. }
            | NodeKind::MutatingBinaryOp { .. }
            | NodeKind::Assignment { .. }
            | NodeKind::VarDeclarationWithAssignment { .. }
            | NodeKind::KeyValue { .. }
            | NodeKind::If { .. }
            | NodeKind::While { .. }
            | NodeKind::ForRange { .. }
            | NodeKind::ForEach { .. } => Type::Void,
        }
    }

    fn union_all<'n>(&self, nodes: impl Iterator<Item = &'n NodeRef>) -> Option<Type> {
        nodes
            .map(|n| self.type_of(n))
            .reduce(|acc, t| acc.union(&t))
    }

    fn element(&self, collection: &Type) -> Type {
        match collection {
            Type::List { item } => (**item).clone(),
            Type::Table { value, .. } => (**value).clone(),
            Type::Text => Type::Text,
            _ => Type::Void,
        }
    }

    fn int(&self, node: &Node) -> IntRange {
        match self.type_of(node) {
            Type::Integer(range) => range,
            _ => IntRange::unbounded(),
        }
    }

    fn op(&self, op: OpCode, args: &[NodeRef]) -> Type {
        let arg = |i: usize| args.get(i).map(|a| self.int(a)).unwrap_or_else(IntRange::unbounded);
        match op {
            OpCode::Add => Type::Integer(arg(0).add(&arg(1))),
            OpCode::Sub => Type::Integer(arg(0).sub(&arg(1))),
            OpCode::Mul => Type::Integer(arg(0).mul(&arg(1))),
            OpCode::Neg => Type::Integer(arg(0).neg()),
            OpCode::Mod | OpCode::Rem => {
                let (a, b) = (arg(0), arg(1));
                let Some(high) = b.high.clone().filter(|h| h.is_positive() && b.is_non_negative())
                else {
                    return Type::any_integer();
                };
                let top = high - BigInt::one();
                if op == OpCode::Mod || a.is_non_negative() {
                    Type::Integer(IntRange::bounded(BigInt::zero(), top))
                } else {
                    Type::Integer(IntRange::bounded(-top.clone(), top))
                }
            }
            OpCode::Div | OpCode::TruncDiv => {
                let (a, b) = (arg(0), arg(1));
                if a.is_non_negative() && b.is_non_negative() {
                    Type::Integer(IntRange::new(Some(BigInt::zero()), a.high))
                } else {
                    Type::any_integer()
                }
            }
            OpCode::Pow => {
                if arg(0).is_non_negative() {
                    Type::Integer(IntRange::at_least(0))
                } else {
                    Type::any_integer()
                }
            }
            OpCode::BitAnd | OpCode::BitOr | OpCode::BitXor => Type::any_integer(),
            OpCode::Lt
            | OpCode::Leq
            | OpCode::Eq
            | OpCode::Neq
            | OpCode::Geq
            | OpCode::Gt
            | OpCode::And
            | OpCode::Or
            | OpCode::Not => Type::Boolean,
            OpCode::TextConcat => Type::Text,
            OpCode::TextLength | OpCode::ListLength => Type::Integer(IntRange::at_least(0)),
            OpCode::ListFind => Type::Integer(IntRange::at_least(-1)),
            OpCode::ListGet | OpCode::TableGet => match args.first() {
                Some(collection) => self.element(&self.type_of(collection)),
                None => Type::Void,
            },
            OpCode::Print | OpCode::Println => Type::Void,
        }
    }

    fn identifier(&self, name: &str) -> Type {
        if self.resolving.borrow().iter().any(|n| n == name) {
            return Type::any_integer();
        }
        self.resolving.borrow_mut().push(name.to_owned());
        let sources: Vec<Type> = Spine::from_program(Arc::clone(self.program))
            .visit(|spine| self.binding_type(spine.node(), name))
            .collect();
        self.resolving.borrow_mut().pop();
        sources
            .into_iter()
            .reduce(|acc, t| acc.union(&t))
            .unwrap_or_else(Type::any_integer)
    }

    /// Type that `node` binds to `name`, if `node` binds it.
    fn binding_type(&self, node: &Node, name: &str) -> Option<Type> {
        let names = |n: &Option<NodeRef>| {
            n.as_ref()
                .and_then(|v| v.as_identifier())
                .is_some_and(|v| v == name)
        };
        match &node.kind {
            NodeKind::Assignment { variable, expr } if variable.as_identifier() == Some(name) => {
                Some(variable.ty.clone().unwrap_or_else(|| self.type_of(expr)))
            }
            NodeKind::ForRange {
                variable,
                low,
                high,
                ..
            } if names(variable) => {
                let (low, high) = (self.int(low), self.int(high));
                Some(Type::Integer(IntRange::new(
                    low.low,
                    high.high.map(|h| h - BigInt::one()),
                )))
            }
            NodeKind::ForEach {
                variable,
                collection,
                ..
            } if names(variable) => Some(self.element(&self.type_of(collection))),
            _ => None,
        }
    }
}
