//! Shorthand constructors returning shared nodes.

use std::sync::Arc;

use num_bigint::BigInt;

use crate::node::{Node, NodeKind, NodeRef, OpCode};

fn node(kind: NodeKind) -> NodeRef {
    Arc::new(Node::new(kind))
}

pub fn program(body: NodeRef) -> NodeRef {
    node(NodeKind::Program { body })
}

pub fn block(children: Vec<NodeRef>) -> NodeRef {
    node(NodeKind::Block { children })
}

pub fn variants(alternatives: Vec<NodeRef>) -> NodeRef {
    node(NodeKind::Variants { alternatives })
}

pub fn int(value: impl Into<BigInt>) -> NodeRef {
    node(NodeKind::Integer {
        value: value.into(),
    })
}

pub fn text(value: impl Into<String>) -> NodeRef {
    node(NodeKind::Text {
        value: value.into(),
    })
}

pub fn ident(name: impl Into<String>) -> NodeRef {
    node(NodeKind::Identifier { name: name.into() })
}

pub fn op(op: OpCode, args: Vec<NodeRef>) -> NodeRef {
    node(NodeKind::Op { op, args })
}

pub fn call(func: impl Into<String>, args: Vec<NodeRef>) -> NodeRef {
    node(NodeKind::FunctionCall {
        func: ident(func),
        args,
    })
}

pub fn binary_op(
    op: OpCode,
    name: impl Into<String>,
    precedence: u8,
    right_associative: bool,
    left: NodeRef,
    right: NodeRef,
) -> NodeRef {
    node(NodeKind::BinaryOp {
        op,
        name: name.into(),
        precedence,
        right_associative,
        left,
        right,
    })
}

pub fn unary_op(op: OpCode, name: impl Into<String>, precedence: u8, arg: NodeRef) -> NodeRef {
    node(NodeKind::UnaryOp {
        op,
        name: name.into(),
        precedence,
        arg,
    })
}

pub fn mutating_binary_op(
    op: OpCode,
    name: impl Into<String>,
    variable: NodeRef,
    right: NodeRef,
) -> NodeRef {
    node(NodeKind::MutatingBinaryOp {
        op,
        name: name.into(),
        variable,
        right,
    })
}

pub fn assignment(variable: NodeRef, expr: NodeRef) -> NodeRef {
    node(NodeKind::Assignment { variable, expr })
}

pub fn var_declaration(assignment: NodeRef) -> NodeRef {
    node(NodeKind::VarDeclarationWithAssignment { assignment })
}

pub fn index_call(collection: NodeRef, index: NodeRef) -> NodeRef {
    node(NodeKind::IndexCall { collection, index })
}

pub fn range_index_call(collection: NodeRef, low: NodeRef, high: NodeRef, step: NodeRef) -> NodeRef {
    node(NodeKind::RangeIndexCall {
        collection,
        low,
        high,
        step,
    })
}

pub fn list(items: Vec<NodeRef>) -> NodeRef {
    node(NodeKind::List { items })
}

pub fn key_value(key: NodeRef, value: NodeRef) -> NodeRef {
    node(NodeKind::KeyValue { key, value })
}

pub fn table(pairs: Vec<(NodeRef, NodeRef)>) -> NodeRef {
    node(NodeKind::Table {
        pairs: pairs.into_iter().map(|(k, v)| key_value(k, v)).collect(),
    })
}

pub fn if_(condition: NodeRef, consequent: NodeRef, alternate: Option<NodeRef>) -> NodeRef {
    node(NodeKind::If {
        condition,
        consequent,
        alternate,
    })
}

pub fn conditional(condition: NodeRef, consequent: NodeRef, alternate: NodeRef) -> NodeRef {
    node(NodeKind::ConditionalOp {
        condition,
        consequent,
        alternate,
    })
}

pub fn while_(condition: NodeRef, body: NodeRef) -> NodeRef {
    node(NodeKind::While { condition, body })
}

pub fn for_range(
    variable: Option<NodeRef>,
    low: NodeRef,
    high: NodeRef,
    step: NodeRef,
    body: NodeRef,
) -> NodeRef {
    node(NodeKind::ForRange {
        variable,
        low,
        high,
        step,
        body,
    })
}

pub fn for_each(variable: Option<NodeRef>, collection: NodeRef, body: NodeRef) -> NodeRef {
    node(NodeKind::ForEach {
        variable,
        collection,
        body,
    })
}

pub fn print(arg: NodeRef) -> NodeRef {
    op(OpCode::Print, vec![arg])
}

pub fn println(arg: NodeRef) -> NodeRef {
    op(OpCode::Println, vec![arg])
}
