//! IR node model.
//!
//! Nodes are immutable once shared: every tree is built from `NodeRef`s
//! (`Arc<Node>`), and edits produce shallow copies that keep untouched
//! children pointer-identical.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::types::Type;

pub type NodeRef = Arc<Node>;

/// One IR node: the shape-specific payload plus an optional cached type.
///
/// `ty` is inferred metadata. It never takes part in program identity
/// (see the search signature), and it survives shallow child replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeKind {
    Program {
        body: NodeRef,
    },
    Block {
        children: Vec<NodeRef>,
    },
    /// Alternative lowerings of the same construct, resolved by variant expansion.
    Variants {
        alternatives: Vec<NodeRef>,
    },
    Integer {
        #[serde(with = "crate::serde_int")]
        value: BigInt,
    },
    Text {
        value: String,
    },
    Identifier {
        name: String,
    },
    Op {
        op: OpCode,
        args: Vec<NodeRef>,
    },
    FunctionCall {
        func: NodeRef,
        args: Vec<NodeRef>,
    },
    BinaryOp {
        op: OpCode,
        name: String,
        precedence: u8,
        #[serde(default)]
        right_associative: bool,
        left: NodeRef,
        right: NodeRef,
    },
    UnaryOp {
        op: OpCode,
        name: String,
        precedence: u8,
        arg: NodeRef,
    },
    MutatingBinaryOp {
        op: OpCode,
        name: String,
        variable: NodeRef,
        right: NodeRef,
    },
    Assignment {
        variable: NodeRef,
        expr: NodeRef,
    },
    VarDeclarationWithAssignment {
        assignment: NodeRef,
    },
    IndexCall {
        collection: NodeRef,
        index: NodeRef,
    },
    RangeIndexCall {
        collection: NodeRef,
        low: NodeRef,
        high: NodeRef,
        step: NodeRef,
    },
    List {
        items: Vec<NodeRef>,
    },
    Table {
        pairs: Vec<NodeRef>,
    },
    KeyValue {
        key: NodeRef,
        value: NodeRef,
    },
    If {
        condition: NodeRef,
        consequent: NodeRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alternate: Option<NodeRef>,
    },
    ConditionalOp {
        condition: NodeRef,
        consequent: NodeRef,
        alternate: NodeRef,
    },
    While {
        condition: NodeRef,
        body: NodeRef,
    },
    /// `for variable in low..high step step`, `high` exclusive.
    ForRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variable: Option<NodeRef>,
        low: NodeRef,
        high: NodeRef,
        step: NodeRef,
        body: NodeRef,
    },
    ForEach {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variable: Option<NodeRef>,
        collection: NodeRef,
        body: NodeRef,
    },
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, ty: None }
    }

    pub fn with_ty(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Kind name, used in diagnostics and signatures.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Program { .. } => "Program",
            NodeKind::Block { .. } => "Block",
            NodeKind::Variants { .. } => "Variants",
            NodeKind::Integer { .. } => "Integer",
            NodeKind::Text { .. } => "Text",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Op { .. } => "Op",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::BinaryOp { .. } => "BinaryOp",
            NodeKind::UnaryOp { .. } => "UnaryOp",
            NodeKind::MutatingBinaryOp { .. } => "MutatingBinaryOp",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::VarDeclarationWithAssignment { .. } => "VarDeclarationWithAssignment",
            NodeKind::IndexCall { .. } => "IndexCall",
            NodeKind::RangeIndexCall { .. } => "RangeIndexCall",
            NodeKind::List { .. } => "List",
            NodeKind::Table { .. } => "Table",
            NodeKind::KeyValue { .. } => "KeyValue",
            NodeKind::If { .. } => "If",
            NodeKind::ConditionalOp { .. } => "ConditionalOp",
            NodeKind::While { .. } => "While",
            NodeKind::ForRange { .. } => "ForRange",
            NodeKind::ForEach { .. } => "ForEach",
        }
    }

    pub fn is_program(&self) -> bool {
        matches!(self.kind, NodeKind::Program { .. })
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, NodeKind::Block { .. })
    }

    /// Nodes that produce a value (as opposed to statements and containers).
    pub fn is_expression(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Integer { .. }
                | NodeKind::Text { .. }
                | NodeKind::Identifier { .. }
                | NodeKind::Op { .. }
                | NodeKind::FunctionCall { .. }
                | NodeKind::BinaryOp { .. }
                | NodeKind::UnaryOp { .. }
                | NodeKind::IndexCall { .. }
                | NodeKind::RangeIndexCall { .. }
                | NodeKind::List { .. }
                | NodeKind::Table { .. }
                | NodeKind::ConditionalOp { .. }
        )
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match &self.kind {
            NodeKind::Integer { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Returns the args when this is an `Op` with the given opcode.
    pub fn as_op(&self, opcode: OpCode) -> Option<&[NodeRef]> {
        match &self.kind {
            NodeKind::Op { op, args } if *op == opcode => Some(args),
            _ => None,
        }
    }

    pub fn is_int(&self, v: i64) -> bool {
        self.as_int().is_some_and(|x| *x == BigInt::from(v))
    }
}

/// IR operators. Targets lower these to their own call or infix shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpCode {
    Add,
    Sub,
    Mul,
    Div,
    TruncDiv,
    Mod,
    Rem,
    Pow,
    Neg,
    Lt,
    Leq,
    Eq,
    Neq,
    Geq,
    Gt,
    And,
    Or,
    Not,
    BitAnd,
    BitOr,
    BitXor,
    TextConcat,
    TextLength,
    ListGet,
    ListFind,
    ListLength,
    TableGet,
    Print,
    Println,
}

impl OpCode {
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Add => "add",
            OpCode::Sub => "sub",
            OpCode::Mul => "mul",
            OpCode::Div => "div",
            OpCode::TruncDiv => "trunc_div",
            OpCode::Mod => "mod",
            OpCode::Rem => "rem",
            OpCode::Pow => "pow",
            OpCode::Neg => "neg",
            OpCode::Lt => "lt",
            OpCode::Leq => "leq",
            OpCode::Eq => "eq",
            OpCode::Neq => "neq",
            OpCode::Geq => "geq",
            OpCode::Gt => "gt",
            OpCode::And => "and",
            OpCode::Or => "or",
            OpCode::Not => "not",
            OpCode::BitAnd => "bit_and",
            OpCode::BitOr => "bit_or",
            OpCode::BitXor => "bit_xor",
            OpCode::TextConcat => "text_concat",
            OpCode::TextLength => "text_length",
            OpCode::ListGet => "list_get",
            OpCode::ListFind => "list_find",
            OpCode::ListLength => "list_length",
            OpCode::TableGet => "table_get",
            OpCode::Print => "print",
            OpCode::Println => "println",
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(
            self,
            OpCode::Neg
                | OpCode::Not
                | OpCode::TextLength
                | OpCode::ListLength
                | OpCode::Print
                | OpCode::Println
        )
    }

    pub fn is_binary(self) -> bool {
        !self.is_unary()
    }

    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            OpCode::Add
                | OpCode::Mul
                | OpCode::Eq
                | OpCode::Neq
                | OpCode::And
                | OpCode::Or
                | OpCode::BitAnd
                | OpCode::BitOr
                | OpCode::BitXor
        )
    }

    /// The opcode computing the same value with swapped operands.
    pub fn flip(self) -> Option<OpCode> {
        match self {
            OpCode::Lt => Some(OpCode::Gt),
            OpCode::Gt => Some(OpCode::Lt),
            OpCode::Leq => Some(OpCode::Geq),
            OpCode::Geq => Some(OpCode::Leq),
            op if op.is_commutative() => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
