//! Integer arithmetic rewrites.

use std::sync::Arc;

use num_bigint::BigInt;
use squeeze_core::build::{int, op};
use squeeze_core::invariants::expect_integer;
use squeeze_core::types::type_of;
use squeeze_core::{NodeKind, NodeRef, OpCode, Spine, Type};

use crate::plugin::{GolfRewrite, Rewrite, golf_fn, rewrite_fn};

/// `mod` to `rem`: a plain `rem` when the divisor is provably
/// non-negative, `rem(add(rem(a, b), b), b)` otherwise.
pub fn mod_to_rem() -> Arc<dyn Rewrite> {
    rewrite_fn("mod_to_rem", |node, spine| {
        let [a, b] = node.as_op(OpCode::Mod)? else {
            return None;
        };
        let divisor = type_of(b, spine);
        if expect_integer(&divisor, b).is_non_negative() {
            return Some(op(OpCode::Rem, vec![a.clone(), b.clone()]));
        }
        let inner = op(OpCode::Rem, vec![a.clone(), b.clone()]);
        Some(op(
            OpCode::Rem,
            vec![op(OpCode::Add, vec![inner, b.clone()]), b.clone()],
        ))
    })
}

/// `div` to `trunc_div` when the divisor is provably non-negative.
pub fn div_to_trunc_div() -> Arc<dyn Rewrite> {
    rewrite_fn("div_to_trunc_div", |node, spine| {
        let args = node.as_op(OpCode::Div)?;
        let [_, b] = args else {
            return None;
        };
        let divisor = type_of(b, spine);
        expect_integer(&divisor, b)
            .is_non_negative()
            .then(|| op(OpCode::TruncDiv, args.to_vec()))
    })
}

/// Replaces `eq`/`neq` against a constant sitting at an end of the other
/// operand's range with a strict inequality.
///
/// `x:0..9 == 0` becomes `x < 1`, `x:0..9 != 9` becomes `x < 9`, and the
/// mirrored forms when the constant is on the left.
pub fn equality_to_inequality() -> Arc<dyn GolfRewrite> {
    golf_fn("equality_to_inequality", |spine| {
        inequality(spine).into_iter().collect()
    })
}

fn inequality(spine: &Spine) -> Option<NodeRef> {
    let node = spine.node();
    let (eq, args) = match (node.as_op(OpCode::Eq), node.as_op(OpCode::Neq)) {
        (Some(args), _) => (true, args),
        (_, Some(args)) => (false, args),
        _ => return None,
    };
    let [a, b] = args else {
        return None;
    };
    let (Type::Integer(t1), Type::Integer(t2)) = (type_of(a, spine), type_of(b, spine)) else {
        return None;
    };
    let one = BigInt::from(1);

    if let Some(c) = t1.constant_value() {
        if t2.low.as_ref() == Some(c) {
            // 0 == x:0..9 -> 1 > x, 0 != x:0..9 -> 0 < x
            return Some(if eq {
                op(OpCode::Gt, vec![int(c + &one), b.clone()])
            } else {
                op(OpCode::Lt, vec![int(c.clone()), b.clone()])
            });
        }
        if t2.high.as_ref() == Some(c) {
            // 9 == x:0..9 -> 8 < x, 9 != x:0..9 -> 9 > x
            return Some(if eq {
                op(OpCode::Lt, vec![int(c - &one), b.clone()])
            } else {
                op(OpCode::Gt, vec![int(c.clone()), b.clone()])
            });
        }
    }
    if let Some(c) = t2.constant_value() {
        if t1.low.as_ref() == Some(c) {
            // x:0..9 == 0 -> x < 1, x:0..9 != 0 -> x > 0
            return Some(if eq {
                op(OpCode::Lt, vec![a.clone(), int(c + &one)])
            } else {
                op(OpCode::Gt, vec![a.clone(), int(c.clone())])
            });
        }
        if t1.high.as_ref() == Some(c) {
            // x:0..9 == 9 -> x > 8, x:0..9 != 9 -> x < 9
            return Some(if eq {
                op(OpCode::Gt, vec![a.clone(), int(c - &one)])
            } else {
                op(OpCode::Lt, vec![a.clone(), int(c.clone())])
            });
        }
    }
    None
}

/// Folds `add`, `sub` and `mul` of two integer literals into one literal,
/// both as IR ops and as their infix lowering.
pub fn fold_constants() -> Arc<dyn GolfRewrite> {
    golf_fn("fold_constants", |spine| {
        let node = spine.node();
        let (code, a, b) = match &node.kind {
            NodeKind::Op { op, args } => match args.as_slice() {
                [a, b] => (*op, a, b),
                _ => return Vec::new(),
            },
            NodeKind::BinaryOp {
                op, left, right, ..
            } => (*op, left, right),
            _ => return Vec::new(),
        };
        let (Some(a), Some(b)) = (a.as_int(), b.as_int()) else {
            return Vec::new();
        };
        let folded = match code {
            OpCode::Add => a + b,
            OpCode::Sub => a - b,
            OpCode::Mul => a * b,
            _ => return Vec::new(),
        };
        vec![int(folded)]
    })
}
