use squeeze_core::{Node, NodeKind, NodeRef, PathFragment};

/// Whether `expr`, placed at `fragment` under `parent`, must be wrapped in
/// parentheses to keep its meaning in an infix target.
pub fn needs_parens(expr: &Node, parent: &Node, fragment: Option<PathFragment>) -> bool {
    let NodeKind::BinaryOp {
        precedence,
        right_associative,
        ..
    } = &expr.kind
    else {
        return false;
    };
    match &parent.kind {
        NodeKind::UnaryOp {
            precedence: outer, ..
        } => precedence <= outer,
        NodeKind::BinaryOp {
            precedence: outer, ..
        } => match fragment.map(PathFragment::field) {
            None => true,
            Some("right") if *right_associative => precedence < outer,
            Some("right") => precedence <= outer,
            Some(_) if *right_associative => precedence <= outer,
            Some(_) => precedence < outer,
        },
        _ => false,
    }
}

/// An `if` / `else if` / `else` chain.
pub struct IfChain<'a> {
    pub branches: Vec<(&'a NodeRef, &'a NodeRef)>,
    pub alternate: Option<&'a NodeRef>,
}

/// Flattens nested `If` (or `ConditionalOp`) alternates of the same kind.
///
/// Returns `None` for other node kinds.
pub fn if_chain(node: &Node) -> Option<IfChain<'_>> {
    let mut branches = Vec::new();
    let mut current = node;
    loop {
        match &current.kind {
            NodeKind::If {
                condition,
                consequent,
                alternate,
            } => {
                branches.push((condition, consequent));
                match alternate {
                    Some(next) if matches!(next.kind, NodeKind::If { .. }) => current = &**next,
                    other => {
                        return Some(IfChain {
                            branches,
                            alternate: other.as_ref(),
                        });
                    }
                }
            }
            NodeKind::ConditionalOp {
                condition,
                consequent,
                alternate,
            } => {
                branches.push((condition, consequent));
                if matches!(alternate.kind, NodeKind::ConditionalOp { .. }) {
                    current = &**alternate;
                } else {
                    return Some(IfChain {
                        branches,
                        alternate: Some(alternate),
                    });
                }
            }
            _ => return None,
        }
    }
}
