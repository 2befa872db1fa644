use squeeze_core::Node;

/// Failure to render a node.
///
/// `Unsupported` is fatal: the emitter has no case for the node kind and
/// no amount of searching will change that. `Rejected` only rules out the
/// candidate being emitted, e.g. a text literal no quoting option can hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("cannot emit node of kind {kind}")]
    Unsupported { kind: &'static str },

    #[error("cannot emit {kind}: {reason}")]
    Rejected { kind: &'static str, reason: String },
}

impl EmitError {
    pub fn unsupported(node: &Node) -> Self {
        EmitError::Unsupported { kind: node.name() }
    }

    pub fn rejected(node: &Node, reason: impl Into<String>) -> Self {
        EmitError::Rejected {
            kind: node.name(),
            reason: reason.into(),
        }
    }

    /// True for errors that only disqualify one candidate.
    pub fn is_rejection(&self) -> bool {
        matches!(self, EmitError::Rejected { .. })
    }
}
