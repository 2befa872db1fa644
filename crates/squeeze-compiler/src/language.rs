//! Target language descriptors.

use std::sync::Arc;

use squeeze_core::Node;

use crate::emit::{self, EmitError, TokenTree};
use crate::phases::Phase;
use crate::plugin::{GolfRewrite, Plugin};

/// What the compiler needs to know about a target language.
///
/// The compiler only reads from a descriptor: it calls the emitter and
/// detokenizer once per ranked candidate and pulls the plugin lists as
/// ordered, read-only collections.
pub trait LanguageImpl: Send + Sync {
    fn name(&self) -> &'static str;

    /// File extension of emitted sources, without the dot.
    fn extension(&self) -> &'static str;

    /// The IR's own language: only the type-annotation pass runs before
    /// emission, with no variant expansion and no phases.
    fn is_identity(&self) -> bool {
        false
    }

    fn emit(&self, program: &Node) -> Result<TokenTree, EmitError>;

    fn detokenize(&self, tree: &TokenTree) -> String {
        emit::detokenize(tree)
    }

    /// Required rewrite batches, in order.
    fn phases(&self) -> &[Phase] {
        &[]
    }

    fn golf_plugins(&self) -> &[Arc<dyn GolfRewrite>] {
        &[]
    }

    /// Plugins applied only to the candidate being emitted. Golf-tagged
    /// entries join the search pool instead.
    fn emit_plugins(&self) -> &[Plugin] {
        &[]
    }
}

pub type Lang = Arc<dyn LanguageImpl>;
