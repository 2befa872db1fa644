//! Final emission of one candidate program.

use std::sync::Arc;

use squeeze_core::NodeRef;

use crate::emit::EmitError;
use crate::language::LanguageImpl;
use crate::legacy;
use crate::phases::apply_rewrite;
use crate::plugin::{GolfRewrite, Plugin};

/// Emit plugins, emitter and detokenizer of one language, applied in that
/// order to a candidate.
pub(crate) struct FinalEmit<'a> {
    lang: &'a dyn LanguageImpl,
    plugins: Vec<&'a Plugin>,
}

impl<'a> FinalEmit<'a> {
    pub(crate) fn new(lang: &'a dyn LanguageImpl) -> Self {
        let plugins = lang
            .emit_plugins()
            .iter()
            .filter(|p| !matches!(p, Plugin::Golf(_)))
            .collect();
        Self { lang, plugins }
    }

    pub(crate) fn emit(&self, program: &NodeRef) -> Result<String, EmitError> {
        let mut program = Arc::clone(program);
        for plugin in &self.plugins {
            program = match plugin {
                Plugin::Rewrite(p) => apply_rewrite(&program, p.as_ref()),
                Plugin::Mutating(p) => legacy::apply_mutating(&program, p.as_ref()),
                Plugin::Golf(_) => program,
            };
        }
        let tree = self.lang.emit(&program)?;
        Ok(self.lang.detokenize(&tree))
    }
}

/// Golf plugins of `lang` followed by its golf-tagged emit plugins.
pub(crate) fn golf_pool(lang: &dyn LanguageImpl) -> Vec<Arc<dyn GolfRewrite>> {
    let mut pool = lang.golf_plugins().to_vec();
    pool.extend(lang.emit_plugins().iter().filter_map(|p| match p {
        Plugin::Golf(g) => Some(Arc::clone(g)),
        _ => None,
    }));
    pool
}
