//! Required rewrite phases.

use std::sync::Arc;

use squeeze_core::{NodeRef, Spine};
use tracing::debug;

use crate::plugin::Rewrite;

/// An ordered batch of rewrites run before the golf search.
#[derive(Clone)]
pub struct Phase {
    plugins: Vec<Arc<dyn Rewrite>>,
}

impl Phase {
    pub fn new(plugins: Vec<Arc<dyn Rewrite>>) -> Self {
        Self { plugins }
    }

    pub fn plugins(&self) -> &[Arc<dyn Rewrite>] {
        &self.plugins
    }
}

/// One full `with_replacer` pass of `plugin` over `program`.
pub fn apply_rewrite(program: &NodeRef, plugin: &dyn Rewrite) -> NodeRef {
    let spine = Spine::from_program(Arc::clone(program))
        .with_replacer(|node, spine| plugin.rewrite(node, spine));
    Arc::clone(spine.node())
}

/// Runs every phase in order, each plugin of a phase in order.
pub fn apply_phases(program: &NodeRef, phases: &[Phase]) -> NodeRef {
    let mut program = Arc::clone(program);
    for (i, phase) in phases.iter().enumerate() {
        for plugin in phase.plugins() {
            let next = apply_rewrite(&program, plugin.as_ref());
            debug!(
                phase = i,
                plugin = plugin.name(),
                changed = !Arc::ptr_eq(&next, &program),
                "applied phase plugin"
            );
            program = next;
        }
    }
    program
}
