//! Breadth-first golf search over one variant.
//!
//! The queue, visited set and best result live in a [`GolfSearch`] owned by
//! a single variant's search, so variants never share mutable state.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use squeeze_core::{NodeRef, Spine};
use tracing::{debug, trace, warn};

use crate::emission::FinalEmit;
use crate::plugin::GolfRewrite;
use crate::signature::Signature;

struct Candidate {
    program: NodeRef,
    history: Vec<String>,
}

/// Shortest emission seen so far.
#[derive(Debug, Clone)]
pub(crate) struct Best {
    pub text: String,
    pub len: usize,
    pub history: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct SearchOutcome {
    /// `None` when every candidate was rejected.
    pub best: Option<Best>,
    /// Dequeued and expanded states.
    pub explored: usize,
    /// Distinct programs ever enqueued, the initial one included.
    pub enqueued: usize,
    pub rejected: usize,
}

pub(crate) struct GolfSearch<'a> {
    emission: &'a FinalEmit<'a>,
    plugins: &'a [Arc<dyn GolfRewrite>],
    max_steps: Option<usize>,
    queue: VecDeque<Candidate>,
    visited: HashSet<Signature>,
    best: Option<Best>,
    explored: usize,
    rejected: usize,
}

impl<'a> GolfSearch<'a> {
    pub(crate) fn new(
        emission: &'a FinalEmit<'a>,
        plugins: &'a [Arc<dyn GolfRewrite>],
        max_steps: Option<usize>,
    ) -> Self {
        Self {
            emission,
            plugins,
            max_steps,
            queue: VecDeque::new(),
            visited: HashSet::new(),
            best: None,
            explored: 0,
            rejected: 0,
        }
    }

    /// Explores everything reachable from `program`.
    ///
    /// Rejected candidates are still expanded; fatal emission errors abort.
    pub(crate) fn run(mut self, program: NodeRef) -> crate::Result<SearchOutcome> {
        self.push(program, Vec::new())?;
        while let Some(candidate) = self.queue.pop_front() {
            if self.max_steps.is_some_and(|max| self.explored >= max) {
                warn!(
                    explored = self.explored,
                    pending = self.queue.len() + 1,
                    "step budget exhausted, stopping search"
                );
                break;
            }
            self.explored += 1;
            self.expand(&candidate)?;
        }
        Ok(SearchOutcome {
            best: self.best,
            explored: self.explored,
            enqueued: self.visited.len(),
            rejected: self.rejected,
        })
    }

    fn expand(&mut self, candidate: &Candidate) -> crate::Result<()> {
        let spine = Spine::from_program(Arc::clone(&candidate.program));
        let plugins = self.plugins;
        for plugin in plugins {
            for site in spine.descendants() {
                for node in plugin.golf(&site) {
                    let program = Arc::clone(site.replaced_with(node).root().node());
                    let mut history = candidate.history.clone();
                    history.push(plugin.name().to_owned());
                    self.push(program, history)?;
                }
            }
        }
        Ok(())
    }

    fn push(&mut self, program: NodeRef, history: Vec<String>) -> crate::Result<()> {
        if !self.visited.insert(Signature::of(&program)) {
            return Ok(());
        }
        match self.emission.emit(&program) {
            Ok(text) => {
                let len = text.chars().count();
                trace!(len, history = ?history, "enqueued candidate");
                if self.best.as_ref().is_none_or(|b| len < b.len) {
                    debug!(len, history = ?history, "new shortest candidate");
                    self.best = Some(Best {
                        text,
                        len,
                        history: history.clone(),
                    });
                }
            }
            Err(err) if err.is_rejection() => {
                self.rejected += 1;
                debug!(%err, history = ?history, "rejected candidate");
            }
            Err(err) => return Err(err.into()),
        }
        self.queue.push_back(Candidate { program, history });
        Ok(())
    }
}
