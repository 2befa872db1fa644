//! The compile facade.

use std::sync::Arc;

use rayon::prelude::*;
use squeeze_core::NodeRef;
use squeeze_core::types;
use tracing::debug;

use crate::emission::{FinalEmit, golf_pool};
use crate::language::Lang;
use crate::phases::apply_phases;
use crate::search::{GolfSearch, SearchOutcome};
use crate::variants::expand_variants;
use crate::{Error, Result};

/// Search settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GolfConfig {
    /// Upper bound on dequeued states per variant; `None` searches until
    /// the queue drains.
    pub max_steps: Option<usize>,
    /// Search variants on the rayon pool.
    pub parallel_variants: bool,
    /// Trust the input's type annotations instead of recomputing them.
    pub skip_types_pass: bool,
}

/// Result of a compilation, with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub text: String,
    /// Index of the winning variant.
    pub variant: usize,
    pub variants: usize,
    /// Golf plugins applied, in order, to reach the winner.
    pub history: Vec<String>,
    pub explored: usize,
    pub rejected: usize,
}

/// Compiles programs for one target language.
///
/// ```ignore
/// let golfer = Golfer::new(lang).with_max_steps(10_000);
/// let text = golfer.compile(&program)?;
/// ```
pub struct Golfer {
    lang: Lang,
    config: GolfConfig,
}

impl Golfer {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            config: GolfConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GolfConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = Some(max_steps);
        self
    }

    pub fn with_parallel_variants(mut self, parallel: bool) -> Self {
        self.config.parallel_variants = parallel;
        self
    }

    pub fn with_skip_types_pass(mut self, skip: bool) -> Self {
        self.config.skip_types_pass = skip;
        self
    }

    pub fn lang(&self) -> &Lang {
        &self.lang
    }

    pub fn config(&self) -> &GolfConfig {
        &self.config
    }

    /// Shortest text over all variants and all search candidates.
    pub fn compile(&self, program: &NodeRef) -> Result<String> {
        self.compile_detailed(program).map(|c| c.text)
    }

    pub fn compile_detailed(&self, program: &NodeRef) -> Result<Compiled> {
        let variants = self.prepare(program);
        let emission = FinalEmit::new(self.lang.as_ref());
        let pool = golf_pool(self.lang.as_ref());
        let search = |variant: &NodeRef| {
            GolfSearch::new(&emission, &pool, self.config.max_steps).run(Arc::clone(variant))
        };

        let outcomes: Vec<Result<SearchOutcome>> = if self.config.parallel_variants {
            variants.par_iter().map(search).collect()
        } else {
            variants.iter().map(search).collect()
        };

        let count = outcomes.len();
        let mut winner: Option<(usize, SearchOutcome)> = None;
        let (mut explored, mut rejected) = (0, 0);
        for (index, outcome) in outcomes.into_iter().enumerate() {
            let outcome = outcome?;
            debug!(
                variant = index,
                best = outcome.best.as_ref().map(|b| b.len),
                explored = outcome.explored,
                enqueued = outcome.enqueued,
                rejected = outcome.rejected,
                "searched variant"
            );
            explored += outcome.explored;
            rejected += outcome.rejected;
            let Some(best) = &outcome.best else {
                continue;
            };
            let improves = winner
                .as_ref()
                .and_then(|(_, w)| w.best.as_ref())
                .is_none_or(|w| best.len < w.len);
            if improves {
                winner = Some((index, outcome));
            }
        }

        let Some((variant, SearchOutcome { best: Some(best), .. })) = winner else {
            return Err(self.no_viable(rejected));
        };
        Ok(Compiled {
            text: best.text,
            variant,
            variants: count,
            history: best.history,
            explored,
            rejected,
        })
    }

    /// Types pass, phases and final emission, without searching.
    pub fn emit_only(&self, program: &NodeRef) -> Result<String> {
        let emission = FinalEmit::new(self.lang.as_ref());
        let mut best: Option<String> = None;
        let mut rejected = 0;
        for variant in self.prepare(program) {
            match emission.emit(&variant) {
                Ok(text) => {
                    if best
                        .as_ref()
                        .is_none_or(|b| text.chars().count() < b.chars().count())
                    {
                        best = Some(text);
                    }
                }
                Err(err) if err.is_rejection() => {
                    debug!(%err, "rejected variant");
                    rejected += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
        best.ok_or_else(|| self.no_viable(rejected))
    }

    /// Variants of `program`, each annotated and run through the phases.
    fn prepare(&self, program: &NodeRef) -> Vec<NodeRef> {
        let annotate = |p: NodeRef| {
            if self.config.skip_types_pass {
                p
            } else {
                types::annotate(&p)
            }
        };
        if self.lang.is_identity() {
            return vec![annotate(Arc::clone(program))];
        }
        let variants = expand_variants(program);
        debug!(
            language = self.lang.name(),
            variants = variants.len(),
            "expanded variants"
        );
        variants
            .into_iter()
            .map(|v| apply_phases(&annotate(v), self.lang.phases()))
            .collect()
    }

    fn no_viable(&self, rejected: usize) -> Error {
        Error::NoViableCandidate {
            language: self.lang.name().to_owned(),
            rejected,
        }
    }
}
