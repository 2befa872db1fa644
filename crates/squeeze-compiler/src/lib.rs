//! squeeze compiler: rewrite pipeline, golf search and final emission.
//!
//! This crate turns an IR program into the shortest text a target language
//! can produce for it:
//! - `plugin` - the three plugin shapes (rewrite, golf, legacy mutating)
//! - `legacy` - copy-on-write mutable traversal for mutating plugins
//! - `phases` - required rewrite batches run before the search
//! - `variants` - expansion of `Variants` nodes into whole programs
//! - `emit` - token trees, detokenizing and literal helpers for emitters
//! - `golfer` - the compile facade: variants, phases, search, ranking
//! - `plugins` - stock rewrite rules shared by language descriptors

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod emit;
mod emission;
mod golfer;
mod invariants;
pub mod language;
pub mod legacy;
pub mod phases;
pub mod plugin;
pub mod plugins;
mod search;
mod signature;
pub mod variants;

#[cfg(test)]
mod golfer_tests;
#[cfg(test)]
pub mod test_utils;
#[cfg(test)]
mod variants_tests;

pub use emit::{EmitError, TokenTree};
pub use golfer::{Compiled, GolfConfig, Golfer};
pub use language::{Lang, LanguageImpl};
pub use phases::Phase;
pub use plugin::{GolfRewrite, MutatingRewrite, Plugin, PluginTag, Rewrite};

/// Errors that can occur while compiling a program for a target language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Every candidate of every variant failed to emit with a rejection.
    #[error("no viable output for {language}: all {rejected} candidates were rejected")]
    NoViableCandidate { language: String, rejected: usize },

    /// The emitter reached a node it cannot render at all.
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Result type for compile operations.
pub type Result<T> = std::result::Result<T, Error>;
