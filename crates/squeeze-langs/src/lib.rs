//! Target languages for squeeze.
//!
//! Each language is a [`LanguageImpl`] descriptor: an emitter, a
//! detokenizer and the plugin lists the compiler runs for it. Languages are
//! process-wide singletons, looked up by name or file extension.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::sync::{Arc, LazyLock};

pub use squeeze_compiler::{Lang, LanguageImpl};

#[cfg(feature = "lang-ir")]
pub mod ir;
#[cfg(feature = "lang-janet")]
pub mod janet;
#[cfg(feature = "lang-javascript")]
pub mod javascript;
#[cfg(any(feature = "lang-ir", feature = "lang-janet"))]
mod sexpr;

#[cfg(all(test, feature = "lang-janet"))]
mod janet_tests;
#[cfg(all(test, feature = "lang-javascript"))]
mod javascript_tests;

macro_rules! define_langs {
    (
        $(
            $fn_name:ident => {
                feature: $feature:literal,
                lang: $lang:expr,
                names: [$($alias:literal),* $(,)?],
                extensions: [$($ext:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            #[cfg(feature = $feature)]
            pub fn $fn_name() -> Lang {
                static LANG: LazyLock<Lang> = LazyLock::new(|| Arc::new($lang));
                Arc::clone(&LANG)
            }
        )*

        pub fn from_name(s: &str) -> Option<Lang> {
            match s.to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($alias)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        pub fn from_ext(ext: &str) -> Option<Lang> {
            match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($ext)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        /// Every enabled language, in declaration order.
        pub fn all() -> Vec<Lang> {
            vec![
                $(
                    #[cfg(feature = $feature)]
                    $fn_name(),
                )*
            ]
        }
    };
}

define_langs! {
    ir => {
        feature: "lang-ir",
        lang: ir::Ir,
        names: ["ir", "squeeze"],
        extensions: ["sq"],
    },
    janet => {
        feature: "lang-janet",
        lang: janet::Janet::new(),
        names: ["janet", "jnt"],
        extensions: ["janet"],
    },
    javascript => {
        feature: "lang-javascript",
        lang: javascript::JavaScript::new(),
        names: ["javascript", "js", "node"],
        extensions: ["js", "mjs", "cjs"],
    },
}
