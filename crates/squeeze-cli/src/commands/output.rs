//! Shared output handling for golf and emit.

use std::fs;
use std::path::Path;

use serde::Serialize;
use squeeze_compiler::Compiled;

/// JSON report for `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub language: &'a str,
    pub text: &'a str,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    pub variant: usize,
    pub variants: usize,
    pub history: &'a [String],
    pub explored: usize,
    pub rejected: usize,
}

impl<'a> Report<'a> {
    pub fn emitted(language: &'a str, text: &'a str) -> Self {
        Self {
            language,
            text,
            length: text.chars().count(),
            search: None,
        }
    }

    pub fn golfed(language: &'a str, compiled: &'a Compiled) -> Self {
        Self {
            search: Some(SearchReport {
                variant: compiled.variant,
                variants: compiled.variants,
                history: &compiled.history,
                explored: compiled.explored,
                rejected: compiled.rejected,
            }),
            ..Self::emitted(language, &compiled.text)
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Print `text` to stdout, or write it to `output`.
pub fn write_output(text: &str, output: Option<&Path>) {
    let Some(path) = output else {
        println!("{text}");
        return;
    };
    if let Err(e) = fs::write(path, text) {
        eprintln!("error: failed to write '{}': {}", path.display(), e);
        std::process::exit(1);
    }
}
