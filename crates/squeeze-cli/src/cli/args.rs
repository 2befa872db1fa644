//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! so `golf` and `emit` share definitions and differ only in visibility
//! (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// IR program file (positional).
pub fn ir_path_arg() -> Arg {
    Arg::new("ir_path")
        .value_name("IR")
        .value_parser(value_parser!(PathBuf))
        .help("IR program as JSON (use \"-\" for stdin)")
}

/// Inline IR (-i/--ir).
pub fn ir_text_arg() -> Arg {
    Arg::new("ir_text")
        .short('i')
        .long("ir")
        .value_name("JSON")
        .conflicts_with("ir_path")
        .help("Inline IR program as JSON")
}

/// Target language (-l/--lang).
pub fn lang_arg() -> Arg {
    Arg::new("lang")
        .short('l')
        .long("lang")
        .value_name("LANG")
        .help("Target language (inferred from --output extension if not specified)")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Search step budget (--max-steps).
pub fn max_steps_arg() -> Arg {
    Arg::new("max_steps")
        .long("max-steps")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Stop each variant's search after N explored programs")
}

/// Search variants concurrently (--parallel).
pub fn parallel_arg() -> Arg {
    Arg::new("parallel")
        .long("parallel")
        .action(ArgAction::SetTrue)
        .help("Search variants in parallel")
}

/// Print the winning rewrite history (--history).
pub fn history_arg() -> Arg {
    Arg::new("history")
        .long("history")
        .action(ArgAction::SetTrue)
        .help("Print the rewrites that produced the output to stderr")
}

/// Output a JSON report (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output a JSON report instead of plain text")
}

/// Keep input type annotations (--trust-types).
pub fn trust_types_arg() -> Arg {
    Arg::new("trust_types")
        .long("trust-types")
        .action(ArgAction::SetTrue)
        .help("Use the input's type annotations instead of recomputing them")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}
