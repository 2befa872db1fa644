//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: emit accepts golf's search flags without error
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{emit_command, golf_command, langs_command};
use crate::commands::emit::EmitArgs;
use crate::commands::golf::GolfArgs;
use crate::commands::ir_loader::IrInput;

#[test]
fn golf_extracts_search_flags() {
    let m = golf_command()
        .try_get_matches_from([
            "golf",
            "prog.json",
            "-l",
            "janet",
            "--max-steps",
            "500",
            "--parallel",
            "--history",
            "-vv",
        ])
        .unwrap();

    let params = GolfParams::from_matches(&m);

    assert_eq!(params.ir_path, Some(PathBuf::from("prog.json")));
    assert_eq!(params.lang.as_deref(), Some("janet"));
    assert_eq!(params.max_steps, Some(500));
    assert!(params.parallel);
    assert!(params.history);
    assert!(!params.json);
    assert_eq!(params.verbose, 2);
}

#[test]
fn golf_params_become_config() {
    let m = golf_command()
        .try_get_matches_from(["golf", "-i", "{}", "--max-steps", "3", "--trust-types"])
        .unwrap();

    let args: GolfArgs = GolfParams::from_matches(&m).into();

    assert_eq!(args.input, IrInput::Inline("{}".to_owned()));
    assert_eq!(args.config.max_steps, Some(3));
    assert!(args.config.skip_types_pass);
    assert!(!args.config.parallel_variants);
}

#[test]
fn golf_defaults() {
    let m = golf_command().try_get_matches_from(["golf", "-"]).unwrap();

    let args: GolfArgs = GolfParams::from_matches(&m).into();

    assert_eq!(args.input, IrInput::Stdin);
    assert_eq!(args.config, squeeze_compiler::GolfConfig::default());
    assert!(args.lang.is_none());
    assert!(args.output.is_none());
}

#[test]
fn inline_ir_conflicts_with_file() {
    let result = golf_command().try_get_matches_from(["golf", "prog.json", "-i", "{}"]);

    assert!(result.is_err());
}

#[test]
fn emit_accepts_search_flags() {
    let result = emit_command().try_get_matches_from([
        "emit",
        "prog.json",
        "--max-steps",
        "10",
        "--parallel",
        "--history",
    ]);
    assert!(
        result.is_ok(),
        "emit should accept search flags: {:?}",
        result.err()
    );

    let m = result.unwrap();
    let params = EmitParams::from_matches(&m);
    assert_eq!(params.ir_path, Some(PathBuf::from("prog.json")));
    // max_steps, parallel, history are parsed but not in EmitParams
}

#[test]
fn emit_params_become_args() {
    let m = emit_command()
        .try_get_matches_from(["emit", "prog.json", "-o", "out.js", "--json"])
        .unwrap();

    let args: EmitArgs = EmitParams::from_matches(&m).into();

    assert_eq!(args.input, IrInput::File(PathBuf::from("prog.json")));
    assert_eq!(args.output, Some(PathBuf::from("out.js")));
    assert!(args.json);
    assert!(!args.trust_types);
}

#[test]
fn emit_help_hides_search_flags() {
    let mut cmd = emit_command();
    let help = cmd.render_help().to_string();

    assert!(help.contains("--lang"), "emit help should show --lang");
    assert!(help.contains("--output"), "emit help should show --output");
    assert!(
        !help.contains("--max-steps"),
        "emit help should not show --max-steps"
    );
    assert!(
        !help.contains("--parallel"),
        "emit help should not show --parallel"
    );
    assert!(
        !help.contains("--history"),
        "emit help should not show --history"
    );
}

#[test]
fn golf_help_shows_search_flags() {
    let mut cmd = golf_command();
    let help = cmd.render_help().to_string();

    assert!(help.contains("--max-steps"));
    assert!(help.contains("--parallel"));
    assert!(help.contains("--history"));
    assert!(help.contains("--trust-types"));
}

#[test]
fn langs_takes_no_args() {
    assert!(langs_command().try_get_matches_from(["langs"]).is_ok());
    assert!(
        langs_command()
            .try_get_matches_from(["langs", "extra"])
            .is_err()
    );
}

#[test]
fn cli_requires_a_subcommand() {
    let result = build_cli().try_get_matches_from(["squeeze"]);

    assert!(result.is_err());
}

#[test]
fn cli_dispatches_subcommands() {
    let m = build_cli()
        .try_get_matches_from(["squeeze", "golf", "p.json", "-l", "js"])
        .unwrap();

    let Some(("golf", sub)) = m.subcommand() else {
        panic!("expected golf subcommand");
    };
    assert_eq!(
        GolfParams::from_matches(sub).lang.as_deref(),
        Some("js")
    );
}
