//! Command builders for the CLI.
//!
//! `golf` and `emit` accept the same flags; search flags are hidden from
//! `emit --help` since it never searches.

use clap::Command;

use super::args::*;

/// Add hidden search args (for commands that don't search).
fn with_hidden_search_args(cmd: Command) -> Command {
    cmd.arg(max_steps_arg().hide(true))
        .arg(parallel_arg().hide(true))
        .arg(history_arg().hide(true))
}

/// Input, target and logging args shared by every compiling command.
fn with_compile_args(cmd: Command) -> Command {
    cmd.arg(ir_path_arg())
        .arg(ir_text_arg())
        .arg(lang_arg())
        .arg(output_file_arg())
        .arg(json_arg())
        .arg(trust_types_arg())
        .arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("squeeze")
        .about("Lowers IR programs to the shortest code in a target language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(golf_command())
        .subcommand(emit_command())
        .subcommand(langs_command())
}

/// Golf a program: phases, search, final emission.
pub fn golf_command() -> Command {
    let cmd = Command::new("golf")
        .about("Compile an IR program to the shortest output found")
        .override_usage(
            "\
  squeeze golf <IR> -l <LANG>
  squeeze golf -i <JSON> -l <LANG>
  squeeze golf <IR> -o <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  squeeze golf prog.json -l janet            # golf for janet
  squeeze golf prog.json -o out.js           # language from extension
  squeeze golf - -l js < prog.json           # read stdin
  squeeze golf prog.json -l js --history     # show applied rewrites
  squeeze golf prog.json -l js --max-steps 1000 --parallel"#,
        )
        .arg(max_steps_arg())
        .arg(parallel_arg())
        .arg(history_arg());

    with_compile_args(cmd)
}

/// Emit a program without searching.
pub fn emit_command() -> Command {
    let cmd = Command::new("emit")
        .about("Emit an IR program without golfing it")
        .override_usage(
            "\
  squeeze emit <IR> -l <LANG>
  squeeze emit -i <JSON> -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  squeeze emit prog.json -l janet
  squeeze emit prog.json -l ir               # canonical IR text"#,
        );

    with_hidden_search_args(with_compile_args(cmd))
}

/// List target languages.
pub fn langs_command() -> Command {
    Command::new("langs").about("List supported target languages")
}
