use std::path::PathBuf;

use squeeze_compiler::Golfer;
use tracing::debug;

use super::ir_loader::IrInput;
use super::lang_resolver::require_lang;
use super::output::{Report, write_output};

pub struct EmitArgs {
    pub input: IrInput,
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
    pub trust_types: bool,
    pub json: bool,
}

pub fn run(args: EmitArgs) {
    let program = args.input.load().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let lang = require_lang(args.lang.as_deref(), args.output.as_deref(), "emit");
    debug!(language = lang.name(), "emitting without search");
    let golfer = Golfer::new(lang).with_skip_types_pass(args.trust_types);

    let text = golfer.emit_only(&program).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let out = if args.json {
        Report::emitted(golfer.lang().name(), &text).to_json()
    } else {
        text
    };
    write_output(&out, args.output.as_deref());
}
