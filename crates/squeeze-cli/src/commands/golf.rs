use std::path::PathBuf;

use squeeze_compiler::{GolfConfig, Golfer};
use tracing::debug;

use super::ir_loader::IrInput;
use super::lang_resolver::require_lang;
use super::output::{Report, write_output};

pub struct GolfArgs {
    pub input: IrInput,
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
    pub config: GolfConfig,
    pub history: bool,
    pub json: bool,
}

pub fn run(args: GolfArgs) {
    let program = args.input.load().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let lang = require_lang(args.lang.as_deref(), args.output.as_deref(), "golf");
    debug!(language = lang.name(), config = ?args.config, "golfing");
    let golfer = Golfer::new(lang).with_config(args.config);

    let compiled = match golfer.compile_detailed(&program) {
        Ok(compiled) => compiled,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if args.history {
        eprintln!(
            "variant {} of {}, {} explored, {} rejected",
            compiled.variant + 1,
            compiled.variants,
            compiled.explored,
            compiled.rejected
        );
        for plugin in &compiled.history {
            eprintln!("  {plugin}");
        }
    }

    let name = golfer.lang().name();
    let text = if args.json {
        Report::golfed(name, &compiled).to_json()
    } else {
        compiled.text.clone()
    };
    write_output(&text, args.output.as_deref());
}
