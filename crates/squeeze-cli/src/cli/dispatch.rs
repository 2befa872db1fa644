//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use squeeze_compiler::GolfConfig;

use crate::commands::emit::EmitArgs;
use crate::commands::golf::GolfArgs;
use crate::commands::ir_loader::IrInput;

pub struct GolfParams {
    pub ir_path: Option<PathBuf>,
    pub ir_text: Option<String>,
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
    pub max_steps: Option<usize>,
    pub parallel: bool,
    pub history: bool,
    pub json: bool,
    pub trust_types: bool,
    pub verbose: u8,
}

impl GolfParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            // Input
            ir_path: m.get_one::<PathBuf>("ir_path").cloned(),
            ir_text: m.get_one::<String>("ir_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),

            // Search options
            max_steps: m.get_one::<usize>("max_steps").copied(),
            parallel: m.get_flag("parallel"),
            trust_types: m.get_flag("trust_types"),

            // Output
            output: m.get_one::<PathBuf>("output").cloned(),
            history: m.get_flag("history"),
            json: m.get_flag("json"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<GolfParams> for GolfArgs {
    fn from(p: GolfParams) -> Self {
        Self {
            input: IrInput::new(p.ir_path, p.ir_text),
            lang: p.lang,
            output: p.output,
            config: GolfConfig {
                max_steps: p.max_steps,
                parallel_variants: p.parallel,
                skip_types_pass: p.trust_types,
            },
            history: p.history,
            json: p.json,
        }
    }
}

pub struct EmitParams {
    pub ir_path: Option<PathBuf>,
    pub ir_text: Option<String>,
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub trust_types: bool,
    pub verbose: u8,
    // Note: max_steps, parallel, history are parsed but not extracted (unified flags)
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ir_path: m.get_one::<PathBuf>("ir_path").cloned(),
            ir_text: m.get_one::<String>("ir_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            json: m.get_flag("json"),
            trust_types: m.get_flag("trust_types"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        Self {
            input: IrInput::new(p.ir_path, p.ir_text),
            lang: p.lang,
            output: p.output,
            trust_types: p.trust_types,
            json: p.json,
        }
    }
}

pub struct LangsParams;

impl LangsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}
