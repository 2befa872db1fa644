mod cli;
mod commands;
mod logging;

use cli::{EmitParams, GolfParams, LangsParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("golf", m)) => {
            let params = GolfParams::from_matches(m);
            logging::init(params.verbose);
            commands::golf::run(params.into());
        }
        Some(("emit", m)) => {
            let params = EmitParams::from_matches(m);
            logging::init(params.verbose);
            commands::emit::run(params.into());
        }
        Some(("langs", m)) => {
            let _params = LangsParams::from_matches(m);
            commands::langs::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}
