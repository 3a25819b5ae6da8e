mod cli;
mod commands;
mod logging;

use cli::{DumpParams, RewriteParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            logging::init(params.verbose);
            commands::dump::run(params.into());
        }
        Some(("rewrite", m)) => {
            let params = RewriteParams::from_matches(m);
            logging::init(params.verbose);
            commands::rewrite::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
