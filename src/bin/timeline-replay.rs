use clap::{App, Arg};
use std::io::{self, Write};
use std::process;
use usage_timeline::replay::{Replayer, Script};
use usage_timeline::{ReplayOpts, Result, DUMP_ARG, SCRIPT_ARG};

#[macro_use]
extern crate log;

///
/// Binary command line wrapper for replaying timeline scripts
/// args:
/// script, -s, path of the YAML or JSON script
/// dump, -d, print the final breakpoints after the script
///
fn main() {
    env_logger::init();

    let matches = App::new("timeline-replay")
        .version(env!("CARGO_PKG_VERSION"))
        .about("replay usage timeline scripts")
        .args(&[
            Arg::with_name(SCRIPT_ARG)
                .short("s")
                .long(SCRIPT_ARG)
                .takes_value(true)
                .required(true),
            Arg::with_name(DUMP_ARG).short("d").long(DUMP_ARG),
        ])
        .get_matches();

    if let Err(e) = ReplayOpts::get_config(matches).and_then(|opts| run(&opts)) {
        error!("replay failed: {}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(opts: &ReplayOpts) -> Result<()> {
    let script = Script::from_file(opts.script().as_path())?;
    let stdout = io::stdout();
    let mut replayer = Replayer::new(stdout.lock());
    let timeline = replayer.replay(&script)?;
    if opts.dump() {
        replayer.dump(&timeline)?;
    }
    replayer.into_inner().flush()?;
    Ok(())
}
