use crate::{Result, TimelineErr};
use clap::ArgMatches;
use std::path::PathBuf;

pub const SCRIPT_ARG: &str = "script";
pub const DUMP_ARG: &str = "dump";

/// Options of the replay tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOpts {
    script: PathBuf,
    dump: bool,
}

impl ReplayOpts {
    pub fn new(script: PathBuf, dump: bool) -> ReplayOpts {
        ReplayOpts { script, dump }
    }

    pub fn get_config(matches: ArgMatches) -> Result<ReplayOpts> {
        let script = matches
            .value_of(SCRIPT_ARG)
            .ok_or_else(|| TimelineErr::OptionErr(format!("missing --{}", SCRIPT_ARG)))?;
        if script.is_empty() {
            return Err(TimelineErr::OptionErr(String::from("script path is empty")));
        }

        Ok(ReplayOpts {
            script: PathBuf::from(script),
            dump: matches.is_present(DUMP_ARG),
        })
    }

    pub fn script(&self) -> &PathBuf {
        &self.script
    }

    pub fn dump(&self) -> bool {
        self.dump
    }
}

#[cfg(test)]
mod test {
    use crate::common::option::{ReplayOpts, DUMP_ARG, SCRIPT_ARG};
    use clap::{App, Arg};
    use std::path::PathBuf;

    fn app() -> App<'static, 'static> {
        App::new("test").args(&[
            Arg::with_name(SCRIPT_ARG).long(SCRIPT_ARG).takes_value(true),
            Arg::with_name(DUMP_ARG).long(DUMP_ARG),
        ])
    }

    #[test]
    fn read_options() {
        let matches = app().get_matches_from(vec!["test", "--script", "ops.yaml", "--dump"]);
        let opts = ReplayOpts::get_config(matches).unwrap();
        assert_eq!(opts.script(), &PathBuf::from("ops.yaml"));
        assert!(opts.dump());
        assert_eq!(opts, ReplayOpts::new(PathBuf::from("ops.yaml"), true));
    }

    #[test]
    fn dump_defaults_off() {
        let matches = app().get_matches_from(vec!["test", "--script", "ops.yaml"]);
        let opts = ReplayOpts::get_config(matches).unwrap();
        assert_eq!(opts, ReplayOpts::new(PathBuf::from("ops.yaml"), false));
    }

    #[test]
    fn missing_script() {
        let matches = app().get_matches_from(vec!["test"]);
        assert!(ReplayOpts::get_config(matches).is_err());
    }
}
