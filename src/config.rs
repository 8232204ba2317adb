use argh::FromArgs;
use log::LevelFilter;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(FromArgs, Debug, PartialEq)]
/// A small shell with pipelines and variables.
pub struct Options {
    /// prompt printed before each interactive line
    #[argh(option, default = "String::from(\"$ \")")]
    pub prompt: String,

    /// read input without line editing, even from a terminal
    #[argh(switch)]
    pub no_prompt: bool,

    /// start with only the status variable set instead of inheriting the process environment
    #[argh(switch)]
    pub clean_env: bool,

    /// log level: off, error, warn, info, debug or trace
    #[argh(option, default = "LevelFilter::Warn")]
    pub log_level: LevelFilter,

    /// write log records to this file instead of stderr
    #[argh(option)]
    pub log_file: Option<PathBuf>,

    /// script to run instead of reading standard input
    #[argh(positional)]
    pub script: Option<PathBuf>,
}

impl Options {
    /// Whether input should go through the line editor.
    pub fn interactive(&self) -> bool {
        !self.no_prompt && self.script.is_none() && std::io::stdin().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, argh::EarlyExit> {
        Options::from_args(&["pipeshell"], args)
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.prompt, "$ ");
        assert!(!options.no_prompt);
        assert!(!options.clean_env);
        assert_eq!(options.log_level, LevelFilter::Warn);
        assert_eq!(options.log_file, None);
        assert_eq!(options.script, None);
    }

    #[test]
    fn test_all_options() {
        let options = parse(&[
            "--prompt",
            "> ",
            "--no-prompt",
            "--clean-env",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/sh.log",
            "run.sh",
        ])
        .unwrap();
        assert_eq!(options.prompt, "> ");
        assert!(options.no_prompt);
        assert!(options.clean_env);
        assert_eq!(options.log_level, LevelFilter::Debug);
        assert_eq!(options.log_file, Some(PathBuf::from("/tmp/sh.log")));
        assert_eq!(options.script, Some(PathBuf::from("run.sh")));
        assert!(!options.interactive());
    }

    #[test]
    fn test_bad_log_level() {
        let err = parse(&["--log-level", "loud"]).unwrap_err();
        assert!(err.status.is_err());
    }
}
