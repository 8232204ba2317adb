use anyhow::{Context, Result};
use log::debug;
use pipeshell::config::Options;
use pipeshell::{GlobalEnvironment, PromptSource, ReaderSource, Shell, logging};
use std::fs::File;
use std::io::{self, BufReader};
use std::os::fd::AsFd;
use std::process::ExitCode;

fn main() -> ExitCode {
    let options: Options = argh::from_env();
    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pipeshell: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<()> {
    logging::init(options.log_level, options.log_file.as_deref())?;
    debug!("{options:?}");

    let env = if options.clean_env {
        GlobalEnvironment::new()
    } else {
        GlobalEnvironment::inherit()
    };
    let shell = Shell::new(env);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let (input, output) = (stdin.as_fd(), stdout.as_fd());

    match &options.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("can't open script {}", path.display()))?;
            shell.run(ReaderSource::new(BufReader::new(file)), input, output)
        }
        None if options.interactive() => {
            let source = PromptSource::new(options.prompt.as_str())?;
            shell.run(source, input, output)
        }
        None => shell.run(ReaderSource::new(stdin.lock()), input, output),
    }
}
