use anyhow::{Context, Result};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Install the global logger: stderr by default, or `file` when one is given.
pub fn init(level: LevelFilter, file: Option<&Path>) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Trace)
        .build();
    let installed = match file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("can't open log file {}", path.display()))?;
            WriteLogger::init(level, config, file)
        }
        None => TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto),
    };
    installed.context("logger already installed")
}
