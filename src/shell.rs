use crate::env::GlobalEnvironment;
use crate::parser::{Invocation, ParseOutcome, Parser};
use crate::pipeline::PipelineFactory;
use crate::source::LineSource;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::Write;
use std::os::fd::BorrowedFd;

/// A minimal shell: reads lines, runs each one as a pipeline.
///
/// Example
/// ```
/// use pipeshell::{GlobalEnvironment, ReaderSource, Shell};
/// use std::os::fd::AsFd;
///
/// let sh = Shell::new(GlobalEnvironment::new());
/// let out = tempfile::tempfile().unwrap();
/// let stdin = std::io::stdin();
/// sh.run(ReaderSource::new("x=1\n".as_bytes()), stdin.as_fd(), out.as_fd())
///     .unwrap();
/// assert_eq!(sh.env().get("x").as_deref(), Some("1"));
/// ```
pub struct Shell {
    env: GlobalEnvironment,
    pipelines: PipelineFactory,
}

impl Shell {
    /// Create a shell with the default command set.
    pub fn new(env: GlobalEnvironment) -> Self {
        Self::with_pipelines(env, PipelineFactory::default())
    }

    pub fn with_pipelines(env: GlobalEnvironment, pipelines: PipelineFactory) -> Self {
        Self { env, pipelines }
    }

    pub fn env(&self) -> &GlobalEnvironment {
        &self.env
    }

    /// Run every line of `source` until it is exhausted.
    ///
    /// Pipelines read from `input` and write to `output`. Parse issues and command
    /// failures are reported on `output` as well; the error is only returned when
    /// `output` itself can't be written.
    pub fn run<S: LineSource>(
        &self,
        source: S,
        input: BorrowedFd<'_>,
        output: BorrowedFd<'_>,
    ) -> Result<()> {
        let mut report = File::from(
            output
                .try_clone_to_owned()
                .context("duplicating shell output")?,
        );
        let mut parser = Parser::new(source, &self.env);

        loop {
            let (invocations, outcome) = parser.parse();
            match outcome {
                ParseOutcome::Ok => self.execute(invocations, input, output, &mut report)?,
                ParseOutcome::EndOfInput => {
                    self.execute(invocations, input, output, &mut report)?;
                    return Ok(());
                }
                ParseOutcome::Error(err) => {
                    warn!("parse error: {err}");
                    report.write_all(b"Parse issue\n")?;
                }
            }
        }
    }

    fn execute(
        &self,
        invocations: Vec<Invocation>,
        input: BorrowedFd<'_>,
        output: BorrowedFd<'_>,
        report: &mut File,
    ) -> Result<()> {
        let Some(pipeline) = self.pipelines.create_pipeline(input, output, invocations) else {
            return Ok(());
        };
        debug!("running pipeline of {}", pipeline.len());
        match pipeline.execute(&self.env) {
            Ok(()) => self.env.set_status(true),
            Err(err) => {
                self.env.set_status(false);
                writeln!(report, "{err}")?;
            }
        }
        Ok(())
    }
}
