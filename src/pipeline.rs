use crate::command::{Commands, ExecutableCommand};
use crate::env::GlobalEnvironment;
use crate::parser::Invocation;
use anyhow::{Context, Result, anyhow};
use log::{debug, trace};
use nix::fcntl::OFlag;
use nix::unistd::pipe2;
use std::fs::File;
use std::os::fd::BorrowedFd;
use std::thread;

/// Builds pipelines out of parsed invocations.
#[derive(Default)]
pub struct PipelineFactory {
    commands: Commands,
}

impl PipelineFactory {
    pub fn new(commands: Commands) -> Self {
        Self { commands }
    }

    /// Connect `invocations` with OS pipes, reading the first stage from `input` and
    /// writing the last stage to `output`.
    ///
    /// The outer handles are duplicated, so the caller keeps ownership of its own.
    /// Returns `None` for an empty pipeline, or when the pipes or duplicates can't be
    /// created; everything allocated up to that point is closed again.
    pub fn create_pipeline(
        &self,
        input: BorrowedFd<'_>,
        output: BorrowedFd<'_>,
        invocations: Vec<Invocation>,
    ) -> Option<Pipeline> {
        if invocations.is_empty() {
            return None;
        }
        match self.build(input, output, invocations) {
            Ok(pipeline) => Some(pipeline),
            Err(err) => {
                debug!("dropping pipeline: {err:#}");
                None
            }
        }
    }

    fn build(
        &self,
        input: BorrowedFd<'_>,
        output: BorrowedFd<'_>,
        invocations: Vec<Invocation>,
    ) -> Result<Pipeline> {
        let last = invocations.len() - 1;
        let mut stages = Vec::with_capacity(invocations.len());
        let mut stage_input = duplicate(input).context("duplicating pipeline input")?;

        for (i, invocation) in invocations.iter().enumerate() {
            let command = self
                .commands
                .try_create(invocation)
                .ok_or_else(|| anyhow!("command not found: {}", invocation.name))?;
            let (stage_output, next_input) = if i == last {
                let out = duplicate(output).context("duplicating pipeline output")?;
                (out, None)
            } else {
                let (read, write) = pipe2(OFlag::O_CLOEXEC).context("creating pipe")?;
                (File::from(write), Some(File::from(read)))
            };
            trace!("stage {i}: {invocation:?}");
            stages.push(Stage {
                command,
                input: stage_input,
                output: stage_output,
            });
            match next_input {
                Some(next) => stage_input = next,
                None => break,
            }
        }

        Ok(Pipeline { stages })
    }
}

fn duplicate(fd: BorrowedFd<'_>) -> std::io::Result<File> {
    Ok(File::from(fd.try_clone_to_owned()?))
}

struct Stage {
    command: Box<dyn ExecutableCommand>,
    input: File,
    output: File,
}

impl Stage {
    fn run(self, env: &GlobalEnvironment) -> Result<()> {
        let Stage {
            command,
            mut input,
            mut output,
        } = self;
        let result = command.execute(&mut input, &mut output, env);
        // The next stage only sees end of input once every write end is closed.
        drop(output);
        drop(input);
        result
    }
}

/// A ready-to-run chain of commands. Every handle in it is owned by one stage.
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run all stages concurrently and wait for every one of them.
    ///
    /// Returns the first failure in stage order. A stage that panics is a failure.
    pub fn execute(self, env: &GlobalEnvironment) -> Result<()> {
        let results: Vec<Result<()>> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .stages
                .into_iter()
                .map(|stage| scope.spawn(move || stage.run(env)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(anyhow!("pipeline stage panicked")))
                })
                .collect()
        });

        for (i, result) in results.iter().enumerate() {
            if let Err(err) = result {
                debug!("stage {i} failed: {err:#}");
            }
        }
        results.into_iter().collect()
    }
}
