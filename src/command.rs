use crate::env::GlobalEnvironment;
use crate::parser::Invocation;
use anyhow::Result;
use log::debug;
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::process::Stdio;

/// Abstraction over a readable input stream that can also be handed to a child process.
///
/// [`Stdin::stdio`] gives the child its own duplicate, so the original handle stays
/// open and owned by the caller.
pub trait Stdin: Read {
    /// Create a [`Stdio`] handle suitable for `std::process::Command`.
    fn stdio(&self) -> io::Result<Stdio>;
}

/// Abstraction over a writable output stream that can also be handed to a child process.
pub trait Stdout: Write {
    /// Create a [`Stdio`] handle suitable for `std::process::Command`.
    fn stdio(&self) -> io::Result<Stdio>;
}

impl Stdin for File {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(self.try_clone()?.into())
    }
}

impl Stdout for File {
    fn stdio(&self) -> io::Result<Stdio> {
        Ok(self.try_clone()?.into())
    }
}

fn in_memory() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "in-memory stream can't be passed to a child process",
    )
}

/// In-memory input, for running builtins outside a pipeline.
impl Stdin for Cursor<Vec<u8>> {
    fn stdio(&self) -> io::Result<Stdio> {
        Err(in_memory())
    }
}

/// In-memory output, for capturing what builtins write.
impl Stdout for Vec<u8> {
    fn stdio(&self) -> io::Result<Stdio> {
        Err(in_memory())
    }
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// `Ok(())` means success; an error carries the failure message. A command reads only
/// from `stdin` and writes only to `stdout`, and never closes either of them: the
/// handles belong to the pipeline stage that runs it.
pub trait ExecutableCommand: Send {
    fn execute(
        self: Box<Self>,
        stdin: &mut dyn Stdin,
        stdout: &mut dyn Stdout,
        env: &GlobalEnvironment,
    ) -> Result<()>;
}

/// Factory that tries to create a command from a parsed invocation.
///
/// Returns `None` when the factory doesn't recognize the invocation's name.
pub trait CommandFactory: Send + Sync {
    fn try_create(&self, invocation: &Invocation) -> Option<Box<dyn ExecutableCommand>>;
}

/// Factory allows creating instances of ExecutableCommand.
///
/// Implemented for every built-in, for [`Assign`] and for the external command.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Ordered set of factories consulted by name.
pub struct Commands {
    factories: Vec<Box<dyn CommandFactory>>,
}

impl Commands {
    /// Create a registry from a custom set of factories, tried in order.
    pub fn new(factories: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { factories }
    }

    pub fn try_create(&self, invocation: &Invocation) -> Option<Box<dyn ExecutableCommand>> {
        let command = self
            .factories
            .iter()
            .find_map(|factory| factory.try_create(invocation));
        if command.is_none() {
            debug!("no factory for {:?}", invocation.name);
        }
        command
    }
}

impl Default for Commands {
    /// Bare assignments, the built-ins `cat`, `wc`, `echo`, `pwd`, `cd`, `ls`, `grep` and
    /// `exit`, and finally external programs for every other name.
    fn default() -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Assign>::default()),
            Box::new(Factory::<Cat>::default()),
            Box::new(Factory::<WC>::default()),
            Box::new(Factory::<Echo>::default()),
            Box::new(Factory::<Pwd>::default()),
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Ls>::default()),
            Box::new(Factory::<Grep>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}

/// Invocation without a command name: publishes its variables globally.
pub struct Assign {
    vars: Vec<(String, String)>,
}

impl CommandFactory for Factory<Assign> {
    fn try_create(&self, invocation: &Invocation) -> Option<Box<dyn ExecutableCommand>> {
        if !invocation.name.is_empty() {
            return None;
        }
        let vars = invocation
            .local_env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Some(Box::new(Assign { vars }))
    }
}

impl ExecutableCommand for Assign {
    fn execute(
        self: Box<Self>,
        _stdin: &mut dyn Stdin,
        _stdout: &mut dyn Stdout,
        env: &GlobalEnvironment,
    ) -> Result<()> {
        for (k, v) in self.vars {
            env.set(k, v);
        }
        Ok(())
    }
}
