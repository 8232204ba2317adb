//! A small POSIX-like shell core: tokenizer, parser, environment store and a
//! pipeline executor that connects commands with OS pipes.
//!
//! Input flows through the [`lexer`] (characters to tokens, with variable
//! expansion against the [`GlobalEnvironment`]), the [`parser`] (tokens to one
//! [`Invocation`] per command of a line), and the [`pipeline`] module, which
//! runs all commands of a line concurrently. [`Shell`] ties these together in
//! the read-execute loop used by the binary.
//!
//! Built-in commands (`cat`, `wc`, `echo`, `pwd`, `cd`, `ls`, `grep`, `exit`)
//! are implemented in Rust; every other name is looked up in `PATH` and run as
//! an external program. The [`command`] module exposes the traits for plugging
//! in commands of your own.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
mod external;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod pipeline;
mod shell;
pub mod source;

pub use command::{CommandFactory, Commands, ExecutableCommand};
pub use env::{Environment, GlobalEnvironment};
pub use external::find_command_path;
pub use lexer::{LexError, Token, TokenKind, Tokenizer, tokenize};
pub use parser::{Invocation, ParseOutcome, Parser};
pub use pipeline::{Pipeline, PipelineFactory};
pub use shell::Shell;
pub use source::{LineSource, PromptSource, ReaderSource};
