use crate::env::{Environment, GlobalEnvironment};
use crate::lexer::{LexError, TokenKind, Tokenizer};
use crate::source::LineSource;
use log::debug;

/// One command of a pipeline as written by the user.
///
/// An empty `name` means the invocation only carries assignments (`x=1 y=2`),
/// which are applied to the global environment when executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
    /// Variables assigned in front of the command name.
    pub local_env: Environment,
}

impl Invocation {
    pub fn new(name: impl Into<String>, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            local_env: Environment::new(),
        }
    }

    pub fn with_env(mut self, key: &str, val: &str) -> Self {
        self.local_env.set(key, val);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.local_env.is_empty()
    }

    fn push_word(&mut self, word: String) {
        if !self.name.is_empty() {
            self.args.push(word);
            return;
        }
        match word.split_once('=') {
            Some((key, value)) if !key.is_empty() => self.local_env.set(key, value),
            _ => self.name = word,
        }
    }
}

/// How a call to [`Parser::parse`] ended.
#[derive(Debug)]
pub enum ParseOutcome {
    /// A full line was read.
    Ok,
    /// The input is exhausted; no line terminator followed the returned commands.
    EndOfInput,
    /// The tokenizer failed; the partial command was discarded.
    Error(LexError),
}

/// Groups tokens into the invocations of one pipeline per input line.
pub struct Parser<'env, S> {
    tokenizer: Tokenizer<'env, S>,
}

impl<'env, S: LineSource> Parser<'env, S> {
    pub fn new(source: S, env: &'env GlobalEnvironment) -> Self {
        Self::from_tokenizer(Tokenizer::new(source, env))
    }

    pub fn from_tokenizer(tokenizer: Tokenizer<'env, S>) -> Self {
        Self { tokenizer }
    }

    /// Read tokens up to the end of the current line.
    pub fn parse(&mut self) -> (Vec<Invocation>, ParseOutcome) {
        let mut pipe = Vec::new();
        let mut current = Invocation::default();

        loop {
            let token = match self.tokenizer.next_token() {
                Ok(Some(token)) => token,
                Ok(None) => {
                    if !current.is_empty() {
                        pipe.push(current);
                    }
                    debug!("last line: {pipe:?}");
                    return (pipe, ParseOutcome::EndOfInput);
                }
                Err(err) => {
                    debug!("dropping {current:?}: {err}");
                    return (pipe, ParseOutcome::Error(err));
                }
            };

            match token.kind {
                TokenKind::Word => current.push_word(token.value),
                TokenKind::Pipe => {
                    if !current.is_empty() {
                        pipe.push(std::mem::take(&mut current));
                    }
                }
                TokenKind::EndLine => {
                    if !current.is_empty() {
                        pipe.push(current);
                    }
                    debug!("line: {pipe:?}");
                    return (pipe, ParseOutcome::Ok);
                }
                TokenKind::Comment => {}
            }
        }
    }
}
