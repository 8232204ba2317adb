//! Lexical analysis: splits the input stream into words, comments, pipes and line ends.
//!
//! The tokenizer keeps a stack of [`LexerState`]s so that contexts can nest, e.g. a
//! variable name inside double quotes inside a word. The top of the stack is the
//! active state, [`LexerState::Start`] when the stack is empty.

use crate::env::GlobalEnvironment;
use crate::source::{LineSource, ReaderSource};
use log::trace;
use std::collections::VecDeque;
use std::fmt;
use std::io;
use thiserror::Error;

/// Syntactic class of a single input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuneClass {
    Whitespace,
    DoubleQuote,
    SingleQuote,
    Escape,
    Comment,
    EndOfLine,
    Pipe,
    VariableSigil,
    Ordinary,
    /// Never produced by [`classify`]; synthesized when the input runs out.
    EndOfStream,
}

/// Map a character to its [`RuneClass`].
pub fn classify(ch: char) -> RuneClass {
    match ch {
        ' ' | '\t' | '\r' => RuneClass::Whitespace,
        '"' => RuneClass::DoubleQuote,
        '\'' => RuneClass::SingleQuote,
        '\\' => RuneClass::Escape,
        '#' => RuneClass::Comment,
        '\n' => RuneClass::EndOfLine,
        '|' => RuneClass::Pipe,
        '$' => RuneClass::VariableSigil,
        _ => RuneClass::Ordinary,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Comment,
    EndLine,
    Pipe,
}

/// A token produced by the [`Tokenizer`].
///
/// For words the value is the final text with quotes, escapes and variables resolved.
/// Pipes and line ends carry their delimiter character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn word(value: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Word,
            value: value.into(),
        }
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Comment,
            value: value.into(),
        }
    }

    pub fn pipe() -> Self {
        Self {
            kind: TokenKind::Pipe,
            value: "|".to_string(),
        }
    }

    pub fn end_line() -> Self {
        Self {
            kind: TokenKind::EndLine,
            value: "\n".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerState {
    Start,
    InWord,
    /// The previous character was an escape; the next one is taken literally.
    Escaping,
    /// Same as [`LexerState::Escaping`], inside double quotes.
    EscapingInQuote,
    InDoubleQuote,
    InSingleQuote,
    InComment,
    /// A word was cut short by `|`; the pipe token is due on the next call.
    PipeSeen,
    /// A word was cut short by `\n`; the line end token is due on the next call.
    EndLineSeen,
    InVariableName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
}

impl fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteKind::Single => f.write_str("single"),
            QuoteKind::Double => f.write_str("double"),
        }
    }
}

/// Errors that can occur during the lexical analysis process.
#[derive(Debug, Error)]
pub enum LexError {
    #[error("EOF found after escape character")]
    UnterminatedEscape,
    #[error("EOF found when expecting closing {0} quote")]
    UnterminatedQuote(QuoteKind),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Turns a stream of lines into a sequence of [`Token`]s.
///
/// `$NAME` references are resolved against the [`GlobalEnvironment`] while scanning.
pub struct Tokenizer<'env, S> {
    source: S,
    env: &'env GlobalEnvironment,
    pending: VecDeque<char>,
    stack: Vec<LexerState>,
    ended: bool,
}

impl<'env, S: LineSource> Tokenizer<'env, S> {
    pub fn new(source: S, env: &'env GlobalEnvironment) -> Self {
        Self {
            source,
            env,
            pending: VecDeque::new(),
            stack: Vec::new(),
            ended: false,
        }
    }

    /// Produce the next token.
    ///
    /// `Ok(None)` marks the end of the stream and is returned again on every later call.
    /// After an error the tokenizer is ended as well.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.ended {
            return Ok(None);
        }
        let result = self.scan();
        match &result {
            Ok(token) => trace!("token: {token:?}"),
            Err(_) => {
                self.ended = true;
                self.stack.clear();
            }
        }
        result
    }

    fn state(&self) -> LexerState {
        self.stack.last().copied().unwrap_or(LexerState::Start)
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    fn push(&mut self, state: LexerState) {
        self.stack.push(state);
    }

    /// Start a word whose first character opens a nested context.
    fn enter_word(&mut self, nested: LexerState) {
        self.push(LexerState::InWord);
        self.push(nested);
    }

    /// Token postponed by the previous call, if any.
    fn take_deferred(&mut self) -> Option<Token> {
        match self.state() {
            LexerState::PipeSeen => {
                self.pop();
                Some(Token::pipe())
            }
            LexerState::EndLineSeen => {
                self.pop();
                Some(Token::end_line())
            }
            _ => None,
        }
    }

    fn read_rune(&mut self) -> Result<(Option<char>, RuneClass), LexError> {
        loop {
            if let Some(ch) = self.pending.pop_front() {
                return Ok((Some(ch), classify(ch)));
            }
            match self.source.read_line()? {
                Some(line) => self.pending.extend(line.chars()),
                None => return Ok((None, RuneClass::EndOfStream)),
            }
        }
    }

    /// Append the value of the collected variable name to the word.
    fn expand(&self, name: &mut String, word: &mut String) {
        if name.is_empty() {
            word.push('$');
            return;
        }
        let value = self.env.get(name).unwrap_or_default();
        trace!("${name} expands to {value:?}");
        word.push_str(&value);
        name.clear();
    }

    fn scan(&mut self) -> Result<Option<Token>, LexError> {
        let mut kind = TokenKind::Word;
        let mut value = String::new();
        let mut name = String::new();
        let mut replay = None;

        if let Some(token) = self.take_deferred() {
            return Ok(Some(token));
        }

        loop {
            let (ch, class) = match replay.take() {
                Some(rune) => rune,
                None => self.read_rune()?,
            };

            match self.state() {
                LexerState::Start => match class {
                    RuneClass::Whitespace => {}
                    RuneClass::DoubleQuote => self.enter_word(LexerState::InDoubleQuote),
                    RuneClass::SingleQuote => self.enter_word(LexerState::InSingleQuote),
                    RuneClass::Escape => self.enter_word(LexerState::Escaping),
                    RuneClass::VariableSigil => self.enter_word(LexerState::InVariableName),
                    RuneClass::Comment => {
                        kind = TokenKind::Comment;
                        self.push(LexerState::InComment);
                    }
                    RuneClass::EndOfLine => return Ok(Some(Token::end_line())),
                    RuneClass::Pipe => return Ok(Some(Token::pipe())),
                    RuneClass::Ordinary => {
                        self.push(LexerState::InWord);
                        value.extend(ch);
                    }
                    RuneClass::EndOfStream => {
                        self.ended = true;
                        return Ok(None);
                    }
                },

                LexerState::InWord => match class {
                    RuneClass::Whitespace => {
                        self.pop();
                        return Ok(Some(Token { kind, value }));
                    }
                    RuneClass::DoubleQuote => self.push(LexerState::InDoubleQuote),
                    RuneClass::SingleQuote => self.push(LexerState::InSingleQuote),
                    RuneClass::Escape => self.push(LexerState::Escaping),
                    RuneClass::VariableSigil => self.push(LexerState::InVariableName),
                    RuneClass::EndOfLine => {
                        self.pop();
                        self.push(LexerState::EndLineSeen);
                        return Ok(Some(Token { kind, value }));
                    }
                    RuneClass::Pipe => {
                        self.pop();
                        self.push(LexerState::PipeSeen);
                        return Ok(Some(Token { kind, value }));
                    }
                    RuneClass::Comment | RuneClass::Ordinary => value.extend(ch),
                    RuneClass::EndOfStream => {
                        self.pop();
                        self.ended = true;
                        return Ok(Some(Token { kind, value }));
                    }
                },

                LexerState::Escaping | LexerState::EscapingInQuote => match class {
                    RuneClass::EndOfStream => return Err(LexError::UnterminatedEscape),
                    _ => {
                        value.extend(ch);
                        self.pop();
                    }
                },

                LexerState::InDoubleQuote => match class {
                    RuneClass::DoubleQuote => self.pop(),
                    RuneClass::Escape => self.push(LexerState::EscapingInQuote),
                    RuneClass::VariableSigil => self.push(LexerState::InVariableName),
                    RuneClass::EndOfStream => {
                        return Err(LexError::UnterminatedQuote(QuoteKind::Double));
                    }
                    _ => value.extend(ch),
                },

                // Everything up to the closing quote is literal, `$` and `\` included.
                LexerState::InSingleQuote => match class {
                    RuneClass::SingleQuote => self.pop(),
                    RuneClass::EndOfStream => {
                        return Err(LexError::UnterminatedQuote(QuoteKind::Single));
                    }
                    _ => value.extend(ch),
                },

                LexerState::InComment => match class {
                    RuneClass::EndOfLine => {
                        self.pop();
                        return Ok(Some(Token::end_line()));
                    }
                    RuneClass::EndOfStream => {
                        self.pop();
                        self.ended = true;
                        return Ok(Some(Token { kind, value }));
                    }
                    _ => value.extend(ch),
                },

                LexerState::InVariableName => match class {
                    RuneClass::Ordinary => name.extend(ch),
                    _ => {
                        self.expand(&mut name, &mut value);
                        self.pop();
                        replay = Some((ch, class));
                    }
                },

                // Postponed tokens are taken before the loop; should one still be due,
                // the rune is put back unread.
                LexerState::PipeSeen | LexerState::EndLineSeen => {
                    if let Some(ch) = ch {
                        self.pending.push_front(ch);
                    }
                    return Ok(self.take_deferred());
                }
            }
        }
    }
}

impl<S: LineSource> Iterator for Tokenizer<'_, S> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenize a whole string at once.
pub fn tokenize(line: &str, env: &GlobalEnvironment) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(ReaderSource::new(line.as_bytes()), env).collect()
}
