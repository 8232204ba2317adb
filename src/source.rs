use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead};

/// Supplier of input lines for the tokenizer.
///
/// Lines are pulled lazily, so an interactive source only prompts when the
/// tokenizer actually needs more characters.
pub trait LineSource {
    /// Read the next line, including its trailing `\n` when it has one.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

/// Line source backed by any buffered reader: files, pipes, byte slices.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line)? {
            0 => Ok(None),
            _ => Ok(Some(String::from_utf8_lossy(&line).into_owned())),
        }
    }
}

/// Interactive terminal input read through `rustyline`.
pub struct PromptSource {
    editor: DefaultEditor,
    prompt: String,
}

impl PromptSource {
    pub fn new(prompt: impl Into<String>) -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            prompt: prompt.into(),
        })
    }
}

impl LineSource for PromptSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(mut line) => {
                line.push('\n');
                Ok(Some(line))
            }
            // Ctrl-C drops whatever was typed on this line.
            Err(ReadlineError::Interrupted) => Ok(Some("\n".to_string())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(err)) => Err(err),
            Err(err) => Err(io::Error::other(err)),
        }
    }
}
