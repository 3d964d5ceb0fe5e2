//! Line sources feeding the session loop.
//!
//! The loop in [`crate::Interpreter::run`] does not know whether a person or
//! a script is on the other end; each source decides whether a prompt is
//! shown and how input ends.

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};
use std::path::Path;

/// Result of asking a source for the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Interactive end of input (Ctrl-D or closed stdin).
    Eof,
    /// Interactive interrupt (Ctrl-C).
    Interrupted,
    /// A script ran out of lines.
    Exhausted,
}

pub trait LineSource {
    /// Read the next line, showing `prompt` if the source is interactive.
    ///
    /// Sources that print the prompt themselves write it to `stdout`.
    fn read_line(&mut self, prompt: &str, stdout: &mut dyn Write) -> Result<Input>;
}

/// Pre-read script lines, replayed without prompts.
pub struct ScriptSource {
    lines: std::vec::IntoIter<String>,
}

impl ScriptSource {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter(),
        }
    }

    /// Read the whole script file up front, one command per line.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Ok(Self::new(text.lines().map(str::to_string).collect()))
    }
}

impl LineSource for ScriptSource {
    fn read_line(&mut self, _prompt: &str, _stdout: &mut dyn Write) -> Result<Input> {
        Ok(match self.lines.next() {
            Some(line) => Input::Line(line),
            None => Input::Exhausted,
        })
    }
}

/// Terminal input through rustyline, with in-memory history.
pub struct ReadlineSource {
    editor: DefaultEditor,
}

impl ReadlineSource {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to create line editor")?;
        Ok(Self { editor })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str, stdout: &mut dyn Write) -> Result<Input> {
        // rustyline draws the prompt itself, so pending output goes first.
        stdout.flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Plain buffered input for non-terminal stdin. Prompts go to `stdout` so
/// the transcript looks the same as a terminal session.
pub struct BufReadSource<R> {
    reader: R,
}

impl<R: BufRead> BufReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufReadSource<R> {
    fn read_line(&mut self, prompt: &str, stdout: &mut dyn Write) -> Result<Input> {
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Input::Eof);
        }
        Ok(Input::Line(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}
