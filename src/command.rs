use crate::env::Environment;
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What the session should do after a line has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input with this cursor.
    Continue(PathBuf),
    /// Stop the session.
    Exit,
}

/// A command that runs in-process against the extracted tree.
///
/// Implementors never mutate session state themselves. A command that moves
/// the cursor returns the new location and the caller decides whether to
/// adopt it.
pub trait BuiltinCommand: Sized {
    /// Verb the command is invoked with, e.g. "cd".
    fn name(&self) -> &'static str;

    /// Execute against the cursor `cwd`, writing output to `stdout`.
    ///
    /// Returns `Some(path)` when the cursor should move. User-level failures
    /// (missing target) are written to `stdout` and are not errors; `Err` is
    /// reserved for host I/O failures.
    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &Environment,
        cwd: &Path,
    ) -> Result<Option<PathBuf>>;
}
