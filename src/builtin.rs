use crate::command::BuiltinCommand;
use crate::env::Environment;
use crate::paths;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Print the logical path of the current directory.
pub struct Pwd;

impl BuiltinCommand for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &Environment,
        cwd: &Path,
    ) -> Result<Option<PathBuf>> {
        writeln!(stdout, "{}", env.logical(cwd))?;
        Ok(None)
    }
}

/// List entry names of the current directory in enumeration order.
pub struct Ls;

impl BuiltinCommand for Ls {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &Environment,
        cwd: &Path,
    ) -> Result<Option<PathBuf>> {
        let entries = fs::read_dir(cwd).with_context(|| format!("ls: {}", env.logical(cwd)))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("ls: {}", env.logical(cwd)))?;
            writeln!(stdout, "{}", entry.file_name().to_string_lossy())?;
        }
        Ok(None)
    }
}

/// Move the cursor to a directory relative to it.
pub struct Cd {
    /// Target exactly as typed.
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &Environment,
        cwd: &Path,
    ) -> Result<Option<PathBuf>> {
        let candidate = paths::resolve_child(cwd, &self.target);
        if !paths::exists(&candidate) || !paths::is_directory(&candidate) {
            writeln!(stdout, "Directory not found: {}", self.target)?;
            return Ok(None);
        }
        if !env.admits(&candidate) {
            debug!(dir = %self.target, "cd outside archive root rejected");
            writeln!(stdout, "Directory not found: {}", self.target)?;
            return Ok(None);
        }
        Ok(Some(candidate))
    }
}

/// Print a whole file as text.
///
/// The file is buffered entirely in memory. Invalid UTF-8 is replaced
/// rather than failing the command.
pub struct Cat {
    /// File name exactly as typed.
    pub file: String,
}

impl BuiltinCommand for Cat {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &Environment,
        cwd: &Path,
    ) -> Result<Option<PathBuf>> {
        let candidate = paths::resolve_child(cwd, &self.file);
        if !paths::exists(&candidate) || !paths::is_file(&candidate) {
            writeln!(stdout, "File not found: {}", self.file)?;
            return Ok(None);
        }
        if !env.admits(&candidate) {
            debug!(file = %self.file, "cat outside archive root rejected");
            writeln!(stdout, "File not found: {}", self.file)?;
            return Ok(None);
        }

        let bytes = fs::read(&candidate)
            .with_context(|| format!("cat: {}", env.logical(&candidate)))?;
        let text = String::from_utf8_lossy(&bytes);
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            writeln!(stdout)?;
        }
        Ok(None)
    }
}
