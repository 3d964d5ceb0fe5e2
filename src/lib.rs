//! A restricted, read-only shell over the contents of a tar or zip archive.
//!
//! The archive is extracted into a scratch directory by [`archive::materialize`]
//! and presented as a tree rooted at the logical path `root:/`. The same
//! [`Interpreter`] serves interactive sessions and replayed scripts, so both
//! produce the same output for the same commands.
//!
//! Supported commands are `pwd`, `ls`, `cd <dir>`, `cat <file>` and `exit`.
//! Commands are parsed into [`parser::Command`] and the current directory is an
//! explicit cursor passed through [`Interpreter::dispatch`].

pub mod archive;
mod builtin;
pub mod command;
pub mod env;
pub mod errors;
pub mod io_adapters;
mod interpreter;
pub mod logging;
pub mod parser;
pub mod paths;

/// Just a convenient re-export of the command runner.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::Interpreter;
