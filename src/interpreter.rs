use crate::builtin::{Cat, Cd, Ls, Pwd};
use crate::command::{BuiltinCommand, Flow};
use crate::env::Environment;
use crate::io_adapters::{Input, LineSource};
use crate::parser::{self, Command};
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A restricted shell over an extracted archive.
///
/// The interpreter holds only the immutable [`Environment`]. The current
/// directory is threaded through [`Interpreter::dispatch`] by the caller,
/// which is what [`Interpreter::run`] does for both interactive and scripted
/// sessions.
///
/// Example
/// ```no_run
/// use archive_shell::Interpreter;
/// use archive_shell::command::Flow;
/// use archive_shell::env::Environment;
///
/// let env = Environment::new("/tmp/extracted", true).unwrap();
/// let sh = Interpreter::new(env);
/// let mut out = Vec::new();
/// let cwd = sh.env().root().to_path_buf();
/// let flow = sh.dispatch("pwd", cwd, &mut out).unwrap();
/// assert!(matches!(flow, Flow::Continue(_)));
/// assert_eq!(out, b"root:/\n");
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Prompt shown before reading a line at `cwd`.
    pub fn prompt(&self, cwd: &Path) -> String {
        format!("{}> ", self.env.logical(cwd))
    }

    /// Parse and execute one input line against `cwd`.
    ///
    /// Returns the cursor to use for the next line, or [`Flow::Exit`].
    /// Host I/O failures inside a command are reported on `stdout` and the
    /// cursor is kept; only a failure to write `stdout` itself is an error.
    pub fn dispatch(&self, line: &str, cwd: PathBuf, stdout: &mut dyn Write) -> Result<Flow> {
        let command = parser::parse_line(line);
        debug!(?command, cwd = %self.env.logical(&cwd), "dispatch");

        let moved = match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Pwd => self.invoke(Pwd, &cwd, stdout)?,
            Command::Ls => self.invoke(Ls, &cwd, stdout)?,
            Command::Cd(target) => self.invoke(Cd { target }, &cwd, stdout)?,
            Command::Cat(file) => self.invoke(Cat { file }, &cwd, stdout)?,
            Command::Unknown(raw) => {
                writeln!(stdout, "Command not found: {}", raw)?;
                None
            }
        };
        Ok(Flow::Continue(moved.unwrap_or(cwd)))
    }

    fn invoke<C: BuiltinCommand>(
        &self,
        cmd: C,
        cwd: &Path,
        stdout: &mut dyn Write,
    ) -> Result<Option<PathBuf>> {
        let name = cmd.name();
        match cmd.execute(stdout, &self.env, cwd) {
            Ok(moved) => Ok(moved),
            Err(e) => {
                debug!(command = name, error = %e, "builtin failed");
                writeln!(stdout, "{:#}", e)?;
                Ok(None)
            }
        }
    }

    /// Run a whole session starting at the root.
    ///
    /// Stops on `exit`, when a script is exhausted, or on interactive
    /// end-of-input / interrupt, which print `Exiting...` first.
    pub fn run(&self, source: &mut dyn LineSource, stdout: &mut dyn Write) -> Result<()> {
        let mut cwd = self.env.root().to_path_buf();
        loop {
            let prompt = self.prompt(&cwd);
            match source.read_line(&prompt, stdout)? {
                Input::Line(line) => match self.dispatch(&line, cwd, stdout)? {
                    Flow::Continue(next) => cwd = next,
                    Flow::Exit => break,
                },
                Input::Eof | Input::Interrupted => {
                    writeln!(stdout, "\nExiting...")?;
                    break;
                }
                Input::Exhausted => break,
            }
        }
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_adapters::{BufReadSource, ScriptSource};
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn archive_tree() -> (TempDir, Interpreter) {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::write(tmp.path().join("a").join("b.txt"), "hi\n").unwrap();
        let env = Environment::new(tmp.path(), true).unwrap();
        (tmp, Interpreter::new(env))
    }

    fn dispatch_str(sh: &Interpreter, line: &str, cwd: PathBuf) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = sh.dispatch(line, cwd, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    fn run_script(sh: &Interpreter, lines: &[&str]) -> String {
        let mut src = ScriptSource::new(lines.iter().map(|s| s.to_string()).collect());
        let mut out = Vec::new();
        sh.run(&mut src, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn run_piped(sh: &Interpreter, input: &str) -> String {
        let mut src = BufReadSource::new(Cursor::new(input.as_bytes().to_vec()));
        let mut out = Vec::new();
        sh.run(&mut src, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pwd_at_start_is_root() {
        let (_tmp, sh) = archive_tree();
        assert_eq!(run_script(&sh, &["pwd"]), "root:/\n");
    }

    #[test]
    fn test_dispatch_cd_threads_cursor() {
        let (tmp, sh) = archive_tree();
        let (flow, out) = dispatch_str(&sh, "cd a", tmp.path().to_path_buf());
        assert_eq!(flow, Flow::Continue(tmp.path().join("a")));
        assert_eq!(out, "");
    }

    #[test]
    fn test_dispatch_failed_cd_keeps_cursor() {
        let (tmp, sh) = archive_tree();
        let (flow, out) = dispatch_str(&sh, "cd nonexistent", tmp.path().to_path_buf());
        assert_eq!(flow, Flow::Continue(tmp.path().to_path_buf()));
        assert_eq!(out, "Directory not found: nonexistent\n");
    }

    #[test]
    fn test_dispatch_missing_cat_keeps_cursor() {
        let (tmp, sh) = archive_tree();
        let a = tmp.path().join("a");
        let (flow, out) = dispatch_str(&sh, "cat missing.txt", a.clone());
        assert_eq!(flow, Flow::Continue(a));
        assert_eq!(out, "File not found: missing.txt\n");
    }

    #[test]
    fn test_dispatch_exit() {
        let (tmp, sh) = archive_tree();
        let (flow, out) = dispatch_str(&sh, "  exit  ", tmp.path().to_path_buf());
        assert_eq!(flow, Flow::Exit);
        assert_eq!(out, "");
    }

    #[test]
    fn test_unknown_command_does_not_stop_script() {
        let (_tmp, sh) = archive_tree();
        let out = run_script(&sh, &["foo bar", "pwd"]);
        assert_eq!(out, "Command not found: foo bar\nroot:/\n");
    }

    #[test]
    fn test_script_stops_at_exit() {
        let (_tmp, sh) = archive_tree();
        let out = run_script(&sh, &["pwd", "exit", "pwd"]);
        assert_eq!(out, "root:/\n");
    }

    #[test]
    fn test_script_sample_session() {
        let (_tmp, sh) = archive_tree();
        let out = run_script(&sh, &["cd a", "cat b.txt", "pwd"]);
        assert_eq!(out, "hi\nroot:/a\n");
    }

    #[test]
    fn test_interactive_sample_session_prompts() {
        let (_tmp, sh) = archive_tree();
        let out = run_piped(&sh, "cd a\ncat b.txt\npwd\nexit\n");
        assert_eq!(out, "root:/> root:/a> hi\nroot:/a> root:/a\nroot:/a> ");
    }

    #[test]
    fn test_interactive_matches_script_without_prompts() {
        let (_tmp, sh) = archive_tree();
        let commands = [
            "ls",
            "cd a",
            "cd nope",
            "cat b.txt",
            "whatever",
            "cd ..",
            "pwd",
            "exit",
        ];

        let scripted = run_script(&sh, &commands);
        let interactive = run_piped(&sh, &format!("{}\n", commands.join("\n")));

        let stripped = interactive.replace("root:/a> ", "").replace("root:/> ", "");
        assert_eq!(stripped, scripted);
    }

    #[test]
    fn test_interactive_eof_prints_notice() {
        let (_tmp, sh) = archive_tree();
        let out = run_piped(&sh, "pwd\n");
        assert_eq!(out, "root:/> root:/\nroot:/> \nExiting...\n");
    }

    /// Replays lines, then reports an interrupt like Ctrl-C at a prompt.
    struct InterruptAfter(std::vec::IntoIter<&'static str>);

    impl LineSource for InterruptAfter {
        fn read_line(&mut self, _prompt: &str, _stdout: &mut dyn Write) -> Result<Input> {
            Ok(match self.0.next() {
                Some(line) => Input::Line(line.to_string()),
                None => Input::Interrupted,
            })
        }
    }

    #[test]
    fn test_interrupt_prints_notice_and_stops() {
        let (_tmp, sh) = archive_tree();
        let mut src = InterruptAfter(vec!["pwd"].into_iter());
        let mut out = Vec::new();
        sh.run(&mut src, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "root:/\n\nExiting...\n");
    }

    #[test]
    fn test_confined_cd_sequence_never_escapes() {
        let (tmp, sh) = archive_tree();
        let mut cwd = tmp.path().to_path_buf();
        for line in ["cd a", "cd ..", "cd ..", "cd ../..", "cd /", "cd a/../..", "cd a"] {
            let mut sink = Vec::new();
            match sh.dispatch(line, cwd.clone(), &mut sink).unwrap() {
                Flow::Continue(next) => cwd = next,
                Flow::Exit => unreachable!(),
            }
            assert!(crate::paths::is_within(tmp.path(), &cwd));
            assert!(!sh.env().logical(&cwd).starts_with("root:/.."));
        }
        assert_eq!(sh.env().logical(&cwd), "root:/a");
    }

    #[test]
    fn test_extracted_archive_session() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("fs.zip");
        crate::archive::fixtures::zip_file(&archive, &[("a/b.txt", "hi\n")]);

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let scratch = crate::archive::materialize(&archive).unwrap();
            let sh = Interpreter::new(Environment::new(scratch.path(), true).unwrap());
            outputs.push(run_script(&sh, &["pwd", "cd a", "cat b.txt", "pwd"]));
        }
        assert_eq!(outputs[0], "root:/\nhi\nroot:/a\n");
        assert_eq!(outputs[0], outputs[1]);
    }

    #[cfg(unix)]
    #[test]
    fn test_ls_io_error_is_reported_and_session_continues() {
        use std::os::unix::fs::PermissionsExt;

        let (tmp, sh) = archive_tree();
        let a = tmp.path().join("a");
        fs::set_permissions(&a, fs::Permissions::from_mode(0o100)).unwrap();

        // root ignores permission bits, nothing to observe then
        if fs::read_dir(&a).is_ok() {
            fs::set_permissions(&a, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }
        let out = run_script(&sh, &["cd a", "ls", "pwd"]);
        fs::set_permissions(&a, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(out.starts_with("ls: root:/a: "));
        assert!(out.ends_with("root:/a\n"));
    }
}
