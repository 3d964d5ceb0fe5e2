use anyhow::{Context, Result};
use archive_shell::env::Environment;
use archive_shell::io_adapters::{BufReadSource, LineSource, ReadlineSource, ScriptSource};
use archive_shell::{Interpreter, archive, logging};
use argh::FromArgs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(FromArgs)]
/// Browse a tar or zip archive through a small read-only shell.
struct Args {
    #[argh(positional)]
    /// archive to open (.tar, .tar.gz, .tgz or .zip)
    archive: PathBuf,

    #[argh(option)]
    /// replay commands from this file, one per line, instead of prompting
    script: Option<PathBuf>,

    #[argh(switch)]
    /// let `cd` and `cat` follow paths that leave the archive root
    no_confine: bool,
}

fn main() -> ExitCode {
    logging::init();
    let args: Args = argh::from_env();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // Dropping the guard at the end of this function removes the extracted tree.
    let scratch = archive::materialize(&args.archive)?;
    let env = Environment::new(scratch.path(), !args.no_confine)?;
    let sh = Interpreter::new(env);

    let mut source: Box<dyn LineSource> = match &args.script {
        Some(script) => Box::new(ScriptSource::from_file(script)?),
        None if std::io::stdin().is_terminal() => Box::new(ReadlineSource::new()?),
        None => Box::new(BufReadSource::new(std::io::stdin().lock())),
    };

    let mut stdout = std::io::stdout().lock();
    sh.run(source.as_mut(), &mut stdout)
        .context("session aborted")?;
    Ok(())
}
