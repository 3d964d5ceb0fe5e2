/// One parsed input line.
///
/// Arguments are the raw tail after the first space, so names containing
/// spaces survive verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pwd,
    Ls,
    Cd(String),
    Cat(String),
    Exit,
    /// Anything unrecognized, holding the trimmed line.
    Unknown(String),
}

/// Classify a raw input line.
///
/// Verbs without arguments match exactly; `cd` and `cat` need a following
/// space. A bare `cd` or `ls foo` is therefore unknown.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    match line {
        "exit" => Command::Exit,
        "pwd" => Command::Pwd,
        "ls" => Command::Ls,
        _ => {
            if let Some(target) = line.strip_prefix("cd ") {
                Command::Cd(target.to_string())
            } else if let Some(file) = line.strip_prefix("cat ") {
                Command::Cat(file.to_string())
            } else {
                Command::Unknown(line.to_string())
            }
        }
    }
}
