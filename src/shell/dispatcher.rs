//! Command dispatch over a [`Session`].

use std::io::Write;

use tracing::debug;

use crate::ArchiveFS;
use crate::core::Result;
use crate::shell::resolver;

pub const CD_USAGE: &str = "Usage: cd <directory>";
pub const DIRECTORY_NOT_FOUND: &str = "Directory not found.";
pub const EXIT_MESSAGE: &str = "Exiting shell...";

/// Erases the screen and moves the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// A parsed command line. Tokens borrow from the line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// Arguments are ignored: `ls` always lists the current directory.
    Ls,
    Cd(Option<&'a str>),
    Echo(Vec<&'a str>),
    Clear,
    Exit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Splits `line` on whitespace (no quoting) and picks the command by its first token.
    /// Returns `None` for a blank line.
    pub fn parse(line: &'a str) -> Option<Command<'a>> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next()?;
        let command = match verb {
            "ls" => Command::Ls,
            "cd" => Command::Cd(tokens.next()),
            "echo" => Command::Echo(tokens.collect()),
            "clear" => Command::Clear,
            "exit" => Command::Exit,
            other => Command::Unknown(other),
        };
        Some(command)
    }
}

/// What the caller should do after a command ran.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Navigation state of one run over a VFS.
///
/// `cwd` is always absolute and normalized: it starts with `/` and has no trailing `/` unless it
/// is exactly `/`. Only a successful `cd` changes it.
pub struct Session<'a> {
    vfs: &'a ArchiveFS,
    cwd: String,
}

impl<'a> Session<'a> {
    pub fn new(vfs: &'a ArchiveFS) -> Self {
        Self {
            vfs,
            cwd: String::from("/"),
        }
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Runs one command line, writing any output to `out`.
    ///
    /// User errors (unknown command, missing argument, missing directory) are reported on `out`
    /// and leave the session as it was. Only failures to write are returned as errors.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let Some(command) = Command::parse(line) else {
            return Ok(Flow::Continue);
        };
        debug!("{}: {:?}", self.cwd, command);

        match command {
            Command::Ls => {
                for name in resolver::list(&self.cwd, self.vfs) {
                    writeln!(out, "{}", name)?;
                }
            }
            Command::Cd(None) => writeln!(out, "{}", CD_USAGE)?,
            Command::Cd(Some(target)) => {
                let resolved = resolver::resolve_cd(&self.cwd, target, self.vfs);
                if resolved.found {
                    self.cwd = resolved.dir;
                } else {
                    writeln!(out, "{}", DIRECTORY_NOT_FOUND)?;
                }
            }
            Command::Echo(words) => writeln!(out, "{}", words.join(" "))?,
            Command::Clear => {
                write!(out, "{}", CLEAR_SCREEN)?;
                out.flush()?;
            }
            Command::Exit => {
                writeln!(out, "{}", EXIT_MESSAGE)?;
                return Ok(Flow::Exit);
            }
            Command::Unknown(verb) => writeln!(out, "Unknown command: {}", verb)?,
        }
        Ok(Flow::Continue)
    }
}
