//! Session loops: batch scripts and the interactive prompt.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use crate::ArchiveFS;
use crate::core::Result;
use crate::shell::dispatcher::{Flow, Session};

/// Dispatches every line of `reader` in order, trimmed, until input ends or `exit` runs.
///
/// A line that cannot be read is reported on `out` and ends the run.
pub fn run_reader<R: BufRead, W: Write>(
    session: &mut Session,
    reader: R,
    out: &mut W,
) -> Result<Flow> {
    for (number, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                writeln!(out, "Error: Failed to read line {}: {}", number + 1, e)?;
                return Ok(Flow::Continue);
            }
        };
        if session.execute(line.trim(), out)? == Flow::Exit {
            return Ok(Flow::Exit);
        }
    }
    Ok(Flow::Continue)
}

/// Runs the startup script at `path` in a fresh session rooted at `/`.
///
/// A missing or unreadable script is reported on `out` and skipped; it is not an error.
pub fn run_script<P: AsRef<Path>, W: Write>(
    path: P,
    vfs: &ArchiveFS,
    out: &mut W,
) -> Result<Flow> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            writeln!(out, "Error: Startup script not found: {}", path.display())?;
            return Ok(Flow::Continue);
        }
        Err(e) => {
            writeln!(out, "Error: Cannot open startup script {}: {}", path.display(), e)?;
            return Ok(Flow::Continue);
        }
    };

    debug!("running script {}", path.display());
    let mut session = Session::new(vfs);
    run_reader(&mut session, BufReader::new(file), out)
}

/// Formats the interactive prompt for `user` standing in `cwd`.
pub fn prompt(user: &str, cwd: &str) -> String {
    format!("{}@vfs:{}$ ", user, cwd)
}

/// Interactive prompt over a session, with line editing and in-memory history.
pub struct Repl<'a> {
    user: String,
    session: Session<'a>,
    editor: DefaultEditor,
}

impl<'a> Repl<'a> {
    pub fn new(user: &str, vfs: &'a ArchiveFS) -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to create editor")?;
        Ok(Self {
            user: user.to_string(),
            session: Session::new(vfs),
            editor,
        })
    }

    pub fn prompt(&self) -> String {
        prompt(&self.user, self.session.cwd())
    }

    pub fn session(&self) -> &Session<'a> {
        &self.session
    }

    /// Records `line` in the history and runs it, writing any output to `out`.
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if !line.trim().is_empty() {
            if let Err(e) = self.editor.add_history_entry(line) {
                warn!("Failed to add history entry: {}", e);
            }
        }
        self.session.execute(line, out)
    }

    /// Reads and runs lines until `exit` or end of input.
    /// Ctrl-C abandons the current line only.
    pub fn run(&mut self) -> Result<Flow> {
        loop {
            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if self.process_line(&line, &mut io::stdout())? == Flow::Exit {
                        return Ok(Flow::Exit);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    debug!("end of input");
                    return Ok(Flow::Continue);
                }
                Err(e) => return Err(e).context("Failed to read command"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use tempdir::TempDir;

    use crate::Member;

    fn setup_test_vfs() -> ArchiveFS {
        ArchiveFS::from_members(vec![
            Member::file("file1.txt", b"content1"),
            Member::directory("dir/"),
            Member::file("dir/file2.txt", b"content2"),
            Member::file("dir/file3.txt", b"content3"),
            Member::directory("dir2/"),
            Member::file("dir2/name.txt", b"line1\nline2\nline1\nline3"),
        ])
    }

    mod reader {
        use super::*;

        #[test]
        fn test_run_reader() -> Result<()> {
            let vfs = setup_test_vfs();
            let mut session = Session::new(&vfs);
            let mut out = Vec::new();
            let input = Cursor::new("  cd dir  \nls\n\necho hello world\ncd nowhere\n");

            let flow = run_reader(&mut session, input, &mut out)?;
            assert_eq!(flow, Flow::Continue);
            assert_eq!(session.cwd(), "/dir");
            assert_eq!(
                String::from_utf8(out)?,
                "file2.txt\nfile3.txt\nhello world\nDirectory not found.\n"
            );
            Ok(())
        }

        #[test]
        fn test_run_reader_stops_at_exit() -> Result<()> {
            let vfs = setup_test_vfs();
            let mut session = Session::new(&vfs);
            let mut out = Vec::new();
            let input = Cursor::new("echo before\nexit\necho after\n");

            let flow = run_reader(&mut session, input, &mut out)?;
            assert_eq!(flow, Flow::Exit);
            assert_eq!(String::from_utf8(out)?, "before\nExiting shell...\n");
            Ok(())
        }

        #[test]
        fn test_run_reader_invalid_utf8() -> Result<()> {
            let vfs = setup_test_vfs();
            let mut session = Session::new(&vfs);
            let mut out = Vec::new();
            let input = Cursor::new(b"echo ok\n\xff\xfe\necho never\n".to_vec());

            let flow = run_reader(&mut session, input, &mut out)?;
            assert_eq!(flow, Flow::Continue);
            let output = String::from_utf8(out)?;
            assert!(output.starts_with("ok\nError: Failed to read line 2"));
            assert!(!output.contains("never"));
            Ok(())
        }
    }

    mod script {
        use super::*;

        #[test]
        fn test_run_script() -> Result<()> {
            let tmp = TempDir::new("vfs_shell")?;
            let script = tmp.path().join("start.sh");
            std::fs::write(&script, "cd /dir2\nls\ncd ..\nls\n")?;

            let vfs = setup_test_vfs();
            let mut out = Vec::new();
            let flow = run_script(&script, &vfs, &mut out)?;
            assert_eq!(flow, Flow::Continue);
            assert_eq!(String::from_utf8(out)?, "name.txt\ndir\ndir2\nfile1.txt\n");
            Ok(())
        }

        #[test]
        fn test_run_script_with_exit() -> Result<()> {
            let tmp = TempDir::new("vfs_shell")?;
            let script = tmp.path().join("start.sh");
            std::fs::write(&script, "echo hi\nexit\nls\n")?;

            let vfs = setup_test_vfs();
            let mut out = Vec::new();
            assert_eq!(run_script(&script, &vfs, &mut out)?, Flow::Exit);
            assert_eq!(String::from_utf8(out)?, "hi\nExiting shell...\n");
            Ok(())
        }

        #[test]
        fn test_run_script_missing() -> Result<()> {
            let vfs = setup_test_vfs();
            let mut out = Vec::new();
            let flow = run_script("/no/such/script.sh", &vfs, &mut out)?;
            assert_eq!(flow, Flow::Continue);
            assert_eq!(
                String::from_utf8(out)?,
                "Error: Startup script not found: /no/such/script.sh\n"
            );
            Ok(())
        }

        #[test]
        fn test_run_script_unreadable_is_not_reported_missing() -> Result<()> {
            let tmp = TempDir::new("vfs_shell")?;

            let vfs = setup_test_vfs();
            let mut out = Vec::new();
            let flow = run_script(tmp.path(), &vfs, &mut out)?;
            assert_eq!(flow, Flow::Continue);

            let output = String::from_utf8(out)?;
            assert!(output.starts_with("Error: "));
            assert!(!output.contains("not found"));
            assert_eq!(output.lines().count(), 1);
            Ok(())
        }
    }

    mod repl {
        use super::*;

        #[test]
        fn test_prompt_format() {
            assert_eq!(prompt("alice", "/"), "alice@vfs:/$ ");
            assert_eq!(prompt("bob", "/dir/sub"), "bob@vfs:/dir/sub$ ");
        }

        #[test]
        fn test_prompt_follows_cwd() -> Result<()> {
            let vfs = setup_test_vfs();
            let mut repl = Repl::new("alice", &vfs)?;
            assert_eq!(repl.prompt(), "alice@vfs:/$ ");

            let mut out = Vec::new();
            assert_eq!(repl.process_line("cd dir", &mut out)?, Flow::Continue);
            assert_eq!(repl.session().cwd(), "/dir");
            assert_eq!(repl.prompt(), "alice@vfs:/dir$ ");

            repl.process_line("cd missing", &mut out)?;
            assert_eq!(repl.prompt(), "alice@vfs:/dir$ ");
            assert_eq!(String::from_utf8(out)?, "Directory not found.\n");
            Ok(())
        }

        #[test]
        fn test_process_line_exit() -> Result<()> {
            let vfs = setup_test_vfs();
            let mut repl = Repl::new("alice", &vfs)?;
            let mut out = Vec::new();
            assert_eq!(repl.process_line("exit", &mut out)?, Flow::Exit);
            assert_eq!(String::from_utf8(out)?, "Exiting shell...\n");
            Ok(())
        }
    }
}
