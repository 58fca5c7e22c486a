//! A minimal interactive shell over a read-only virtual file system (VFS) loaded from a tar
//! archive.
//!
//! ### Overview
//!
//! The archive is read once into an [`ArchiveFS`], a flat map from path to entry. A [`Session`]
//! holds the current directory and runs one command line at a time against that map. Scripts and
//! the interactive prompt are thin loops over [`Session::execute`].
//!
//! **Commands**:
//! - `ls` lists the names directly inside the current directory.
//! - `cd <dir>` changes the current directory (`/`, `..`, `.`, relative or absolute names).
//! - `echo [words..]` prints its arguments joined by single spaces.
//! - `clear` clears the terminal.
//! - `exit` ends the session.
//!
//! ### Example
//!
//! ```
//! use vfs_shell::{ArchiveFS, Flow, Member, Session};
//!
//! let fs = ArchiveFS::from_members(vec![Member::file("docs/note.txt", b"Hello")]);
//! let mut session = Session::new(&fs);
//! let mut out = Vec::new();
//!
//! session.execute("cd docs", &mut out).unwrap();
//! assert_eq!(session.execute("ls", &mut out).unwrap(), Flow::Continue);
//! assert_eq!(session.cwd(), "/docs");
//! assert_eq!(out, b"note.txt\n");
//! ```

mod core;
mod shell;
mod vfs;

pub use crate::core::{Result, utils};
pub use shell::{Command, Flow, Repl, Resolved, Session, list, resolve_cd, run_reader, run_script};
pub use vfs::{ArchiveFS, Entry, EntryType, LoadError, Member, read_members};
