//! vfs-shell entry point.
//!
//! Usage:
//!   vfs-shell --user <NAME> --vfs <ARCHIVE> [--script <FILE>]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vfs_shell::{ArchiveFS, Flow, Repl, run_script};

/// Shell emulator over a tar archive.
#[derive(Parser, Debug)]
#[command(name = "vfs-shell", version, about)]
struct Args {
    /// User name shown in the prompt
    #[arg(long, env = "VFS_SHELL_USER")]
    user: String,

    /// Tar archive (optionally gzip-compressed) holding the virtual file system
    #[arg(long, env = "VFS_SHELL_ARCHIVE")]
    vfs: PathBuf,

    /// Startup script with one command per line, run before the prompt
    #[arg(long, env = "VFS_SHELL_SCRIPT")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let vfs = match ArchiveFS::load(&args.vfs) {
        Ok(vfs) => vfs,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(script) = &args.script {
        if run_script(script, &vfs, &mut io::stdout())? == Flow::Exit {
            return Ok(ExitCode::SUCCESS);
        }
    }

    let mut repl = Repl::new(&args.user, &vfs)?;
    repl.run()?;
    Ok(ExitCode::SUCCESS)
}
