//! Reading archive members from a tar file on the host.
//!
//! The archive is consumed as a flat sequence of [`Member`] records; turning that sequence into a
//! navigable structure is the job of [`ArchiveFS`](crate::ArchiveFS).

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use thiserror::Error;
use tracing::debug;

use crate::EntryType;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Fatal failure to turn an archive into a VFS. Nothing can run without it.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Virtual filesystem archive not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read virtual filesystem archive {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    fn from_io(path: &Path, source: io::Error) -> LoadError {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// The archive path the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path } | LoadError::Unreadable { path, .. } => path,
        }
    }
}

/// One archive member as stored in the container, name not yet normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub path: String,
    pub kind: EntryType,
    pub content: Option<Vec<u8>>,
}

impl Member {
    pub fn file<S: Into<String>>(path: S, content: &[u8]) -> Member {
        Member {
            path: path.into(),
            kind: EntryType::File,
            content: Some(content.to_vec()),
        }
    }

    pub fn directory<S: Into<String>>(path: S) -> Member {
        Member {
            path: path.into(),
            kind: EntryType::Directory,
            content: None,
        }
    }
}

/// Reads every regular file and directory member of the tar archive at `path`.
/// Gzip-compressed archives are detected by their magic bytes.
/// Links and special files are skipped.
pub fn read_members<P: AsRef<Path>>(path: P) -> Result<Vec<Member>, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| LoadError::from_io(path, e))?;

    let reader: Box<dyn Read + '_> = if bytes.starts_with(&GZIP_MAGIC) {
        debug!("{} is gzip-compressed", path.display());
        Box::new(GzDecoder::new(bytes.as_slice()))
    } else {
        Box::new(bytes.as_slice())
    };

    let unreadable = |source: io::Error| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut archive = Archive::new(reader);
    let mut members = Vec::new();
    for entry in archive.entries().map_err(unreadable)? {
        let mut entry = entry.map_err(unreadable)?;
        let name = entry.path().map_err(unreadable)?.to_string_lossy().into_owned();
        let entry_type = entry.header().entry_type();

        if entry_type.is_dir() {
            members.push(Member::directory(name));
        } else if entry_type.is_file() {
            let mut content = Vec::new();
            entry.read_to_end(&mut content).map_err(unreadable)?;
            members.push(Member {
                path: name,
                kind: EntryType::File,
                content: Some(content),
            });
        } else {
            debug!("skipping {} ({:?})", name, entry_type);
        }
    }

    debug!("read {} members from {}", members.len(), path.display());
    Ok(members)
}
