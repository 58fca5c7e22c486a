//! This module provides a read-only virtual filesystem (VFS) built once from the members of an
//! archive.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::Path;

use tracing::debug;

use crate::core::utils;
use crate::vfs::archive::{self, LoadError, Member};
use crate::{Entry, EntryType};

/// A read-only virtual file system whose entries come from an archive.
///
/// `ArchiveFS` keeps all entries in a flat map; parent/child relations are derived from the keys
/// on demand, so there is no tree to keep consistent.
///
/// ### Internal state
///
/// * `entries` — map from key to `Entry`.
///   - Key: path without leading or trailing `/` (`dir/file2.txt`). The logical absolute form
///     (`/dir/file2.txt`) is only used at the API boundary.
///   - Uses `BTreeMap` for deterministic, byte-ordered iteration. Listings follow this order.
///
/// ### Invariants
///
/// 1. **Implicit root**: `/` is never stored (its key would be empty) and always exists.
/// 2. **Uniqueness**: each key maps to exactly one `Entry`; a later member with the same key
///    replaces the earlier one.
/// 3. **Parent existence**: for any entry at `a/b/c`, entries `a/b` and `a` exist as
///    directories, even when the archive never listed them.
/// 4. **Immutability**: nothing can change the mapping after construction.
///
/// ### Example
///
/// ```
/// use vfs_shell::{ArchiveFS, Member};
///
/// let fs = ArchiveFS::from_members(vec![
///     Member::directory("docs/"),
///     Member::file("docs/note.txt", b"Hello"),
/// ]);
///
/// assert!(fs.contains("docs/note.txt"));
/// assert!(fs.is_navigable("docs"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ArchiveFS {
    entries: BTreeMap<String, Entry>,
}

impl ArchiveFS {
    /// Reads the archive at `path` and builds the VFS from its members.
    /// Fails if the archive is missing or cannot be decoded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let members = archive::read_members(path.as_ref())?;
        let fs = Self::from_members(members);
        debug!("loaded {} entries from {}", fs.len(), path.as_ref().display());
        Ok(fs)
    }

    /// Builds the VFS from already decoded archive members.
    pub fn from_members<I: IntoIterator<Item = Member>>(members: I) -> Self {
        let mut entries = BTreeMap::new();
        for member in members {
            let key = utils::to_key(&member.path);
            if key.is_empty() {
                // root is implicit
                continue;
            }
            if key.split('/').any(|segment| segment == "..") {
                debug!("skipping {}: escapes the root", member.path);
                continue;
            }

            let mut parent = utils::parent_key(key);
            while !parent.is_empty() && !entries.contains_key(parent) {
                entries.insert(parent.to_string(), Entry::directory());
                parent = utils::parent_key(parent);
            }

            let entry = match member.kind {
                EntryType::File => Entry::file(member.content.unwrap_or_default()),
                EntryType::Directory => Entry::directory(),
            };
            entries.insert(key.to_string(), entry);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks if an entry is stored under `key`.
    /// The root key (empty) always exists.
    pub fn contains(&self, key: &str) -> bool {
        key.is_empty() || self.entries.contains_key(key)
    }

    /// Checks if `key` can be entered: the key itself is stored, or some stored key lies below it.
    /// A file entry counts as navigable.
    pub fn is_navigable(&self, key: &str) -> bool {
        if self.contains(key) {
            return true;
        }
        let prefix = format!("{}/", key);
        self.entries
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .next()
            .is_some_and(|(k, _)| k.starts_with(&prefix))
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Iterates over all stored keys in mapping order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
