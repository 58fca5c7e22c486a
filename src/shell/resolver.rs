//! Path resolution for `cd` and `ls`.
//!
//! Both operations are pure: they take the current directory (absolute, normalized, `/` for the
//! root) and the VFS, and never modify either.

use tracing::debug;

use crate::ArchiveFS;
use crate::core::utils;

/// Outcome of resolving a `cd` target.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// New current directory. Equal to the old one when `found` is false.
    pub dir: String,
    pub found: bool,
}

impl Resolved {
    fn found(dir: String) -> Resolved {
        Resolved { dir, found: true }
    }

    fn not_found(cwd: &str) -> Resolved {
        Resolved {
            dir: cwd.to_string(),
            found: false,
        }
    }
}

/// Resolves `target` against `cwd` for a change of directory.
///
/// * `/` is the root and always exists.
/// * `..` drops the last segment of `cwd`; the parent of the root is the root.
/// * `.` stays in `cwd`.
/// * A target starting with `/` is taken from the root, anything else is appended to `cwd`.
///   The target is not decomposed: `a/../b` is looked up as a literal child path.
///
/// A target exists if the VFS stores it or stores anything below it, so a file is accepted too.
pub fn resolve_cd(cwd: &str, target: &str, vfs: &ArchiveFS) -> Resolved {
    match target {
        "/" => return Resolved::found("/".to_string()),
        ".." => return Resolved::found(utils::to_absolute(utils::parent_key(utils::to_key(cwd)))),
        "." => return Resolved::found(cwd.to_string()),
        _ => {}
    }

    let candidate = if target.starts_with('/') {
        utils::to_absolute(utils::to_key(target))
    } else {
        format!("{}/{}", cwd.trim_end_matches('/'), target.trim_end_matches('/'))
    };

    let key = candidate.trim_start_matches('/');
    if vfs.is_navigable(key) {
        debug!("cd {} -> {}", cwd, candidate);
        Resolved::found(candidate)
    } else {
        debug!("cd {}: {} not found", cwd, key);
        Resolved::not_found(cwd)
    }
}

/// Lists base names of the direct children of `cwd`, in VFS order.
///
/// The iterator is lazy and borrows the VFS; call again to restart.
/// Files and directories are both listed; `cwd` itself and deeper descendants are not.
pub fn list<'a>(cwd: &str, vfs: &'a ArchiveFS) -> impl Iterator<Item = &'a str> + 'a {
    let dir = utils::to_key(cwd).to_string();
    vfs.keys()
        .filter(move |&key| !key.is_empty() && utils::parent_key(key) == dir)
        .map(utils::base_name)
}
