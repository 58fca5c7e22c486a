pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Helpers for the string keys used by the VFS mapping.
///
/// A key is a path without leading or trailing `/` (`dir/file2.txt`). The root
/// directory is the empty key and is never stored in the mapping.
pub mod utils {
    /// Normalizes an archive member name or an absolute path into a lookup key.
    pub fn to_key(raw: &str) -> &str {
        let mut key = raw;
        loop {
            if let Some(rest) = key.strip_prefix("./") {
                key = rest;
            } else if let Some(rest) = key.strip_prefix('/') {
                key = rest;
            } else {
                break;
            }
        }
        let key = key.trim_end_matches('/');
        if key == "." { "" } else { key }
    }

    /// Renders a key in its logical absolute form.
    pub fn to_absolute(key: &str) -> String {
        format!("/{}", key)
    }

    pub fn base_name(key: &str) -> &str {
        key.rsplit('/').next().unwrap_or(key)
    }

    /// Returns the key of the containing directory (empty for top-level keys).
    pub fn parent_key(key: &str) -> &str {
        match key.rfind('/') {
            Some(pos) => &key[..pos],
            None => "",
        }
    }

}
