use std::borrow::Cow;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EntryType {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    entry_type: EntryType,
    content: Option<Vec<u8>>, // always None for directories
}

impl Entry {
    pub fn file(content: Vec<u8>) -> Entry {
        Entry {
            entry_type: EntryType::File,
            content: Some(content),
        }
    }

    pub fn directory() -> Entry {
        Entry {
            entry_type: EntryType::Directory,
            content: None,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// File content decoded as UTF-8 (invalid sequences are replaced).
    /// Directories yield an empty string.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.content {
            Some(bytes) => String::from_utf8_lossy(bytes),
            None => Cow::Borrowed(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry() {
        let entry = Entry::file(b"content1".to_vec());
        assert!(entry.is_file());
        assert!(!entry.is_dir());
        assert_eq!(entry.entry_type(), EntryType::File);
        assert_eq!(entry.content(), Some(&b"content1"[..]));
        assert_eq!(entry.text(), "content1");
    }

    #[test]
    fn test_directory_entry() {
        let entry = Entry::directory();
        assert!(entry.is_dir());
        assert_eq!(entry.content(), None);
        assert_eq!(entry.text(), "");
    }

    #[test]
    fn test_text_lossy() {
        let entry = Entry::file(vec![b'a', 0xff, b'b']);
        assert_eq!(entry.text(), "a\u{fffd}b");
    }
}
