mod archive;
mod archive_fs;
mod entry;

pub use archive::{LoadError, Member, read_members};
pub use archive_fs::ArchiveFS;
pub use entry::{Entry, EntryType};
