//! Archive readers.
//!
//! An [`ArchiveReader`] hands over everything metadata resolution needs from
//! an archive: the file-level facts in [`ArchiveInfo`] and every entry's bytes,
//! read once, in archive order. Decompression belongs to the reader.

#[cfg(feature = "zip")]
mod zip;

#[cfg(feature = "zip")]
pub use self::zip::ZipArchiveReader;
use crate::error::Result;
use time::OffsetDateTime;

/// File-level facts about an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveInfo {
    /// Source path or URI.
    pub location: String,
    /// Opaque content hash.
    pub checksum: String,
    /// Archive size in bytes.
    pub size: u64,
    pub modified: OffsetDateTime,
}
impl ArchiveInfo {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            checksum: String::new(),
            size: 0,
            modified: OffsetDateTime::UNIX_EPOCH,
        }
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = checksum.into();
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_modified(mut self, modified: OffsetDateTime) -> Self {
        self.modified = modified;
        self
    }
}

/// A single file inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub content: Vec<u8>,
}
impl Entry {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Entry content as text; invalid UTF-8 sequences are replaced with U+FFFD.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

pub trait ArchiveReader {
    fn info(&self) -> &ArchiveInfo;

    /// Every file entry, in archive order.
    ///
    /// A failure to extract one entry is reported in place; consumers are
    /// expected to stop at the first error.
    fn entries(&mut self) -> Box<dyn Iterator<Item = Result<Entry>> + '_>;
}
impl<R: ArchiveReader + ?Sized> ArchiveReader for &mut R {
    fn info(&self) -> &ArchiveInfo {
        (**self).info()
    }

    fn entries(&mut self) -> Box<dyn Iterator<Item = Result<Entry>> + '_> {
        (**self).entries()
    }
}

/// An archive whose entries have already been extracted into memory.
#[derive(Debug, Clone)]
pub struct MemoryArchive {
    info: ArchiveInfo,
    entries: Vec<Entry>,
}
impl MemoryArchive {
    pub fn new(info: ArchiveInfo) -> Self {
        Self { info, entries: Vec::new() }
    }

    pub fn with_entry(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.entries.push(Entry::new(path, content));
        self
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}
impl ArchiveReader for MemoryArchive {
    fn info(&self) -> &ArchiveInfo {
        &self.info
    }

    fn entries(&mut self) -> Box<dyn Iterator<Item = Result<Entry>> + '_> {
        Box::new(self.entries.iter().cloned().map(Ok))
    }
}
impl<P: Into<String>, C: Into<Vec<u8>>> Extend<(P, C)> for MemoryArchive {
    fn extend<I: IntoIterator<Item = (P, C)>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(|(path, content)| Entry::new(path, content)));
    }
}
