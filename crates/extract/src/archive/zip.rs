use super::{ArchiveInfo, ArchiveReader, Entry};
use crate::error::{ErrorKind, Result};
use ::zip::ZipArchive;
use exn::ResultExt;
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use time::OffsetDateTime;
use tracing::instrument;

/// Reads JAR/WAR archives (zip containers).
pub struct ZipArchiveReader<R> {
    info: ArchiveInfo,
    archive: ZipArchive<R>,
}
impl ZipArchiveReader<Cursor<Vec<u8>>> {
    /// Opens an archive on disk.
    ///
    /// The whole file is read once: its BLAKE3 hash becomes the checksum and
    /// its length the size.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let location = path.display().to_string();
        let bytes = fs::read(path).or_raise(|| ErrorKind::OpenArchive(location.clone()))?;
        let modified = fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .or_raise(|| ErrorKind::OpenArchive(location.clone()))?;
        let info = ArchiveInfo::new(location.clone())
            .with_checksum(blake3::hash(&bytes).to_string())
            .with_size(u64::try_from(bytes.len()).or_raise(|| ErrorKind::OpenArchive(location))?)
            .with_modified(OffsetDateTime::from(modified));
        Self::new(info, Cursor::new(bytes))
    }
}
impl<R: Read + Seek> ZipArchiveReader<R> {
    pub fn new(info: ArchiveInfo, reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader).or_raise(|| ErrorKind::OpenArchive(info.location.clone()))?;
        Ok(Self { info, archive })
    }
}
impl<R: Read + Seek> ArchiveReader for ZipArchiveReader<R> {
    fn info(&self) -> &ArchiveInfo {
        &self.info
    }

    fn entries(&mut self) -> Box<dyn Iterator<Item = Result<Entry>> + '_> {
        let archive = &mut self.archive;
        Box::new((0..archive.len()).filter_map(move |idx| read_entry(archive, idx).transpose()))
    }
}

/// Directories are skipped (`Ok(None)`).
fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, idx: usize) -> Result<Option<Entry>> {
    let mut file = archive.by_index(idx).or_raise(|| ErrorKind::ReadEntry(format!("#{idx}")))?;
    if file.is_dir() {
        return Ok(None);
    }
    let path = file.name().to_string();
    let mut content = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
    file.read_to_end(&mut content).or_raise(|| ErrorKind::ReadEntry(path.clone()))?;
    Ok(Some(Entry { path, content }))
}
