pub mod archive;
mod classify;
mod consts;
pub mod error;
mod jar;
pub mod lookup;
mod manifest;
pub mod models;
mod patterns;
mod pom;
mod probe;
mod process;
pub mod resolve;

use tracing::instrument;

pub use crate::archive::{ArchiveInfo, ArchiveReader, Entry, MemoryArchive};
#[cfg(feature = "zip")]
pub use crate::archive::ZipArchiveReader;
pub use crate::classify::{Classifier, EntryRole, is_build_descriptor};
use crate::error::Result;
pub use crate::jar::JarFile;
pub use crate::manifest::Manifest;
pub use crate::patterns::{PatternCategory, Patterns};
pub use crate::pom::{Coordinates, Project};
pub use crate::probe::{Probe, ProbeChain};
pub use crate::process::{NoProcess, ProcCmdline, ProcessOptions};

/// Easy, top-level entrypoint for reading the metadata snapshot of a Java archive.
///
/// - Every entry is read once and classified against `patterns`, and
/// - derived facts are then resolved lazily from the returned [`JarFile`].
///
/// Accepts any [`ArchiveReader`], including `&mut` references to one. See
/// [`JarFile::read`] for the failure modes.
#[instrument(skip_all, fields(location = %reader.info().location))]
pub fn read(reader: impl ArchiveReader, patterns: &Patterns) -> Result<JarFile> {
    JarFile::read(reader, patterns)
}

/// Opens a JAR/WAR file on disk and reads its metadata snapshot.
#[cfg(feature = "zip")]
pub fn open(path: impl AsRef<std::path::Path>, patterns: &Patterns) -> Result<JarFile> {
    JarFile::read(ZipArchiveReader::open(path)?, patterns)
}
