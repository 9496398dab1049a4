use crate::archive::{ArchiveInfo, ArchiveReader, Entry};
use crate::classify::{Classifier, EntryRole, base_name};
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::manifest::Manifest;
use crate::models::{AppType, ConfigFiles};
use crate::patterns::Patterns;
use crate::pom::Project;
use crate::process::ProcessOptions;
use crate::resolve;
use time::OffsetDateTime;
use tracing::instrument;

/// Immutable metadata snapshot of one Java archive.
///
/// Everything is read from the archive exactly once, on construction. All
/// derived facts are then resolved from the snapshot alone, without touching
/// the archive again, so a `JarFile` can be shared freely between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct JarFile {
    pub(crate) checksum: String,
    pub(crate) location: String,
    pub(crate) manifest: Manifest,
    pub(crate) dependencies: Vec<String>,
    pub(crate) application_configurations: ConfigFiles,
    pub(crate) logging_configurations: ConfigFiles,
    pub(crate) certificates: Vec<String>,
    pub(crate) static_files: Vec<String>,
    pub(crate) build_descriptor: Option<Project>,
    pub(crate) last_modified: OffsetDateTime,
    pub(crate) size: u64,
    pub(crate) warnings: Vec<ErrorKind>,
}

impl JarFile {
    pub(crate) fn empty(info: ArchiveInfo) -> Self {
        Self {
            checksum: info.checksum,
            location: info.location,
            manifest: Manifest::default(),
            dependencies: Vec::new(),
            application_configurations: ConfigFiles::default(),
            logging_configurations: ConfigFiles::default(),
            certificates: Vec::new(),
            static_files: Vec::new(),
            build_descriptor: None,
            last_modified: info.modified,
            size: info.size,
            warnings: Vec::new(),
        }
    }

    /// Reads every entry of the archive and classifies it.
    ///
    /// Fails if a pattern does not compile or an entry cannot be extracted. An
    /// unparseable build descriptor only leaves the descriptor absent and is
    /// recorded in [`warnings`](Self::warnings).
    #[instrument(skip_all, fields(location = %reader.info().location, entries))]
    pub fn read(mut reader: impl ArchiveReader, patterns: &Patterns) -> Result<Self> {
        let classifier = Classifier::new(patterns)?;
        let mut jar = Self::empty(reader.info().clone());
        let mut count = 0usize;
        for entry in reader.entries() {
            jar.add(&classifier, entry?);
            count += 1;
        }
        tracing::Span::current().record("entries", count);
        tracing::debug!(
            dependencies = jar.dependencies.len(),
            application_configurations = jar.application_configurations.len(),
            logging_configurations = jar.logging_configurations.len(),
            certificates = jar.certificates.len(),
            static_files = jar.static_files.len(),
            build_descriptor = jar.build_descriptor.is_some(),
            "archive read"
        );
        Ok(jar)
    }

    /// Routes one entry into every bucket whose pattern it matches.
    fn add(&mut self, classifier: &Classifier, entry: Entry) {
        let path = entry.path.as_str();
        if path == consts::MANIFEST_PATH {
            self.manifest = Manifest::parse(&entry.text());
        }
        if let Some(dependency) = dependency_name(path) {
            self.dependencies.push(dependency.to_string());
        }
        for role in classifier.roles(path) {
            match role {
                EntryRole::BuildDescriptor => self.add_build_descriptor(&entry),
                EntryRole::ApplicationConfig => self.application_configurations.insert(path, entry.text()),
                EntryRole::LoggingConfig => self.logging_configurations.insert(path, entry.text()),
                EntryRole::Certificate => self.certificates.push(path.to_string()),
                EntryRole::StaticAsset => self.static_files.push(path.to_string()),
                EntryRole::Other => {},
            }
        }
    }

    fn add_build_descriptor(&mut self, entry: &Entry) {
        if self.build_descriptor.is_some() {
            tracing::debug!(path = %entry.path, "ignoring additional build descriptor");
            return;
        }
        match Project::parse(&entry.text()) {
            Ok(project) => self.build_descriptor = Some(project),
            Err(reason) => {
                let kind = ErrorKind::MalformedDescriptor {
                    path: entry.path.clone(),
                    reason,
                };
                tracing::warn!(severity = %kind.severity(), "{kind}");
                self.warnings.push(kind);
            },
        }
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// File names of the bundled libraries.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn application_configurations(&self) -> &ConfigFiles {
        &self.application_configurations
    }

    pub fn logging_configurations(&self) -> &ConfigFiles {
        &self.logging_configurations
    }

    /// Entry paths of bundled certificates and key stores.
    pub fn certificates(&self) -> &[String] {
        &self.certificates
    }

    /// Entry paths of bundled static web assets.
    pub fn static_files(&self) -> &[String] {
        &self.static_files
    }

    /// The bundled Maven project, if one was present and parseable.
    pub fn build_descriptor(&self) -> Option<&Project> {
        self.build_descriptor.as_ref()
    }

    pub fn last_modified(&self) -> OffsetDateTime {
        self.last_modified
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Problems that left part of the snapshot absent without failing it.
    pub fn warnings(&self) -> &[ErrorKind] {
        &self.warnings
    }

    /// How the archive is packaged; plain executable unless proven otherwise.
    pub fn app_type(&self) -> AppType {
        resolve::app_type_chain().resolve_or(self, AppType::default())
    }

    /// Display name of the artifact, falling back to the archive's file name.
    pub fn artifact_name(&self) -> String {
        resolve::artifact_name_chain().resolve_or(self, String::new())
    }

    /// Name the running application registers under.
    ///
    /// `process` supplies the options of the live process, if there is one;
    /// pass [`NoProcess`](crate::NoProcess) otherwise.
    pub fn app_name(&self, process: &dyn ProcessOptions) -> Option<String> {
        resolve::app_name_chain(process).resolve(self)
    }

    /// Port the running application listens on, `8080` if nothing says otherwise.
    pub fn app_port(&self, process: &dyn ProcessOptions) -> u16 {
        resolve::app_port_chain(process).resolve_or(self, consts::DEFAULT_PORT)
    }

    /// JDK version the archive was built with.
    pub fn build_jdk_version(&self) -> Option<String> {
        resolve::build_jdk_version_chain().resolve(self)
    }

    pub fn spring_boot_version(&self) -> Option<String> {
        resolve::spring_boot_version_chain().resolve(self)
    }

    /// Version of the application itself.
    pub fn version(&self) -> Option<String> {
        resolve::version_chain().resolve(self)
    }
}

/// File name of a library bundled under one of the library folders.
fn dependency_name(path: &str) -> Option<&str> {
    let lib = consts::LIB_PATHS.iter().find_map(|prefix| path.strip_prefix(prefix))?;
    (!lib.is_empty() && lib.ends_with(consts::LIB_EXTENSION)).then(|| base_name(lib))
}
