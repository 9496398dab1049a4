//! Archive entry classification.

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::patterns::{PatternCategory, Patterns};
use exn::ResultExt;
use regex::Regex;
use std::collections::HashSet;
use tracing::instrument;

/// The role an archive entry plays for metadata resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryRole {
    BuildDescriptor,
    ApplicationConfig,
    LoggingConfig,
    Certificate,
    StaticAsset,
    Other,
}

/// Classifies entry paths against one consistent read of the pattern store.
///
/// Patterns are compiled once when the classifier is built, so classifying a
/// path is a pure function of the path.
#[derive(Debug, Clone)]
pub struct Classifier {
    application: Vec<Regex>,
    logging: Vec<Regex>,
    certificate_extensions: HashSet<String>,
    static_folders: Vec<String>,
    static_extensions: HashSet<String>,
}
impl Classifier {
    #[instrument(level = "debug", skip_all)]
    pub fn new(patterns: &Patterns) -> Result<Self> {
        Ok(Self {
            application: compile(patterns, PatternCategory::Application)?,
            logging: compile(patterns, PatternCategory::Logging)?,
            certificate_extensions: patterns.certificate_extensions.iter().cloned().collect(),
            static_folders: patterns.static_folders.clone(),
            static_extensions: patterns.static_extensions.iter().cloned().collect(),
        })
    }

    /// Every role the path satisfies, in declaration order of [`EntryRole`].
    ///
    /// Roles are not mutually exclusive. A path matching no rule yields
    /// `[EntryRole::Other]`.
    pub fn roles(&self, path: &str) -> Vec<EntryRole> {
        let mut roles = Vec::new();
        if is_build_descriptor(path) {
            roles.push(EntryRole::BuildDescriptor);
        }
        if self.is_application_config(path) {
            roles.push(EntryRole::ApplicationConfig);
        }
        if self.is_logging_config(path) {
            roles.push(EntryRole::LoggingConfig);
        }
        if self.is_certificate(path) {
            roles.push(EntryRole::Certificate);
        }
        if self.is_static_asset(path) {
            roles.push(EntryRole::StaticAsset);
        }
        if roles.is_empty() {
            roles.push(EntryRole::Other);
        }
        roles
    }

    /// The first role the path satisfies.
    pub fn classify(&self, path: &str) -> EntryRole {
        self.roles(path)[0]
    }

    pub fn is_application_config(&self, path: &str) -> bool {
        let name = base_name(path);
        self.application.iter().any(|re| re.is_match(name))
    }

    pub fn is_logging_config(&self, path: &str) -> bool {
        let name = base_name(path);
        self.logging.iter().any(|re| re.is_match(name))
    }

    pub fn is_certificate(&self, path: &str) -> bool {
        extension(path).is_some_and(|ext| self.certificate_extensions.contains(ext))
    }

    pub fn is_static_asset(&self, path: &str) -> bool {
        self.static_folders.iter().any(|folder| path.contains(folder.as_str()))
            || extension(path).is_some_and(|ext| self.static_extensions.contains(ext))
    }
}

fn compile(patterns: &Patterns, category: PatternCategory) -> Result<Vec<Regex>> {
    patterns
        .get(category)
        .iter()
        .map(|pattern| {
            Regex::new(pattern).or_raise(|| ErrorKind::InvalidPattern {
                category,
                pattern: pattern.clone(),
            })
        })
        .collect()
}

pub fn is_build_descriptor(path: &str) -> bool {
    path.starts_with(consts::MAVEN_PATH) && base_name(path).eq_ignore_ascii_case(consts::POM_FILE_NAME)
}

/// Last path segment of an archive entry.
pub(crate) fn base_name(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of the base name, including the leading dot.
///
/// Dotfiles count as all-extension (`.jks` yields `.jks`), matching how
/// extension lists are configured.
pub(crate) fn extension(path: &str) -> Option<&str> {
    let name = base_name(path);
    name.rfind('.').map(|idx| &name[idx..])
}

/// Base name with its extension removed.
pub(crate) fn stem(path: &str) -> &str {
    let name = base_name(path);
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}
