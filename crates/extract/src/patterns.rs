//! Classification pattern store.
//!
//! A [`Patterns`] value is an explicit snapshot of the pattern store: the
//! caller supplies one per classification pass, so reloading configuration is
//! just a matter of handing in a fresh value.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A named pattern category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    /// Regular expressions matched against the base name of application config files.
    Application,
    /// Regular expressions matched against the base name of logging config files.
    Logging,
    /// File extensions (with leading dot) of certificates and key stores.
    CertificateExtension,
    /// Path fragments marking a static content folder.
    StaticFolder,
    /// File extensions (with leading dot) of static content.
    StaticExtension,
}
impl PatternCategory {
    pub const ALL: [PatternCategory; 5] = [
        Self::Application,
        Self::Logging,
        Self::CertificateExtension,
        Self::StaticFolder,
        Self::StaticExtension,
    ];

    /// The configuration key of this category.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Application => "config.pattern.app",
            Self::Logging => "config.pattern.logging.file_patterns",
            Self::CertificateExtension => "config.pattern.cert",
            Self::StaticFolder => "config.pattern.static.folder",
            Self::StaticExtension => "config.pattern.static.extension",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}
impl Display for PatternCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Patterns {
    pub application: Vec<String>,
    pub logging: Vec<String>,
    pub certificate_extensions: Vec<String>,
    pub static_folders: Vec<String>,
    pub static_extensions: Vec<String>,
}
impl Patterns {
    /// Returns the configured entries of a single category.
    pub fn get(&self, category: PatternCategory) -> &[String] {
        match category {
            PatternCategory::Application => &self.application,
            PatternCategory::Logging => &self.logging,
            PatternCategory::CertificateExtension => &self.certificate_extensions,
            PatternCategory::StaticFolder => &self.static_folders,
            PatternCategory::StaticExtension => &self.static_extensions,
        }
    }

    /// Looks a category up by its configuration key.
    pub fn get_by_key(&self, key: &str) -> Option<&[String]> {
        PatternCategory::from_key(key).map(|category| self.get(category))
    }
}
impl Default for Patterns {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            application: owned(&[
                r"^application(-[\w.-]+)?\.(properties|ya?ml)$",
                r"^bootstrap(-[\w.-]+)?\.(properties|ya?ml)$",
            ]),
            logging: owned(&[
                r"^logback(-[\w.-]+)?\.(xml|groovy)$",
                r"^log4j2?(-[\w.-]+)?\.(xml|properties|json|ya?ml)$",
                r"^logging\.properties$",
            ]),
            certificate_extensions: owned(&[".crt", ".cer", ".pem", ".der", ".p12", ".pfx", ".jks", ".keystore"]),
            static_folders: owned(&["/static/", "/public/", "/resources/static/", "/webapp/"]),
            static_extensions: owned(&[
                ".html", ".htm", ".css", ".js", ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".woff", ".woff2",
            ]),
        }
    }
}
