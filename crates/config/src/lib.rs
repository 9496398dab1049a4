//! Layered configuration loading for jarlens.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults,
//! 2. one configuration file (YAML, TOML or JSON, chosen by extension),
//! 3. environment variables prefixed with `JARLENS_`, `__` separating nested keys.
//!
//! `JARLENS_PATTERNS__CERTIFICATE_EXTENSIONS='[".pem"]'` maps to
//! `patterns.certificate_extensions`.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use jarlens_extract::{Classifier, PatternCategory, Patterns};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const ENV_PREFIX: &str = "JARLENS_";
const FILE_NAMES: [&str; 4] = ["config.yaml", "config.yml", "config.toml", "config.json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub patterns: Patterns,
}

impl Config {
    /// Loads the user configuration file, if there is one, and the environment.
    pub fn load() -> Result<Self> {
        Self::extract(Self::figment(Self::default_path().as_deref())?)
    }

    /// Loads an explicit configuration file and the environment.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.display().to_string()));
        }
        Self::extract(Self::figment(Some(path))?)
    }

    /// Builds the provider chain without extracting it.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "using configuration file");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("toml") => figment.merge(Toml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.display().to_string())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// First existing configuration file in the platform configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "jarlens")?;
        FILE_NAMES.iter().map(|name| dirs.config_dir().join(name)).find(|path| path.is_file())
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every pattern category, naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        for category in PatternCategory::ALL {
            let entries = self.patterns.get(category);
            let extensions = matches!(category, PatternCategory::CertificateExtension | PatternCategory::StaticExtension);
            if entries.iter().any(|entry| entry.trim().is_empty() || (extensions && !entry.starts_with('.'))) {
                exn::bail!(ErrorKind::InvalidValue(category.key().to_string()));
            }
        }
        self.classifier().map(|_| ())
    }

    /// Compiles the configured patterns.
    pub fn classifier(&self) -> Result<Classifier> {
        match Classifier::new(&self.patterns) {
            Ok(classifier) => Ok(classifier),
            Err(err) => {
                let key = match &*err {
                    jarlens_extract::error::ErrorKind::InvalidPattern { category, .. } => category.key(),
                    _ => "patterns",
                };
                Err(err).or_raise(|| ErrorKind::InvalidValue(key.to_string()))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.patterns, Patterns::default());
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("config.yaml", "patterns:\n  certificate_extensions: [\".pem\"]\n")]
    #[case("config.toml", "[patterns]\ncertificate_extensions = [\".pem\"]\n")]
    #[case("config.json", r#"{"patterns": {"certificate_extensions": [".pem"]}}"#)]
    fn test_load_from_file(#[case] name: &str, #[case] content: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(name, content)?;
            let config = Config::load_from(jail.directory().join(name)).unwrap();
            assert_eq!(config.patterns.certificate_extensions, [".pem"]);
            assert_eq!(config.patterns.application, Patterns::default().application);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "patterns:\n  static_folders: [\"/assets/\"]\n")?;
            jail.set_env("JARLENS_PATTERNS__STATIC_FOLDERS", r#"["/www/"]"#);
            let config = Config::load_from(jail.directory().join("config.yaml")).unwrap();
            assert_eq!(config.patterns.static_folders, ["/www/"]);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_regex_names_category() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "patterns:\n  logging: [\"(unclosed\"]\n")?;
            let err = Config::load_from(jail.directory().join("config.yaml")).unwrap_err();
            assert_eq!(*err, ErrorKind::InvalidValue("config.pattern.logging.file_patterns".to_string()));
            Ok(())
        });
    }

    #[rstest]
    #[case(PatternCategory::CertificateExtension, "pem", "config.pattern.cert")]
    #[case(PatternCategory::StaticFolder, " ", "config.pattern.static.folder")]
    #[case(PatternCategory::Application, "", "config.pattern.app")]
    fn test_validate_rejects(#[case] category: PatternCategory, #[case] entry: &str, #[case] key: &str) {
        let mut config = Config::default();
        let entries = match category {
            PatternCategory::Application => &mut config.patterns.application,
            PatternCategory::Logging => &mut config.patterns.logging,
            PatternCategory::CertificateExtension => &mut config.patterns.certificate_extensions,
            PatternCategory::StaticFolder => &mut config.patterns.static_folders,
            PatternCategory::StaticExtension => &mut config.patterns.static_extensions,
        };
        entries.push(entry.to_string());
        let err = config.validate().unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidValue(key.to_string()));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[patterns]\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFormat(path.display().to_string()));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path.display().to_string()));
    }

    #[test]
    fn test_classifier_from_config() {
        let config = Config::default();
        let classifier = config.classifier().unwrap();
        assert!(classifier.is_application_config("BOOT-INF/classes/application-prod.yml"));
    }
}
