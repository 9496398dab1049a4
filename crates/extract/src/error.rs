//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Only construction of a [`JarFile`](crate::JarFile) can fail. Resolving a
//! fact from an already constructed snapshot never does.

use crate::patterns::PatternCategory;
use derive_more::{Display, Error};
use std::fmt::{Display as FmtDisplay, Formatter, Result as FmtResult};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// How much of the snapshot a problem takes down with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// A source exists but is unusable; the dependent field is left absent.
    Warning,
    /// A required read failed; no snapshot is produced.
    Error,
}
impl FmtDisplay for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A classification pattern is not a valid regular expression.
    #[display("invalid pattern in '{category}': {pattern}")]
    InvalidPattern {
        /// The pattern category the expression was configured under.
        category: PatternCategory,
        /// The offending expression.
        pattern: String,
    },
    /// The archive itself could not be opened.
    #[display("failed to open archive: {_0}")]
    OpenArchive(#[error(not(source))] String),
    /// An entry's bytes could not be extracted from the archive.
    #[display("failed to read file {_0} from archive")]
    ReadEntry(#[error(not(source))] String),
    /// The bundled build descriptor exists but cannot be parsed.
    #[display("unable to read {path} from archive: {reason}")]
    MalformedDescriptor {
        /// Entry path of the descriptor.
        path: String,
        /// Parser message.
        reason: String,
    },
    /// The live process did not hand over its invocation options.
    #[display("unable to read options of process: {_0}")]
    ProcessOptions(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::OpenArchive(_) | Self::ReadEntry(_) | Self::ProcessOptions(_))
    }

    /// Returns the severity this problem has when it occurs while building a snapshot.
    pub fn severity(&self) -> Severity {
        match self {
            Self::MalformedDescriptor { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exn::ResultExt;
    use rstest::rstest;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::ReadEntry("BOOT-INF/classes/application.yml".to_string()).to_string(),
            "failed to read file BOOT-INF/classes/application.yml from archive"
        );
        assert_eq!(
            ErrorKind::InvalidPattern {
                category: PatternCategory::Application,
                pattern: "(".to_string(),
            }
            .to_string(),
            "invalid pattern in 'config.pattern.app': ("
        );
    }

    #[rstest]
    #[case(ErrorKind::MalformedDescriptor { path: "META-INF/maven/a/b/pom.xml".into(), reason: "eof".into() }, Severity::Warning)]
    #[case(ErrorKind::ReadEntry("a".into()), Severity::Error)]
    #[case(ErrorKind::OpenArchive("a.jar".into()), Severity::Error)]
    #[case(ErrorKind::ProcessOptions("gone".into()), Severity::Error)]
    fn error_kind_severity(#[case] kind: ErrorKind, #[case] expected: Severity) {
        assert_eq!(kind.severity(), expected);
    }

    #[test]
    fn error_kind_retryable() {
        assert!(ErrorKind::ReadEntry("a".into()).is_retryable());
        assert!(
            !ErrorKind::MalformedDescriptor {
                path: "pom.xml".into(),
                reason: "eof".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn error_from_result() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"));
        let err: Result<()> = result.or_raise(|| ErrorKind::ReadEntry("a".into()));
        let exn = err.unwrap_err();
        assert_eq!(*exn, ErrorKind::ReadEntry("a".into()));
    }
}
