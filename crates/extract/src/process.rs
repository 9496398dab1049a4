//! Runtime option sources of a live Java process.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::PathBuf;

/// Hands over the invocation options (`-D…`, `--…`) of a running process.
///
/// Implementations may block. Failing is fine: facts depending on process
/// options fall back to the archive's own sources.
pub trait ProcessOptions {
    fn jvm_options(&self) -> Result<Vec<String>>;
}

/// There is no live process for the archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProcess;
impl ProcessOptions for NoProcess {
    fn jvm_options(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

impl ProcessOptions for [String] {
    fn jvm_options(&self) -> Result<Vec<String>> {
        Ok(self.to_vec())
    }
}
impl ProcessOptions for Vec<String> {
    fn jvm_options(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}
impl<T: ProcessOptions + ?Sized> ProcessOptions for &T {
    fn jvm_options(&self) -> Result<Vec<String>> {
        (**self).jvm_options()
    }
}

/// Reads the command line of a local process from procfs.
#[derive(Debug, Clone)]
pub struct ProcCmdline {
    path: PathBuf,
}
impl ProcCmdline {
    pub fn new(pid: u32) -> Self {
        Self {
            path: PathBuf::from(format!("/proc/{pid}/cmdline")),
        }
    }

    /// Reads a NUL-separated command line from an arbitrary file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
impl ProcessOptions for ProcCmdline {
    fn jvm_options(&self) -> Result<Vec<String>> {
        let raw = std::fs::read(&self.path).or_raise(|| ErrorKind::ProcessOptions(self.path.display().to_string()))?;
        Ok(raw
            .split(|b| *b == 0)
            .filter(|arg| !arg.is_empty())
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_options() {
        let options = vec!["-Dserver.port=9090".to_string()];
        assert_eq!(options.jvm_options().unwrap(), options);
        assert_eq!(options.as_slice().jvm_options().unwrap(), options);
        assert!(NoProcess.jvm_options().unwrap().is_empty());
    }

    #[test]
    fn test_proc_cmdline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmdline");
        std::fs::write(&path, b"java\0-Dspring.application.name=orders\0-jar\0app.jar\0--server.port=9090\0").unwrap();
        let options = ProcCmdline::from_path(&path).jvm_options().unwrap();
        assert_eq!(options, ["java", "-Dspring.application.name=orders", "-jar", "app.jar", "--server.port=9090"]);
    }

    #[test]
    fn test_proc_cmdline_gone() {
        let err = ProcCmdline::from_path("/nonexistent/cmdline").jvm_options().unwrap_err();
        assert_eq!(*err, ErrorKind::ProcessOptions("/nonexistent/cmdline".to_string()));
    }
}
