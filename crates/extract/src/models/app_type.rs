use std::fmt::{Display, Formatter, Result as FmtResult};

/// How an archive is meant to be launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppType {
    /// A Spring Boot repackaged ("fat") jar, started through a Spring Boot launcher.
    SpringBootFatJar,
    /// A plain executable jar.
    #[default]
    ExecutableJar,
}
impl AppType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpringBootFatJar => "SpringBootFatJar",
            Self::ExecutableJar => "ExecutableJar",
        }
    }
}
impl Display for AppType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
