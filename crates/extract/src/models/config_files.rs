/// A bundled text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Entry path inside the archive.
    pub path: String,
    /// Raw text content.
    pub content: String,
}
impl ConfigFile {
    /// Extension of the file name, including the leading dot.
    pub fn extension(&self) -> Option<&str> {
        crate::classify::extension(&self.path)
    }

    pub fn is_yaml(&self) -> bool {
        matches!(self.extension(), Some(".yml" | ".yaml"))
    }

    pub fn is_properties(&self) -> bool {
        self.extension() == Some(".properties")
    }
}

/// Entry path to text content, in archive encounter order.
///
/// Paths are unique: inserting a path a second time replaces its content but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFiles {
    files: Vec<ConfigFile>,
}
impl ConfigFiles {
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        let content = content.into();
        match self.files.iter_mut().find(|file| file.path == path) {
            Some(existing) => existing.content = content,
            None => self.files.push(ConfigFile { path, content }),
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.iter().find(|file| file.path == path).map(|file| file.content.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigFile> {
        self.files.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
impl<'a> IntoIterator for &'a ConfigFiles {
    type Item = &'a ConfigFile;
    type IntoIter = std::slice::Iter<'a, ConfigFile>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for ConfigFiles {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut files = Self::default();
        for (path, content) in iter {
            files.insert(path, content);
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let files: ConfigFiles = [("b.yml", "1"), ("a.properties", "2"), ("b.yml", "3")].into_iter().collect();
        assert_eq!(files.paths().collect::<Vec<_>>(), ["b.yml", "a.properties"]);
        assert_eq!(files.get("b.yml"), Some("3"));
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_kind() {
        let files: ConfigFiles =
            [("application.yml", ""), ("application.yaml", ""), ("application.properties", ""), ("app.xml", "")]
                .into_iter()
                .collect();
        let kinds: Vec<(bool, bool)> = files.iter().map(|file| (file.is_yaml(), file.is_properties())).collect();
        assert_eq!(kinds, [(true, false), (true, false), (false, true), (false, false)]);
    }
}
