use std::collections::HashMap;

/// Key/value fields of a `META-INF/MANIFEST.MF`.
///
/// The manifest is read line by line: everything before the first colon is
/// the key, everything after it is the value, both trimmed. Continuation lines
/// are not folded, and a line without a colon becomes a key with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    fields: HashMap<String, String>,
}
impl Manifest {
    pub fn parse(content: &str) -> Self {
        let mut fields = HashMap::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match line.find(':') {
                Some(idx) if idx > 0 => {
                    fields.insert(line[..idx].trim().to_string(), line[idx + 1..].trim().to_string());
                },
                _ => {
                    fields.insert(line.trim().to_string(), String::new());
                },
            }
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The trimmed value of `key`, if present and not blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
