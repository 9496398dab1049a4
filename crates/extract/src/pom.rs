//! Maven build descriptor (`pom.xml`) parsing.

use std::collections::HashMap;
use xmltree::Element;

/// Maven coordinates. Missing elements are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}
impl Coordinates {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Same group and artifact, regardless of version.
    pub fn is(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }

    fn from_element(element: &Element) -> Self {
        Self {
            group_id: child_text(element, "groupId").unwrap_or_default(),
            artifact_id: child_text(element, "artifactId").unwrap_or_default(),
            version: child_text(element, "version").unwrap_or_default(),
        }
    }
}

/// The parts of a Maven project that metadata resolution cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub coordinates: Coordinates,
    pub parent: Option<Coordinates>,
    pub name: Option<String>,
    pub properties: HashMap<String, String>,
}
impl Project {
    /// Parses `pom.xml` markup.
    ///
    /// Element names are matched by local name, so namespaced and
    /// namespace-free descriptors read the same. Property values are trimmed
    /// but otherwise kept verbatim (no `${...}` interpolation).
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let root = Element::parse(content.as_bytes()).map_err(|err| err.to_string())?;
        if root.name != "project" {
            return Err(format!("expected <project> root element, found <{}>", root.name));
        }
        let properties = root
            .get_child("properties")
            .map(|properties| {
                properties
                    .children
                    .iter()
                    .filter_map(|node| node.as_element())
                    .map(|property| (property.name.clone(), text(property).unwrap_or_default()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            coordinates: Coordinates::from_element(&root),
            parent: root.get_child("parent").map(Coordinates::from_element),
            name: child_text(&root, "name"),
            properties,
        })
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

fn text(element: &Element) -> Option<String> {
    element.get_text().map(|text| text.trim().to_string())
}

fn child_text(element: &Element, name: &str) -> Option<String> {
    element.get_child(name).and_then(text)
}
