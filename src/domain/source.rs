use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A followable origin of feeds, created from the URL of its RSS/Atom document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub uuid: Uuid,
    pub xml_url: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl Source {
    pub fn new(xml_url: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            xml_url: xml_url.into(),
            title: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.xml_url)
    }

    /// Match either the uuid or the exact xml url.
    pub fn matches(&self, needle: &str) -> bool {
        self.xml_url == needle || self.uuid.to_string() == needle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_uuid_or_url() {
        let source = Source::new("https://blog.rust-lang.org/feed.xml");
        assert!(source.matches("https://blog.rust-lang.org/feed.xml"));
        assert!(source.matches(&source.uuid.to_string()));
        assert!(!source.matches("https://other.org/feed.xml"));
    }

    #[test]
    fn test_wire_shape_uses_xml_url() {
        let source = Source::new("https://example.com/rss");
        let value = serde_json::to_value(&source).unwrap();
        assert_eq!(value["xmlUrl"], "https://example.com/rss");
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["title", "uuid", "xmlUrl"]);
    }
}
