//! Sections and keys.
//!
//! These are plain values. A [`Section`] only becomes part of a document
//! through the [`Document`](crate::Document) API, which keeps the dirty flag
//! and the uniqueness rules in order; outside a document they can be built
//! and compared freely (for example to pass to
//! [`Document::create_section_with_keys`](crate::Document::create_section_with_keys)).

use crate::text::eq_no_case;
use serde::{Deserialize, Serialize};

/// A name/value pair with an optional comment.
///
/// The comment is stored without comment indicators; multi-line comments are
/// separated by `\n`.
///
/// # Examples
///
/// ```rust
/// use datafile::Key;
///
/// let key = Key::new("Port", "1200").with_comment("listening port");
/// assert_eq!(key.name(), "Port");
/// assert_eq!(key.value(), "1200");
/// assert_eq!(key.comment(), "listening port");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    name: String,
    value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    comment: String,
}

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            value: value.into(),
            comment: String::new(),
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub(crate) fn set(&mut self, value: String, comment: String) {
        self.value = value;
        self.comment = comment;
    }

    pub(crate) fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }
}

/// A named group of keys.
///
/// The empty name is the default section holding keys that appear before any
/// `[header]`. Keys keep insertion order; lookups match names ignoring ASCII
/// case and resolve to the first match.
///
/// # Examples
///
/// ```rust
/// use datafile::{Key, Section};
///
/// let section = Section::new("Server")
///     .with_comment("Settings unique to this server")
///     .with_keys([Key::new("Port", "1200"), Key::new("IP_Address", "127.0.0.1")]);
///
/// assert_eq!(section.len(), 2);
/// assert_eq!(section.get("port").map(Key::value), Some("1200"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    comment: String,
    #[serde(default)]
    keys: Vec<Key>,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            comment: String::new(),
            keys: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Appends `keys` verbatim, duplicates included.
    #[must_use]
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys.extend(keys);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns `true` for the unnamed default section.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Returns the first key named `name`, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Key> {
        self.keys.iter().find(|key| eq_no_case(&key.name, name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Key> {
        self.keys.iter_mut().find(|key| eq_no_case(&key.name, name))
    }

    pub(crate) fn push(&mut self, key: Key) {
        self.keys.push(key);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Key> {
        let index = self.keys.iter().position(|key| eq_no_case(&key.name, name))?;
        Some(self.keys.remove(index))
    }

    pub(crate) fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }

    pub(crate) fn clear(&mut self) {
        self.comment.clear();
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_resolves_first_duplicate() {
        let section = Section::new("A").with_keys([Key::new("k", "1"), Key::new("K", "2")]);
        assert_eq!(section.len(), 2);
        assert_eq!(section.get("K").map(Key::value), Some("1"));
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let mut section = Section::new("A").with_keys([Key::new("k", "1"), Key::new("K", "2")]);
        assert_eq!(section.remove("k").map(|k| k.value().to_string()), Some("1".to_string()));
        assert_eq!(section.get("k").map(Key::value), Some("2"));
        assert!(section.remove("missing").is_none());
    }

    #[test]
    fn test_default_section() {
        assert!(Section::new("").is_default());
        assert!(!Section::new("Main").is_default());
    }

    #[test]
    fn test_clear_keeps_name() {
        let mut section = Section::new("A")
            .with_comment("c")
            .with_keys([Key::new("k", "v")]);
        section.clear();
        assert_eq!(section.name(), "A");
        assert!(section.is_empty());
        assert_eq!(section.comment(), "");
    }

    #[test]
    fn test_serde_shape() {
        let section = Section::new("Net").with_keys([Key::new("Port", "1200").with_comment("p")]);
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Net",
                "keys": [{ "name": "Port", "value": "1200", "comment": "p" }]
            })
        );
        let back: Section = serde_json::from_value(json).unwrap();
        assert_eq!(back, section);
    }
}
