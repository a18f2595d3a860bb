//! Localized message lookup used by the `tr` and `block` template functions.

use std::collections::HashMap;

/// Map from message key to localized text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message (builder).
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    /// Add or replace a message, returning the previous text.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.messages.insert(key.into(), text.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Localized text for `key`, or `??key??` when there is none.
    pub fn tr(&self, key: &str) -> String {
        match self.get(key) {
            Some(text) => text.to_owned(),
            None => format!("??{key}??"),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MessageBundle {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, text) in iter {
            self.insert(key, text);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        bundle.extend(iter);
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let bundle = MessageBundle::new().with("greeting", "Hello");
        assert_eq!(bundle.get("greeting"), Some("Hello"));
        assert_eq!(bundle.tr("greeting"), "Hello");
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn missing_key_is_marked() {
        let bundle = MessageBundle::new();
        assert!(bundle.is_empty());
        assert_eq!(bundle.get("nope"), None);
        assert_eq!(bundle.tr("nope"), "??nope??");
    }

    #[test]
    fn insert_replaces() {
        let mut bundle = MessageBundle::new();
        assert_eq!(bundle.insert("k", "one"), None);
        assert_eq!(bundle.insert("k", "two"), Some("one".to_owned()));
        assert_eq!(bundle.tr("k"), "two");
    }

    #[test]
    fn collect_from_pairs() {
        let bundle: MessageBundle = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.tr("b"), "2");
    }
}
