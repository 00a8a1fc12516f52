//! Ordered, duplicate-free tag collection attached to a question

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of tags on one question
pub const MAX_TAGS: usize = 5;
/// Maximum length of a single tag, in characters
pub const MAX_TAG_LENGTH: usize = 35;

/// Tags in insertion order with duplicates dropped
///
/// Tags are trimmed and lower-cased on the way in, so `"Rust"` and `" rust"`
/// are the same tag. Empty entries are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a raw tag; `None` if nothing is left after trimming
    pub fn normalize(tag: &str) -> Option<String> {
        let tag = tag.trim();
        if tag.is_empty() {
            None
        } else {
            Some(tag.to_lowercase())
        }
    }

    /// Insert a tag, returning `false` if it was empty or already present
    pub fn insert(&mut self, tag: &str) -> bool {
        match Self::normalize(tag) {
            Some(tag) if !self.0.contains(&tag) => {
                self.0.push(tag);
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        Self::normalize(tag).is_some_and(|tag| self.0.contains(&tag))
    }

    /// True if any of `tags` is in this set (an empty `tags` never intersects)
    pub fn intersects(&self, tags: &TagSet) -> bool {
        tags.iter().any(|tag| self.0.iter().any(|own| own == tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
