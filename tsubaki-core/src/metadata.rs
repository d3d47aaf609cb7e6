//! Declarative addon metadata

use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;

/// Placeholder used when logging an addon without a usable name
pub const UNNAMED_ADDON: &str = "<unnamed addon>";

/// Normalized set of domain tags
///
/// Tags are trimmed and lowercased; blank tags are dropped. Declared and
/// requested domains go through the same normalization, so two sets can be
/// compared tag by tag without further case handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct DomainSet(BTreeSet<String>);

impl DomainSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Normalize a single tag, `None` for blank input
    pub fn normalize(tag: &str) -> Option<String> {
        let tag = tag.trim();
        if tag.is_empty() {
            None
        } else {
            Some(tag.to_lowercase())
        }
    }

    pub fn insert(&mut self, tag: &str) -> bool {
        match Self::normalize(tag) {
            Some(t) => self.0.insert(t),
            None => false,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        Self::normalize(tag).map_or(false, |t| self.0.contains(&t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of tags present in both sets
    pub fn intersection_count(&self, other: &DomainSet) -> usize {
        self.0.intersection(&other.0).count()
    }

    /// Number of distinct tags present in either set
    pub fn union_count(&self, other: &DomainSet) -> usize {
        self.0.len() + other.0.len() - self.intersection_count(other)
    }
}

impl<S: AsRef<str>> FromIterator<S> for DomainSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DomainSet::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for DomainSet {
    fn from(tags: Vec<String>) -> Self {
        tags.iter().collect()
    }
}

impl<'a> IntoIterator for &'a DomainSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Name and domains an addon author attaches to an addon
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub domains: DomainSet,
}

impl AddonMetadata {
    pub fn new<I, S>(name: impl Into<String>, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: Some(name.into()),
            domains: domains.into_iter().collect(),
        }
    }

    /// Metadata without a declared name
    pub fn unnamed<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: None,
            domains: domains.into_iter().collect(),
        }
    }

    /// True when the name is absent or whitespace only
    pub fn is_unnamed(&self) -> bool {
        self.name.as_deref().map_or(true, |n| n.trim().is_empty())
    }

    /// Name for log output; never used by lookups
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(n) if !n.trim().is_empty() => n,
            _ => UNNAMED_ADDON,
        }
    }
}
