//! Drink add-on options.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of selected add-on labels.
///
/// The set is kept sorted, so two selections made in a different order are
/// equal and serialize identically. Deserialized labels go through
/// [`OptionSet::insert`], so saved files get the same trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct OptionSet(BTreeSet<String>);

impl OptionSet {
    /// Create an empty option set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add an option label. Blank labels are ignored; surrounding whitespace
    /// is trimmed. Returns true if the label was not already present.
    pub fn insert(&mut self, option: impl AsRef<str>) -> bool {
        let option = option.as_ref().trim();
        if option.is_empty() {
            return false;
        }
        self.0.insert(option.to_owned())
    }

    /// Remove an option label. Returns true if it was present.
    pub fn remove(&mut self, option: &str) -> bool {
        self.0.remove(option.trim())
    }

    /// Add the option if absent, remove it if present.
    pub fn toggle(&mut self, option: &str) {
        if !self.remove(option) {
            self.insert(option);
        }
    }

    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.0.contains(option.trim())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for OptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for option in iter {
            set.insert(option);
        }
        set
    }
}

impl From<Vec<String>> for OptionSet {
    fn from(options: Vec<String>) -> Self {
        options.into_iter().collect()
    }
}

impl From<OptionSet> for Vec<String> {
    fn from(options: OptionSet) -> Self {
        options.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl core::fmt::Display for OptionSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(", "))
    }
}
