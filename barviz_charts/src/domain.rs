// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, deduplicated categorical domains.

extern crate alloc;

use alloc::string::String;

use hashbrown::DefaultHashBuilder;
use indexmap::IndexSet;

/// A set of distinct labels that iterates in first-seen order.
///
/// Band and ordinal scales address their domain by position, so the index of a label in this
/// set is its band/color index.
#[derive(Clone, Debug, Default)]
pub struct Domain {
    values: IndexSet<String, DefaultHashBuilder>,
}

impl Domain {
    /// Creates an empty domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a domain from labels, keeping the first occurrence of each.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self::new();
        for v in values {
            out.insert(v);
        }
        out
    }

    /// Inserts a label; returns `false` if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }

    /// Returns `true` if `value` is in the domain.
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// Returns the position of `value`, if present.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.get_index_of(value)
    }

    /// Returns the label at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get_index(index).map(String::as_str)
    }

    /// Returns the number of distinct labels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the domain has no labels.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates labels in domain order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        // Order matters for scales, so compare as sequences.
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<S: Into<String>> FromIterator<S> for Domain {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn dedup_keeps_first_seen_order() {
        let d = Domain::from_values(["b", "a", "b", "c", "a"]);
        let got: Vec<&str> = d.iter().collect();
        assert_eq!(got, ["b", "a", "c"]);
        assert_eq!(d.index_of("c"), Some(2));
        assert_eq!(d.get(1), Some("a"));
        assert!(!d.contains("z"));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: Domain = ["a", "b"].into_iter().collect();
        let ba: Domain = ["b", "a"].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, Domain::from_values(["a", "b", "a"]));
    }
}
