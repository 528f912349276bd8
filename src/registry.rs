//! Name-keyed lookup tables
//!
//! Formats, dialects and syntax presets are all found by name from the CLI
//! and from configuration files. [`Registry`] is the shared table behind
//! [`FormatRegistry`](crate::formats::FormatRegistry),
//! [`DialectRegistry`](crate::style::DialectRegistry) and
//! [`SyntaxRegistry`](crate::syntax::SyntaxRegistry).

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Registry<V> {
    entries: HashMap<String, V>,
}

impl<V> Registry<V> {
    pub fn new() -> Self {
        Registry {
            entries: HashMap::new(),
        }
    }

    /// Insert under `name`, returning the entry it replaced
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}
