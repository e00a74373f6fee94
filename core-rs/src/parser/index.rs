//! In-memory lookup structures built from the registry

use super::entry::{EntryKind, RegistryEntry};
use std::collections::{BTreeMap, HashMap};

/// Parsed registry: canonical entries plus the alias and URI indexes
///
/// Built once by [`RegistryParser`](super::RegistryParser) and read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    entries: BTreeMap<String, RegistryEntry>,
    /// normalized spelling -> canonical prefix
    aliases: HashMap<String, String>,
    /// provider or alternate base URI -> canonical prefix
    uris: HashMap<String, String>,
}

impl RegistryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, prefix: &str) -> Option<&RegistryEntry> {
        self.entries.get(prefix)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.entries.contains_key(prefix)
    }

    /// Canonical prefix for an already-normalized spelling
    pub fn alias(&self, normalized: &str) -> Option<&str> {
        self.aliases.get(normalized).map(String::as_str)
    }

    /// Canonical prefix owning a provider or alternate base URI
    pub fn prefix_for_uri(&self, uri: &str) -> Option<&str> {
        self.uris.get(uri).map(String::as_str)
    }

    /// Number of entries, synthetic siblings included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Entries in prefix order
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    /// Real registry rows only
    pub fn datasets(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values().filter(|e| !e.is_synthetic())
    }

    /// Insert a row; a duplicate prefix replaces the earlier entry
    pub(crate) fn insert(&mut self, entry: RegistryEntry) {
        self.entries.insert(entry.prefix.clone(), entry);
    }

    /// Create the sibling namespace, or only refresh its bio2rdf scheme when
    /// the key is already taken
    pub(crate) fn merge_synthetic(&mut self, owner: &str, kind: EntryKind) {
        let key = format!("{}{}", owner, kind.suffix().unwrap_or_default());
        match self.entries.get_mut(&key) {
            Some(existing) => existing.set_bio2rdf_scheme(),
            None => self.insert(RegistryEntry::synthetic(owner, kind)),
        }
    }

    pub(crate) fn add_alias(&mut self, normalized: String, prefix: &str) {
        self.aliases.insert(normalized, prefix.to_string());
    }

    pub(crate) fn add_uri(&mut self, uri: String, prefix: &str) {
        self.uris.insert(uri, prefix.to_string());
    }
}
