//! The response catalog: an insertion-ordered map of normalized pattern
//! keys to canned responses.
//!
//! Insertion order is part of the matching contract (scan ties go to the
//! earliest-inserted key), so the catalog is backed by an `IndexMap`.
//! Re-inserting an existing key replaces the response but keeps the key's
//! original position.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{MatcherError, Result};
use crate::normalize::normalize;

/// Ordered pattern → response map with normalized, unique keys.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResponseCatalog {
    entries: IndexMap<String, String>,
}

impl ResponseCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from key/response pairs. Keys are normalized;
    /// duplicates overwrite earlier responses in place.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut catalog = Self::new();
        catalog.merge(entries);
        catalog
    }

    /// Parses a catalog from a JSON object of pattern → response strings.
    ///
    /// This is the fail-fast path for operator-supplied content: malformed
    /// JSON and catalogs with no usable entry are rejected here so a broken
    /// deployment surfaces at startup, not as silent non-matches.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: IndexMap<String, String> = serde_json::from_str(json)?;
        let catalog = Self::from_entries(raw);
        if catalog.is_empty() {
            return Err(MatcherError::EmptyCatalog(
                "no entry has a non-empty normalized key".to_string(),
            ));
        }
        Ok(catalog)
    }

    /// Inserts one entry. The key is normalized first; keys that normalize
    /// to the empty string are skipped. An existing key keeps its position
    /// and gets the new response.
    pub fn insert(&mut self, key: &str, response: impl Into<String>) {
        let normalized = normalize(key);
        if normalized.is_empty() {
            tracing::debug!(key, "skipping catalog entry with empty normalized key");
            return;
        }
        self.entries.insert(normalized, response.into());
    }

    /// Inserts every entry from `entries`, with `insert` semantics.
    pub fn merge<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, response) in entries {
            self.insert(key.as_ref(), response);
        }
    }

    /// Response for an already-normalized key.
    pub fn get(&self, normalized_key: &str) -> Option<&str> {
        self.entries.get(normalized_key).map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
