//! Ordered query-parameter collection with WHATWG `URLSearchParams`
//! mutation semantics.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use tracing::trace;

use crate::form_codec::{encode_form_encoded, parse_form_encoded};
use crate::url_record::UrlParts;

/// A single decoded key/value pair. Both halves are plain text, never
/// percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    key: String,
    value: String,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An insertion-ordered list of key/value pairs, optionally attached to the
/// URL it was read from.
///
/// Duplicate keys are allowed. While attached, every mutation rewrites the
/// owning URL's raw query string, so the two views never disagree between
/// operations. The attachment is a weak handle; the collection never keeps
/// its URL alive.
#[derive(Debug, Default)]
pub struct UrlSearchParams {
    entries: Vec<Param>,
    owner: Option<Weak<RefCell<UrlParts>>>,
}

impl UrlSearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without a leading `?`.
    pub fn from_query(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            entries: parse_form_encoded(raw),
            owner: None,
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| Param::new(key, value))
                .collect(),
            owner: None,
        }
    }

    /// Builds the collection owned by a URL. No `?` stripping happens here:
    /// a raw query may legitimately begin with `?`.
    pub(crate) fn attached(query: &str, owner: Weak<RefCell<UrlParts>>) -> Self {
        Self {
            entries: parse_form_encoded(query),
            owner: Some(owner),
        }
    }

    /// Replaces the pairs in place from a new raw query, keeping this
    /// instance (and any long-lived reference to it) valid.
    pub(crate) fn repopulate(&mut self, query: &str) {
        self.entries.clear();
        if !query.is_empty() {
            self.entries.extend(parse_form_encoded(query));
        }
    }

    fn sync_owner(&self) {
        let Some(owner) = &self.owner else { return };
        let Some(parts) = owner.upgrade() else { return };
        let serialized = encode_form_encoded(&self.entries);
        trace!(query = %serialized, "search params mutated; rewriting owner query");
        parts.borrow_mut().query = serialized;
    }

    /// Adds a pair at the end of the list.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Param::new(key, value));
        self.sync_owner();
    }

    /// Removes every pair with the given key, keeping the relative order of
    /// the survivors.
    pub fn delete_all(&mut self, key: &str) {
        self.entries.retain(|pair| pair.key != key);
        self.sync_owner();
    }

    /// Removes every pair matching both key and value.
    pub fn delete_pair(&mut self, key: &str, value: &str) {
        self.entries
            .retain(|pair| pair.key != key || pair.value != value);
        self.sync_owner();
    }

    /// Returns the value of the first pair with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| pair.value.as_str())
    }

    /// Returns every value for the given key, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|pair| pair.key == key)
            .map(|pair| pair.value.clone())
            .collect()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entries.iter().any(|pair| pair.key == key)
    }

    pub fn has_pair(&self, key: &str, value: &str) -> bool {
        self.entries
            .iter()
            .any(|pair| pair.key == key && pair.value == value)
    }

    /// Updates the first pair with the given key in place and drops any
    /// later pairs with the same key; appends when the key is absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let mut replaced = false;
        let mut kept = Vec::with_capacity(self.entries.len());
        for pair in std::mem::take(&mut self.entries) {
            if pair.key == key {
                if !replaced {
                    kept.push(Param::new(key.clone(), value.clone()));
                    replaced = true;
                }
            } else {
                kept.push(pair);
            }
        }
        if !replaced {
            kept.push(Param::new(key, value));
        }
        self.entries = kept;
        self.sync_owner();
    }

    /// Stable-sorts the pairs by key, comparing keys as sequences of UTF-16
    /// code units. Pairs with equal keys keep their relative order.
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.key.encode_utf16().cmp(b.key.encode_utf16()));
        self.sync_owner();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visits every pair as `(value, key)`, matching the Web API callback
    /// argument order.
    pub fn for_each(&self, mut visitor: impl FnMut(&str, &str)) {
        for pair in &self.entries {
            visitor(&pair.value, &pair.key);
        }
    }

    /// Returns a snapshot of the pairs. Later mutation of the collection is
    /// not observed by a snapshot already produced.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|pair| (pair.key.clone(), pair.value.clone()))
            .collect()
    }

    /// Returns a snapshot of the keys, in order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|pair| pair.key.clone()).collect()
    }

    /// Returns a snapshot of the values, in order.
    pub fn values(&self) -> Vec<String> {
        self.entries.iter().map(|pair| pair.value.clone()).collect()
    }
}

/// A clone is detached: it copies the pairs but never the owner link.
impl Clone for UrlSearchParams {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            owner: None,
        }
    }
}

impl fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_form_encoded(&self.entries))
    }
}
