//! # termid-map
//!
//! Attach values of any type to the terms of a term-id trie.
//!
//! The trie ([`termtrie::TermIdTrie`]) owns the strings and hands every term
//! a stable [`TermId`]; this crate keeps a dense [`ValueStore`] indexed by
//! those ids next to it. Lookups, node navigation and prefix searches go to
//! the trie, and ids are resolved against the store on the way out.
//!
//! ## Example
//!
//! ```rust
//! use termid_map::TermIdMapTrie;
//!
//! let mut map: TermIdMapTrie<u32> = TermIdMapTrie::new();
//! for term in ["cat", "car", "care", "dog"] {
//!     map.insert(term).unwrap();
//! }
//!
//! // Values are attached after insertion, through a node or by term.
//! map.root().descend("car").unwrap().set_value(2).unwrap();
//! map.set("care", 3).unwrap();
//!
//! let hits: Vec<_> = map
//!     .common_prefix_search_entries("careful")
//!     .map(|e| e.into_pair())
//!     .collect();
//! assert_eq!(hits, vec![("car".to_string(), Some(2)), ("care".to_string(), Some(3))]);
//!
//! let restored: TermIdMapTrie<u32> = TermIdMapTrie::from_bytes(&map.to_bytes().unwrap()).unwrap();
//! assert_eq!(restored.get("care"), Some(3));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod entries;
mod error;
mod node;
mod persist;
mod values;

pub use entries::{Entries, Entry};
pub use error::{MapTrieError, Result};
pub use node::MapNode;
pub use values::ValueStore;

pub use termtrie::{FoundWord, PatriciaTrie, TermId, TermIdNode, TermIdTrie, TrieCodec, TrieError};

use std::fmt;

/// Configuration for a [`TermIdMapTrie`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial capacity hint for number of terms
    pub initial_capacity: usize,
    /// Check segment checksums when loading persisted state
    pub verify_checksums: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            verify_checksums: true,
        }
    }
}

/// A trie whose terms carry values of type `V`.
///
/// Structural operations are delegated to the trie `T`. Values live in a
/// [`ValueStore`] slot per term id, which is why [`TermIdMapTrie::trim_to_size`]
/// and [`TermIdMapTrie::freeze`] never touch them: neither changes an id.
///
/// Inserting a term and giving it a value are separate steps. The combined
/// [`TermIdMapTrie::insert_with_value`] always fails.
pub struct TermIdMapTrie<V, T = PatriciaTrie> {
    trie: T,
    values: ValueStore<V>,
    config: Config,
}

impl<V> TermIdMapTrie<V, PatriciaTrie> {
    /// Create an empty map over a [`PatriciaTrie`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty map with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            trie: PatriciaTrie::with_capacity(config.initial_capacity),
            values: ValueStore::with_capacity(config.initial_capacity),
            config,
        }
    }
}

impl<V> Default for TermIdMapTrie<V, PatriciaTrie> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, T: TermIdTrie> TermIdMapTrie<V, T> {
    /// Wrap an existing trie. Its terms start out without values.
    pub fn from_trie(trie: T) -> Self {
        Self::from_parts(trie, ValueStore::new())
    }

    /// Pair a trie with values indexed by its term ids.
    pub fn from_parts(trie: T, values: ValueStore<V>) -> Self {
        Self {
            trie,
            values,
            config: Config::default(),
        }
    }

    /// Split into the trie and its values.
    pub fn into_parts(self) -> (T, ValueStore<V>) {
        (self.trie, self.values)
    }

    /// The underlying trie.
    pub fn trie(&self) -> &T {
        &self.trie
    }

    /// The value store.
    pub fn values(&self) -> &ValueStore<V> {
        &self.values
    }

    /// Configuration this map was created or loaded with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a term is stored.
    pub fn contains(&self, term: &str) -> bool {
        self.trie.contains(term)
    }

    /// Id of a stored term.
    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.trie.term_id(term)
    }

    /// Insert a term without a value.
    ///
    /// Give it a value afterwards with [`TermIdMapTrie::set`] or through a
    /// [`MapNode`].
    pub fn insert(&mut self, term: &str) -> Result<()> {
        self.trie.insert(term)?;
        Ok(())
    }

    /// Insert a term together with a value. Not supported: always fails with
    /// [`MapTrieError::Unsupported`], leaving the map untouched.
    pub fn insert_with_value(&mut self, _term: &str, _value: V) -> Result<Option<V>> {
        Err(MapTrieError::Unsupported("insert with value"))
    }

    /// Store `value` for an existing term, returning the previous value.
    ///
    /// Never inserts: fails with [`MapTrieError::UnknownTerm`] if the term is
    /// not in the trie.
    pub fn set(&self, term: &str, value: V) -> Result<Option<V>> {
        let id = self
            .trie
            .term_id(term)
            .ok_or_else(|| MapTrieError::UnknownTerm(term.to_owned()))?;
        Ok(self.values.set(id, value))
    }

    /// Root node of the trie.
    pub fn root(&self) -> MapNode<'_, V, T::Node<'_>> {
        MapNode::new(self.trie.root(), &self.values)
    }

    /// Stored terms that are prefixes of `query`, shortest first.
    pub fn common_prefix_search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = String> + 'a {
        self.trie.common_prefix_search_with_term_id(query).map(|(term, _)| term)
    }

    /// Stored terms that start with `prefix`.
    pub fn predictive_search<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = String> + 'a {
        self.trie.predictive_search_with_term_id(prefix).map(|(term, _)| term)
    }

    /// Like [`TermIdMapTrie::common_prefix_search`], with values.
    pub fn common_prefix_search_entries<'a>(&'a self, query: &'a str) -> Entries<'a, V, T::CommonPrefix<'a>> {
        Entries::new(self.trie.common_prefix_search_with_term_id(query), &self.values)
    }

    /// Like [`TermIdMapTrie::predictive_search`], with values.
    pub fn predictive_search_entries<'a>(&'a self, prefix: &'a str) -> Entries<'a, V, T::Predictive<'a>> {
        Entries::new(self.trie.predictive_search_with_term_id(prefix), &self.values)
    }

    /// First term occurring in `text[start..end]`; see [`TermIdTrie::find_word`].
    pub fn find_word<'t>(&self, text: &'t str, start: usize, end: usize) -> Result<Option<FoundWord<'t>>> {
        Ok(self.trie.find_word(text, start, end)?)
    }

    /// Number of stored terms.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns true if no terms are stored.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Release spare trie capacity. Values are untouched.
    pub fn trim_to_size(&mut self) {
        self.trie.trim_to_size();
    }

    /// Make the trie read-only. Values stay writable.
    pub fn freeze(&mut self) -> Result<()> {
        self.trie.freeze()?;
        Ok(())
    }

    /// Whether the trie has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.trie.is_frozen()
    }

    /// Write a human-readable rendering of the trie.
    pub fn dump(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.trie.dump(out)
    }
}

impl<V: Clone, T: TermIdTrie> TermIdMapTrie<V, T> {
    /// Value of a term. `None` if the term is absent or has no value.
    pub fn get(&self, term: &str) -> Option<V> {
        self.trie.term_id(term).and_then(|id| self.values.get(id))
    }
}

impl<V, T: fmt::Debug> fmt::Debug for TermIdMapTrie<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermIdMapTrie")
            .field("trie", &self.trie)
            .field("value_slots", &self.values.len())
            .finish()
    }
}


#[cfg(test)]
mod proptests;
