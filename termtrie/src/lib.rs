//! # termtrie - String Tries with Stable Term Ids
//!
//! A term substrate: a string-keyed prefix trie that hands every inserted
//! term a stable integer [`TermId`] instead of storing payloads in its nodes.
//! Callers that want to attach data to terms keep it in a side table indexed
//! by id.
//!
//! ## Features
//!
//! - **Stable ids**: an id never changes once assigned, across compaction,
//!   freezing and serialization
//! - **Prefix searches**: common-prefix and predictive enumeration, both lazy
//! - **Node navigation**: walk the trie edge by edge from the root
//! - **Frozen layer**: an FST index takes over lookups once the trie is frozen
//!
//! ## Example
//!
//! ```rust
//! use termtrie::{PatriciaTrie, TermIdTrie};
//!
//! let mut trie = PatriciaTrie::new();
//! trie.insert("car").unwrap();
//! trie.insert("care").unwrap();
//!
//! let ids: Vec<_> = trie.common_prefix_search_with_term_id("cares").collect();
//! assert_eq!(ids.len(), 2);
//! assert_eq!(trie.term_id("care"), ids.last().map(|(_, id)| *id));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
mod error;
pub mod frozen;
pub mod patricia;

pub use error::{Result, TrieError};
pub use frozen::{FrozenIndex, FrozenStats};
pub use patricia::{PatriciaNode, PatriciaTrie};

use std::fmt;

/// Identifier assigned to a term when it is inserted.
///
/// Ids are dense from zero in insertion order for the tries in this crate,
/// but callers should only rely on them being stable and unique.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct TermId(u32);

impl TermId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        TermId(raw)
    }

    /// The raw id.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The id as a slot index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A term found inside a larger text by [`TermIdTrie::find_word`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoundWord<'t> {
    /// Byte offset of the match in the searched text.
    pub start: usize,
    /// The matched term.
    pub word: &'t str,
}

impl FoundWord<'_> {
    /// Byte offset just past the match.
    pub fn end(&self) -> usize {
        self.start + self.word.len()
    }
}

/// A borrowed view of one trie node.
pub trait TermIdNode<'a>: Copy {
    /// Label of the edge leading into this node. Empty for the root.
    fn label(&self) -> &'a str;

    /// Id of the term ending at this node.
    fn term_id(&self) -> Option<TermId>;

    /// Whether a term ends at this node.
    fn is_terminal(&self) -> bool {
        self.term_id().is_some()
    }

    /// Child whose edge label starts with `c`.
    fn child(&self, c: char) -> Option<Self>;

    /// All children, in edge order.
    fn children(&self) -> Vec<Self>;
}

/// A prefix trie that identifies terms by [`TermId`].
pub trait TermIdTrie {
    /// Node view returned by [`TermIdTrie::root`].
    type Node<'a>: TermIdNode<'a>
    where
        Self: 'a;

    /// Iterator returned by [`TermIdTrie::common_prefix_search_with_term_id`].
    type CommonPrefix<'a>: Iterator<Item = (String, TermId)>
    where
        Self: 'a;

    /// Iterator returned by [`TermIdTrie::predictive_search_with_term_id`].
    type Predictive<'a>: Iterator<Item = (String, TermId)>
    where
        Self: 'a;

    /// Check if a term is stored.
    fn contains(&self, term: &str) -> bool {
        self.term_id(term).is_some()
    }

    /// Insert a term, assigning it the next id. Inserting a stored term is a no-op.
    fn insert(&mut self, term: &str) -> Result<()>;

    /// Id of a stored term.
    fn term_id(&self, term: &str) -> Option<TermId>;

    /// Stored terms that are prefixes of `query`, shortest first.
    fn common_prefix_search_with_term_id<'a>(&'a self, query: &'a str) -> Self::CommonPrefix<'a>;

    /// Stored terms that start with `prefix`.
    fn predictive_search_with_term_id<'a>(&'a self, prefix: &'a str) -> Self::Predictive<'a>;

    /// Find the first position in `text[start..end]` where a stored term
    /// begins, returning the longest term matching there.
    ///
    /// `start` and `end` are byte offsets and must fall on `char` boundaries.
    fn find_word<'t>(&self, text: &'t str, start: usize, end: usize) -> Result<Option<FoundWord<'t>>> {
        if start > end || end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return Err(TrieError::InvalidRange {
                start,
                end,
                len: text.len(),
            });
        }
        let window = &text[..end];
        for (offset, _) in window[start..].char_indices() {
            let at = start + offset;
            let longest = self
                .common_prefix_search_with_term_id(&window[at..])
                .map(|(term, _)| term.len())
                .filter(|&len| len > 0)
                .last();
            if let Some(len) = longest {
                return Ok(Some(FoundWord {
                    start: at,
                    word: &window[at..at + len],
                }));
            }
        }
        Ok(None)
    }

    /// Number of stored terms.
    fn len(&self) -> usize;

    /// Returns true if no terms are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release spare capacity. Never changes a term id.
    fn trim_to_size(&mut self);

    /// Switch to the read-only representation. Never changes a term id.
    fn freeze(&mut self) -> Result<()>;

    /// Whether [`TermIdTrie::freeze`] has been called.
    fn is_frozen(&self) -> bool;

    /// Root node.
    fn root(&self) -> Self::Node<'_>;

    /// Write a human-readable rendering of the trie.
    fn dump(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// Binary encoding of a trie, used as the first segment of a persisted map.
pub trait TrieCodec: Sized {
    /// Append the encoded trie to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Rebuild a trie from bytes produced by [`TrieCodec::encode`].
    fn decode(bytes: &[u8]) -> Result<Self>;
}
