//! Error type for map trie operations.

use termtrie::TrieError;
use thiserror::Error;

/// Result type alias using [`MapTrieError`].
pub type Result<T> = std::result::Result<T, MapTrieError>;

/// Errors raised by [`crate::TermIdMapTrie`].
#[derive(Debug, Error)]
pub enum MapTrieError {
    /// The operation is permanently unavailable on this map.
    #[error("{0} is not supported by this map trie")]
    Unsupported(&'static str),

    /// A value was addressed by a term that is not in the trie.
    #[error("term {0:?} is not in the trie")]
    UnknownTerm(String),

    /// A value was written through a node that does not end a term.
    #[error("node {label:?} does not end a term")]
    NotATerm {
        /// Edge label of the node.
        label: String,
    },

    /// Error raised by the underlying trie, passed through unchanged.
    #[error(transparent)]
    Trie(#[from] TrieError),

    /// Persisted bytes could not be turned back into a map.
    #[error("corrupt persisted state: {0}")]
    Corrupt(String),

    /// Values could not be serialized.
    #[error("failed to encode values: {0}")]
    Encode(#[source] serde_json::Error),

    /// I/O error while reading or writing persisted state.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapTrieError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        MapTrieError::Corrupt(msg.into())
    }
}
