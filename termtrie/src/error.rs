//! Error type for trie operations.

use thiserror::Error;

/// Result type for trie operations.
pub type Result<T> = std::result::Result<T, TrieError>;

/// Errors raised by a term substrate.
#[derive(Debug, Error)]
pub enum TrieError {
    /// The trie was frozen and no longer accepts terms.
    #[error("trie is frozen")]
    Frozen,

    /// A text range handed to an anchored match is out of bounds or splits a character.
    #[error("invalid range {start}..{end} for text of length {len}")]
    InvalidRange {
        /// Requested start offset.
        start: usize,
        /// Requested end offset.
        end: usize,
        /// Length of the text in bytes.
        len: usize,
    },

    /// Every u32 term id has been handed out.
    #[error("term id space exhausted")]
    TermIdOverflow,

    /// An encoded trie could not be decoded.
    #[error("corrupt trie encoding: {0}")]
    Corrupt(String),

    /// FST construction or access error.
    #[error("FST error: {0}")]
    Fst(#[from] fst::Error),
}

impl TrieError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        TrieError::Corrupt(msg.into())
    }
}
