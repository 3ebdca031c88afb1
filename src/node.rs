//! Node proxies: trie structure plus value access.

use std::fmt;

use termtrie::{TermId, TermIdNode};

use crate::{MapTrieError, Result, ValueStore};

/// A trie node seen through a [`crate::TermIdMapTrie`].
///
/// Structural accessors go straight to the trie node. The value of the node
/// is the value store slot of its term id, so reading or writing it here is
/// the same as doing so through any other proxy, through
/// [`crate::TermIdMapTrie::get`], or through a search [`crate::Entry`].
pub struct MapNode<'a, V, N> {
    node: N,
    values: &'a ValueStore<V>,
}

impl<'a, V, N: TermIdNode<'a>> MapNode<'a, V, N> {
    pub(crate) fn new(node: N, values: &'a ValueStore<V>) -> Self {
        Self { node, values }
    }

    /// Label of the edge leading into this node. Empty for the root.
    pub fn label(&self) -> &'a str {
        self.node.label()
    }

    /// Whether a term ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.node.is_terminal()
    }

    /// Id of the term ending at this node.
    pub fn term_id(&self) -> Option<TermId> {
        self.node.term_id()
    }

    /// Child whose edge label starts with `c`.
    pub fn child(&self, c: char) -> Option<Self> {
        self.node.child(c).map(|node| Self::new(node, self.values))
    }

    /// All children, in the trie's edge order.
    pub fn children(&self) -> Vec<Self> {
        self.node
            .children()
            .into_iter()
            .map(|node| Self::new(node, self.values))
            .collect()
    }

    /// Follow edges matching `path` from this node.
    ///
    /// Returns the node whose accumulated labels equal `path` exactly, or
    /// `None` if the path ends in the middle of an edge or leaves the trie.
    pub fn descend(&self, path: &str) -> Option<Self> {
        let mut node = self.node;
        let mut rest = path;
        while let Some(c) = rest.chars().next() {
            node = node.child(c)?;
            rest = rest.strip_prefix(node.label())?;
        }
        Some(Self::new(node, self.values))
    }

    /// The underlying trie node.
    pub fn inner(&self) -> N {
        self.node
    }

    /// Store `value` for this node's term, returning the previous value.
    ///
    /// Fails with [`MapTrieError::NotATerm`] if no term ends here.
    pub fn set_value(&self, value: V) -> Result<Option<V>> {
        match self.node.term_id() {
            Some(id) => Ok(self.values.set(id, value)),
            None => Err(MapTrieError::NotATerm {
                label: self.label().to_owned(),
            }),
        }
    }
}

impl<'a, V: Clone, N: TermIdNode<'a>> MapNode<'a, V, N> {
    /// Value of this node's term. `None` if no term ends here or no value was set.
    pub fn value(&self) -> Option<V> {
        self.node.term_id().and_then(|id| self.values.get(id))
    }
}

impl<V, N: Clone> Clone for MapNode<'_, V, N> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            values: self.values,
        }
    }
}

impl<V, N: Copy> Copy for MapNode<'_, V, N> {}

impl<'a, V, N: TermIdNode<'a>> fmt::Debug for MapNode<'a, V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapNode")
            .field("label", &self.node.label())
            .field("term_id", &self.node.term_id())
            .finish()
    }
}
