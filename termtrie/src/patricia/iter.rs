//! Node views and lazy search iterators.

use std::fmt;

use super::{PatriciaTrie, ROOT};
use crate::frozen::PrefixStream;
use crate::{TermId, TermIdNode};

/// Borrowed handle to a node of a [`PatriciaTrie`].
#[derive(Clone, Copy)]
pub struct PatriciaNode<'a> {
    trie: &'a PatriciaTrie,
    index: u32,
}

impl<'a> PatriciaNode<'a> {
    pub(super) fn new(trie: &'a PatriciaTrie, index: u32) -> Self {
        Self { trie, index }
    }
}

impl<'a> TermIdNode<'a> for PatriciaNode<'a> {
    fn label(&self) -> &'a str {
        self.trie.label(self.index)
    }

    fn term_id(&self) -> Option<TermId> {
        self.trie.node(self.index).term
    }

    fn child(&self, c: char) -> Option<Self> {
        self.trie.child(self.index, c).map(|index| Self::new(self.trie, index))
    }

    fn children(&self) -> Vec<Self> {
        self.trie
            .node(self.index)
            .children
            .iter()
            .map(|&index| Self::new(self.trie, index))
            .collect()
    }
}

impl fmt::Debug for PatriciaNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatriciaNode")
            .field("label", &self.label())
            .field("term_id", &self.term_id())
            .finish()
    }
}

/// Terms that are prefixes of a query, shortest first.
///
/// Walks one edge per step, so abandoning the iterator early skips the rest
/// of the descent.
pub struct CommonPrefixSearch<'a> {
    trie: &'a PatriciaTrie,
    query: &'a str,
    next: Option<u32>,
    depth: usize,
}

impl<'a> CommonPrefixSearch<'a> {
    pub(super) fn new(trie: &'a PatriciaTrie, query: &'a str) -> Self {
        Self {
            trie,
            query,
            next: Some(ROOT),
            depth: 0,
        }
    }
}

impl Iterator for CommonPrefixSearch<'_> {
    type Item = (String, TermId);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.next.take() {
            let at = self.depth;
            let rest = &self.query[at..];
            if let Some(child) = rest.chars().next().and_then(|c| self.trie.child(node, c)) {
                let label = self.trie.label(child);
                if rest.starts_with(label) {
                    self.next = Some(child);
                    self.depth = at + label.len();
                }
            }
            if let Some(id) = self.trie.node(node).term {
                return Some((self.query[..at].to_owned(), id));
            }
        }
        None
    }
}

/// Terms that start with a prefix, in lexicographic order.
pub struct PredictiveSearch<'a>(Source<'a>);

enum Source<'a> {
    /// Preorder walk of the live trie: a node's own term comes before its
    /// children, and children are visited in edge order.
    Walk {
        trie: &'a PatriciaTrie,
        stack: Vec<(u32, String)>,
    },
    /// Prefix stream over the frozen index.
    Frozen(PrefixStream<'a>),
}

impl<'a> PredictiveSearch<'a> {
    pub(super) fn walk(trie: &'a PatriciaTrie, node: u32, path: String) -> Self {
        PredictiveSearch(Source::Walk {
            trie,
            stack: vec![(node, path)],
        })
    }

    pub(super) fn empty(trie: &'a PatriciaTrie) -> Self {
        PredictiveSearch(Source::Walk {
            trie,
            stack: Vec::new(),
        })
    }

    pub(super) fn frozen(stream: PrefixStream<'a>) -> Self {
        PredictiveSearch(Source::Frozen(stream))
    }
}

impl Iterator for PredictiveSearch<'_> {
    type Item = (String, TermId);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            Source::Walk { trie, stack } => {
                while let Some((idx, path)) = stack.pop() {
                    let node = trie.node(idx);
                    for &child in node.children.iter().rev() {
                        let mut child_path = String::with_capacity(path.len() + 8);
                        child_path.push_str(&path);
                        child_path.push_str(trie.label(child));
                        stack.push((child, child_path));
                    }
                    if let Some(id) = node.term {
                        return Some((path, id));
                    }
                }
                None
            }
            Source::Frozen(stream) => stream.next(),
        }
    }
}
