//! PATRICIA trie with stable term ids.
//!
//! Every edge label lives in one shared label arena; nodes only store a
//! span into it. Splitting an edge therefore never copies label bytes, it
//! just cuts one span in two.
//!
//! Node layout:
//! - label: (offset, len) into the label arena, empty for the root
//! - term: id of the term ending here, if any
//! - children: node indices sorted by the first char of their label
//!
//! Ids are assigned in insertion order and stay with their node forever.
//! When an edge is split the terminal node keeps its id and the new
//! interior node starts out without one.

mod debug;
mod iter;

pub use iter::{CommonPrefixSearch, PatriciaNode, PredictiveSearch};

use std::fmt;
use std::ops::Range;

use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::encoding::{common_prefix_len, put_bytes, put_varint, Reader};
use crate::frozen::FrozenIndex;
use crate::{Result, TermId, TermIdTrie, TrieCodec, TrieError};

const ROOT: u32 = 0;

const FORMAT_TAG: &[u8; 4] = b"PATR";
const FORMAT_VERSION: u8 = 1;

/// Byte range of a label inside the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Span {
    offset: u32,
    len: u32,
}

impl Span {
    fn range(self) -> Range<usize> {
        self.offset as usize..self.offset as usize + self.len as usize
    }

    fn split_at(self, at: u32) -> (Span, Span) {
        debug_assert!(at <= self.len);
        (
            Span {
                offset: self.offset,
                len: at,
            },
            Span {
                offset: self.offset + at,
                len: self.len - at,
            },
        )
    }
}

/// Label storage arena
#[derive(Default)]
struct LabelArena {
    data: String,
}

impl LabelArena {
    fn push(&mut self, label: &str) -> Span {
        let span = Span {
            offset: self.data.len() as u32,
            len: label.len() as u32,
        };
        self.data.push_str(label);
        span
    }

    fn get(&self, span: Span) -> &str {
        &self.data[span.range()]
    }

    /// Like [`LabelArena::get`], but tolerates spans from untrusted input.
    fn try_get(&self, span: Span) -> Option<&str> {
        self.data.get(span.range())
    }

    fn memory_usage(&self) -> usize {
        self.data.capacity()
    }
}

#[derive(Clone, Debug)]
struct Node {
    label: Span,
    term: Option<TermId>,
    children: SmallVec<[u32; 4]>,
}

impl Node {
    fn new(label: Span, term: Option<TermId>) -> Self {
        Self {
            label,
            term,
            children: SmallVec::new(),
        }
    }
}

/// A mutable PATRICIA trie that can be frozen into an FST-backed read-only form.
pub struct PatriciaTrie {
    labels: LabelArena,
    nodes: Vec<Node>,
    len: usize,
    frozen: Option<FrozenIndex>,
}

impl PatriciaTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty trie sized for roughly `terms` terms.
    pub fn with_capacity(terms: usize) -> Self {
        // A PATRICIA trie needs fewer than two nodes per term.
        let mut nodes = Vec::with_capacity(terms.saturating_mul(2).max(1));
        nodes.push(Node::new(Span::default(), None));
        Self {
            labels: LabelArena::default(),
            nodes,
            len: 0,
            frozen: None,
        }
    }

    /// Approximate heap bytes held by the trie.
    pub fn memory_usage(&self) -> usize {
        let children: usize = self
            .nodes
            .iter()
            .filter(|n| n.children.spilled())
            .map(|n| n.children.capacity() * std::mem::size_of::<u32>())
            .sum();
        self.labels.memory_usage()
            + self.nodes.capacity() * std::mem::size_of::<Node>()
            + children
            + self.frozen.as_ref().map_or(0, |f| f.as_bytes().len())
    }

    /// The frozen index, once [`TermIdTrie::freeze`] has run.
    pub fn frozen_index(&self) -> Option<&FrozenIndex> {
        self.frozen.as_ref()
    }

    fn node(&self, idx: u32) -> &Node {
        &self.nodes[idx as usize]
    }

    fn label(&self, idx: u32) -> &str {
        self.labels.get(self.node(idx).label)
    }

    fn first_char(&self, idx: u32) -> char {
        self.label(idx).chars().next().unwrap_or('\0')
    }

    /// Position of the child of `idx` whose label starts with `c`, or where it would go.
    fn find_child(&self, idx: u32, c: char) -> std::result::Result<usize, usize> {
        self.node(idx)
            .children
            .binary_search_by(|&child| self.first_char(child).cmp(&c))
    }

    fn child(&self, idx: u32, c: char) -> Option<u32> {
        let pos = self.find_child(idx, c).ok()?;
        Some(self.node(idx).children[pos])
    }

    fn push_node(&mut self, node: Node) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(node);
        idx
    }

    /// Node reached by consuming all of `term`, if the path exists.
    fn locate(&self, term: &str) -> Option<u32> {
        let mut node = ROOT;
        let mut rest = term;
        while let Some(c) = rest.chars().next() {
            let child = self.child(node, c)?;
            rest = rest.strip_prefix(self.label(child))?;
            node = child;
        }
        Some(node)
    }

    /// Topmost node whose path starts with `prefix`, along with that path.
    fn locate_prefix(&self, prefix: &str) -> Option<(u32, String)> {
        let mut node = ROOT;
        let mut consumed = 0;
        while consumed < prefix.len() {
            let rest = &prefix[consumed..];
            let c = rest.chars().next()?;
            let child = self.child(node, c)?;
            let label = self.label(child);
            if rest.starts_with(label) {
                consumed += label.len();
                node = child;
            } else if label.starts_with(rest) {
                let mut path = String::with_capacity(consumed + label.len());
                path.push_str(&prefix[..consumed]);
                path.push_str(label);
                return Some((child, path));
            } else {
                return None;
            }
        }
        Some((node, prefix.to_owned()))
    }

    fn insert_term(&mut self, term: &str) -> Result<()> {
        if self.frozen.is_some() {
            return Err(TrieError::Frozen);
        }
        let next_id = u32::try_from(self.len).map_err(|_| TrieError::TermIdOverflow)?;

        let mut node = ROOT;
        let mut rest = term;
        while let Some(c) = rest.chars().next() {
            match self.find_child(node, c) {
                Err(pos) => {
                    let span = self.labels.push(rest);
                    let leaf = self.push_node(Node::new(span, None));
                    self.nodes[node as usize].children.insert(pos, leaf);
                    node = leaf;
                    rest = "";
                }
                Ok(pos) => {
                    let child = self.node(node).children[pos];
                    let span = self.node(child).label;
                    let shared = common_prefix_len(self.labels.get(span), rest);
                    if shared < span.len as usize {
                        // Split the edge; the new interior node takes the
                        // child's slot, so sibling order is unchanged.
                        let (head, tail) = span.split_at(shared as u32);
                        let mid = self.push_node(Node {
                            label: head,
                            term: None,
                            children: smallvec![child],
                        });
                        self.nodes[child as usize].label = tail;
                        self.nodes[node as usize].children[pos] = mid;
                        node = mid;
                    } else {
                        node = child;
                    }
                    rest = &rest[shared..];
                }
            }
        }

        let slot = &mut self.nodes[node as usize].term;
        if slot.is_none() {
            *slot = Some(TermId::new(next_id));
            self.len += 1;
        }
        Ok(())
    }
}

impl Default for PatriciaTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PatriciaTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatriciaTrie")
            .field("terms", &self.len)
            .field("nodes", &self.nodes.len())
            .field("frozen", &self.frozen.is_some())
            .finish()
    }
}

impl TermIdTrie for PatriciaTrie {
    type Node<'a> = PatriciaNode<'a>;
    type CommonPrefix<'a> = CommonPrefixSearch<'a>;
    type Predictive<'a> = PredictiveSearch<'a>;

    fn insert(&mut self, term: &str) -> Result<()> {
        self.insert_term(term)
    }

    fn term_id(&self, term: &str) -> Option<TermId> {
        match &self.frozen {
            Some(index) => index.term_id(term),
            None => self.locate(term).and_then(|idx| self.node(idx).term),
        }
    }

    fn common_prefix_search_with_term_id<'a>(&'a self, query: &'a str) -> CommonPrefixSearch<'a> {
        CommonPrefixSearch::new(self, query)
    }

    fn predictive_search_with_term_id<'a>(&'a self, prefix: &'a str) -> PredictiveSearch<'a> {
        match &self.frozen {
            Some(index) => PredictiveSearch::frozen(index.prefixed(prefix)),
            None => match self.locate_prefix(prefix) {
                Some((node, path)) => PredictiveSearch::walk(self, node, path),
                None => PredictiveSearch::empty(self),
            },
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn trim_to_size(&mut self) {
        let before = self.memory_usage();
        self.labels.data.shrink_to_fit();
        self.nodes.shrink_to_fit();
        for node in &mut self.nodes {
            node.children.shrink_to_fit();
        }
        debug!(
            terms = self.len,
            bytes_before = before,
            bytes_after = self.memory_usage(),
            "trimmed patricia trie"
        );
    }

    fn freeze(&mut self) -> Result<()> {
        if self.frozen.is_some() {
            return Ok(());
        }
        self.trim_to_size();
        let index = FrozenIndex::from_sorted_iter(PredictiveSearch::walk(self, ROOT, String::new()))?;
        debug!(
            terms = self.len,
            fst_bytes = index.stats().fst_bytes,
            "froze patricia trie"
        );
        self.frozen = Some(index);
        Ok(())
    }

    fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    fn root(&self) -> PatriciaNode<'_> {
        PatriciaNode::new(self, ROOT)
    }

    fn dump(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.dump_to(out)
    }
}

impl TrieCodec for PatriciaTrie {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(FORMAT_TAG);
        out.push(FORMAT_VERSION);
        put_varint(out, self.len as u64);
        put_bytes(out, self.labels.data.as_bytes());
        put_varint(out, self.nodes.len() as u64);
        for node in &self.nodes {
            put_varint(out, node.label.offset as u64);
            put_varint(out, node.label.len as u64);
            put_varint(out, node.term.map_or(0, |id| id.as_u32() as u64 + 1));
            put_varint(out, node.children.len() as u64);
            for &child in &node.children {
                put_varint(out, child as u64);
            }
        }
        match &self.frozen {
            None => out.push(0),
            Some(index) => {
                out.push(1);
                put_bytes(out, index.as_bytes());
            }
        }
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        let mut r = Reader::new(bytes);
        if r.bytes(FORMAT_TAG.len())? != FORMAT_TAG {
            return Err(TrieError::corrupt("missing PATR tag"));
        }
        let version = r.u8()?;
        if version != FORMAT_VERSION {
            return Err(TrieError::corrupt(format!("unsupported patricia format version {version}")));
        }

        let len = r.varint_usize()?;
        let data = String::from_utf8(r.length_prefixed()?.to_vec())
            .map_err(|_| TrieError::corrupt("label arena is not UTF-8"))?;
        let labels = LabelArena { data };

        let count = r.varint_usize()?;
        // Every node takes at least four bytes.
        if count == 0 || count > r.remaining() / 4 + 1 {
            return Err(TrieError::corrupt(format!("implausible node count {count}")));
        }
        if len > count {
            return Err(TrieError::corrupt(format!("{len} terms cannot fit in {count} nodes")));
        }
        let mut nodes = Vec::with_capacity(count);
        for _ in 0..count {
            let label = Span {
                offset: r.varint_u32()?,
                len: r.varint_u32()?,
            };
            if labels.try_get(label).is_none() {
                return Err(TrieError::corrupt(format!("bad label span {:?}", label)));
            }
            let term = match r.varint_u32()? {
                0 => None,
                raw => Some(TermId::new(raw - 1)),
            };
            let fanout = r.varint_usize()?;
            if fanout > r.remaining() {
                return Err(TrieError::corrupt(format!("implausible child count {fanout}")));
            }
            let children = (0..fanout)
                .map(|_| r.varint_u32())
                .collect::<Result<SmallVec<[u32; 4]>>>()?;
            nodes.push(Node { label, term, children });
        }

        let frozen = match r.u8()? {
            0 => None,
            1 => Some(FrozenIndex::from_bytes(r.length_prefixed()?.to_vec())?),
            flag => return Err(TrieError::corrupt(format!("bad frozen flag {flag}"))),
        };
        r.finish()?;

        let trie = PatriciaTrie {
            labels,
            nodes,
            len,
            frozen,
        };
        let issues = trie.verify();
        if !issues.is_empty() {
            return Err(TrieError::corrupt(issues.join("; ")));
        }
        debug!(terms = trie.len, bytes = bytes.len(), "decoded patricia trie");
        Ok(trie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TermIdNode;

    fn trie_of(terms: &[&str]) -> PatriciaTrie {
        let mut t = PatriciaTrie::new();
        for term in terms {
            t.insert(term).unwrap();
        }
        t
    }

    fn predictive(t: &PatriciaTrie, prefix: &str) -> Vec<(String, u32)> {
        t.predictive_search_with_term_id(prefix)
            .map(|(term, id)| (term, id.as_u32()))
            .collect()
    }

    fn common(t: &PatriciaTrie, query: &str) -> Vec<(String, u32)> {
        t.common_prefix_search_with_term_id(query)
            .map(|(term, id)| (term, id.as_u32()))
            .collect()
    }

    fn pairs(items: &[(&str, u32)]) -> Vec<(String, u32)> {
        items.iter().map(|&(t, id)| (t.to_string(), id)).collect()
    }

    #[test]
    fn test_basic() {
        let t = trie_of(&["hello", "world"]);
        assert!(t.contains("hello"));
        assert!(t.contains("world"));
        assert!(!t.contains("hell"));
        assert!(!t.contains("missing"));
        assert_eq!(t.len(), 2);
        assert!(t.verify().is_empty());
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let t = trie_of(&["cat", "car", "care", "dog"]);
        assert_eq!(t.term_id("cat"), Some(TermId::new(0)));
        assert_eq!(t.term_id("car"), Some(TermId::new(1)));
        assert_eq!(t.term_id("care"), Some(TermId::new(2)));
        assert_eq!(t.term_id("dog"), Some(TermId::new(3)));
        assert_eq!(t.term_id("ca"), None);
    }

    #[test]
    fn test_reinsert_keeps_id() {
        let mut t = trie_of(&["alpha", "beta"]);
        t.insert("alpha").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.term_id("alpha"), Some(TermId::new(0)));
    }

    #[test]
    fn test_split_keeps_ids() {
        // "care" is split into "car" + "e" when "car" arrives, and again
        // into "ca" + "r" when "cat" arrives.
        let t = trie_of(&["care", "car", "cat"]);
        assert_eq!(t.term_id("care"), Some(TermId::new(0)));
        assert_eq!(t.term_id("car"), Some(TermId::new(1)));
        assert_eq!(t.term_id("cat"), Some(TermId::new(2)));
        assert!(t.verify().is_empty());
    }

    #[test]
    fn test_empty_term() {
        let mut t = trie_of(&["a"]);
        assert!(!t.contains(""));
        t.insert("").unwrap();
        assert!(t.contains(""));
        assert_eq!(t.term_id(""), Some(TermId::new(1)));
        assert!(t.root().is_terminal());
        assert_eq!(common(&t, "abc"), pairs(&[("", 1), ("a", 0)]));
    }

    #[test]
    fn test_unicode_labels() {
        let t = trie_of(&["café", "cafè", "日本", "日本語"]);
        assert!(t.contains("café"));
        assert!(t.contains("cafè"));
        assert!(!t.contains("caf"));
        assert_eq!(predictive(&t, "日"), pairs(&[("日本", 2), ("日本語", 3)]));
        assert_eq!(predictive(&t, "caf"), pairs(&[("cafè", 1), ("café", 0)]));
        assert!(t.verify().is_empty());
    }

    #[test]
    fn test_children_in_edge_order() {
        let t = trie_of(&["dog", "cat", "ant", "bee"]);
        let labels: Vec<&str> = t.root().children().iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["ant", "bee", "cat", "dog"]);

        let ca = t.root().child('c').unwrap();
        assert_eq!(ca.label(), "cat");
        assert!(ca.is_terminal());
        assert!(t.root().child('z').is_none());
    }

    #[test]
    fn test_common_prefix_search() {
        let t = trie_of(&["cat", "car", "care", "dog"]);
        assert_eq!(common(&t, "car"), pairs(&[("car", 1)]));
        assert_eq!(common(&t, "careful"), pairs(&[("car", 1), ("care", 2)]));
        assert_eq!(common(&t, "ca"), pairs(&[]));
        assert_eq!(common(&t, ""), pairs(&[]));
    }

    #[test]
    fn test_predictive_search() {
        let t = trie_of(&["cat", "car", "care", "dog"]);
        assert_eq!(
            predictive(&t, "ca"),
            pairs(&[("car", 1), ("care", 2), ("cat", 0)])
        );
        assert_eq!(predictive(&t, "car"), pairs(&[("car", 1), ("care", 2)]));
        assert_eq!(predictive(&t, "carp"), pairs(&[]));
        assert_eq!(predictive(&t, "d"), pairs(&[("dog", 3)]));
        assert_eq!(predictive(&t, "").len(), 4);
    }

    #[test]
    fn test_predictive_search_mid_edge() {
        let t = trie_of(&["international", "internet", "interval"]);
        assert_eq!(
            predictive(&t, "intern"),
            pairs(&[("international", 0), ("internet", 1)])
        );
        assert_eq!(predictive(&t, "internationalize"), pairs(&[]));
    }

    #[test]
    fn test_find_word() {
        let t = trie_of(&["car", "care", "dog"]);
        let text = "my careful dog";

        let found = t.find_word(text, 0, text.len()).unwrap().unwrap();
        assert_eq!(found.start, 3);
        assert_eq!(found.word, "care");
        assert_eq!(found.end(), 7);

        let found = t.find_word(text, 4, text.len()).unwrap().unwrap();
        assert_eq!((found.start, found.word), (11, "dog"));

        // The window end cuts "care" down to "car".
        let found = t.find_word(text, 0, 6).unwrap().unwrap();
        assert_eq!(found.word, "car");

        assert_eq!(t.find_word(text, 12, text.len()).unwrap(), None);
    }

    #[test]
    fn test_find_word_invalid_range() {
        let t = trie_of(&["a"]);
        assert!(matches!(
            t.find_word("abc", 2, 1),
            Err(TrieError::InvalidRange { start: 2, end: 1, len: 3 })
        ));
        assert!(matches!(t.find_word("abc", 0, 9), Err(TrieError::InvalidRange { .. })));
        // Offset 1 is inside 'é'.
        assert!(matches!(t.find_word("éa", 1, 3), Err(TrieError::InvalidRange { .. })));
    }

    #[test]
    fn test_trim_keeps_ids() {
        let terms = ["one", "two", "three", "thirty", "thirteen"];
        let mut t = trie_of(&terms);
        let before: Vec<_> = terms.iter().map(|term| t.term_id(term)).collect();
        t.trim_to_size();
        let after: Vec<_> = terms.iter().map(|term| t.term_id(term)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_freeze_keeps_ids_and_results() {
        let terms = ["cat", "car", "care", "dog", "do", "dot"];
        let mut t = trie_of(&terms);
        let ids: Vec<_> = terms.iter().map(|term| t.term_id(term)).collect();
        let before_pred = predictive(&t, "");
        let before_common = common(&t, "careful");

        t.freeze().unwrap();
        assert!(t.is_frozen());
        assert_eq!(t.frozen_index().map(|f| f.len()), Some(terms.len()));

        let frozen_ids: Vec<_> = terms.iter().map(|term| t.term_id(term)).collect();
        assert_eq!(ids, frozen_ids);
        assert_eq!(predictive(&t, ""), before_pred);
        assert_eq!(predictive(&t, "do"), pairs(&[("do", 4), ("dog", 3), ("dot", 5)]));
        assert_eq!(common(&t, "careful"), before_common);
        assert!(!t.contains("ca"));

        // Navigation still works on a frozen trie.
        assert_eq!(t.root().child('d').unwrap().label(), "do");
    }

    #[test]
    fn test_insert_after_freeze_fails() {
        let mut t = trie_of(&["a"]);
        t.freeze().unwrap();
        t.freeze().unwrap();
        assert!(matches!(t.insert("b"), Err(TrieError::Frozen)));
        assert!(!t.contains("b"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_codec_roundtrip() {
        let terms = ["cat", "car", "care", "dog", "", "日本"];
        let mut t = trie_of(&terms);
        for frozen in [false, true] {
            if frozen {
                t.freeze().unwrap();
            }
            let mut buf = Vec::new();
            t.encode(&mut buf);
            let back = PatriciaTrie::decode(&buf).unwrap();
            assert_eq!(back.len(), t.len());
            assert_eq!(back.is_frozen(), frozen);
            for term in terms {
                assert_eq!(back.term_id(term), t.term_id(term));
            }
            assert_eq!(predictive(&back, "ca"), predictive(&t, "ca"));
        }
    }

    #[test]
    fn test_decode_rejects_truncation() {
        let t = trie_of(&["cat", "car", "care"]);
        let mut buf = Vec::new();
        t.encode(&mut buf);
        for cut in 0..buf.len() {
            assert!(
                matches!(PatriciaTrie::decode(&buf[..cut]), Err(TrieError::Corrupt(_))),
                "prefix of length {cut} decoded"
            );
        }
    }

    #[test]
    fn test_random_terms_match_btreeset() {
        use rand::{rngs::StdRng, Rng, SeedableRng};
        use std::collections::BTreeSet;

        let mut rng = StdRng::seed_from_u64(7);
        let mut t = PatriciaTrie::new();
        let mut model = BTreeSet::new();
        for _ in 0..3000 {
            let len = rng.gen_range(0..8);
            let term: String = (0..len).map(|_| rng.gen_range(b'a'..=b'd') as char).collect();
            t.insert(&term).unwrap();
            model.insert(term);
        }
        assert_eq!(t.len(), model.len());
        assert!(t.verify().is_empty());

        let all: Vec<String> = t.predictive_search_with_term_id("").map(|(term, _)| term).collect();
        let expected: Vec<String> = model.iter().cloned().collect();
        assert_eq!(all, expected);

        let in_b: Vec<String> = t.predictive_search_with_term_id("b").map(|(term, _)| term).collect();
        let expected_b: Vec<String> = model.iter().filter(|m| m.starts_with('b')).cloned().collect();
        assert_eq!(in_b, expected_b);

        let query = "abcdabcd";
        let prefixes: Vec<String> = t.common_prefix_search_with_term_id(query).map(|(term, _)| term).collect();
        let expected_prefixes: Vec<String> = (0..=query.len())
            .map(|n| &query[..n])
            .filter(|p| model.contains(*p))
            .map(str::to_owned)
            .collect();
        assert_eq!(prefixes, expected_prefixes);
    }

    #[test]
    fn test_decode_rejects_bad_structure() {
        let t = trie_of(&["ab", "ac"]);
        let mut buf = Vec::new();
        t.encode(&mut buf);

        // The term count is the varint right after tag and version.
        let mut wrong_len = buf.clone();
        wrong_len[5] = 9;
        assert!(matches!(PatriciaTrie::decode(&wrong_len), Err(TrieError::Corrupt(_))));

        let mut bad_tag = buf.clone();
        bad_tag[0] = b'X';
        assert!(PatriciaTrie::decode(&bad_tag).is_err());

        let mut trailing = buf;
        trailing.push(0);
        assert!(PatriciaTrie::decode(&trailing).is_err());
    }

    #[test]
    fn test_decode_rejects_frozen_index_disagreeing_with_nodes() {
        let mut a = trie_of(&["x", "y"]);
        let mut b = trie_of(&["y", "x"]);
        a.freeze().unwrap();
        b.freeze().unwrap();

        // Same terms and sizes, but every id is swapped.
        let spliced = PatriciaTrie {
            labels: LabelArena {
                data: a.labels.data.clone(),
            },
            nodes: a.nodes.clone(),
            len: a.len,
            frozen: b.frozen.take(),
        };
        assert!(!spliced.verify().is_empty());

        let mut buf = Vec::new();
        spliced.encode(&mut buf);
        assert!(matches!(PatriciaTrie::decode(&buf), Err(TrieError::Corrupt(_))));

        let mut buf = Vec::new();
        a.encode(&mut buf);
        assert!(PatriciaTrie::decode(&buf).is_ok());
    }
}
