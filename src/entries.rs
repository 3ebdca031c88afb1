//! Search results as term/value entries.

use termtrie::TermId;

use crate::ValueStore;

/// Lazy term/value enumeration over a trie search.
///
/// Wraps the trie's `(term, id)` iterator. Each entry's value is read from
/// the value store when the entry is yielded, not when the search was
/// started, so a write made before pulling an entry is observed by it.
pub struct Entries<'a, V, I> {
    inner: I,
    values: &'a ValueStore<V>,
}

impl<'a, V, I> Entries<'a, V, I> {
    pub(crate) fn new(inner: I, values: &'a ValueStore<V>) -> Self {
        Self { inner, values }
    }
}

impl<'a, V, I> Iterator for Entries<'a, V, I>
where
    V: Clone,
    I: Iterator<Item = (String, TermId)>,
{
    type Item = Entry<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (term, id) = self.inner.next()?;
        Some(Entry {
            value: self.values.get(id),
            term,
            id,
            values: self.values,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// One search hit: a term and the value it had when the entry was yielded.
pub struct Entry<'a, V> {
    term: String,
    id: TermId,
    value: Option<V>,
    values: &'a ValueStore<V>,
}

impl<V> Entry<'_, V> {
    /// The matched term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Id of the matched term.
    pub fn term_id(&self) -> TermId {
        self.id
    }

    /// The term's value as of when this entry was yielded.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Store a new value for the term, returning the value the store held.
    pub fn set_value(&mut self, value: V) -> Option<V>
    where
        V: Clone,
    {
        self.value = Some(value.clone());
        self.values.set(self.id, value)
    }

    /// Split into term and value.
    pub fn into_pair(self) -> (String, Option<V>) {
        (self.term, self.value)
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Entry<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("term", &self.term)
            .field("term_id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}
