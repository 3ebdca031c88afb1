use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

fn term_strategy() -> impl Strategy<Value = String> {
    // A small alphabet keeps terms sharing prefixes, so edges get split.
    "[abc\u{e9}]{0,6}"
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 40)]
    Insert(#[proptest(strategy = "term_strategy()")] String),
    #[proptest(weight = 25)]
    Set(#[proptest(strategy = "term_strategy()")] String, u32),
    #[proptest(weight = 15)]
    SetThroughNode(#[proptest(strategy = "term_strategy()")] String, u32),
    #[proptest(weight = 15)]
    Get(#[proptest(strategy = "term_strategy()")] String),
    #[proptest(weight = 2)]
    Trim,
    #[proptest(weight = 1)]
    Freeze,
    #[proptest(weight = 2)]
    Reload,
}

type Model = BTreeMap<String, Option<u32>>;

fn check_searches(
    t: &TermIdMapTrie<u32>,
    m: &Model,
    query: &str,
) -> std::result::Result<(), TestCaseError> {
    let predictive: Vec<(String, Option<u32>)> =
        t.predictive_search_entries(query).map(Entry::into_pair).collect();
    let expected: Vec<(String, Option<u32>)> = m
        .range(query.to_string()..)
        .take_while(|(k, _)| k.starts_with(query))
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    prop_assert_eq!(predictive, expected);

    let common: Vec<(String, Option<u32>)> =
        t.common_prefix_search_entries(query).map(Entry::into_pair).collect();
    let expected: Vec<(String, Option<u32>)> = query
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(query.len()))
        .filter_map(|n| m.get_key_value(&query[..n]))
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    prop_assert_eq!(common, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=300)) {
        let mut t: TermIdMapTrie<u32> = TermIdMapTrie::new();
        let mut m: Model = BTreeMap::new();
        let mut ids: BTreeMap<String, TermId> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(term) => {
                    let result = t.insert(&term);
                    if t.is_frozen() {
                        prop_assert!(matches!(result, Err(MapTrieError::Trie(TrieError::Frozen))));
                    } else {
                        prop_assert!(result.is_ok());
                        let id = t.term_id(&term);
                        prop_assert!(id.is_some());
                        prop_assert_eq!(*ids.entry(term.clone()).or_insert(id.unwrap()), id.unwrap());
                        m.entry(term).or_insert(None);
                    }
                }
                Op::Set(term, value) => {
                    let result = t.set(&term, value);
                    match m.get_mut(&term) {
                        Some(slot) => prop_assert_eq!(result.ok(), Some(slot.replace(value))),
                        None => prop_assert!(matches!(result, Err(MapTrieError::UnknownTerm(_)))),
                    }
                }
                Op::SetThroughNode(term, value) => {
                    let node = t.root().descend(&term).filter(|n| n.is_terminal());
                    match m.get_mut(&term) {
                        Some(slot) => {
                            prop_assert!(node.is_some());
                            let old = node.and_then(|n| n.set_value(value).ok()).flatten();
                            prop_assert_eq!(old, slot.replace(value));
                        }
                        None => prop_assert!(node.is_none()),
                    }
                }
                Op::Get(term) => {
                    prop_assert_eq!(t.contains(&term), m.contains_key(&term));
                    prop_assert_eq!(t.get(&term), m.get(&term).copied().flatten());
                }
                Op::Trim => t.trim_to_size(),
                Op::Freeze => t.freeze().unwrap(),
                Op::Reload => {
                    let bytes = t.to_bytes().unwrap();
                    t = TermIdMapTrie::from_bytes(&bytes).unwrap();
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        // Every id stays where it was first assigned.
        for (term, id) in &ids {
            prop_assert_eq!(t.term_id(term), Some(*id));
        }

        check_searches(&t, &m, "")?;
        check_searches(&t, &m, "a")?;
        check_searches(&t, &m, "ab\u{e9}")?;
    }

    #[test]
    fn prop_roundtrip_preserves_values(
        terms in prop::collection::vec(term_strategy(), 0..100),
        values in prop::collection::vec(any::<u32>(), 100),
        freeze in any::<bool>(),
    ) {
        let mut t: TermIdMapTrie<u32> = TermIdMapTrie::new();
        for term in &terms {
            t.insert(term).unwrap();
        }
        for (term, value) in terms.iter().zip(&values) {
            t.set(term, *value).unwrap();
        }
        if freeze {
            t.freeze().unwrap();
        }

        let back: TermIdMapTrie<u32> = TermIdMapTrie::from_bytes(&t.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(back.len(), t.len());
        prop_assert_eq!(back.is_frozen(), freeze);
        for term in &terms {
            prop_assert!(back.contains(term));
            prop_assert_eq!(back.term_id(term), t.term_id(term));
            prop_assert_eq!(back.get(term), t.get(term));
        }
    }
}

#[test]
fn ids_follow_first_insertion_in_every_order() {
    let terms = ["a", "ab", "abc", "b", "ba"];
    let mut order = terms.to_vec();
    // Rotations are enough to put every term first and last.
    for _ in 0..terms.len() {
        order.rotate_left(1);
        let mut t: TermIdMapTrie<usize> = TermIdMapTrie::new();
        for term in &order {
            t.insert(term).unwrap();
        }
        for (i, term) in order.iter().enumerate() {
            assert_eq!(t.term_id(term), Some(TermId::new(i as u32)));
            t.set(term, i).unwrap();
        }
        t.freeze().unwrap();
        for (i, term) in order.iter().enumerate() {
            assert_eq!(t.term_id(term), Some(TermId::new(i as u32)));
            assert_eq!(t.get(term), Some(i));
        }
    }
}
