//! Debug utilities: tree dumps and integrity checks.

use std::fmt;

use super::{PatriciaTrie, ROOT};

impl PatriciaTrie {
    pub(super) fn dump_to(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(
            out,
            "patricia trie: {} terms, {} nodes{}",
            self.len,
            self.nodes.len(),
            if self.frozen.is_some() { ", frozen" } else { "" }
        )?;
        self.dump_node(out, ROOT, 0)
    }

    fn dump_node(&self, out: &mut dyn fmt::Write, idx: u32, depth: usize) -> fmt::Result {
        let node = self.node(idx);
        write!(out, "{}{:?}", "  ".repeat(depth), self.label(idx))?;
        if let Some(id) = node.term {
            write!(out, " {id}")?;
        }
        writeln!(out)?;
        for &child in &node.children {
            self.dump_node(out, child, depth + 1)?;
        }
        Ok(())
    }

    /// Verify trie integrity - returns list of issues found.
    pub fn verify(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let Some(root) = self.nodes.first() else {
            issues.push("missing root node".to_string());
            return issues;
        };
        if root.label.len != 0 {
            issues.push("root has a non-empty label".to_string());
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut ids = vec![false; self.len];
        let mut terms = 0usize;
        let mut stack = vec![ROOT];
        seen[ROOT as usize] = true;

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            if let Some(id) = node.term {
                terms += 1;
                match ids.get_mut(id.index()) {
                    Some(used) if *used => issues.push(format!("term id {id} used twice")),
                    Some(used) => *used = true,
                    None => issues.push(format!("term id {id} out of range for {} terms", self.len)),
                }
            }

            let mut prev: Option<char> = None;
            for &child in &node.children {
                let Some(child_node) = self.nodes.get(child as usize) else {
                    issues.push(format!("node {idx} links to missing node {child}"));
                    continue;
                };
                if seen[child as usize] {
                    issues.push(format!("node {child} is reachable twice"));
                    continue;
                }
                seen[child as usize] = true;

                match self.labels.try_get(child_node.label).and_then(|l| l.chars().next()) {
                    None => issues.push(format!("node {child} has an empty or invalid label")),
                    Some(first) => {
                        if prev.is_some_and(|p| p >= first) {
                            issues.push(format!("children of node {idx} out of order at node {child}"));
                        }
                        prev = Some(first);
                    }
                }
                stack.push(child);
            }
        }

        if terms != self.len {
            issues.push(format!("found {terms} terms, expected {}", self.len));
        }
        let unreachable = seen.iter().filter(|s| !**s).count();
        if unreachable > 0 {
            issues.push(format!("{unreachable} unreachable nodes"));
        }
        if let Some(index) = &self.frozen {
            if index.len() != self.len {
                issues.push(format!(
                    "frozen index holds {} terms, trie holds {}",
                    index.len(),
                    self.len
                ));
            }
            // Walking the nodes is only safe once the structure checked out.
            if issues.is_empty() {
                for (term, id) in index.prefixed("") {
                    let in_trie = self.locate(&term).and_then(|idx| self.node(idx).term);
                    if in_trie != Some(id) {
                        issues.push(format!(
                            "frozen index maps {term:?} to {id}, trie has {}",
                            in_trie.map_or_else(|| "no term".to_string(), |t| t.to_string())
                        ));
                    }
                }
            }
        }
        issues
    }
}
