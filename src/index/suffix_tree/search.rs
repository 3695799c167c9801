//! Exact search and leaf enumeration

use super::{Locus, NodeId, SuffixTree};
use crate::error::validate_pattern;
use crate::utils::SENTINEL;

/// A leaf below a locus and the text offset its suffix starts at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafRef {
    pub node: NodeId,
    pub position: usize,
}

impl SuffixTree {
    /// Follow `pattern` from the root.
    ///
    /// Returns the locus where the pattern ends, or `None` when it does not
    /// occur. Empty patterns and patterns containing the sentinel never occur.
    pub fn search(&self, pattern: &[u8]) -> Option<Locus> {
        validate_pattern(pattern, SENTINEL).ok()?;

        let mut v = super::ROOT;
        let mut i = 0;
        loop {
            let w = self.find_child(v, pattern[i])?;
            for &symbol in self.edge(w) {
                if i == pattern.len() {
                    break;
                }
                if symbol != pattern[i] {
                    return None;
                }
                i += 1;
            }
            if i == pattern.len() {
                return Some(Locus {
                    node: w,
                    depth: pattern.len(),
                });
            }
            v = w;
        }
    }

    /// Every leaf in the subtree the locus points into
    pub fn leaves_of(&self, locus: Locus) -> Leaves<'_> {
        self.leaves(locus.node)
    }

    /// Every leaf in the subtree rooted at `node`
    pub fn leaves(&self, node: NodeId) -> Leaves<'_> {
        Leaves {
            tree: self,
            stack: vec![node],
        }
    }

    /// Start offsets of every occurrence of `pattern`
    pub fn find_all(&self, pattern: &[u8]) -> Vec<usize> {
        self.search(pattern)
            .map(|locus| self.leaves_of(locus).map(|leaf| leaf.position).collect())
            .unwrap_or_default()
    }
}

/// Depth-first leaf iterator driven by an explicit stack
pub struct Leaves<'a> {
    tree: &'a SuffixTree,
    stack: Vec<NodeId>,
}

impl Iterator for Leaves<'_> {
    type Item = LeafRef;

    fn next(&mut self) -> Option<LeafRef> {
        while let Some(v) = self.stack.pop() {
            if let Some(position) = self.tree.nodes[v].leaf_label {
                return Some(LeafRef { node: v, position });
            }
            self.stack.extend(self.tree.children(v));
        }
        None
    }
}
