//! Suffix tree construction
//!
//! Two builders produce the same tree shape:
//! - naive insertion of every suffix, splitting edges at the first mismatch
//! - a single left-to-right pass over a suffix array and its LCP array,
//!   climbing from the previous leaf to the LCP depth
//!
//! Suffix links and a suffix array (with LCP) can be derived from any tree.

use super::{Node, NodeId, ROOT, SuffixTree};
use crate::error::Result;
use crate::index::suffix_array::SuffixArray;
use crate::index::suffix_array::builder::{invert, kasai_lcp, terminated};
use log::debug;
use std::borrow::Cow;

impl SuffixTree {
    /// Build the tree by inserting suffixes one at a time, longest first.
    ///
    /// Quadratic in the worst case; fine for the text sizes it is used on
    /// and a useful reference for the other builders.
    pub fn build(text: &[u8]) -> Result<Self> {
        let text = terminated(text)?;
        let n = text.len();
        let mut tree = Self::with_text(text);

        for start in 0..n {
            tree.insert_suffix(start);
        }

        debug!(
            "built suffix tree over {} symbols: {} nodes",
            n - 1,
            tree.node_count()
        );
        Ok(tree)
    }

    fn insert_suffix(&mut self, start: usize) {
        let n = self.text.len();
        let mut v = ROOT;
        let mut pos = start;

        while pos < n {
            let Some(w) = self.find_child(v, self.text[pos]) else {
                let leaf = self.push_node(Node::new(pos, n, Some(start)));
                self.add_child(v, leaf);
                return;
            };

            let (from, to) = (self.nodes[w].from, self.nodes[w].to);
            let mut k = 1;
            while from + k < to && pos + k < n && self.text[from + k] == self.text[pos + k] {
                k += 1;
            }

            if from + k == to {
                v = w;
                pos += k;
                continue;
            }

            let u = self.split_edge(w, k);
            let leaf = self.push_node(Node::new(pos + k, n, Some(start)));
            self.add_child(u, leaf);
            return;
        }
    }

    /// Build the tree from a suffix array, computing the LCP array first if
    /// the suffix array does not carry one.
    pub fn from_suffix_array(sa: &SuffixArray) -> Self {
        let lcp = match sa.lcp() {
            Some(lcp) => Cow::Borrowed(lcp),
            None => Cow::Owned(kasai_lcp(sa.text(), sa.array(), sa.inverse())),
        };

        let n = sa.text().len();
        let mut tree = Self::with_text(sa.text().to_vec());
        // string depth per node, indexed like the arena
        let mut depth = vec![0usize];
        let mut last = ROOT;

        for (&pos, &shared) in sa.array().iter().zip(lcp.iter()) {
            let mut v = last;
            let mut below = None;
            while depth[v] > shared {
                below = Some(v);
                v = tree.nodes[v].parent.unwrap_or(ROOT);
            }

            let attach = match below {
                Some(w) if depth[v] < shared => {
                    let u = tree.split_edge(w, shared - depth[v]);
                    depth.push(shared);
                    u
                }
                _ => v,
            };

            let leaf = tree.push_node(Node::new(pos + shared, n, Some(pos)));
            depth.push(n - pos);
            tree.add_child(attach, leaf);
            last = leaf;
        }

        debug!(
            "built suffix tree from suffix array over {} symbols: {} nodes",
            n - 1,
            tree.node_count()
        );
        tree
    }

    /// Suffix array and LCP array read off the tree by a lexicographic
    /// depth-first walk.
    pub fn to_suffix_array(&self) -> SuffixArray {
        let mut array = Vec::with_capacity(self.text.len());
        let mut lcp = Vec::with_capacity(self.text.len());

        // (node, string depth of its parent)
        let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
        let mut shared = 0usize;
        let mut children = Vec::new();

        while let Some((v, parent_depth)) = stack.pop() {
            shared = shared.min(parent_depth);

            let node = &self.nodes[v];
            if let Some(label) = node.leaf_label {
                array.push(label);
                lcp.push(shared);
                shared = usize::MAX;
                continue;
            }

            let depth = parent_depth + node.edge_len();
            children.clear();
            children.extend(self.children(v));
            children.sort_unstable_by_key(|&c| self.text[self.nodes[c].from]);
            stack.extend(children.iter().rev().map(|&c| (c, depth)));
        }

        let inverse = invert(&array);
        SuffixArray {
            text: self.text.clone(),
            array,
            inverse,
            lcp: Some(lcp),
        }
    }

    /// Set the suffix link of every inner node: the node spelling `xa` links
    /// to the node spelling `a`. The root links to itself.
    pub fn annotate_suffix_links(&mut self) {
        self.nodes[ROOT].suffix_link = Some(ROOT);

        for v in 1..self.nodes.len() {
            if self.nodes[v].is_leaf() {
                continue;
            }

            let depth = self.string_depth(v);
            let link = if depth <= 1 {
                Some(ROOT)
            } else {
                let start = self.leftmost_leaf_label(v);
                self.locate_node(&self.text[start + 1..start + depth])
            };
            self.nodes[v].suffix_link = link;
        }
    }

    pub fn has_suffix_links(&self) -> bool {
        self.nodes[ROOT].suffix_link.is_some()
    }

    fn leftmost_leaf_label(&self, mut v: NodeId) -> usize {
        loop {
            let node = &self.nodes[v];
            match (node.leaf_label, node.first_child) {
                (Some(label), _) => return label,
                (None, Some(child)) => v = child,
                (None, None) => return node.from,
            }
        }
    }

    /// Node whose path label is exactly `label`, found by skip/count descent
    fn locate_node(&self, label: &[u8]) -> Option<NodeId> {
        let mut v = ROOT;
        let mut i = 0;
        while i < label.len() {
            let w = self.find_child(v, label[i])?;
            let len = self.nodes[w].edge_len();
            if i + len > label.len() {
                return None;
            }
            i += len;
            v = w;
        }
        Some(v)
    }
}
