//! Suffix tree over raw text bytes
//!
//! Nodes live in one arena and refer to each other by index: parent,
//! first child and next sibling form the tree, suffix links are plain
//! lookups computed after construction. Edge labels are `[from, to)`
//! ranges into the shared sentinel-terminated text.
//!
//! - `build`: naive and LCP-driven construction, suffix links, SA/LCP extraction
//! - `search`: exact locus search and leaf iteration
//! - `approx`: edit-distance search fused with tree descent

pub mod approx;
pub mod build;
pub mod search;

pub use approx::{ApproxHits, ApproxMatches, StApproxMatch};
pub use search::{LeafRef, Leaves};

/// Index of a node in the tree's arena
pub type NodeId = usize;

/// The root is always the first node in the arena
pub const ROOT: NodeId = 0;

/// A node reached by matching a string: the match ends on the edge leading
/// into `node` (or exactly at it) after `depth` text symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locus {
    pub node: NodeId,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Edge label start (inclusive)
    pub(crate) from: usize,
    /// Edge label end (exclusive)
    pub(crate) to: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) suffix_link: Option<NodeId>,
    /// Start offset of the suffix spelled by a leaf
    pub(crate) leaf_label: Option<usize>,
}

impl Node {
    fn new(from: usize, to: usize, leaf_label: Option<usize>) -> Self {
        Self {
            from,
            to,
            parent: None,
            first_child: None,
            next_sibling: None,
            suffix_link: None,
            leaf_label,
        }
    }

    #[inline]
    pub fn edge_len(&self) -> usize {
        self.to - self.from
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.leaf_label.is_some()
    }

    pub fn leaf_label(&self) -> Option<usize> {
        self.leaf_label
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn suffix_link(&self) -> Option<NodeId> {
        self.suffix_link
    }
}

/// Suffix tree of a text plus its sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixTree {
    text: Vec<u8>,
    nodes: Vec<Node>,
}

impl SuffixTree {
    fn with_text(text: Vec<u8>) -> Self {
        Self {
            text,
            nodes: vec![Node::new(0, 0, None)],
        }
    }

    /// Text including the trailing sentinel
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Text length without the sentinel
    pub fn text_len(&self) -> usize {
        self.text.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Label of the edge leading into `id`
    pub fn edge(&self, id: NodeId) -> &[u8] {
        let node = &self.nodes[id];
        &self.text[node.from..node.to]
    }

    /// Children of `id` in sibling-list order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.nodes[id].first_child,
        }
    }

    /// Child of `id` whose edge starts with `symbol`
    pub fn find_child(&self, id: NodeId, symbol: u8) -> Option<NodeId> {
        self.children(id)
            .find(|&child| self.text[self.nodes[child].from] == symbol)
    }

    /// Length of the string spelled from the root to `id`
    pub fn string_depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut v = Some(id);
        while let Some(node) = v {
            depth += self.nodes[node].edge_len();
            v = self.nodes[node].parent;
        }
        depth
    }

    /// String spelled from the root to `id`
    pub fn path_label(&self, id: NodeId) -> Vec<u8> {
        let mut edges = Vec::new();
        let mut v = Some(id);
        while let Some(node) = v {
            edges.push(self.edge(node));
            v = self.nodes[node].parent;
        }
        edges.into_iter().rev().flatten().copied().collect()
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Prepend `child` to the sibling list of `parent`
    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[child].next_sibling = self.nodes[parent].first_child;
        self.nodes[parent].first_child = Some(child);
    }

    /// Put `new` in the sibling-list slot held by `old`
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        self.nodes[new].parent = Some(parent);
        self.nodes[new].next_sibling = self.nodes[old].next_sibling;
        self.nodes[old].next_sibling = None;

        if self.nodes[parent].first_child == Some(old) {
            self.nodes[parent].first_child = Some(new);
            return;
        }
        let mut prev = self.nodes[parent].first_child;
        while let Some(p) = prev {
            if self.nodes[p].next_sibling == Some(old) {
                self.nodes[p].next_sibling = Some(new);
                return;
            }
            prev = self.nodes[p].next_sibling;
        }
    }

    /// Split the edge into `w` after `k` symbols and return the new inner node
    fn split_edge(&mut self, w: NodeId, k: usize) -> NodeId {
        debug_assert!(k > 0 && k < self.nodes[w].edge_len());
        let from = self.nodes[w].from;
        let parent = self.nodes[w].parent.unwrap_or(ROOT);

        let u = self.push_node(Node::new(from, from + k, None));
        self.replace_child(parent, w, u);
        self.nodes[w].from = from + k;
        self.add_child(u, w);
        u
    }
}

/// Iterator over a node's sibling-linked children
pub struct Children<'a> {
    tree: &'a SuffixTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes[current].next_sibling;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_edge_keeps_siblings() {
        let mut tree = SuffixTree::with_text(b"abcab\0".to_vec());
        let a = tree.push_node(Node::new(0, 6, Some(0)));
        let b = tree.push_node(Node::new(1, 6, Some(1)));
        let c = tree.push_node(Node::new(2, 6, Some(2)));
        tree.add_child(ROOT, a);
        tree.add_child(ROOT, b);
        tree.add_child(ROOT, c);

        // sibling order is c, b, a; split the middle one
        let u = tree.split_edge(b, 2);
        assert_eq!(tree.children(ROOT).collect::<Vec<_>>(), vec![c, u, a]);
        assert_eq!(tree.edge(u), b"bc");
        assert_eq!(tree.edge(b), b"ab\0");
        assert_eq!(tree.children(u).collect::<Vec<_>>(), vec![b]);
        assert_eq!(tree.node(b).parent(), Some(u));
        assert_eq!(tree.string_depth(b), 5);
        assert_eq!(tree.path_label(b), b"bcab\0".to_vec());
    }
}
