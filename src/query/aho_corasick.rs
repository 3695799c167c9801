//! Trie and Aho-Corasick automaton
//!
//! Patterns are inserted into a [`Trie`]; [`Trie::compute_failure_links`]
//! consumes it and returns the searchable [`AhoCorasick`] automaton, so links
//! are computed exactly once and no pattern can be added afterwards.
//!
//! Each node carries the labels of the patterns ending there (a pattern
//! inserted twice keeps both labels), a failure link to the node spelling its
//! longest proper suffix present in the trie, and an output link to the
//! nearest accepting node on that failure chain.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct TrieNode<L> {
    children: FxHashMap<u8, usize>,
    depth: usize,
    labels: Vec<L>,
    fail: usize,
    output: Option<usize>,
}

impl<L> TrieNode<L> {
    fn new(depth: usize) -> Self {
        Self {
            children: FxHashMap::default(),
            depth,
            labels: Vec::new(),
            fail: ROOT,
            output: None,
        }
    }
}

/// Pattern trie under construction
#[derive(Debug, Clone)]
pub struct Trie<L> {
    nodes: Vec<TrieNode<L>>,
    patterns: usize,
}

impl<L> Default for Trie<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Trie<L> {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(0)],
            patterns: 0,
        }
    }

    /// Add `pattern` with `label`, reusing any existing path.
    ///
    /// The empty pattern would match everywhere and is ignored.
    pub fn insert(&mut self, pattern: &[u8], label: L) {
        if pattern.is_empty() {
            return;
        }

        let mut v = ROOT;
        for &symbol in pattern {
            v = match self.nodes[v].children.get(&symbol) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    let depth = self.nodes[v].depth + 1;
                    self.nodes.push(TrieNode::new(depth));
                    self.nodes[v].children.insert(symbol, child);
                    child
                }
            };
        }
        self.nodes[v].labels.push(label);
        self.patterns += 1;
    }

    /// Number of inserted patterns, duplicates included
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    /// Labels stored for exactly `pattern`
    pub fn labels(&self, pattern: &[u8]) -> &[L] {
        let mut v = ROOT;
        for symbol in pattern {
            match self.nodes[v].children.get(symbol) {
                Some(&child) => v = child,
                None => return &[],
            }
        }
        &self.nodes[v].labels
    }

    /// Breadth-first failure and output links; turns the trie into an automaton
    pub fn compute_failure_links(mut self) -> AhoCorasick<L> {
        let mut queue = VecDeque::new();
        let mut edges: Vec<(u8, usize)> = Vec::new();

        let depth_one: Vec<usize> = self.nodes[ROOT].children.values().copied().collect();
        for child in depth_one {
            self.nodes[child].fail = ROOT;
            queue.push_back(child);
        }

        while let Some(v) = queue.pop_front() {
            edges.clear();
            edges.extend(self.nodes[v].children.iter().map(|(&s, &c)| (s, c)));

            for &(symbol, child) in &edges {
                let mut f = self.nodes[v].fail;
                let fail = loop {
                    if let Some(&next) = self.nodes[f].children.get(&symbol) {
                        break next;
                    }
                    if f == ROOT {
                        break ROOT;
                    }
                    f = self.nodes[f].fail;
                };

                self.nodes[child].fail = fail;
                self.nodes[child].output = if self.nodes[fail].labels.is_empty() {
                    self.nodes[fail].output
                } else {
                    Some(fail)
                };
                queue.push_back(child);
            }
        }

        AhoCorasick {
            nodes: self.nodes,
            patterns: self.patterns,
        }
    }
}

/// Searchable automaton
#[derive(Debug, Clone)]
pub struct AhoCorasick<L> {
    nodes: Vec<TrieNode<L>>,
    patterns: usize,
}

/// A pattern occurrence reported by [`AhoCorasick::search`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcMatch<'a, L> {
    /// Start offset of the occurrence
    pub position: usize,
    pub length: usize,
    pub label: &'a L,
}

impl<L> AhoCorasick<L> {
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    /// Stream through `text`, reporting one match per label of every pattern
    /// ending at each position: longest pattern first, then along the output
    /// links.
    pub fn search<'a>(&'a self, text: &'a [u8]) -> AcMatches<'a, L> {
        AcMatches {
            automaton: self,
            text,
            text_pos: 0,
            state: ROOT,
            pending: None,
        }
    }

    fn step(&self, mut state: usize, symbol: u8) -> usize {
        loop {
            if let Some(&next) = self.nodes[state].children.get(&symbol) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.nodes[state].fail;
        }
    }
}

/// Streaming match iterator
pub struct AcMatches<'a, L> {
    automaton: &'a AhoCorasick<L>,
    text: &'a [u8],
    text_pos: usize,
    state: usize,
    /// Accepting node being reported and the next label index in it
    pending: Option<(usize, usize)>,
}

impl<'a, L> Iterator for AcMatches<'a, L> {
    type Item = AcMatch<'a, L>;

    fn next(&mut self) -> Option<AcMatch<'a, L>> {
        let automaton: &'a AhoCorasick<L> = self.automaton;
        let nodes = &automaton.nodes;
        loop {
            if let Some((v, i)) = self.pending {
                let node = &nodes[v];
                if let Some(label) = node.labels.get(i) {
                    self.pending = Some((v, i + 1));
                    return Some(AcMatch {
                        position: self.text_pos - node.depth,
                        length: node.depth,
                        label,
                    });
                }
                self.pending = node.output.map(|o| (o, 0));
                continue;
            }

            if automaton.is_empty() || self.text_pos == self.text.len() {
                return None;
            }

            self.state = automaton.step(self.state, self.text[self.text_pos]);
            self.text_pos += 1;

            let node = &nodes[self.state];
            self.pending = if node.labels.is_empty() {
                node.output.map(|o| (o, 0))
            } else {
                Some((self.state, 0))
            };
        }
    }
}
