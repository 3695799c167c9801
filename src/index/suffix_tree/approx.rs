//! Edit-distance search fused with suffix tree descent
//!
//! Instead of enumerating the pattern's neighbourhood and searching each
//! string, the search walks the tree and applies edits while it descends.
//! A cursor sits either inside an edge or at the node the edge leads to;
//! each step either consumes a pattern symbol (`I`), a text symbol (`D`),
//! or both (`M`, costing one edit when the symbols differ).
//!
//! The traversal state lives in an explicit frame stack so matches are
//! produced lazily by [`ApproxMatches::next`]. A frame records the lengths of
//! the shared op buffer at the point it was pushed; popping truncates back to
//! them. No alignment may start with a `D`: text skipped before the first
//! pattern symbol would only shift the match start. Once the budget runs out
//! the rest of the pattern is followed exactly.

use super::{Locus, ROOT, SuffixTree};
use crate::error::{Result, validate_pattern};
use crate::index::types::Hit;
use crate::utils::{Cigar, EditOp, SENTINEL};

/// A locus reached within the edit budget and the alignment that reached it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StApproxMatch {
    pub locus: Locus,
    pub cigar: Cigar,
}

/// Position inside the tree: `pos` indexes the text within `[from, to]` of
/// `node`'s edge; `pos == to` means the cursor sits at `node` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    node: usize,
    pos: usize,
}

#[derive(Debug, Clone, Copy)]
struct State {
    cursor: Cursor,
    pattern_pos: usize,
    depth: usize,
    budget: u32,
    leading: bool,
}

/// Pending move out of a state. Text-consuming moves carry the cursor of
/// the text symbol they consume.
#[derive(Debug, Clone, Copy)]
enum Step {
    Start,
    Insertion,
    Deletion(Cursor),
    Match(Cursor),
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    state: State,
    ops_len: usize,
    step: Step,
}

/// Lazy iterator over approximate matches of a pattern
pub struct ApproxMatches<'a> {
    tree: &'a SuffixTree,
    pattern: &'a [u8],
    ops: Vec<EditOp>,
    stack: Vec<Frame>,
    options: Vec<Cursor>,
}

impl SuffixTree {
    /// Every locus whose path label is within `max_edits` edits of `pattern`,
    /// with one alignment per distinct edit path.
    pub fn approx_search<'a>(&'a self, pattern: &'a [u8], max_edits: u32) -> Result<ApproxMatches<'a>> {
        validate_pattern(pattern, SENTINEL)?;

        let start = State {
            cursor: Cursor { node: ROOT, pos: 0 },
            pattern_pos: 0,
            depth: 0,
            budget: max_edits,
            leading: true,
        };
        Ok(ApproxMatches {
            tree: self,
            pattern,
            ops: Vec::with_capacity(pattern.len() + max_edits as usize),
            stack: vec![Frame {
                state: start,
                ops_len: 0,
                step: Step::Start,
            }],
            options: Vec::new(),
        })
    }

    /// Approximate matches flattened to one hit per text occurrence
    pub fn approx_hits<'a>(&'a self, pattern: &'a [u8], max_edits: u32) -> Result<ApproxHits<'a>> {
        Ok(ApproxHits {
            matches: self.approx_search(pattern, max_edits)?,
            current: None,
        })
    }
}

impl ApproxMatches<'_> {
    /// Apply a frame's move and return the resulting state
    fn apply(&mut self, frame: Frame) -> State {
        self.ops.truncate(frame.ops_len);
        let mut state = frame.state;

        match frame.step {
            Step::Start => return state,
            Step::Insertion => {
                self.ops.push(EditOp::Insertion);
                state.pattern_pos += 1;
                state.budget -= 1;
            }
            Step::Deletion(at) => {
                self.ops.push(EditOp::Deletion);
                state.cursor = Cursor { node: at.node, pos: at.pos + 1 };
                state.depth += 1;
                state.budget -= 1;
            }
            Step::Match(at) => {
                self.ops.push(EditOp::Match);
                if self.tree.text[at.pos] != self.pattern[state.pattern_pos] {
                    state.budget -= 1;
                }
                state.cursor = Cursor { node: at.node, pos: at.pos + 1 };
                state.pattern_pos += 1;
                state.depth += 1;
            }
        }
        state.leading = false;
        state
    }

    /// Emit a match for a finished state or queue the moves out of it
    fn expand(&mut self, state: State) -> Option<StApproxMatch> {
        if state.pattern_pos == self.pattern.len() {
            return self.emit(state.cursor, state.depth);
        }

        if state.budget == 0 {
            let pattern = self.pattern;
            let rest = &pattern[state.pattern_pos..];
            let cursor = self.descend_exact(state.cursor, rest)?;
            self.ops.extend(std::iter::repeat_n(EditOp::Match, rest.len()));
            return self.emit(cursor, state.depth + rest.len());
        }

        let mut options = std::mem::take(&mut self.options);
        options.clear();
        self.text_steps(state.cursor, &mut options);

        // pushed in reverse so they pop as: I, each D, each M
        let ops_len = self.ops.len();
        let frame = |step| Frame { state, ops_len, step };
        self.stack
            .extend(options.iter().rev().map(|&at| frame(Step::Match(at))));
        if !state.leading {
            self.stack
                .extend(options.iter().rev().map(|&at| frame(Step::Deletion(at))));
        }
        self.stack.push(frame(Step::Insertion));

        self.options = options;
        None
    }

    fn emit(&self, cursor: Cursor, depth: usize) -> Option<StApproxMatch> {
        if depth == 0 {
            return None;
        }
        Some(StApproxMatch {
            locus: Locus { node: cursor.node, depth },
            cigar: Cigar::compress(&self.ops),
        })
    }

    /// Cursors of the text symbols that can follow `cursor`, sentinel excluded
    fn text_steps(&self, cursor: Cursor, out: &mut Vec<Cursor>) {
        let tree = self.tree;
        if cursor.pos < tree.nodes[cursor.node].to {
            if tree.text[cursor.pos] != SENTINEL {
                out.push(cursor);
            }
            return;
        }
        for child in tree.children(cursor.node) {
            let from = tree.nodes[child].from;
            if tree.text[from] != SENTINEL {
                out.push(Cursor { node: child, pos: from });
            }
        }
    }

    fn descend_exact(&self, mut cursor: Cursor, rest: &[u8]) -> Option<Cursor> {
        let tree = self.tree;
        for &symbol in rest {
            if cursor.pos < tree.nodes[cursor.node].to {
                if tree.text[cursor.pos] != symbol {
                    return None;
                }
                cursor.pos += 1;
            } else {
                let child = tree.find_child(cursor.node, symbol)?;
                cursor = Cursor {
                    node: child,
                    pos: tree.nodes[child].from + 1,
                };
            }
        }
        Some(cursor)
    }
}

impl Iterator for ApproxMatches<'_> {
    type Item = StApproxMatch;

    fn next(&mut self) -> Option<StApproxMatch> {
        while let Some(frame) = self.stack.pop() {
            let state = self.apply(frame);
            if let Some(found) = self.expand(state) {
                return Some(found);
            }
        }
        None
    }
}

/// Iterator over `(position, length, cigar)` hits of an approximate search
pub struct ApproxHits<'a> {
    matches: ApproxMatches<'a>,
    current: Option<(super::Leaves<'a>, usize, Cigar)>,
}

impl Iterator for ApproxHits<'_> {
    type Item = Hit;

    fn next(&mut self) -> Option<Hit> {
        loop {
            if let Some((leaves, length, cigar)) = &mut self.current {
                if let Some(leaf) = leaves.next() {
                    return Some(Hit {
                        position: leaf.position,
                        length: *length,
                        cigar: cigar.clone(),
                    });
                }
            }

            let found = self.matches.next()?;
            let leaves = self.matches.tree.leaves_of(found.locus);
            self.current = Some((leaves, found.locus.depth, found.cigar));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn hits(text: &[u8], pattern: &[u8], k: u32) -> BTreeSet<(usize, usize, String)> {
        let tree = SuffixTree::build(text).unwrap();
        tree.approx_hits(pattern, k)
            .unwrap()
            .map(|h| (h.position, h.length, h.cigar.to_string()))
            .collect()
    }

    #[test]
    fn test_zero_budget_is_exact() {
        let text = b"mississippi";
        let found = hits(text, b"ssi", 0);
        let expected: BTreeSet<_> = [(2, 3, "3M".to_string()), (5, 3, "3M".to_string())]
            .into_iter()
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_one_edit_alignments_are_valid() {
        let text = b"acacacag";
        let tree = SuffixTree::build(text).unwrap();
        for hit in tree.approx_hits(b"acg", 1).unwrap() {
            assert_eq!(hit.cigar.pattern_len(), 3);
            assert_eq!(hit.cigar.text_len(), hit.length);
            assert!(hit.length > 0);

            let matched = &text[hit.position..hit.position + hit.length];
            let mut edits = 0;
            let (mut p, mut t) = (0, 0);
            for op in hit.cigar.expand() {
                match op {
                    EditOp::Match => {
                        edits += usize::from(b"acg"[p] != matched[t]);
                        p += 1;
                        t += 1;
                    }
                    EditOp::Insertion => {
                        edits += 1;
                        p += 1;
                    }
                    EditOp::Deletion => {
                        edits += 1;
                        t += 1;
                    }
                }
            }
            assert!(edits <= 1, "{:?} uses {} edits", hit, edits);
        }
    }

    #[test]
    fn test_no_leading_deletion() {
        for hit in hits(b"cac", b"ac", 1) {
            assert!(!hit.2.starts_with("1D"), "{:?}", hit);
        }
    }

    #[test]
    fn test_single_insertion() {
        // deleting the only symbol from the pattern leaves nothing to match
        assert!(hits(b"acgt", b"a", 1).iter().all(|h| h.1 > 0));
        assert!(hits(b"acgt", b"a", 1).contains(&(0, 1, "1M".to_string())));
    }

    #[test]
    fn test_rejects_bad_patterns() {
        let tree = SuffixTree::build(b"acgt").unwrap();
        assert!(tree.approx_search(b"", 1).is_err());
        assert!(tree.approx_search(b"a\0", 1).is_err());
    }
}
