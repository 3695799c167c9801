//! Edit-distance backward search
//!
//! Same move set as the suffix tree descent, but the pattern is consumed from
//! its last symbol to its first and "advancing through the text" means
//! narrowing a suffix-array range with the rank tables. A branch whose range
//! would become empty is never pushed, which prunes far earlier than
//! comparing edge symbols.
//!
//! Ops are recorded in processing order and reversed on emission, so the
//! first processed op is the rightmost one of the reported CIGAR. That op may
//! not be a `D`.

use super::BwtIndex;
use crate::error::Result;
use crate::index::suffix_array::SaRange;
use crate::index::types::Hit;
use crate::utils::{Cigar, EditOp};
use log::trace;

/// A suffix-array range reached within the edit budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BwtApproxMatch {
    pub range: SaRange,
    /// Text symbols spanned by each occurrence
    pub length: usize,
    pub cigar: Cigar,
}

#[derive(Debug, Clone, Copy)]
struct State {
    range: SaRange,
    /// Pattern symbols still to consume: `codes[..remaining]`
    remaining: usize,
    length: usize,
    budget: u32,
    leading: bool,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Start,
    Insertion,
    Deletion(SaRange),
    Match { range: SaRange, code: u8 },
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    state: State,
    ops_len: usize,
    step: Step,
}

/// Lazy iterator over approximate backward-search matches
pub struct BwtApproxMatches<'a> {
    index: BwtIndex<'a>,
    codes: Vec<u8>,
    ops: Vec<EditOp>,
    stack: Vec<Frame>,
    extensions: Vec<(u8, SaRange)>,
}

impl<'a> BwtIndex<'a> {
    /// Every suffix-array range whose common prefix is within `max_edits`
    /// edits of `pattern`, once per distinct edit path.
    pub fn approx_search(&self, pattern: &[u8], max_edits: u32) -> Result<BwtApproxMatches<'a>> {
        let codes = self.encode(pattern)?;
        trace!(
            "backward approximate search: {} symbols, budget {}",
            codes.len(),
            max_edits
        );

        let start = State {
            range: self.full_range(),
            remaining: codes.len(),
            length: 0,
            budget: max_edits,
            leading: true,
        };
        Ok(BwtApproxMatches {
            index: *self,
            ops: Vec::with_capacity(codes.len() + max_edits as usize),
            codes,
            stack: vec![Frame {
                state: start,
                ops_len: 0,
                step: Step::Start,
            }],
            extensions: Vec::new(),
        })
    }

    /// Approximate matches expanded to one hit per occurrence
    pub fn approx_hits(&self, pattern: &[u8], max_edits: u32) -> Result<BwtHits<'a>> {
        Ok(BwtHits {
            matches: self.approx_search(pattern, max_edits)?,
            current: None,
        })
    }
}

impl BwtApproxMatches<'_> {
    fn apply(&mut self, frame: Frame) -> State {
        self.ops.truncate(frame.ops_len);
        let mut state = frame.state;

        match frame.step {
            Step::Start => return state,
            Step::Insertion => {
                self.ops.push(EditOp::Insertion);
                state.remaining -= 1;
                state.budget -= 1;
            }
            Step::Deletion(range) => {
                self.ops.push(EditOp::Deletion);
                state.range = range;
                state.length += 1;
                state.budget -= 1;
            }
            Step::Match { range, code } => {
                self.ops.push(EditOp::Match);
                if code != self.codes[state.remaining - 1] {
                    state.budget -= 1;
                }
                state.range = range;
                state.remaining -= 1;
                state.length += 1;
            }
        }
        state.leading = false;
        state
    }

    fn expand(&mut self, state: State) -> Option<BwtApproxMatch> {
        if state.remaining == 0 {
            return self.emit(state.range, state.length);
        }

        if state.budget == 0 {
            let prefix = &self.codes[..state.remaining];
            let range = self.index.backward_search(prefix, state.range)?;
            self.ops
                .extend(std::iter::repeat_n(EditOp::Match, state.remaining));
            return self.emit(range, state.length + state.remaining);
        }

        let tables = self.index.tables();
        let mut extensions = std::mem::take(&mut self.extensions);
        extensions.clear();
        extensions.extend((1..tables.alphabet_size()).filter_map(|a| {
            let code = a as u8;
            let range = tables.extend(code, state.range);
            (!range.is_empty()).then_some((code, range))
        }));

        // pushed in reverse so they pop as: I, each D, each M
        let ops_len = self.ops.len();
        let frame = |step| Frame { state, ops_len, step };
        self.stack.extend(
            extensions
                .iter()
                .rev()
                .map(|&(code, range)| frame(Step::Match { range, code })),
        );
        if !state.leading {
            self.stack.extend(
                extensions
                    .iter()
                    .rev()
                    .map(|&(_, range)| frame(Step::Deletion(range))),
            );
        }
        self.stack.push(frame(Step::Insertion));

        self.extensions = extensions;
        None
    }

    fn emit(&self, range: SaRange, length: usize) -> Option<BwtApproxMatch> {
        if length == 0 {
            return None;
        }
        let ops: Vec<EditOp> = self.ops.iter().rev().copied().collect();
        Some(BwtApproxMatch {
            range,
            length,
            cigar: Cigar::compress(&ops),
        })
    }
}

impl Iterator for BwtApproxMatches<'_> {
    type Item = BwtApproxMatch;

    fn next(&mut self) -> Option<BwtApproxMatch> {
        while let Some(frame) = self.stack.pop() {
            let state = self.apply(frame);
            if let Some(found) = self.expand(state) {
                return Some(found);
            }
        }
        None
    }
}

/// Iterator over `(position, length, cigar)` hits of a backward search
pub struct BwtHits<'a> {
    matches: BwtApproxMatches<'a>,
    current: Option<(std::slice::Iter<'a, usize>, usize, Cigar)>,
}

impl Iterator for BwtHits<'_> {
    type Item = Hit;

    fn next(&mut self) -> Option<Hit> {
        loop {
            if let Some((positions, length, cigar)) = &mut self.current {
                if let Some(&position) = positions.next() {
                    return Some(Hit {
                        position,
                        length: *length,
                        cigar: cigar.clone(),
                    });
                }
            }

            let found = self.matches.next()?;
            let positions = self.matches.index.positions(found.range).iter();
            self.current = Some((positions, found.length, found.cigar));
        }
    }
}
