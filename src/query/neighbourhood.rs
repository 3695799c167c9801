//! Edit-neighbourhood enumeration
//!
//! Lists every string within `k` edits of a pattern together with the edit
//! script that produced it. Moves from each state, in exploration order:
//!
//! 1. drop the current pattern symbol (`I`, one edit)
//! 2. insert each alphabet symbol before it (`D`, one edit)
//! 3. write each alphabet symbol in its place (`M`, one edit unless equal)
//!
//! A branch ends when the pattern is used up, or when the budget reaches zero
//! and the rest of the pattern is copied verbatim. The same string can be
//! reached by several scripts; each script is reported.
//!
//! Work is kept on an explicit stack of frames over one shared output buffer
//! and one shared op buffer, so memory grows with the number of open branch
//! points rather than with call depth.

use crate::error::{Result, validate_pattern};
use crate::utils::{Cigar, EditOp, SENTINEL};

/// A string in the neighbourhood and the script that turns the pattern into it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Neighbour {
    pub string: Vec<u8>,
    pub cigar: Cigar,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Start,
    Drop,
    Insert(u8),
    Write(u8),
}

/// Snapshot of a branch point plus the move to take from it
#[derive(Debug, Clone, Copy)]
struct Frame {
    pattern_pos: usize,
    buffer_len: usize,
    ops_len: usize,
    budget: u32,
    step: Step,
}

/// Lazy iterator over the neighbourhood of a pattern
pub struct Neighbourhood<'a> {
    pattern: &'a [u8],
    alphabet: Vec<u8>,
    buffer: Vec<u8>,
    ops: Vec<EditOp>,
    stack: Vec<Frame>,
}

impl<'a> Neighbourhood<'a> {
    /// Start enumerating the strings within `max_edits` of `pattern`.
    ///
    /// Repeated alphabet symbols are considered once and the sentinel byte is
    /// never inserted or written.
    pub fn new(pattern: &'a [u8], alphabet: &[u8], max_edits: u32) -> Result<Self> {
        validate_pattern(pattern, SENTINEL)?;

        let mut seen = [false; 256];
        let alphabet: Vec<u8> = alphabet
            .iter()
            .copied()
            .filter(|&a| a != SENTINEL && !std::mem::replace(&mut seen[a as usize], true))
            .collect();

        let capacity = pattern.len() + max_edits as usize;
        Ok(Self {
            pattern,
            alphabet,
            buffer: Vec::with_capacity(capacity),
            ops: Vec::with_capacity(capacity),
            stack: vec![Frame {
                pattern_pos: 0,
                buffer_len: 0,
                ops_len: 0,
                budget: max_edits,
                step: Step::Start,
            }],
        })
    }

    /// Restore the shared buffers to the frame's snapshot and take its move
    fn apply(&mut self, frame: Frame) -> (usize, u32) {
        self.buffer.truncate(frame.buffer_len);
        self.ops.truncate(frame.ops_len);

        let Frame {
            mut pattern_pos,
            mut budget,
            ..
        } = frame;
        match frame.step {
            Step::Start => {}
            Step::Drop => {
                self.ops.push(EditOp::Insertion);
                pattern_pos += 1;
                budget -= 1;
            }
            Step::Insert(symbol) => {
                self.buffer.push(symbol);
                self.ops.push(EditOp::Deletion);
                budget -= 1;
            }
            Step::Write(symbol) => {
                self.buffer.push(symbol);
                self.ops.push(EditOp::Match);
                if symbol != self.pattern[pattern_pos] {
                    budget -= 1;
                }
                pattern_pos += 1;
            }
        }
        (pattern_pos, budget)
    }

    fn emit(&self) -> Neighbour {
        Neighbour {
            string: self.buffer.clone(),
            cigar: Cigar::compress(&self.ops),
        }
    }
}

impl Iterator for Neighbourhood<'_> {
    type Item = Neighbour;

    fn next(&mut self) -> Option<Neighbour> {
        let frame = self.stack.pop()?;
        let mut state = self.apply(frame);

        // Every branch point has at least the drop move and every chain of
        // moves ends in an emission, so keep descending until one is reached.
        loop {
            let (pattern_pos, budget) = state;
            if pattern_pos == self.pattern.len() {
                return Some(self.emit());
            }
            if budget == 0 {
                let pattern = self.pattern;
                let rest = &pattern[pattern_pos..];
                self.buffer.extend_from_slice(rest);
                self.ops.extend(std::iter::repeat_n(EditOp::Match, rest.len()));
                return Some(self.emit());
            }

            let snapshot = Frame {
                pattern_pos,
                buffer_len: self.buffer.len(),
                ops_len: self.ops.len(),
                budget,
                step: Step::Start,
            };
            // siblings pushed in reverse so they pop in exploration order
            for &a in self.alphabet.iter().rev() {
                self.stack.push(Frame { step: Step::Write(a), ..snapshot });
            }
            for &a in self.alphabet.iter().rev() {
                self.stack.push(Frame { step: Step::Insert(a), ..snapshot });
            }
            state = self.apply(Frame { step: Step::Drop, ..snapshot });
        }
    }
}
