//! Run-length edit scripts (CIGAR strings)
//!
//! Every engine records its alignment as one [`EditOp`] per step and reports
//! the compressed form. Operations are seen from the pattern's side:
//!
//! - `M` consumes one pattern symbol and one text symbol (match or substitution)
//! - `I` consumes a pattern symbol that is absent from the text
//! - `D` consumes a text symbol that is absent from the pattern
//!
//! ```
//! use edsearch::utils::cigar::{compress, expand, EditOp};
//!
//! let ops = [EditOp::Match, EditOp::Match, EditOp::Insertion, EditOp::Match];
//! assert_eq!(compress(&ops), "2M1I1M");
//! assert_eq!(expand("2M1I1M").unwrap(), ops.to_vec());
//! ```

use std::fmt;
use std::str::FromStr;

/// A single alignment operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditOp {
    Match,
    Insertion,
    Deletion,
}

impl EditOp {
    /// CIGAR letter for this operation
    pub fn code(self) -> char {
        match self {
            EditOp::Match => 'M',
            EditOp::Insertion => 'I',
            EditOp::Deletion => 'D',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'M' => Some(EditOp::Match),
            'I' => Some(EditOp::Insertion),
            'D' => Some(EditOp::Deletion),
            _ => None,
        }
    }

    /// Whether this operation advances through the pattern
    #[inline]
    pub fn consumes_pattern(self) -> bool {
        !matches!(self, EditOp::Deletion)
    }

    /// Whether this operation advances through the text
    #[inline]
    pub fn consumes_text(self) -> bool {
        !matches!(self, EditOp::Insertion)
    }
}

/// Compressed edit script: maximal runs of identical operations
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cigar {
    runs: Vec<(u32, EditOp)>,
}

impl Cigar {
    /// Merge runs of identical operations, scanning left to right
    pub fn compress(ops: &[EditOp]) -> Self {
        let mut runs: Vec<(u32, EditOp)> = Vec::new();
        for &op in ops {
            match runs.last_mut() {
                Some((count, last)) if *last == op => *count += 1,
                _ => runs.push((1, op)),
            }
        }
        Self { runs }
    }

    /// Exact inverse of [`Cigar::compress`]
    pub fn expand(&self) -> Vec<EditOp> {
        let mut ops = Vec::with_capacity(self.len_ops());
        for &(count, op) in &self.runs {
            ops.extend(std::iter::repeat_n(op, count as usize));
        }
        ops
    }

    /// The `(count, op)` runs
    pub fn runs(&self) -> &[(u32, EditOp)] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of uncompressed operations
    pub fn len_ops(&self) -> usize {
        self.runs.iter().map(|&(n, _)| n as usize).sum()
    }

    /// First operation of the script
    pub fn first_op(&self) -> Option<EditOp> {
        self.runs.first().map(|&(_, op)| op)
    }

    /// Pattern symbols consumed (`M` + `I`)
    pub fn pattern_len(&self) -> usize {
        self.consumed(EditOp::consumes_pattern)
    }

    /// Text symbols consumed (`M` + `D`)
    pub fn text_len(&self) -> usize {
        self.consumed(EditOp::consumes_text)
    }

    fn consumed(&self, pred: fn(EditOp) -> bool) -> usize {
        self.runs
            .iter()
            .filter(|&&(_, op)| pred(op))
            .map(|&(n, _)| n as usize)
            .sum()
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(count, op) in &self.runs {
            write!(f, "{}{}", count, op.code())?;
        }
        Ok(())
    }
}

/// Error returned when parsing a malformed CIGAR string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCigarError {
    #[error("CIGAR op '{op}' at offset {offset} has no count")]
    MissingCount { op: char, offset: usize },
    #[error("zero-length CIGAR run at offset {offset}")]
    ZeroCount { offset: usize },
    #[error("invalid CIGAR op '{op}' at offset {offset}")]
    InvalidOp { op: char, offset: usize },
    #[error("CIGAR count overflows at offset {offset}")]
    Overflow { offset: usize },
    #[error("CIGAR string ends with a count but no op")]
    TrailingCount,
}

impl FromStr for Cigar {
    type Err = ParseCigarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut runs: Vec<(u32, EditOp)> = Vec::new();
        let mut count: Option<u32> = None;

        for (offset, c) in s.char_indices() {
            if let Some(digit) = c.to_digit(10) {
                let n = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or(ParseCigarError::Overflow { offset })?;
                count = Some(n);
                continue;
            }

            let op = EditOp::from_code(c).ok_or(ParseCigarError::InvalidOp { op: c, offset })?;
            let n = count
                .take()
                .ok_or(ParseCigarError::MissingCount { op: c, offset })?;
            if n == 0 {
                return Err(ParseCigarError::ZeroCount { offset });
            }

            // Accept non-canonical input such as "1M1M" by merging
            match runs.last_mut() {
                Some((total, last)) if *last == op => {
                    *total = total
                        .checked_add(n)
                        .ok_or(ParseCigarError::Overflow { offset })?
                }
                _ => runs.push((n, op)),
            }
        }

        if count.is_some() {
            return Err(ParseCigarError::TrailingCount);
        }
        Ok(Self { runs })
    }
}

/// Compress a per-position operation sequence into its CIGAR string
pub fn compress(ops: &[EditOp]) -> String {
    Cigar::compress(ops).to_string()
}

/// Expand a CIGAR string into one operation per position
pub fn expand(cigar: &str) -> Result<Vec<EditOp>, ParseCigarError> {
    Ok(cigar.parse::<Cigar>()?.expand())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_compress_runs() {
        use EditOp::*;
        let ops = [Match, Match, Match, Deletion, Deletion, Match, Insertion];
        assert_eq!(compress(&ops), "3M2D1M1I");
    }

    #[test]
    fn test_compress_empty() {
        assert_eq!(compress(&[]), "");
        assert!(Cigar::compress(&[]).is_empty());
        assert_eq!(expand("").unwrap(), Vec::<EditOp>::new());
    }

    #[test]
    fn test_consumed_lengths() {
        let cigar: Cigar = "2M1I3M2D".parse().unwrap();
        assert_eq!(cigar.pattern_len(), 6);
        assert_eq!(cigar.text_len(), 7);
        assert_eq!(cigar.len_ops(), 8);
        assert_eq!(cigar.first_op(), Some(EditOp::Match));
    }

    #[test]
    fn test_parse_merges_adjacent_runs() {
        let cigar: Cigar = "1M1M2I".parse().unwrap();
        assert_eq!(cigar.to_string(), "2M2I");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "M".parse::<Cigar>(),
            Err(ParseCigarError::MissingCount { op: 'M', offset: 0 })
        );
        assert_eq!(
            "0M".parse::<Cigar>(),
            Err(ParseCigarError::ZeroCount { offset: 1 })
        );
        assert_eq!(
            "3X".parse::<Cigar>(),
            Err(ParseCigarError::InvalidOp { op: 'X', offset: 1 })
        );
        assert_eq!("3M2".parse::<Cigar>(), Err(ParseCigarError::TrailingCount));
        assert!("99999999999M".parse::<Cigar>().is_err());
    }

    fn arb_op() -> impl Strategy<Value = EditOp> {
        prop_oneof![
            Just(EditOp::Match),
            Just(EditOp::Insertion),
            Just(EditOp::Deletion),
        ]
    }

    proptest! {
        #[test]
        fn expand_inverts_compress(ops in proptest::collection::vec(arb_op(), 1..40)) {
            prop_assert_eq!(expand(&compress(&ops)).unwrap(), ops.clone());
            prop_assert_eq!(Cigar::compress(&ops).expand(), ops);
        }

        #[test]
        fn compressed_runs_never_repeat(ops in proptest::collection::vec(arb_op(), 1..40)) {
            let cigar = Cigar::compress(&ops);
            for pair in cigar.runs().windows(2) {
                prop_assert_ne!(pair[0].1, pair[1].1);
            }
        }
    }
}
