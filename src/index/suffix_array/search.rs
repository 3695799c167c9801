//! Binary-search exact matching over a suffix array
//!
//! O(m log n) per pattern: two binary searches delimit the block of suffixes
//! that start with the pattern.

use super::types::*;
use std::cmp::Ordering;

impl SuffixArray {
    /// Search for a pattern in the suffix array.
    ///
    /// Returns the range `[lo, hi)` of suffix array positions whose suffixes
    /// start with `pattern`; the range is empty when there is no occurrence
    /// or the pattern is empty.
    pub fn search(&self, pattern: &[u8]) -> SaRange {
        if pattern.is_empty() {
            return SaRange::EMPTY;
        }

        let lo = self.lower_bound(pattern);
        let hi = self.upper_bound(pattern, lo);
        SaRange::new(lo, hi)
    }

    /// First index whose suffix is not smaller than the pattern
    fn lower_bound(&self, pattern: &[u8]) -> SaIndex {
        let mut lo = 0;
        let mut hi = self.array.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let suffix = self.suffix(self.array[mid]);

            // Compare only up to pattern length
            let cmp_len = pattern.len().min(suffix.len());
            if suffix[..cmp_len].cmp(pattern) == Ordering::Less {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// First index at or after `start` whose suffix does not start with the pattern
    fn upper_bound(&self, pattern: &[u8], start: SaIndex) -> SaIndex {
        let mut lo = start;
        let mut hi = self.array.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.suffix(self.array[mid]).starts_with(pattern) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Text offsets of every occurrence of `pattern`, in suffix order
    pub fn find_all(&self, pattern: &[u8]) -> Vec<TextPosition> {
        self.positions(self.search(pattern)).to_vec()
    }

    /// Number of occurrences of `pattern`
    pub fn count_matches(&self, pattern: &[u8]) -> usize {
        self.search(pattern).len()
    }

    /// Check if pattern exists in the text
    pub fn contains(&self, pattern: &[u8]) -> bool {
        !self.search(pattern).is_empty()
    }
}
