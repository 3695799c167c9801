//! Types for suffix array indexing

use crate::utils::SENTINEL;
use std::ops::Range;

/// Suffix array position (index into the sorted order)
pub type SaIndex = usize;

/// Offset into the indexed text
pub type TextPosition = usize;

/// Half-open range `[lo, hi)` of suffix array positions.
///
/// Every suffix in the range starts with the matched string, so reading
/// `array[lo..hi)` yields the occurrence positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaRange {
    pub lo: SaIndex,
    pub hi: SaIndex,
}

impl SaRange {
    pub const EMPTY: SaRange = SaRange { lo: 0, hi: 0 };

    #[inline]
    pub fn new(lo: SaIndex, hi: SaIndex) -> Self {
        Self { lo, hi }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo >= self.hi
    }

    /// Number of suffixes in the range
    #[inline]
    pub fn len(&self) -> usize {
        self.hi.saturating_sub(self.lo)
    }

    #[inline]
    pub fn indices(&self) -> Range<SaIndex> {
        self.lo..self.hi.max(self.lo)
    }
}

/// Suffix array over a text terminated by the sentinel.
///
/// For a text of length `n` the array holds `n + 1` suffix offsets (the last
/// suffix is the sentinel alone) in ascending lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixArray {
    /// Indexed text including the trailing sentinel
    pub(crate) text: Vec<u8>,
    /// Suffix start offsets in sorted order
    pub(crate) array: Vec<TextPosition>,
    /// `inverse[array[i]] == i`
    pub(crate) inverse: Vec<SaIndex>,
    /// `lcp[i]` = longest common prefix of suffixes `array[i - 1]` and `array[i]`; `lcp[0] == 0`
    pub(crate) lcp: Option<Vec<usize>>,
}

impl SuffixArray {
    /// Text length without the sentinel
    #[inline]
    pub fn text_len(&self) -> usize {
        self.text.len() - 1
    }

    /// Number of suffixes (text length + 1)
    #[inline]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Always false: the sentinel suffix is present even for an empty text
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Text with its trailing sentinel
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    #[inline]
    pub fn array(&self) -> &[TextPosition] {
        &self.array
    }

    #[inline]
    pub fn inverse(&self) -> &[SaIndex] {
        &self.inverse
    }

    pub fn lcp(&self) -> Option<&[usize]> {
        self.lcp.as_deref()
    }

    /// Suffix starting at text offset `pos`, sentinel included
    #[inline]
    pub fn suffix(&self, pos: TextPosition) -> &[u8] {
        &self.text[pos..]
    }

    /// Symbol preceding suffix `array[i]` in the cyclic rotation order
    #[inline]
    pub fn bwt_symbol(&self, i: SaIndex) -> u8 {
        match self.array[i] {
            0 => SENTINEL,
            pos => self.text[pos - 1],
        }
    }

    /// Text offsets for every suffix in `range`
    pub fn positions(&self, range: SaRange) -> &[TextPosition] {
        &self.array[range.indices()]
    }
}
