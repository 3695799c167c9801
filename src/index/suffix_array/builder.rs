//! Suffix array construction
//!
//! Builds a suffix array from a text by:
//! 1. Appending the sentinel (which sorts before every other symbol)
//! 2. Sorting all suffix offsets by comparing the suffixes they point to
//!
//! Externally sorted arrays (and LCP arrays) can be adopted with
//! [`SuffixArray::from_sorted`], which validates them instead of re-sorting.

use super::types::*;
use crate::error::{Result, SearchError};
use crate::utils::SENTINEL;
use log::debug;
use rayon::prelude::*;

/// Suffix count above which sorting runs on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100_000;

impl SuffixArray {
    /// Build a suffix array over `text` with the default parallel threshold
    pub fn build(text: &[u8]) -> Result<Self> {
        Self::build_with_threshold(text, DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Build a suffix array, sorting in parallel when the text has more than
    /// `parallel_threshold` suffixes
    pub fn build_with_threshold(text: &[u8], parallel_threshold: usize) -> Result<Self> {
        let text = terminated(text)?;
        let array = sort_suffixes(&text, parallel_threshold);
        let inverse = invert(&array);

        debug!(
            "built suffix array over {} symbols (parallel: {})",
            text.len() - 1,
            text.len() > parallel_threshold
        );

        Ok(Self {
            text,
            array,
            inverse,
            lcp: None,
        })
    }

    /// Adopt an already sorted suffix array (and optional LCP array) for `text`.
    ///
    /// `array` must be a permutation of `0..=text.len()` listing the suffixes
    /// of `text` + sentinel in ascending order.
    pub fn from_sorted(text: &[u8], array: Vec<TextPosition>, lcp: Option<Vec<usize>>) -> Result<Self> {
        let text = terminated(text)?;
        let n = text.len();

        if array.len() != n {
            return Err(SearchError::InvalidSuffixArray(format!(
                "expected {} entries, got {}",
                n,
                array.len()
            )));
        }

        let mut seen = vec![false; n];
        for &pos in &array {
            if pos >= n || std::mem::replace(&mut seen[pos], true) {
                return Err(SearchError::InvalidSuffixArray(format!(
                    "entry {} is out of range or repeated",
                    pos
                )));
            }
        }

        if let Some(i) = (1..n).find(|&i| text[array[i - 1]..] >= text[array[i]..]) {
            return Err(SearchError::InvalidSuffixArray(format!(
                "suffixes at positions {} and {} are out of order",
                i - 1,
                i
            )));
        }

        if let Some(lcp) = &lcp {
            if lcp.len() != n {
                return Err(SearchError::InvalidSuffixArray(format!(
                    "LCP array has {} entries, expected {}",
                    lcp.len(),
                    n
                )));
            }
        }

        let inverse = invert(&array);
        Ok(Self {
            text,
            array,
            inverse,
            lcp,
        })
    }

    /// Compute the LCP array (Kasai et al.) if it is not already present
    pub fn with_lcp(mut self) -> Self {
        if self.lcp.is_none() {
            self.lcp = Some(kasai_lcp(&self.text, &self.array, &self.inverse));
        }
        self
    }
}

/// Copy `text` and append the sentinel, rejecting texts that already contain it
pub(crate) fn terminated(text: &[u8]) -> Result<Vec<u8>> {
    if let Some(offset) = memchr::memchr(SENTINEL, text) {
        return Err(SearchError::SentinelInText { offset });
    }
    let mut out = Vec::with_capacity(text.len() + 1);
    out.extend_from_slice(text);
    out.push(SENTINEL);
    Ok(out)
}

/// Sort suffix offsets by comparing the suffixes they point to.
///
/// The sentinel is unique, so no two suffixes compare equal and the unstable
/// sort is deterministic.
fn sort_suffixes(text: &[u8], parallel_threshold: usize) -> Vec<TextPosition> {
    let mut sa: Vec<TextPosition> = (0..text.len()).collect();

    if text.len() > parallel_threshold {
        sa.par_sort_unstable_by(|&a, &b| text[a..].cmp(&text[b..]));
    } else {
        sa.sort_unstable_by(|&a, &b| text[a..].cmp(&text[b..]));
    }

    sa
}

pub(crate) fn invert(array: &[TextPosition]) -> Vec<SaIndex> {
    let mut inverse = vec![0; array.len()];
    for (i, &pos) in array.iter().enumerate() {
        inverse[pos] = i;
    }
    inverse
}

/// Linear-time LCP construction from the suffix array and its inverse
pub(crate) fn kasai_lcp(text: &[u8], array: &[TextPosition], inverse: &[SaIndex]) -> Vec<usize> {
    let n = array.len();
    let mut lcp = vec![0; n];
    let mut h = 0usize;

    for pos in 0..n {
        let rank = inverse[pos];
        if rank == 0 {
            h = 0;
            continue;
        }
        let prev = array[rank - 1];
        while pos + h < n && prev + h < n && text[pos + h] == text[prev + h] {
            h += 1;
        }
        lcp[rank] = h;
        h = h.saturating_sub(1);
    }

    lcp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_array_correctness() {
        let sa = SuffixArray::build(b"banana").unwrap();

        // 6: \0
        // 5: a\0
        // 3: ana\0
        // 1: anana\0
        // 0: banana\0
        // 4: na\0
        // 2: nana\0
        assert_eq!(sa.array(), &[6, 5, 3, 1, 0, 4, 2]);
        assert_eq!(sa.text_len(), 6);
        assert_eq!(sa.len(), 7);
    }

    #[test]
    fn test_inverse() {
        let sa = SuffixArray::build(b"mississippi").unwrap();
        for (i, &pos) in sa.array().iter().enumerate() {
            assert_eq!(sa.inverse()[pos], i);
        }
    }

    #[test]
    fn test_lcp() {
        let sa = SuffixArray::build(b"banana").unwrap().with_lcp();
        assert_eq!(sa.lcp().unwrap(), &[0, 0, 1, 3, 0, 0, 2]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text: Vec<u8> = (0..500).map(|i| b"acgt"[(i * i + 3 * i) % 4]).collect();
        let seq = SuffixArray::build_with_threshold(&text, usize::MAX).unwrap();
        let par = SuffixArray::build_with_threshold(&text, 0).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_rejects_sentinel_in_text() {
        assert_eq!(
            SuffixArray::build(b"ab\0c"),
            Err(SearchError::SentinelInText { offset: 2 })
        );
    }

    #[test]
    fn test_empty_text() {
        let sa = SuffixArray::build(b"").unwrap();
        assert_eq!(sa.array(), &[0]);
        assert_eq!(sa.text_len(), 0);
    }

    #[test]
    fn test_from_sorted() {
        let built = SuffixArray::build(b"banana").unwrap().with_lcp();
        let adopted = SuffixArray::from_sorted(
            b"banana",
            built.array().to_vec(),
            built.lcp().map(<[usize]>::to_vec),
        )
        .unwrap();
        assert_eq!(adopted, built);
    }

    #[test]
    fn test_from_sorted_rejects_bad_input() {
        assert!(matches!(
            SuffixArray::from_sorted(b"banana", vec![0, 1, 2], None),
            Err(SearchError::InvalidSuffixArray(_))
        ));
        assert!(matches!(
            SuffixArray::from_sorted(b"banana", vec![6, 5, 3, 1, 0, 4, 4], None),
            Err(SearchError::InvalidSuffixArray(_))
        ));
        assert!(matches!(
            SuffixArray::from_sorted(b"banana", vec![6, 5, 1, 3, 0, 4, 2], None),
            Err(SearchError::InvalidSuffixArray(_))
        ));
    }
}
