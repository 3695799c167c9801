//! Exact backward search

use super::BwtIndex;
use crate::error::Result;
use crate::index::suffix_array::SaRange;

impl BwtIndex<'_> {
    /// Range of suffixes starting with `pattern`, or `None` when it does not
    /// occur.
    ///
    /// Fails with `AlphabetMiss` when a pattern byte never occurs in the text,
    /// and with `EmptyPattern` / `SentinelInPattern` for malformed patterns.
    pub fn exact_search(&self, pattern: &[u8]) -> Result<Option<SaRange>> {
        let codes = self.encode(pattern)?;
        Ok(self.backward_search(&codes, self.full_range()))
    }

    /// Extend `range` leftwards by every code of `codes`, last code first
    pub fn backward_search(&self, codes: &[u8], mut range: SaRange) -> Option<SaRange> {
        for &code in codes.iter().rev() {
            range = self.tables.extend(code, range);
            if range.is_empty() {
                return None;
            }
        }
        Some(range)
    }

    /// Start offsets of every occurrence of `pattern`
    pub fn find_all(&self, pattern: &[u8]) -> Result<Vec<usize>> {
        Ok(self
            .exact_search(pattern)?
            .map(|range| self.positions(range).to_vec())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SearchError;
    use crate::index::bwt::{BwtIndex, RankTables};
    use crate::index::suffix_array::SuffixArray;
    use crate::utils::RemapTable;

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_exact_search_mississippi() {
        let text = b"mississippi";
        let remap = RemapTable::build(text);
        let sa = SuffixArray::build(&remap.remap(text).unwrap()).unwrap();
        let tables = RankTables::build(&sa, &remap).unwrap();
        let bwt = BwtIndex::new(&sa, &remap, &tables).unwrap();

        assert_eq!(sorted(bwt.find_all(b"ssi").unwrap()), vec![2, 5]);
        assert_eq!(sorted(bwt.find_all(b"i").unwrap()), vec![1, 4, 7, 10]);
        assert_eq!(sorted(bwt.find_all(b"mississippi").unwrap()), vec![0]);
        assert_eq!(bwt.exact_search(b"spi").unwrap(), None);
        assert_eq!(bwt.exact_search(b"pm").unwrap(), None);
    }

    #[test]
    fn test_exact_search_errors() {
        let text = b"mississippi";
        let remap = RemapTable::build(text);
        let sa = SuffixArray::build(&remap.remap(text).unwrap()).unwrap();
        let tables = RankTables::build(&sa, &remap).unwrap();
        let bwt = BwtIndex::new(&sa, &remap, &tables).unwrap();

        assert_eq!(
            bwt.exact_search(b"six"),
            Err(SearchError::AlphabetMiss { byte: b'x', offset: 2 })
        );
        assert_eq!(bwt.exact_search(b""), Err(SearchError::EmptyPattern));
    }

    #[test]
    fn test_agrees_with_suffix_array() {
        let text = b"gacacacagacactgacaacataca";
        let remap = RemapTable::build(text);
        let sa = SuffixArray::build(&remap.remap(text).unwrap()).unwrap();
        let tables = RankTables::build(&sa, &remap).unwrap();
        let bwt = BwtIndex::new(&sa, &remap, &tables).unwrap();

        for pattern in [&b"acg"[..], b"ac", b"a", b"g", b"c", b"aca", b"tga", b"ttt"] {
            let expected: Vec<usize> = text
                .windows(pattern.len())
                .enumerate()
                .filter(|(_, window)| *window == pattern)
                .map(|(pos, _)| pos)
                .collect();
            assert_eq!(sorted(bwt.find_all(pattern).unwrap()), expected, "pattern {:?}", pattern);
        }
    }
}
