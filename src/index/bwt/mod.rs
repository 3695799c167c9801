//! BWT / FM-index over a remapped text
//!
//! The rank tables are the only state this module owns:
//! - `C[a]`: number of symbols in text + sentinel that sort before code `a`
//! - `O[a][i]`: occurrences of `a` among the first `i` BWT symbols
//!
//! Searching borrows the suffix array and remap table the tables were built
//! from ([`BwtIndex`]), extending a suffix-array range one symbol to the left
//! per step.
//!
//! - `search`: exact backward search
//! - `approx`: edit-distance backward search
//! - `writer` / `reader`: versioned on-disk image of the tables

pub mod approx;
pub mod reader;
pub mod search;
pub mod writer;

pub use approx::{BwtApproxMatch, BwtApproxMatches, BwtHits};
pub use reader::RankTablesReader;
pub use writer::RankTablesWriter;

use crate::error::{Result, SearchError};
use crate::index::suffix_array::{SaRange, SuffixArray};
use crate::utils::RemapTable;
use log::debug;

/// Magic number for rank-table images ("EDBW" in little-endian)
pub const BWT_MAGIC: u32 = 0x5742_4445;

/// Current image version
pub const BWT_VERSION: u32 = 1;

/// Flag bit: `C` counts the sentinel as the smallest symbol
pub const FLAG_SENTINEL_COUNTED: u32 = 1;

/// Header: magic, version, flags, alphabet_size (u32 each), rows (u64)
pub const BWT_HEADER_SIZE: usize = 24;

/// Dense `C` and `O` tables.
///
/// `O` is stored symbol-major: the `rows` prefix counts of code `a` occupy
/// `o[a * rows..(a + 1) * rows]`, with `rows == suffix count + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTables {
    pub(crate) alphabet_size: usize,
    pub(crate) rows: usize,
    pub(crate) c: Vec<usize>,
    pub(crate) o: Vec<usize>,
}

impl RankTables {
    /// Compute the tables for a suffix array built over `remap`-coded text
    pub fn build(sa: &SuffixArray, remap: &RemapTable) -> Result<Self> {
        let sigma = remap.alphabet_size();
        if let Some(offset) = sa.text().iter().position(|&code| code as usize >= sigma) {
            return Err(SearchError::CorruptRankTables(format!(
                "symbol {} at offset {} is outside the alphabet of size {}",
                sa.text()[offset],
                offset,
                sigma
            )));
        }

        let len = sa.len();
        let rows = len + 1;

        let mut counts = vec![0usize; sigma];
        for &code in sa.text() {
            counts[code as usize] += 1;
        }
        let mut c = vec![0usize; sigma];
        for a in 1..sigma {
            c[a] = c[a - 1] + counts[a - 1];
        }

        let mut o = vec![0usize; sigma * rows];
        for i in 0..len {
            let symbol = sa.bwt_symbol(i) as usize;
            for a in 0..sigma {
                o[a * rows + i + 1] = o[a * rows + i];
            }
            o[symbol * rows + i + 1] += 1;
        }

        debug!(
            "built rank tables: alphabet {}, {} rows, {} bytes",
            sigma,
            rows,
            (c.len() + o.len()) * std::mem::size_of::<usize>()
        );

        Ok(Self {
            alphabet_size: sigma,
            rows,
            c,
            o,
        })
    }

    /// Number of codes, sentinel included
    #[inline]
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Prefix-count rows per symbol (suffix count + 1)
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn c(&self, symbol: u8) -> usize {
        self.c[symbol as usize]
    }

    /// Occurrences of `symbol` in `bwt[..i]`
    #[inline]
    pub fn occ(&self, symbol: u8, i: usize) -> usize {
        self.o[symbol as usize * self.rows + i]
    }

    /// Narrow `range` to the suffixes preceded by `symbol`
    #[inline]
    pub fn extend(&self, symbol: u8, range: SaRange) -> SaRange {
        let base = self.c(symbol);
        SaRange::new(base + self.occ(symbol, range.lo), base + self.occ(symbol, range.hi))
    }

    /// Bytes held by both tables
    pub fn byte_size(&self) -> usize {
        (self.c.len() + self.o.len()) * std::mem::size_of::<usize>()
    }

    /// Structural checks that hold for any tables produced by [`RankTables::build`]
    pub(crate) fn validate(&self) -> Result<()> {
        let corrupt = |msg: String| Err(SearchError::CorruptRankTables(msg));

        if self.alphabet_size == 0 || self.rows == 0 {
            return corrupt("empty tables".to_string());
        }
        if self.c.len() != self.alphabet_size || self.o.len() != self.alphabet_size * self.rows {
            return corrupt("table sizes do not match the header".to_string());
        }
        if self.c[0] != 0 || self.c.windows(2).any(|w| w[0] > w[1]) {
            return corrupt("C is not a non-decreasing count from zero".to_string());
        }

        let len = self.rows - 1;
        let mut total = 0;
        for a in 0..self.alphabet_size {
            let row = &self.o[a * self.rows..(a + 1) * self.rows];
            if row[0] != 0 || row.windows(2).any(|w| w[1] < w[0] || w[1] - w[0] > 1) {
                return corrupt(format!("O row for symbol {} is not a prefix count", a));
            }
            total += row[len];
        }
        if total != len {
            return corrupt(format!("O rows count {} symbols, expected {}", total, len));
        }

        // C[a + 1] - C[a] is the number of a's, the last entry of O's row for a
        for a in 0..self.alphabet_size {
            let next = self.c.get(a + 1).copied().unwrap_or(len);
            if next.checked_sub(self.c[a]) != Some(self.o[a * self.rows + len]) {
                return corrupt(format!("C disagrees with the O row total for symbol {}", a));
            }
        }
        Ok(())
    }
}

/// Read-only FM-index view: rank tables plus the suffix array and remap
/// table they were built from.
#[derive(Debug, Clone, Copy)]
pub struct BwtIndex<'a> {
    sa: &'a SuffixArray,
    remap: &'a RemapTable,
    tables: &'a RankTables,
}

impl<'a> BwtIndex<'a> {
    /// Pair tables with their suffix array and remap table, checking that the
    /// dimensions agree.
    pub fn new(sa: &'a SuffixArray, remap: &'a RemapTable, tables: &'a RankTables) -> Result<Self> {
        if tables.alphabet_size != remap.alphabet_size() {
            return Err(SearchError::CorruptRankTables(format!(
                "alphabet size {} does not match remap table ({})",
                tables.alphabet_size,
                remap.alphabet_size()
            )));
        }
        if tables.rows != sa.len() + 1 {
            return Err(SearchError::CorruptRankTables(format!(
                "{} rows for a suffix array of {} entries",
                tables.rows,
                sa.len()
            )));
        }
        Ok(Self { sa, remap, tables })
    }

    pub fn suffix_array(&self) -> &'a SuffixArray {
        self.sa
    }

    pub fn remap(&self) -> &'a RemapTable {
        self.remap
    }

    pub fn tables(&self) -> &'a RankTables {
        self.tables
    }

    /// Range covering every suffix, the starting point of each search
    #[inline]
    pub fn full_range(&self) -> SaRange {
        SaRange::new(0, self.sa.len())
    }

    /// Text offsets of the suffixes in `range`
    pub fn positions(&self, range: SaRange) -> &'a [usize] {
        self.sa.positions(range)
    }

    /// Remap a pattern, reporting the first byte without a code
    pub(crate) fn encode(&self, pattern: &[u8]) -> Result<Vec<u8>> {
        crate::error::validate_pattern(pattern, crate::utils::SENTINEL)?;
        self.remap
            .remap_checked(pattern)
            .map_err(|offset| SearchError::AlphabetMiss {
                byte: pattern[offset],
                offset,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mississippi() -> (SuffixArray, RemapTable) {
        let text = b"mississippi";
        let remap = RemapTable::build(text);
        let codes = remap.remap(text).unwrap();
        (SuffixArray::build(&codes).unwrap(), remap)
    }

    #[test]
    fn test_mississippi_c_table() {
        let (sa, remap) = mississippi();
        let tables = RankTables::build(&sa, &remap).unwrap();
        // $ m i s p  ->  codes 0 1 2 3 4
        assert_eq!(tables.c, vec![0, 1, 2, 6, 10]);
        assert_eq!(tables.rows(), 13);
    }

    #[test]
    fn test_mississippi_rank_invariants() {
        let (sa, remap) = mississippi();
        let tables = RankTables::build(&sa, &remap).unwrap();
        let n = sa.text_len();
        let sigma = tables.alphabet_size();

        for a in 0..sigma as u8 {
            assert_eq!(tables.occ(a, 0), 0);
            for i in 0..=n {
                let step = tables.occ(a, i + 1) - tables.occ(a, i);
                assert!(step <= 1);
                assert_eq!(step == 1, sa.bwt_symbol(i) == a);
            }
        }

        let last = (sigma - 1) as u8;
        assert!(tables.c.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(tables.c(last) + tables.occ(last, n + 1), n + 1);
        assert!(tables.validate().is_ok());
    }

    #[test]
    fn test_index_rejects_mismatched_inputs() {
        let (sa, remap) = mississippi();
        let tables = RankTables::build(&sa, &remap).unwrap();

        let other_remap = RemapTable::build(b"ab");
        assert!(matches!(
            BwtIndex::new(&sa, &other_remap, &tables),
            Err(SearchError::CorruptRankTables(_))
        ));

        let shorter = SuffixArray::build(&remap.remap(b"miss").unwrap()).unwrap();
        assert!(matches!(
            BwtIndex::new(&shorter, &remap, &tables),
            Err(SearchError::CorruptRankTables(_))
        ));
    }

    #[test]
    fn test_build_rejects_raw_text() {
        // suffix array over raw bytes instead of codes
        let sa = SuffixArray::build(b"mississippi").unwrap();
        let remap = RemapTable::build(b"mississippi");
        assert!(RankTables::build(&sa, &remap).is_err());
    }

    #[test]
    fn test_equivalence() {
        let (sa, remap) = mississippi();
        let a = RankTables::build(&sa, &remap).unwrap();
        let b = RankTables::build(&sa, &remap).unwrap();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.o[3] += 1;
        assert_ne!(a, c);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_shifted_c() {
        let (sa, remap) = mississippi();
        let tables = RankTables::build(&sa, &remap).unwrap();
        assert!(tables.validate().is_ok());

        // still non-decreasing and C[last] + count(last) still covers the text
        let mut shifted = tables.clone();
        shifted.c[2] += 1;
        assert!(matches!(
            shifted.validate(),
            Err(SearchError::CorruptRankTables(_))
        ));
    }
}
