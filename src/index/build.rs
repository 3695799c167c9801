//! One-shot construction of every index over a text
//!
//! Phases:
//! 1. Remap the text onto a dense alphabet
//! 2. Sort suffixes of the raw text and of the remapped text (in parallel)
//! 3. Build the suffix tree from the raw suffix array, annotate suffix links
//! 4. Compute the rank tables from the remapped suffix array
//!
//! Any failure discards everything built so far; a [`SearchIndex`] is either
//! complete or not returned at all.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::index::bwt::{BwtIndex, RankTables};
use crate::index::suffix_array::SuffixArray;
use crate::index::suffix_tree::SuffixTree;
use crate::utils::{RemapTable, SENTINEL};
use log::debug;
use std::time::Instant;

/// Every read-only structure the engines search
#[derive(Debug, Clone)]
pub struct SearchIndex {
    pub(crate) config: SearchConfig,
    pub(crate) text: Vec<u8>,
    pub(crate) remap: RemapTable,
    /// Suffix array over the remapped text
    pub(crate) suffix_array: SuffixArray,
    /// Suffix tree over the raw text
    pub(crate) suffix_tree: SuffixTree,
    pub(crate) rank_tables: RankTables,
}

impl SearchIndex {
    /// Build every index over `text` with the default configuration
    pub fn new(text: &[u8]) -> Result<Self> {
        Self::build(text, SearchConfig::default())
    }

    pub fn build(text: &[u8], config: SearchConfig) -> Result<Self> {
        let start = Instant::now();

        if let Some(offset) = memchr::memchr(SENTINEL, text) {
            return Err(SearchError::SentinelInText { offset });
        }

        let remap = RemapTable::build(text);
        let codes = remap
            .remap_checked(text)
            .map_err(|offset| SearchError::AlphabetMiss {
                byte: text[offset],
                offset,
            })?;

        let threshold = config.parallel_sort_threshold;
        let (raw_sa, suffix_array) = rayon::join(
            || SuffixArray::build_with_threshold(text, threshold).map(SuffixArray::with_lcp),
            || SuffixArray::build_with_threshold(&codes, threshold),
        );
        let (raw_sa, suffix_array) = (raw_sa?, suffix_array?);

        let mut suffix_tree = SuffixTree::from_suffix_array(&raw_sa);
        drop(raw_sa);
        if config.suffix_links {
            suffix_tree.annotate_suffix_links();
        }

        let rank_tables = RankTables::build(&suffix_array, &remap)?;

        debug!(
            "built search index over {} bytes (alphabet {}) in {:?}",
            text.len(),
            remap.alphabet_size(),
            start.elapsed()
        );

        Ok(Self {
            config,
            text: text.to_vec(),
            remap,
            suffix_array,
            suffix_tree,
            rank_tables,
        })
    }

    /// Replace rank tables, e.g. with ones read back from disk
    pub fn with_rank_tables(mut self, tables: RankTables) -> Result<Self> {
        BwtIndex::new(&self.suffix_array, &self.remap, &tables)?;
        self.rank_tables = tables;
        Ok(self)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Indexed text, without the sentinel
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn remap(&self) -> &RemapTable {
        &self.remap
    }

    pub fn suffix_array(&self) -> &SuffixArray {
        &self.suffix_array
    }

    pub fn suffix_tree(&self) -> &SuffixTree {
        &self.suffix_tree
    }

    pub fn rank_tables(&self) -> &RankTables {
        &self.rank_tables
    }

    /// FM-index view over the owned suffix array, remap and rank tables
    pub fn bwt(&self) -> Result<BwtIndex<'_>> {
        BwtIndex::new(&self.suffix_array, &self.remap, &self.rank_tables)
    }

    /// Alphabet fed to the neighbourhood generator
    pub fn alphabet(&self) -> Vec<u8> {
        match &self.config.alphabet {
            Some(alphabet) => alphabet.as_bytes().to_vec(),
            None => self.remap.symbols(),
        }
    }
}
