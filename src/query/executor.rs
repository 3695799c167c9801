//! Multi-engine query execution
//!
//! Runs one approximate search through any of the four engines and
//! normalizes the results to sorted [`ApproxMatch`] lists, so the engines can
//! be compared one to one:
//!
//! - `Naive`: neighbourhood enumeration, one substring scan per neighbour
//! - `AhoCorasick`: neighbourhood loaded into one automaton, one text pass
//! - `SuffixTree`: edit search fused with suffix tree descent
//! - `Bwt`: edit search fused with FM-index backward search
//!
//! The neighbourhood engines drop neighbours whose script starts with `D`
//! (text consumed before any pattern symbol) and the empty neighbour, which
//! brings them in line with the fused descents.

use crate::error::{Result, SearchError};
use crate::index::build::SearchIndex;
use crate::index::types::Hit;
use crate::query::aho_corasick::Trie;
use crate::query::neighbourhood::{Neighbour, Neighbourhood};
use crate::query::types::{ApproxMatch, Engine};
use crate::utils::{Cigar, EditOp};
use log::{debug, trace, warn};
use memchr::memmem;

/// Query executor over a built index
pub struct QueryExecutor<'a> {
    index: &'a SearchIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        Self { index }
    }

    /// Every occurrence of `pattern` within `max_edits` edits found by
    /// `engine`, sorted by position, matched text and CIGAR.
    pub fn search(&self, engine: Engine, pattern: &[u8], max_edits: u32) -> Result<Vec<ApproxMatch>> {
        let limit = self.index.config().max_edits;
        if max_edits > limit {
            return Err(SearchError::EditBudgetTooLarge {
                requested: max_edits,
                max: limit,
            });
        }

        let hits = match engine {
            Engine::Naive => self.naive(pattern, max_edits)?,
            Engine::AhoCorasick => self.aho_corasick(pattern, max_edits)?,
            Engine::SuffixTree => self
                .index
                .suffix_tree()
                .approx_hits(pattern, max_edits)?
                .collect(),
            Engine::Bwt => self.index.bwt()?.approx_hits(pattern, max_edits)?.collect(),
        };
        trace!("{}: {} hits for {:?} (k = {})", engine, hits.len(), pattern, max_edits);

        let text = self.index.text();
        let mut matches: Vec<ApproxMatch> = hits
            .into_iter()
            .map(|hit| ApproxMatch {
                matched: text[hit.span()].to_vec(),
                position: hit.position,
                cigar: hit.cigar,
            })
            .collect();
        matches.sort_unstable();
        Ok(matches)
    }

    /// Run every configured engine and compare their results.
    ///
    /// Engines that cannot search the pattern because of an alphabet miss
    /// are skipped and listed in the report; any other error aborts.
    pub fn cross_validate(&self, pattern: &[u8], max_edits: u32) -> Result<CrossValidation> {
        let mut report = CrossValidation::default();

        for &engine in &self.index.config().engines {
            match self.search(engine, pattern, max_edits) {
                Ok(matches) => report.results.push((engine, matches)),
                Err(err @ SearchError::AlphabetMiss { .. }) => {
                    debug!("{} skipped: {}", engine, err);
                    report.skipped.push((engine, err));
                }
                Err(err) => return Err(err),
            }
        }

        if !report.agrees() {
            warn!(
                "engines disagree on {:?} (k = {}): {:?}",
                String::from_utf8_lossy(pattern),
                max_edits,
                report.disagreements()
            );
        }
        Ok(report)
    }

    /// Neighbours the exact-matching engines search for
    fn neighbours(&self, pattern: &[u8], max_edits: u32) -> Result<impl Iterator<Item = Neighbour>> {
        let alphabet = self.index.alphabet();
        let neighbourhood = Neighbourhood::new(pattern, &alphabet, max_edits)?;
        Ok(neighbourhood.filter(|n| {
            !n.string.is_empty() && n.cigar.first_op() != Some(EditOp::Deletion)
        }))
    }

    fn naive(&self, pattern: &[u8], max_edits: u32) -> Result<Vec<Hit>> {
        let text = self.index.text();
        let mut hits = Vec::new();
        for neighbour in self.neighbours(pattern, max_edits)? {
            // restart one past each hit so overlapping occurrences are kept
            let finder = memmem::Finder::new(&neighbour.string);
            let mut at = 0;
            while let Some(offset) = finder.find(&text[at..]) {
                hits.push(Hit {
                    position: at + offset,
                    length: neighbour.string.len(),
                    cigar: neighbour.cigar.clone(),
                });
                at += offset + 1;
            }
        }
        Ok(hits)
    }

    fn aho_corasick(&self, pattern: &[u8], max_edits: u32) -> Result<Vec<Hit>> {
        let mut trie: Trie<Cigar> = Trie::new();
        for neighbour in self.neighbours(pattern, max_edits)? {
            trie.insert(&neighbour.string, neighbour.cigar);
        }
        let automaton = trie.compute_failure_links();
        trace!("automaton over {} neighbours", automaton.pattern_count());

        Ok(automaton
            .search(self.index.text())
            .map(|m| Hit {
                position: m.position,
                length: m.length,
                cigar: m.label.clone(),
            })
            .collect())
    }
}

/// Per-engine results of [`QueryExecutor::cross_validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossValidation {
    pub results: Vec<(Engine, Vec<ApproxMatch>)>,
    /// Engines that could not run, with the reason
    pub skipped: Vec<(Engine, SearchError)>,
}

impl CrossValidation {
    /// Whether every engine that ran produced the same matches
    pub fn agrees(&self) -> bool {
        self.disagreements().is_empty()
    }

    /// Engines whose results differ from the first engine's
    pub fn disagreements(&self) -> Vec<Engine> {
        let Some((_, reference)) = self.results.first() else {
            return Vec::new();
        };
        self.results
            .iter()
            .filter(|(_, matches)| matches != reference)
            .map(|&(engine, _)| engine)
            .collect()
    }

    /// Matches of the first engine that ran
    pub fn matches(&self) -> &[ApproxMatch] {
        self.results
            .first()
            .map(|(_, matches)| matches.as_slice())
            .unwrap_or(&[])
    }
}
