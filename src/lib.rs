//! # edsearch - exact and edit-distance substring search
//!
//! Finds every occurrence of a pattern in a fixed text within a budget of
//! `k` edits (substitutions, insertions, deletions), reporting each
//! occurrence with its start offset, the matched text and a CIGAR string.
//!
//! Four engines answer the same query and are expected to agree exactly:
//!
//! - **Naive**: enumerate the edit neighbourhood, scan the text per neighbour
//! - **Aho-Corasick**: load the neighbourhood into one automaton
//! - **Suffix tree**: edit search fused with tree descent
//! - **BWT**: edit search fused with FM-index backward search
//!
//! ## Architecture
//!
//! - [`index`] - Suffix array, suffix tree and FM-index construction and search
//! - [`query`] - Neighbourhood generator, Aho-Corasick and the multi-engine executor
//! - [`utils`] - Alphabet remapping, CIGAR codec, persisted table encoding
//! - [`config`] - JSON-loadable engine configuration
//! - [`error`] - Error type shared by every engine
//!
//! ## Quick Start
//!
//! ```
//! use edsearch::{Engine, QueryExecutor, SearchIndex};
//!
//! let index = SearchIndex::new(b"acactgacaca").unwrap();
//! let executor = QueryExecutor::new(&index);
//!
//! let exact = executor.search(Engine::Bwt, b"aca", 0).unwrap();
//! let positions: Vec<usize> = exact.iter().map(|m| m.position).collect();
//! assert_eq!(positions, vec![0, 6, 8]);
//!
//! let report = executor.cross_validate(b"acg", 1).unwrap();
//! assert!(report.agrees());
//! for m in report.matches() {
//!     println!("{} {} {}", m.position, String::from_utf8_lossy(&m.matched), m.cigar);
//! }
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod utils;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use index::{Hit, SearchIndex};
pub use query::{ApproxMatch, CrossValidation, Engine, QueryExecutor};
pub use utils::{Cigar, EditOp};
