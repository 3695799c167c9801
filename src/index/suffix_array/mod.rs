//! Suffix array indexing module
//!
//! A suffix array over a sentinel-terminated text, its inverse, and an
//! optional LCP array. It is the input the BWT rank tables are computed from
//! and can seed suffix tree construction.
//!
//! - `builder`: Sorting (sequential or rayon) and adoption of external arrays
//! - `search`: O(m log n) binary-search exact matching
//! - `types`: Core type definitions

pub mod builder;
pub mod search;
pub mod types;

pub use builder::DEFAULT_PARALLEL_THRESHOLD;
pub use types::{SaIndex, SaRange, SuffixArray, TextPosition};
