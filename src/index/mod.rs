pub mod build;
pub mod bwt;
pub mod stats;
pub mod suffix_array;
pub mod suffix_tree;
pub mod types;

pub use build::SearchIndex;
pub use bwt::{BwtIndex, RankTables, RankTablesReader, RankTablesWriter};
pub use suffix_array::{SaRange, SuffixArray};
pub use suffix_tree::{Locus, SuffixTree};
pub use types::*;
