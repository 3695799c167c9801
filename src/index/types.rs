use crate::utils::Cigar;
use serde::{Deserialize, Serialize};

/// One text occurrence found by an index engine.
///
/// `position` is the start offset in the original text, `length` the number
/// of text symbols the alignment spans (the `M` + `D` ops of `cigar`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hit {
    pub position: usize,
    pub length: usize,
    pub cigar: Cigar,
}

impl Hit {
    /// Text range covered by the hit
    pub fn span(&self) -> std::ops::Range<usize> {
        self.position..self.position + self.length
    }
}

/// Summary of an index, serializable for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Text length without the sentinel
    pub text_len: usize,
    /// Remapped alphabet size, sentinel included
    pub alphabet_size: usize,
    pub tree_nodes: usize,
    pub tree_leaves: usize,
    pub suffix_links: bool,
    /// Bytes held by the C and O tables
    pub rank_table_bytes: usize,
}
