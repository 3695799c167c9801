use crate::index::build::SearchIndex;
use crate::index::types::IndexStats;
use log::info;

impl SearchIndex {
    /// Sizes of the structures held by this index
    pub fn stats(&self) -> IndexStats {
        let tree = self.suffix_tree();
        IndexStats {
            text_len: self.text().len(),
            alphabet_size: self.remap().alphabet_size(),
            tree_nodes: tree.node_count(),
            tree_leaves: tree.leaf_count(),
            suffix_links: tree.has_suffix_links(),
            rank_table_bytes: self.rank_tables().byte_size(),
        }
    }

    /// Log the index statistics at info level
    pub fn log_stats(&self) {
        let stats = self.stats();
        info!("Text length:      {}", stats.text_len);
        info!("Alphabet size:    {}", stats.alphabet_size);
        info!(
            "Suffix tree:      {} nodes, {} leaves{}",
            stats.tree_nodes,
            stats.tree_leaves,
            if stats.suffix_links { ", suffix links" } else { "" }
        );
        info!("Rank tables:      {}", format_size(stats.rank_table_bytes as u64));
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
