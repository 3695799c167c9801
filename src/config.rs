//! Engine configuration
//!
//! Loaded from JSON or built in code. Every field has a default so a partial
//! file (or `{}`) is a valid configuration.

use crate::query::types::Engine;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration shared by index construction and the query executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest edit budget a search may request (default: 3)
    pub max_edits: u32,
    /// Alphabet for the neighbourhood generator.
    /// `None` uses the symbols of the indexed text in remap order.
    pub alphabet: Option<String>,
    /// Suffix count above which suffix sorting runs in parallel (default: 100k)
    pub parallel_sort_threshold: usize,
    /// Annotate suffix links after building the suffix tree (default: true)
    pub suffix_links: bool,
    /// Engines run by the executor's cross-validation (default: all four)
    pub engines: Vec<Engine>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_edits: 3,
            alphabet: None,
            parallel_sort_threshold: 100_000,
            suffix_links: true,
            engines: Engine::ALL.to_vec(),
        }
    }
}

impl SearchConfig {
    /// Read a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_slice(&data)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Write this configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"max_edits": 1}"#).unwrap();
        assert_eq!(config.max_edits, 1);
        assert_eq!(config.parallel_sort_threshold, 100_000);
        assert_eq!(config.engines, Engine::ALL.to_vec());
        assert!(config.alphabet.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = SearchConfig {
            alphabet: Some("acgt".to_string()),
            engines: vec![Engine::SuffixTree, Engine::Bwt],
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(SearchConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(SearchConfig::load(&dir.path().join("nope.json")).is_err());
    }
}
