use crate::utils::Cigar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// Neighbourhood enumeration plus a plain substring scan per neighbour
    Naive,
    /// Neighbourhood loaded into an Aho-Corasick automaton, one text pass
    AhoCorasick,
    /// Edit search fused with suffix tree descent
    SuffixTree,
    /// Edit search fused with FM-index backward search
    Bwt,
}

impl Engine {
    pub const ALL: [Engine; 4] = [
        Engine::Naive,
        Engine::AhoCorasick,
        Engine::SuffixTree,
        Engine::Bwt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Engine::Naive => "naive",
            Engine::AhoCorasick => "aho_corasick",
            Engine::SuffixTree => "suffix_tree",
            Engine::Bwt => "bwt",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::ALL
            .into_iter()
            .find(|engine| engine.name() == s)
            .ok_or_else(|| format!("unknown engine: {}", s))
    }
}

/// One approximate occurrence of a pattern in the indexed text
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApproxMatch {
    /// Start offset in the text
    pub position: usize,
    /// Text symbols covered by the alignment
    pub matched: Vec<u8>,
    pub cigar: Cigar,
}

impl ApproxMatch {
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn end(&self) -> usize {
        self.position + self.matched.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_names_round_trip() {
        for engine in Engine::ALL {
            assert_eq!(engine.name().parse::<Engine>(), Ok(engine));
            let json = serde_json::to_string(&engine).unwrap();
            assert_eq!(json, format!("\"{}\"", engine.name()));
        }
        assert!("fm_index".parse::<Engine>().is_err());
    }
}
