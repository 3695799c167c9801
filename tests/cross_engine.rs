//! Integration tests running all four engines side by side.
//!
//! Every engine must report the same (position, matched text, CIGAR)
//! multiset for the same query; the BWT engine may only bow out when the
//! pattern holds a byte the text never contains.

use edsearch::index::{RankTablesReader, RankTablesWriter};
use edsearch::{ApproxMatch, EditOp, Engine, QueryExecutor, SearchConfig, SearchError, SearchIndex};
use proptest::prelude::*;
use tempfile::TempDir;

const TEXTS: [&str; 5] = ["gacacacag", "acacacag", "acacaca", "acactgaca", "acataca"];
const PATTERNS: [&str; 5] = ["acg", "ac", "a", "g", "c"];

fn dna_index(text: &str) -> SearchIndex {
    let config = SearchConfig {
        alphabet: Some("acgt".into()),
        ..SearchConfig::default()
    };
    SearchIndex::build(text.as_bytes(), config).expect("Failed to build index")
}

/// Edit cost of aligning `pattern` to `m.matched` along `m.cigar`,
/// or `None` when the script does not fit both strings.
fn alignment_cost(pattern: &[u8], m: &ApproxMatch) -> Option<u32> {
    let (mut p, mut t, mut cost) = (0, 0, 0);
    for op in m.cigar.expand() {
        match op {
            EditOp::Match => {
                if pattern.get(p)? != m.matched.get(t)? {
                    cost += 1;
                }
                p += 1;
                t += 1;
            }
            EditOp::Insertion => {
                pattern.get(p)?;
                cost += 1;
                p += 1;
            }
            EditOp::Deletion => {
                m.matched.get(t)?;
                cost += 1;
                t += 1;
            }
        }
    }
    (p == pattern.len() && t == m.matched.len()).then_some(cost)
}

fn assert_valid(text: &[u8], pattern: &[u8], k: u32, matches: &[ApproxMatch]) {
    for m in matches {
        assert!(!m.is_empty(), "zero-length match {:?}", m);
        assert_eq!(&text[m.position..m.end()], m.matched.as_slice());
        assert_ne!(m.cigar.first_op(), Some(EditOp::Deletion), "{:?}", m);
        assert_ne!(m.cigar.expand().last(), Some(&EditOp::Deletion), "{:?}", m);
        let cost = alignment_cost(pattern, m).expect("CIGAR does not fit the match");
        assert!(cost <= k, "cost {} over budget {} for {:?}", cost, k, m);
    }
}

#[test]
fn test_engine_matrix() {
    for text in TEXTS {
        let index = dna_index(text);
        let executor = QueryExecutor::new(&index);

        for pattern in PATTERNS {
            for k in 0..=3u32 {
                let report = executor.cross_validate(pattern.as_bytes(), k).unwrap();
                assert!(
                    report.agrees(),
                    "{} / {} / k = {}: {:?} disagree",
                    text,
                    pattern,
                    k,
                    report.disagreements()
                );
                assert!(report.skipped.iter().all(|(engine, _)| *engine == Engine::Bwt));
                assert_eq!(report.results.len() + report.skipped.len(), 4);
                assert_valid(text.as_bytes(), pattern.as_bytes(), k, report.matches());
            }
        }
    }
}

#[test]
fn test_exact_matches_everywhere() {
    let index = dna_index("gacacacag");
    let executor = QueryExecutor::new(&index);

    for engine in Engine::ALL {
        let matches = executor.search(engine, b"aca", 0).unwrap();
        let positions: Vec<usize> = matches.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![1, 3, 5], "engine {}", engine);
    }
}

#[test]
fn test_no_leading_deletion() {
    let index = dna_index("cac");
    let executor = QueryExecutor::new(&index);

    let report = executor.cross_validate(b"ac", 1).unwrap();
    assert!(report.agrees());

    let found: Vec<(usize, String, String)> = report
        .matches()
        .iter()
        .map(|m| {
            (
                m.position,
                String::from_utf8_lossy(&m.matched).into_owned(),
                m.cigar.to_string(),
            )
        })
        .collect();
    let expected: Vec<(usize, String, String)> = [
        (0, "c", "1I1M"),
        (1, "a", "1M1I"),
        (1, "ac", "2M"),
        (2, "c", "1I1M"),
    ]
    .into_iter()
    .map(|(p, s, c)| (p, s.to_string(), c.to_string()))
    .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_repeated_queries_are_stable() {
    let index = dna_index("acactgaca");
    let executor = QueryExecutor::new(&index);

    for engine in Engine::ALL {
        let first = executor.search(engine, b"acg", 2).unwrap();
        let second = executor.search(engine, b"acg", 2).unwrap();
        assert_eq!(first, second, "engine {}", engine);
    }
}

#[test]
fn test_alphabet_miss() {
    let index = dna_index("acacaca");
    let executor = QueryExecutor::new(&index);

    assert_eq!(
        executor.search(Engine::Bwt, b"acg", 1),
        Err(SearchError::AlphabetMiss { byte: b'g', offset: 2 })
    );

    let report = executor.cross_validate(b"acg", 1).unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert!(report.agrees());
    // "ac" with the g dropped, "aca" with the g substituted
    assert!(report.matches().iter().any(|m| m.cigar.to_string() == "2M1I"));
    assert!(report.matches().iter().any(|m| m.cigar.to_string() == "3M"));
}

#[test]
fn test_persisted_rank_tables() {
    let index = dna_index("gacacacag");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tables.bwt");

    RankTablesWriter::write(&path, index.rank_tables()).unwrap();
    let tables = RankTablesReader::open(&path, index.suffix_array(), index.remap()).unwrap();
    assert_eq!(&tables, index.rank_tables());

    let expected = QueryExecutor::new(&index).search(Engine::Bwt, b"acg", 1).unwrap();
    let reloaded = index.clone().with_rank_tables(tables).unwrap();
    let found = QueryExecutor::new(&reloaded).search(Engine::Bwt, b"acg", 1).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "max_edits": 1, "engines": ["suffix_tree", "bwt"] }"#).unwrap();

    let config = SearchConfig::load(&path).unwrap();
    let index = SearchIndex::build(b"acacacag", config).unwrap();
    let executor = QueryExecutor::new(&index);

    let report = executor.cross_validate(b"ag", 1).unwrap();
    let engines: Vec<Engine> = report.results.iter().map(|(e, _)| *e).collect();
    assert_eq!(engines, vec![Engine::SuffixTree, Engine::Bwt]);
    assert!(report.agrees());

    assert!(matches!(
        executor.cross_validate(b"ag", 2),
        Err(SearchError::EditBudgetTooLarge { requested: 2, max: 1 })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engines_agree_on_random_dna(
        text in "[acgt]{1,40}",
        pattern in "[acgt]{1,5}",
        k in 0u32..=3,
    ) {
        let index = dna_index(&text);
        let executor = QueryExecutor::new(&index);
        let report = executor.cross_validate(pattern.as_bytes(), k).unwrap();

        prop_assert!(report.agrees(), "disagreement: {:?}", report.disagreements());
        assert_valid(text.as_bytes(), pattern.as_bytes(), k, report.matches());
    }
}
