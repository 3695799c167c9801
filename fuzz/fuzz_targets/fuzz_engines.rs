#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    text: Vec<u8>,
    pattern: Vec<u8>,
    max_edits: u8,
}

fuzz_target!(|input: Input| {
    // Small alphabet keeps the neighbourhood tractable
    let text: Vec<u8> = input.text.iter().take(64).map(|b| b"acgt"[(b % 4) as usize]).collect();
    let pattern: Vec<u8> = input.pattern.iter().take(6).map(|b| b"acgt"[(b % 4) as usize]).collect();
    let k = (input.max_edits % 3) as u32;

    let Ok(index) = edsearch::SearchIndex::new(&text) else {
        return;
    };
    let executor = edsearch::QueryExecutor::new(&index);
    if let Ok(report) = executor.cross_validate(&pattern, k) {
        assert!(report.agrees(), "{:?}", report.disagreements());
    }
});
