#![no_main]

use edsearch::Cigar;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing arbitrary strings must not panic; anything accepted
    // prints back to a canonical form that parses to the same script
    if let Ok(cigar) = data.parse::<Cigar>() {
        let canonical = cigar.to_string();
        assert_eq!(canonical.parse::<Cigar>().ok(), Some(cigar.clone()));

        if cigar.len_ops() <= 4096 {
            assert_eq!(Cigar::compress(&cigar.expand()), cigar);
        }
    }
});
