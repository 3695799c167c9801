pub mod aho_corasick;
pub mod executor;
pub mod neighbourhood;
pub mod types;

pub use aho_corasick::{AcMatch, AhoCorasick, Trie};
pub use executor::{CrossValidation, QueryExecutor};
pub use neighbourhood::{Neighbour, Neighbourhood};
pub use types::{ApproxMatch, Engine};
