//! Error taxonomy for index construction and searching.
//!
//! Not-found is never an error: engines report it as an empty range or an
//! empty iterator. Everything here is local to the call that produced it.

use thiserror::Error;

/// Errors raised at the boundary of an index or search operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Patterns must contain at least one symbol
    #[error("empty pattern")]
    EmptyPattern,

    /// The sentinel byte is reserved for index construction
    #[error("pattern contains the sentinel byte at offset {offset}")]
    SentinelInPattern { offset: usize },

    /// Indexed texts may not contain the sentinel byte
    #[error("text contains the sentinel byte at offset {offset}")]
    SentinelInText { offset: usize },

    /// A pattern byte has no code in the remap table of the index.
    ///
    /// Recoverable: the caller can skip this engine or this pattern.
    #[error("byte 0x{byte:02x} at offset {offset} is not in the index alphabet")]
    AlphabetMiss { byte: u8, offset: usize },

    /// The requested edit budget exceeds the configured maximum
    #[error("edit budget {requested} exceeds the configured maximum of {max}")]
    EditBudgetTooLarge { requested: u32, max: u32 },

    /// A supplied suffix array is not a permutation of the text's suffixes
    #[error("invalid suffix array: {0}")]
    InvalidSuffixArray(String),

    /// Rank tables do not fit the suffix array or remap table they were paired with
    #[error("corrupt rank tables: {0}")]
    CorruptRankTables(String),
}

/// Result alias used by the index and query modules.
pub type Result<T, E = SearchError> = std::result::Result<T, E>;

/// Reject empty patterns and patterns containing the sentinel.
pub(crate) fn validate_pattern(pattern: &[u8], sentinel: u8) -> Result<()> {
    if pattern.is_empty() {
        return Err(SearchError::EmptyPattern);
    }
    if let Some(offset) = memchr::memchr(sentinel, pattern) {
        return Err(SearchError::SentinelInPattern { offset });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pattern() {
        assert_eq!(validate_pattern(b"", 0), Err(SearchError::EmptyPattern));
        assert_eq!(
            validate_pattern(b"ac\0g", 0),
            Err(SearchError::SentinelInPattern { offset: 2 })
        );
        assert!(validate_pattern(b"acg", 0).is_ok());
    }

    #[test]
    fn test_display() {
        let err = SearchError::AlphabetMiss { byte: b'x', offset: 3 };
        assert_eq!(
            err.to_string(),
            "byte 0x78 at offset 3 is not in the index alphabet"
        );
    }
}
