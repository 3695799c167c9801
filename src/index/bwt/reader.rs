//! Rank-table reader
//!
//! Memory-maps an image written by [`super::RankTablesWriter`], validates its
//! header and contents, and checks it against the suffix array and remap
//! table it is meant to be used with.

use super::{BWT_HEADER_SIZE, BWT_MAGIC, BWT_VERSION, BwtIndex, FLAG_SENTINEL_COUNTED, RankTables};
use crate::index::suffix_array::SuffixArray;
use crate::utils::RemapTable;
use crate::utils::encoding::{u32_at, u64_at, u64_table_at};
use anyhow::{Context, Result, bail};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Reads rank tables from disk
pub struct RankTablesReader;

impl RankTablesReader {
    /// Load tables from `path` for use with `sa` and `remap`
    pub fn open(path: &Path, sa: &SuffixArray, remap: &RemapTable) -> Result<RankTables> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mmap = unsafe { Mmap::map(&file)? };

        let tables = Self::parse(&mmap)
            .with_context(|| format!("Invalid rank tables in {}", path.display()))?;
        BwtIndex::new(sa, remap, &tables)?;
        Ok(tables)
    }

    /// Decode an in-memory image
    pub fn parse(data: &[u8]) -> Result<RankTables> {
        if data.len() < BWT_HEADER_SIZE {
            bail!("file too small");
        }

        let magic = u32_at(data, 0).context("truncated header")?;
        if magic != BWT_MAGIC {
            bail!("bad magic number");
        }

        let version = u32_at(data, 4).context("truncated header")?;
        if version != BWT_VERSION {
            bail!("unsupported version: {}", version);
        }

        let flags = u32_at(data, 8).context("truncated header")?;
        if flags & FLAG_SENTINEL_COUNTED == 0 {
            bail!("tables were built without the sentinel count");
        }

        let alphabet_size = u32_at(data, 12).context("truncated header")? as usize;
        let rows = u64_at(data, 16)
            .and_then(|rows| usize::try_from(rows).ok())
            .context("truncated header")?;

        let o_len = alphabet_size
            .checked_mul(rows)
            .context("table dimensions overflow")?;
        let expected = o_len
            .checked_add(alphabet_size)
            .and_then(|words| words.checked_mul(8))
            .and_then(|bytes| bytes.checked_add(BWT_HEADER_SIZE))
            .context("table dimensions overflow")?;
        if data.len() != expected {
            bail!("expected {} bytes, found {}", expected, data.len());
        }

        let c = u64_table_at(data, BWT_HEADER_SIZE, alphabet_size).context("truncated C table")?;
        let o = u64_table_at(data, BWT_HEADER_SIZE + 8 * alphabet_size, o_len)
            .context("truncated O table")?;

        let tables = RankTables {
            alphabet_size,
            rows,
            c,
            o,
        };
        tables.validate()?;
        Ok(tables)
    }
}
