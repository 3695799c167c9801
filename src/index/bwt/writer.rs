//! Rank-table writer
//!
//! Image layout (all little-endian):
//! - header: magic, version, flags, alphabet_size as u32, rows as u64
//! - `C`: `alphabet_size` u64 counts
//! - `O`: `alphabet_size * rows` u64 counts, symbol-major
//!
//! The suffix array and remap table are not part of the image; they must be
//! supplied again when the tables are read back.

use super::{BWT_MAGIC, BWT_VERSION, FLAG_SENTINEL_COUNTED, RankTables};
use crate::utils::encoding::{write_u32_le, write_u64_le, write_u64_table};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes rank tables to disk
pub struct RankTablesWriter;

impl RankTablesWriter {
    /// Write the tables to `path`, replacing any existing file
    pub fn write(path: &Path, tables: &RankTables) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::with_capacity(65536, file);
        Self::write_to(&mut writer, tables)
            .with_context(|| format!("Failed to write rank tables to {}", path.display()))?;
        writer.flush()?;
        Ok(())
    }

    /// Write the image to any sink
    pub fn write_to<W: Write>(writer: &mut W, tables: &RankTables) -> io::Result<()> {
        let alphabet_size = u32::try_from(tables.alphabet_size)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "alphabet too large"))?;

        write_u32_le(writer, BWT_MAGIC)?;
        write_u32_le(writer, BWT_VERSION)?;
        write_u32_le(writer, FLAG_SENTINEL_COUNTED)?;
        write_u32_le(writer, alphabet_size)?;
        write_u64_le(writer, tables.rows as u64)?;
        write_u64_table(writer, &tables.c)?;
        write_u64_table(writer, &tables.o)?;
        Ok(())
    }

    /// Size in bytes of the image for `tables`
    pub fn image_size(tables: &RankTables) -> usize {
        super::BWT_HEADER_SIZE + 8 * (tables.c.len() + tables.o.len())
    }
}
