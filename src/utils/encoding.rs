//! Little-endian primitives for the persisted rank-table image

use std::io::{self, Write};

/// Write a u32 in little-endian format
pub fn write_u32_le<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Write a u64 in little-endian format
pub fn write_u64_le<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Write a table of counts as consecutive little-endian u64s.
///
/// Entries are staged in a buffer to reduce system call overhead.
pub fn write_u64_table<W: Write>(writer: &mut W, values: &[usize]) -> io::Result<()> {
    let mut buffer = Vec::with_capacity(8 * 1024);
    for &value in values {
        buffer.extend_from_slice(&(value as u64).to_le_bytes());
        if buffer.len() >= 8 * 1024 {
            writer.write_all(&buffer)?;
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        writer.write_all(&buffer)?;
    }
    Ok(())
}

/// Read a u32 at `offset`, if the slice is long enough
#[inline]
pub fn u32_at(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

/// Read a u64 at `offset`, if the slice is long enough
#[inline]
pub fn u64_at(data: &[u8], offset: usize) -> Option<u64> {
    let bytes = data.get(offset..offset.checked_add(8)?)?;
    Some(u64::from_le_bytes(bytes.try_into().ok()?))
}

/// Read `count` consecutive u64s starting at `offset`
pub fn u64_table_at(data: &[u8], offset: usize, count: usize) -> Option<Vec<usize>> {
    let end = count.checked_mul(8)?.checked_add(offset)?;
    let bytes = data.get(offset..end)?;
    bytes
        .chunks_exact(8)
        .map(|chunk| {
            let value = u64::from_le_bytes(chunk.try_into().ok()?);
            usize::try_from(value).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_round_trip() {
        let mut buf = Vec::new();
        write_u32_le(&mut buf, 0xdead_beef).unwrap();
        write_u64_le(&mut buf, u64::MAX - 1).unwrap();

        assert_eq!(u32_at(&buf, 0), Some(0xdead_beef));
        assert_eq!(u64_at(&buf, 4), Some(u64::MAX - 1));
        assert_eq!(u64_at(&buf, 5), None);
    }

    #[test]
    fn test_table_round_trip() {
        // larger than the staging buffer
        let values: Vec<usize> = (0..3000).map(|i| i * 7).collect();
        let mut buf = Vec::new();
        write_u64_table(&mut buf, &values).unwrap();

        assert_eq!(buf.len(), values.len() * 8);
        assert_eq!(u64_table_at(&buf, 0, values.len()), Some(values));
        assert_eq!(u64_table_at(&buf, 8, 3000), None);
    }
}
