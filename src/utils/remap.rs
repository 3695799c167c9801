//! Alphabet remapping
//!
//! Maps the bytes of a text onto a dense alphabet `0..alphabet_size` so that
//! rank tables can be indexed by symbol. Code 0 is reserved for the sentinel;
//! every other byte gets the next free code in order of first occurrence.

/// Number of distinct byte values a table can hold
pub const TABLE_SIZE: usize = 256;

/// Byte (and code) used as the end-of-text sentinel
pub const SENTINEL: u8 = 0;

/// Bidirectional byte <-> code table built from one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    forward: [Option<u8>; TABLE_SIZE],
    reverse: [Option<u8>; TABLE_SIZE],
    alphabet_size: usize,
}

impl RemapTable {
    /// Size of the fixed binary image produced by [`RemapTable::to_bytes`]
    pub const IMAGE_SIZE: usize = 2 + 2 * TABLE_SIZE * 2;

    /// Build a table from the distinct bytes of `text`
    pub fn build(text: &[u8]) -> Self {
        let mut forward = [None; TABLE_SIZE];
        let mut reverse = [None; TABLE_SIZE];
        forward[SENTINEL as usize] = Some(SENTINEL);
        reverse[SENTINEL as usize] = Some(SENTINEL);

        let mut alphabet_size = 1;
        for &byte in text {
            if forward[byte as usize].is_none() {
                let code = alphabet_size as u8;
                forward[byte as usize] = Some(code);
                reverse[code as usize] = Some(byte);
                alphabet_size += 1;
            }
        }

        Self {
            forward,
            reverse,
            alphabet_size,
        }
    }

    /// Number of codes in use, sentinel included
    #[inline]
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Code assigned to `byte`, if it occurred in the text
    #[inline]
    pub fn code(&self, byte: u8) -> Option<u8> {
        self.forward[byte as usize]
    }

    /// Byte that `code` stands for
    #[inline]
    pub fn byte(&self, code: u8) -> Option<u8> {
        self.reverse[code as usize]
    }

    /// The text's bytes in code order, sentinel excluded
    pub fn symbols(&self) -> Vec<u8> {
        (1..self.alphabet_size)
            .filter_map(|code| self.reverse[code])
            .collect()
    }

    /// Translate `text` into codes.
    ///
    /// Returns `None` at the first byte without a code; the text then cannot
    /// be searched against an index built with this table.
    pub fn remap(&self, text: &[u8]) -> Option<Vec<u8>> {
        text.iter().map(|&b| self.code(b)).collect()
    }

    /// Like [`RemapTable::remap`] but reports the offending offset
    pub fn remap_checked(&self, text: &[u8]) -> Result<Vec<u8>, usize> {
        let mut out = Vec::with_capacity(text.len());
        for (offset, &b) in text.iter().enumerate() {
            out.push(self.code(b).ok_or(offset)?);
        }
        Ok(out)
    }

    /// Translate codes back into bytes. Codes outside the alphabet map to the sentinel.
    pub fn unmap(&self, codes: &[u8]) -> Vec<u8> {
        codes
            .iter()
            .map(|&c| self.byte(c).unwrap_or(SENTINEL))
            .collect()
    }

    /// Encode as a fixed-size little-endian image.
    ///
    /// Layout: `alphabet_size: u16`, `forward: [i16; 256]`, `reverse: [i16; 256]`,
    /// with -1 marking an unassigned entry.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::IMAGE_SIZE);
        buf.extend_from_slice(&(self.alphabet_size as u16).to_le_bytes());
        for entry in self.forward.iter().chain(self.reverse.iter()) {
            let value = entry.map_or(-1i16, i16::from);
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf
    }

    /// Decode an image produced by [`RemapTable::to_bytes`]
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() != Self::IMAGE_SIZE {
            return None;
        }

        let alphabet_size = u16::from_le_bytes([data[0], data[1]]) as usize;
        if alphabet_size == 0 || alphabet_size > TABLE_SIZE {
            return None;
        }

        let mut entries = data[2..].chunks_exact(2).map(|pair| {
            match i16::from_le_bytes([pair[0], pair[1]]) {
                -1 => Ok(None),
                v @ 0..=255 => Ok(Some(v as u8)),
                _ => Err(()),
            }
        });

        let mut forward = [None; TABLE_SIZE];
        let mut reverse = [None; TABLE_SIZE];
        for slot in forward.iter_mut().chain(reverse.iter_mut()) {
            *slot = entries.next()?.ok()?;
        }

        let table = Self {
            forward,
            reverse,
            alphabet_size,
        };
        table.is_consistent().then_some(table)
    }

    /// Check the fixed-point and inverse invariants
    fn is_consistent(&self) -> bool {
        if self.forward[SENTINEL as usize] != Some(SENTINEL)
            || self.reverse[SENTINEL as usize] != Some(SENTINEL)
        {
            return false;
        }
        (0..TABLE_SIZE).all(|b| match self.forward[b] {
            Some(code) => {
                (code as usize) < self.alphabet_size && self.reverse[code as usize] == Some(b as u8)
            }
            None => true,
        })
    }
}
