//! Encoding utilities for the persisted trie format.
//!
//! This module provides the building blocks shared by every binary codec in
//! the workspace:
//! - Variable-length integers (VarInt)
//! - Length-prefixed byte strings
//! - A bounds-checked [`Reader`] that reports truncation as corruption

use crate::{Result, TrieError};

/// Append a u64 as a variable-length integer.
///
/// Uses 1-10 bytes depending on the value:
/// - 0-127: 1 byte
/// - 128-16383: 2 bytes
/// - etc.
pub fn put_varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Calculate the number of bytes needed to encode a value as varint.
pub fn varint_size(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let bits = 64 - value.leading_zeros() as usize;
    (bits + 6) / 7
}

/// Append a length-prefixed byte slice.
pub fn put_bytes(out: &mut Vec<u8>, data: &[u8]) {
    put_varint(out, data.len() as u64);
    out.extend_from_slice(data);
}

/// Shared prefix length of two strings, in bytes, cut on a `char` boundary.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or(a.len().min(b.len()), |((i, _), _)| i)
}

/// Cursor over an encoded buffer.
///
/// Every read is bounds-checked; running off the end is reported as
/// [`TrieError::Corrupt`] rather than a panic.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read a single byte.
    pub fn u8(&mut self) -> Result<u8> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| TrieError::corrupt("unexpected end of input"))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read a little-endian u64.
    pub fn u64_le(&mut self) -> Result<u64> {
        let raw = self.bytes(8)?;
        let mut le = [0u8; 8];
        le.copy_from_slice(raw);
        Ok(u64::from_le_bytes(le))
    }

    /// Read exactly `n` bytes.
    pub fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(TrieError::corrupt(format!(
                "need {n} bytes at offset {}, only {} left",
                self.pos,
                self.remaining()
            )));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Read a variable-length integer.
    pub fn varint(&mut self) -> Result<u64> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.u8()?;
            if shift == 63 && byte > 1 {
                return Err(TrieError::corrupt("varint overflows u64"));
            }
            value |= ((byte & 0x7F) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift > 63 {
                return Err(TrieError::corrupt("varint overflows u64"));
            }
        }
    }

    /// Read a varint that must fit in a u32.
    pub fn varint_u32(&mut self) -> Result<u32> {
        let value = self.varint()?;
        u32::try_from(value).map_err(|_| TrieError::corrupt(format!("{value} does not fit in u32")))
    }

    /// Read a varint used as a length or count.
    pub fn varint_usize(&mut self) -> Result<usize> {
        let value = self.varint()?;
        usize::try_from(value)
            .map_err(|_| TrieError::corrupt(format!("{value} does not fit in usize")))
    }

    /// Read a length-prefixed byte slice.
    pub fn length_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.varint_usize()?;
        self.bytes(len)
    }

    /// Fail unless the whole buffer has been consumed.
    pub fn finish(&self) -> Result<()> {
        if self.remaining() != 0 {
            return Err(TrieError::corrupt(format!(
                "{} trailing bytes after offset {}",
                self.remaining(),
                self.pos
            )));
        }
        Ok(())
    }
}
