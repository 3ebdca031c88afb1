//! Two-segment persistence of a map trie.
//!
//! Layout (integers are varints unless noted):
//!
//! ```text
//! magic      "TIDM"
//! version    u8
//! segment 1  len, xxh3-64 (u64 LE), trie bytes   (TrieCodec)
//! segment 2  len, xxh3-64 (u64 LE), value bytes  (JSON array, index == term id)
//! ```
//!
//! Segments are written and read in that order. Decoding is all or
//! nothing: any defect in either segment fails the whole load with
//! [`MapTrieError::Corrupt`].

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use memmap2::Mmap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use termtrie::encoding::{put_varint, varint_size, Reader};
use termtrie::{TermIdTrie, TrieCodec, TrieError};
use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::{Config, MapTrieError, Result, TermIdMapTrie, ValueStore};

const MAGIC: &[u8; 4] = b"TIDM";
const VERSION: u8 = 1;

fn segment_size(bytes: &[u8]) -> usize {
    varint_size(bytes.len() as u64) + 8 + bytes.len()
}

fn put_segment(out: &mut Vec<u8>, bytes: &[u8]) {
    put_varint(out, bytes.len() as u64);
    out.extend_from_slice(&xxh3_64(bytes).to_le_bytes());
    out.extend_from_slice(bytes);
}

fn read_segment<'a>(r: &mut Reader<'a>, name: &str, verify: bool) -> Result<&'a [u8]> {
    let len = r.varint_usize().map_err(corrupt)?;
    let checksum = r.u64_le().map_err(corrupt)?;
    let bytes = r.bytes(len).map_err(corrupt)?;
    if verify && xxh3_64(bytes) != checksum {
        return Err(MapTrieError::corrupt(format!("{name} segment checksum mismatch")));
    }
    Ok(bytes)
}

fn corrupt(e: TrieError) -> MapTrieError {
    MapTrieError::corrupt(e.to_string())
}

impl<V, T> TermIdMapTrie<V, T>
where
    V: Serialize,
    T: TrieCodec,
{
    /// Encode the trie and its values into one buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut trie = Vec::new();
        self.trie.encode(&mut trie);
        let values = serde_json::to_vec(&*self.values.slots()).map_err(MapTrieError::Encode)?;

        let mut out = Vec::with_capacity(MAGIC.len() + 1 + segment_size(&trie) + segment_size(&values));
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        put_segment(&mut out, &trie);
        put_segment(&mut out, &values);
        debug!(
            trie_bytes = trie.len(),
            value_bytes = values.len(),
            total = out.len(),
            "encoded map trie"
        );
        Ok(out)
    }

    /// Write the encoded map to `out`.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        out.write_all(&self.to_bytes()?)?;
        Ok(())
    }

    /// Write the encoded map to a file, replacing it if it exists.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        debug!(path = %path.display(), "saved map trie");
        Ok(())
    }
}

impl<V, T> TermIdMapTrie<V, T>
where
    V: DeserializeOwned,
    T: TermIdTrie + TrieCodec,
{
    /// Rebuild a map from bytes produced by [`TermIdMapTrie::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_config(bytes, Config::default())
    }

    /// Like [`TermIdMapTrie::from_bytes`], keeping `config` on the result.
    pub fn from_bytes_with_config(bytes: &[u8], config: Config) -> Result<Self> {
        match Self::decode(bytes, &config) {
            Ok((trie, values)) => {
                debug!(terms = trie.len(), slots = values.len(), bytes = bytes.len(), "decoded map trie");
                Ok(Self {
                    trie,
                    values: ValueStore::from_vec(values),
                    config,
                })
            }
            Err(e) => {
                warn!(bytes = bytes.len(), error = %e, "rejected persisted map trie");
                Err(e)
            }
        }
    }

    fn decode(bytes: &[u8], config: &Config) -> Result<(T, Vec<Option<V>>)> {
        let mut r = Reader::new(bytes);
        if r.bytes(MAGIC.len()).map_err(corrupt)? != MAGIC {
            return Err(MapTrieError::corrupt("not a map trie (bad magic)"));
        }
        let version = r.u8().map_err(corrupt)?;
        if version != VERSION {
            return Err(MapTrieError::corrupt(format!("unsupported version {version}")));
        }
        let trie_bytes = read_segment(&mut r, "trie", config.verify_checksums)?;
        let value_bytes = read_segment(&mut r, "value", config.verify_checksums)?;
        r.finish().map_err(corrupt)?;

        let trie = T::decode(trie_bytes).map_err(corrupt)?;
        let values: Vec<Option<V>> = serde_json::from_slice(value_bytes)
            .map_err(|e| MapTrieError::corrupt(format!("value segment: {e}")))?;
        Ok((trie, values))
    }

    /// Read an encoded map from `input` until end of stream.
    pub fn read_from<R: Read>(mut input: R) -> Result<Self> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Load a map saved with [`TermIdMapTrie::save`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(MapTrieError::corrupt(format!("{} is empty", path.display())));
        }
        // SAFETY: assumes no other process truncates or rewrites the file
        // while it is mapped; that would be undefined behavior.
        let map = unsafe { Mmap::map(&file)? };
        let out = Self::from_bytes(&map);
        debug!(path = %path.display(), ok = out.is_ok(), "opened map trie");
        out
    }
}
