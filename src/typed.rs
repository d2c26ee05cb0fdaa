//! Typed cursor: binds a key codec and a value codec to a raw byte cursor.
//!
//! All keys are zero-filled before they reach the store. Equality and prefix
//! checks against the entry under the cursor therefore compare whole bytes
//! plus a masked final partial byte; the prefix check deliberately ignores
//! bits past the encoded size, because in a tuple key those bits belong to
//! the next field.

use log::trace;

use crate::{
    bits::bits_to_bytes,
    codec::{Codec, decode_from_slice, encode_into},
    errors::WriteError,
    store::RawCursor,
};

/// Compares an exactly sized, zero-filled encoding against an entry key from
/// the store. With `allow_prefix`, the entry may be longer than the encoding;
/// either way the final partial byte is compared only on its meaningful bits.
pub(crate) fn key_matches(ours: &[u8], theirs: &[u8], size_bits: usize, allow_prefix: bool) -> bool {
    let size = bits_to_bytes(size_bits);
    debug_assert_eq!(ours.len(), size);
    if allow_prefix {
        if theirs.len() < size {
            return false;
        }
    } else if theirs.len() != size {
        return false;
    }

    let partial_bits = size_bits % 8;
    let full = if partial_bits != 0 { size - 1 } else { size };
    if ours[..full] != theirs[..full] {
        return false;
    }
    if partial_bits != 0 {
        let mask = !(0xFFu8 >> partial_bits);
        if (ours[full] ^ theirs[full]) & mask != 0 {
            return false;
        }
    }
    true
}

/// A cursor over `(K::Value, V::Value)` entries stored under a [RawCursor].
///
/// Owns the reusable scratch buffers keys and values are encoded into; the
/// codecs themselves stay stateless.
pub struct TypedCursor<K, V, R> {
    raw: R,
    key_codec: K,
    value_codec: V,
    key_scratch: Vec<u8>,
    value_scratch: Vec<u8>,
}

impl<K, V, R> TypedCursor<K, V, R>
where
    K: Codec,
    V: Codec,
    R: RawCursor,
{
    pub fn new(raw: R, key_codec: K, value_codec: V) -> Self {
        Self {
            raw,
            key_codec,
            value_codec,
            key_scratch: Vec::new(),
            value_scratch: Vec::new(),
        }
    }

    pub fn move_first(&mut self) -> bool {
        self.raw.seek_first()
    }

    pub fn move_last(&mut self) -> bool {
        self.raw.seek_last()
    }

    pub fn move_next(&mut self) -> bool {
        self.raw.move_next()
    }

    pub fn move_previous(&mut self) -> bool {
        self.raw.move_previous()
    }

    /// Positions on exactly `key`.
    pub fn move_to(&mut self, key: &K::Value) -> Result<bool, WriteError> {
        encode_into(&self.key_codec, key, &mut self.key_scratch)?;
        Ok(self.raw.seek_exact(&self.key_scratch))
    }

    /// Positions on the first entry with key `>= key`.
    pub fn move_ceiling(&mut self, key: &K::Value) -> Result<bool, WriteError> {
        let size_bits = encode_into(&self.key_codec, key, &mut self.key_scratch)?;
        trace!("ceiling seek over {} key bits", size_bits);
        Ok(self.raw.seek_ceiling(&self.key_scratch))
    }

    /// Positions on the last entry with key `<= key`.
    pub fn move_floor(&mut self, key: &K::Value) -> Result<bool, WriteError> {
        Ok((self.move_ceiling(key)? && self.key_equals(key)?) || self.raw.move_previous())
    }

    fn key_equals(&mut self, key: &K::Value) -> Result<bool, WriteError> {
        let size_bits = encode_into(&self.key_codec, key, &mut self.key_scratch)?;
        Ok(key_matches(
            &self.key_scratch,
            self.raw.key(),
            size_bits,
            false,
        ))
    }

    /// Whether the current entry's key starts with the encoding of `key`,
    /// ignoring bits past it (they belong to later tuple fields).
    pub fn key_starts_with(&mut self, key: &K::Value) -> Result<bool, WriteError> {
        let size_bits = encode_into(&self.key_codec, key, &mut self.key_scratch)?;
        Ok(key_matches(
            &self.key_scratch,
            self.raw.key(),
            size_bits,
            true,
        ))
    }

    /// Decodes the key of the current entry.
    pub fn key(&self) -> K::Value {
        decode_from_slice(&self.key_codec, self.raw.key())
    }

    /// Decodes the value of the current entry.
    pub fn value(&self) -> V::Value {
        decode_from_slice(&self.value_codec, self.raw.value())
    }

    /// Inserts or updates `key`, leaving the cursor positioned on it.
    pub fn put(&mut self, key: &K::Value, value: &V::Value) -> Result<(), WriteError> {
        encode_into(&self.key_codec, key, &mut self.key_scratch)?;
        encode_into(&self.value_codec, value, &mut self.value_scratch)?;
        self.raw.put(&self.key_scratch, &self.value_scratch);
        Ok(())
    }

    /// Replaces the value of the current entry.
    pub fn put_value(&mut self, value: &V::Value) -> Result<(), WriteError> {
        let key = self.raw.key().to_vec();
        encode_into(&self.value_codec, value, &mut self.value_scratch)?;
        self.raw.put(&key, &self.value_scratch);
        Ok(())
    }

    /// Deletes the current entry.
    pub fn delete(&mut self) -> bool {
        self.raw.delete_current()
    }

    /// The underlying raw cursor, for reinterpreting the same physical
    /// position through different codecs (see [crate::view::SubrangeView]).
    pub fn raw_mut(&mut self) -> &mut R {
        &mut self.raw
    }
}
