//! Subrange view: a cursor scoped to one value of a leading tuple field.
//!
//! Given entries keyed by the tuple `(k1, k2)` and a fixed `k1`, the view
//! exposes `k2` as the sole key, restricted to entries whose leading field
//! equals the fixed value. Seeks work through the one physical cursor in
//! three reinterpretations: by the fixed prefix alone, by the successor of
//! the prefix, and by the composed `(k1, k2)` encoding.
//!
//! The successor of the prefix bounds the group from above as the half-open
//! byte range `[prefix, successor)`. When the prefix is the maximum encoding
//! of its length there is no finite successor, and the "last in group" seek
//! falls back to the absolute end of the collection.
//!
//! Views nest: fixing the first two fields of `(k1, k2a, k2b)` is a view
//! whose leading codec is `zip(k1, k2a)`.

use log::debug;

use crate::{
    bits::bits_to_bytes,
    codec::{Codec, decode_from_slice, encode_into},
    cursor::BitCursor,
    errors::WriteError,
    store::RawCursor,
    typed::key_matches,
};

/// Cursor over the `k2` components of tuple entries sharing a fixed `k1`.
///
/// Holds the physical cursor exclusively for its lifetime. Pass a `&mut`
/// raw cursor to lend one cursor to several short-lived views in turn.
pub struct SubrangeView<K1: Codec, K2, V, R> {
    raw: R,
    k1_codec: K1,
    k2_codec: K2,
    value_codec: V,
    k1: K1::Value,
    /// Zero-filled encoding of `k1`.
    prefix: Vec<u8>,
    prefix_bits: usize,
    /// Successor of the prefix bits; `None` when the prefix is the maximum
    /// encoding of its length and no finite upper bound exists.
    successor: Option<Vec<u8>>,
    scratch: Vec<u8>,
    value_scratch: Vec<u8>,
}

impl<K1, K2, V, R> SubrangeView<K1, K2, V, R>
where
    K1: Codec,
    K2: Codec,
    V: Codec,
    R: RawCursor,
{
    pub fn new(
        raw: R,
        k1_codec: K1,
        k2_codec: K2,
        value_codec: V,
        k1: K1::Value,
    ) -> Result<Self, WriteError> {
        let mut view = Self {
            raw,
            k1_codec,
            k2_codec,
            value_codec,
            k1,
            prefix: Vec::new(),
            prefix_bits: 0,
            successor: None,
            scratch: Vec::new(),
            value_scratch: Vec::new(),
        };
        view.refresh_position()?;
        Ok(view)
    }

    /// Refixes the view on a new `k1` value.
    pub fn set_position(&mut self, k1: K1::Value) -> Result<(), WriteError> {
        self.k1 = k1;
        self.refresh_position()
    }

    fn refresh_position(&mut self) -> Result<(), WriteError> {
        self.prefix_bits = encode_into(&self.k1_codec, &self.k1, &mut self.prefix)?;

        let mut successor = self.prefix.clone();
        let overflowed = {
            let mut bits = BitCursor::new(&mut successor);
            let mark = bits.mark();
            bits.advance_bits(self.prefix_bits);
            bits.increment_from_mark(mark)
        };
        self.successor = if overflowed { None } else { Some(successor) };

        debug!(
            "subrange view fixed on {} prefix bits (maximum: {})",
            self.prefix_bits, overflowed
        );
        Ok(())
    }

    /// The fixed leading-field value.
    pub fn position(&self) -> &K1::Value {
        &self.k1
    }

    fn on_current_group(&self) -> bool {
        key_matches(&self.prefix, self.raw.key(), self.prefix_bits, true)
    }

    /// Positions on the first entry of the group.
    pub fn move_first(&mut self) -> bool {
        self.raw.seek_ceiling(&self.prefix) && self.on_current_group()
    }

    /// Positions on the last entry of the group. When the prefix has a
    /// finite successor this is the entry just before the successor's
    /// ceiling; otherwise it is the absolute last entry of the collection.
    pub fn move_last(&mut self) -> bool {
        let found = match &self.successor {
            Some(successor) => {
                if self.raw.seek_ceiling(successor) {
                    self.raw.move_previous()
                } else {
                    self.raw.seek_last()
                }
            }
            None => self.raw.seek_last(),
        };
        found && self.on_current_group()
    }

    /// Steps to the next entry; not-found once the step leaves the group.
    pub fn move_next(&mut self) -> bool {
        self.raw.move_next() && self.on_current_group()
    }

    /// Steps to the previous entry; not-found once the step leaves the group.
    pub fn move_previous(&mut self) -> bool {
        self.raw.move_previous() && self.on_current_group()
    }

    /// Encodes `(k1, k2)` into the scratch buffer: the prefix bits, then the
    /// second field starting at the prefix's (possibly sub-byte) end.
    fn compose_key(&mut self, k2: &K2::Value) -> Result<usize, WriteError> {
        let total_bits = self.prefix_bits + self.k2_codec.size_bits(k2);
        self.scratch.clear();
        self.scratch.resize(bits_to_bytes(total_bits), 0);
        self.scratch[..self.prefix.len()].copy_from_slice(&self.prefix);

        let mut bits = BitCursor::new(&mut self.scratch);
        bits.advance_bits(self.prefix_bits);
        self.k2_codec.write(&mut bits, k2)?;
        bits.zero_fill();
        Ok(total_bits)
    }

    /// Positions on exactly `(k1, k2)`.
    pub fn move_to(&mut self, k2: &K2::Value) -> Result<bool, WriteError> {
        self.compose_key(k2)?;
        Ok(self.raw.seek_exact(&self.scratch))
    }

    /// Positions on the first group entry with second field `>= k2`.
    pub fn move_ceiling(&mut self, k2: &K2::Value) -> Result<bool, WriteError> {
        self.compose_key(k2)?;
        Ok(self.raw.seek_ceiling(&self.scratch) && self.on_current_group())
    }

    /// Positions on the last group entry with second field `<= k2`.
    pub fn move_floor(&mut self, k2: &K2::Value) -> Result<bool, WriteError> {
        let total_bits = self.compose_key(k2)?;
        let found = (self.raw.seek_ceiling(&self.scratch)
            && key_matches(&self.scratch, self.raw.key(), total_bits, false))
            || self.raw.move_previous();
        Ok(found && self.on_current_group())
    }

    /// Decodes the second field of the current entry.
    pub fn key(&self) -> K2::Value {
        let mut buf = self.raw.key().to_vec();
        let mut bits = BitCursor::new(&mut buf);
        bits.advance_bits(self.prefix_bits);
        self.k2_codec.read(&mut bits)
    }

    /// Decodes the value of the current entry.
    pub fn value(&self) -> V::Value {
        decode_from_slice(&self.value_codec, self.raw.value())
    }

    /// Point lookup within the group.
    pub fn get(&mut self, k2: &K2::Value) -> Result<Option<V::Value>, WriteError> {
        if self.move_to(k2)? {
            Ok(Some(self.value()))
        } else {
            Ok(None)
        }
    }

    /// Inserts or updates `(k1, k2)`.
    pub fn put(&mut self, k2: &K2::Value, value: &V::Value) -> Result<(), WriteError> {
        self.compose_key(k2)?;
        encode_into(&self.value_codec, value, &mut self.value_scratch)?;
        self.raw.put(&self.scratch, &self.value_scratch);
        Ok(())
    }

    /// Deletes `(k1, k2)` if present.
    pub fn delete(&mut self, k2: &K2::Value) -> Result<bool, WriteError> {
        if self.move_to(k2)? {
            Ok(self.raw.delete_current())
        } else {
            Ok(false)
        }
    }
}
