//! The codec contract and the fixed-width numeric codecs.
//!
//! A codec maps a typed value to a bit sequence and back. Every codec in this
//! module is order-preserving: if `a < b` under the value type's order, the
//! encoding of `a` is less than the encoding of `b` under unsigned byte-wise
//! comparison. That is what lets encoded tuples serve as keys in a store that
//! only understands flat byte strings.

use crate::{
    bits::{
        bits_to_bytes, order_f32, order_f64, swap_sign_i32, swap_sign_i64, unorder_f32,
        unorder_f64,
    },
    combinator::Mapped,
    cursor::BitCursor,
    errors::WriteError,
};

/// Bidirectional typed value / bit sequence mapping with size introspection.
///
/// Contract: `size_bits(x)` is exactly the number of bits `write(x)` emits and
/// `read` consumes exactly what `write` emitted, as a pure function of the
/// stream. `read` input always originates from this codec's own prior writes;
/// feeding it a foreign stream is an invariant violation and may panic.
///
/// Codecs are stateless values, freely shareable across threads. Position
/// state lives in the [BitCursor], scratch buffers in the binding layer.
pub trait Codec {
    type Value;

    /// Upper bound on the encoded size of any value, or `None` if unbounded.
    fn maximum_size_bits(&self) -> Option<usize>;

    /// Exact number of bits `write` will emit for `x`.
    fn size_bits(&self, x: &Self::Value) -> usize;

    /// Encodes `x`, leaving the cursor advanced by exactly `size_bits(x)`.
    fn write(&self, bits: &mut BitCursor<'_>, x: &Self::Value) -> Result<(), WriteError>;

    /// Decodes one value, consuming exactly what `write` emitted.
    fn read(&self, bits: &mut BitCursor<'_>) -> Self::Value;

    /// Derives a codec for `U` from this codec via a bidirectional value
    /// transform, preserving size and order properties exactly.
    fn map<U, F, G>(self, into: F, from: G) -> Mapped<Self, U, F, G>
    where
        Self: Sized,
        F: Fn(&U) -> Self::Value,
        G: Fn(Self::Value) -> U,
    {
        Mapped::new(self, into, from)
    }
}

/// Encodes `x` into a reusable scratch buffer, resized to the exact byte
/// length and zero-filled past the last meaningful bit. Returns the exact
/// size in bits.
pub fn encode_into<C: Codec>(
    codec: &C,
    x: &C::Value,
    scratch: &mut Vec<u8>,
) -> Result<usize, WriteError> {
    let size_bits = codec.size_bits(x);
    scratch.clear();
    scratch.resize(bits_to_bytes(size_bits), 0);
    let mut bits = BitCursor::new(scratch);
    codec.write(&mut bits, x)?;
    debug_assert_eq!(bits.position_bits(), size_bits, "size_bits contract broken");
    bits.zero_fill();
    Ok(size_bits)
}

/// Encodes `x` into a fresh, exactly sized, zero-filled byte buffer.
pub fn encode_to_vec<C: Codec>(codec: &C, x: &C::Value) -> Result<Vec<u8>, WriteError> {
    let mut buf = Vec::new();
    encode_into(codec, x, &mut buf)?;
    Ok(buf)
}

/// Decodes a value from bytes previously produced by [encode_to_vec].
pub fn decode_from_slice<C: Codec>(codec: &C, bytes: &[u8]) -> C::Value {
    let mut scratch = bytes.to_vec();
    codec.read(&mut BitCursor::new(&mut scratch))
}

/// Raw big-endian 32-bit codec; unsigned values are naturally ordered.
#[derive(Debug, Clone, Copy, Default)]
pub struct U32Codec;

impl Codec for U32Codec {
    type Value = u32;

    fn maximum_size_bits(&self) -> Option<usize> {
        Some(32)
    }

    fn size_bits(&self, _x: &u32) -> usize {
        32
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &u32) -> Result<(), WriteError> {
        bits.write_u32(*x);
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> u32 {
        bits.read_u32()
    }
}

/// Raw big-endian 64-bit codec; unsigned values are naturally ordered.
#[derive(Debug, Clone, Copy, Default)]
pub struct U64Codec;

impl Codec for U64Codec {
    type Value = u64;

    fn maximum_size_bits(&self) -> Option<usize> {
        Some(64)
    }

    fn size_bits(&self, _x: &u64) -> usize {
        64
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &u64) -> Result<(), WriteError> {
        bits.write_u64(*x);
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> u64 {
        bits.read_u64()
    }
}

/// Signed 32-bit codec: the sign bit is flipped so the negative range sorts
/// before the non-negative range.
#[derive(Debug, Clone, Copy, Default)]
pub struct I32Codec;

impl Codec for I32Codec {
    type Value = i32;

    fn maximum_size_bits(&self) -> Option<usize> {
        Some(32)
    }

    fn size_bits(&self, _x: &i32) -> usize {
        32
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &i32) -> Result<(), WriteError> {
        bits.write_u32(swap_sign_i32(*x) as u32);
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> i32 {
        swap_sign_i32(bits.read_u32() as i32)
    }
}

/// Signed 64-bit codec; see [I32Codec].
#[derive(Debug, Clone, Copy, Default)]
pub struct I64Codec;

impl Codec for I64Codec {
    type Value = i64;

    fn maximum_size_bits(&self) -> Option<usize> {
        Some(64)
    }

    fn size_bits(&self, _x: &i64) -> usize {
        64
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &i64) -> Result<(), WriteError> {
        bits.write_u64(swap_sign_i64(*x) as u64);
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> i64 {
        swap_sign_i64(bits.read_u64() as i64)
    }
}

/// IEEE single-precision codec using the order-preserving bit rotation of
/// [crate::bits::order_f32]. NaN and the infinities are ordinary bit patterns
/// that sort deterministically; they are not treated specially.
#[derive(Debug, Clone, Copy, Default)]
pub struct F32Codec;

impl Codec for F32Codec {
    type Value = f32;

    fn maximum_size_bits(&self) -> Option<usize> {
        Some(32)
    }

    fn size_bits(&self, _x: &f32) -> usize {
        32
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &f32) -> Result<(), WriteError> {
        bits.write_u32(order_f32(*x));
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> f32 {
        unorder_f32(bits.read_u32())
    }
}

/// IEEE double-precision codec; see [F32Codec].
#[derive(Debug, Clone, Copy, Default)]
pub struct F64Codec;

impl Codec for F64Codec {
    type Value = f64;

    fn maximum_size_bits(&self) -> Option<usize> {
        Some(64)
    }

    fn size_bits(&self, _x: &f64) -> usize {
        64
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &f64) -> Result<(), WriteError> {
        bits.write_u64(order_f64(*x));
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> f64 {
        unorder_f64(bits.read_u64())
    }
}

/// Zero-bit codec for `()`, used as the value side of pure key sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCodec;

impl Codec for UnitCodec {
    type Value = ();

    fn maximum_size_bits(&self) -> Option<usize> {
        Some(0)
    }

    fn size_bits(&self, _x: &()) -> usize {
        0
    }

    fn write(&self, _bits: &mut BitCursor<'_>, _x: &()) -> Result<(), WriteError> {
        Ok(())
    }

    fn read(&self, _bits: &mut BitCursor<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc<C: Codec>(codec: &C, x: &C::Value) -> Vec<u8> {
        encode_to_vec(codec, x).unwrap()
    }

    #[test]
    fn test_i32_roundtrip() {
        for x in [i32::MIN, -1337, -1, 0, 1, 1337, i32::MAX] {
            assert_eq!(decode_from_slice(&I32Codec, &enc(&I32Codec, &x)), x);
        }
    }

    #[test]
    fn test_i64_boundary_ordering() {
        let xs = [i64::MIN, -1, 0, 1, i64::MAX];
        for w in xs.windows(2) {
            assert!(enc(&I64Codec, &w[0]) < enc(&I64Codec, &w[1]));
        }
    }

    #[test]
    fn test_u32_is_raw_big_endian() {
        assert_eq!(enc(&U32Codec, &0x01020304), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_f64_boundary_ordering() {
        let xs = [
            f64::NEG_INFINITY,
            f64::MIN,
            -1.0,
            -0.0,
            0.0,
            1.0,
            f64::MAX,
            f64::INFINITY,
            f64::NAN,
        ];
        for w in xs.windows(2) {
            assert!(enc(&F64Codec, &w[0]) < enc(&F64Codec, &w[1]));
        }
    }

    #[test]
    fn test_f32_roundtrip_preserves_bits() {
        for x in [f32::NEG_INFINITY, -0.0, 0.0, 2.5, f32::NAN] {
            let back = decode_from_slice(&F32Codec, &enc(&F32Codec, &x));
            assert_eq!(back.to_bits(), x.to_bits());
        }
    }

    #[test]
    fn test_unit_is_empty() {
        assert_eq!(enc(&UnitCodec, &()), Vec::<u8>::new());
    }
}
