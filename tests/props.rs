//! Property tests for the codec contracts: round-trip with exact bit
//! consumption, order preservation, self-delimitation, and successor
//! arithmetic.

use proptest::prelude::*;

use keybits::bits::bits_to_bytes;
use keybits::codec::{Codec, F64Codec, I64Codec, decode_from_slice, encode_to_vec};
use keybits::combinator::{ListCodec, Optional, zip};
use keybits::cursor::BitCursor;
use keybits::string::{ByteArrayCodec, Latin1Codec, NullFreeStringCodec};

fn roundtrip<C: Codec>(codec: &C, x: &C::Value) -> C::Value {
    decode_from_slice(codec, &encode_to_vec(codec, x).unwrap())
}

/// Writes `x`, then checks the cursor consumed exactly `size_bits(x)` on both
/// the write and the read path.
fn exact_bits<C: Codec>(codec: &C, x: &C::Value) -> (usize, usize) {
    let size_bits = codec.size_bits(x);
    let mut buf = vec![0u8; bits_to_bytes(size_bits)];
    let mut bits = BitCursor::new(&mut buf);
    codec.write(&mut bits, x).unwrap();
    let written = bits.position_bits();
    let mut bits = BitCursor::new(&mut buf);
    codec.read(&mut bits);
    (written, bits.position_bits())
}

proptest! {
    #[test]
    fn i64_roundtrips(x: i64) {
        prop_assert_eq!(roundtrip(&I64Codec, &x), x);
    }

    #[test]
    fn i64_preserves_order(a: i64, b: i64) {
        prop_assume!(a < b);
        let ea = encode_to_vec(&I64Codec, &a).unwrap();
        let eb = encode_to_vec(&I64Codec, &b).unwrap();
        prop_assert!(ea < eb);
    }

    #[test]
    fn f64_roundtrips_bits(x: f64) {
        prop_assert_eq!(roundtrip(&F64Codec, &x).to_bits(), x.to_bits());
    }

    #[test]
    fn f64_preserves_order(a: f64, b: f64) {
        prop_assume!(a < b);
        let ea = encode_to_vec(&F64Codec, &a).unwrap();
        let eb = encode_to_vec(&F64Codec, &b).unwrap();
        prop_assert!(ea < eb);
    }

    #[test]
    fn latin1_roundtrips(s in "[ -~]{0,12}") {
        let codec = Latin1Codec::new();
        prop_assert_eq!(roundtrip(&codec, &s.clone()), s);
    }

    #[test]
    fn latin1_preserves_order(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
        prop_assume!(a < b);
        let codec = Latin1Codec::new();
        let ea = encode_to_vec(&codec, &a).unwrap();
        let eb = encode_to_vec(&codec, &b).unwrap();
        prop_assert!(ea < eb);
    }

    #[test]
    fn latin1_is_self_delimiting(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
        prop_assume!(a != b);
        let codec = Latin1Codec::new();
        let ea = encode_to_vec(&codec, &a).unwrap();
        let eb = encode_to_vec(&codec, &b).unwrap();
        // With zero-filled buffers, a strict bit-level prefix would surface
        // as a byte-level prefix. Neither direction may hold.
        prop_assert!(!(ea.len() < eb.len() && eb.starts_with(&ea)));
        prop_assert!(!(eb.len() < ea.len() && ea.starts_with(&eb)));
    }

    #[test]
    fn null_free_roundtrips(s in "[\\x01-\\x7f]{0,12}") {
        let codec = NullFreeStringCodec;
        prop_assert_eq!(roundtrip(&codec, &s.clone()), s);
    }

    #[test]
    fn byte_arrays_roundtrip(xs: Vec<u8>) {
        prop_assert_eq!(roundtrip(&ByteArrayCodec, &xs.clone()), xs);
    }

    #[test]
    fn lists_roundtrip_with_exact_size(xs: Vec<i64>) {
        let codec = ListCodec::new(I64Codec);
        prop_assert_eq!(roundtrip(&codec, &xs.clone()), xs.clone());
        let (written, read) = exact_bits(&codec, &xs);
        prop_assert_eq!(written, codec.size_bits(&xs));
        prop_assert_eq!(read, written);
    }

    #[test]
    fn optionals_roundtrip(x: Option<i64>) {
        let codec = Optional::new(I64Codec);
        prop_assert_eq!(roundtrip(&codec, &x), x);
    }

    #[test]
    fn tuple_keys_roundtrip(s in "[a-z]{0,8}", x: i64) {
        let codec = zip(Latin1Codec::new(), I64Codec);
        let key = (s, x);
        prop_assert_eq!(roundtrip(&codec, &key.clone()), key.clone());
        let (written, read) = exact_bits(&codec, &key);
        prop_assert_eq!(written, codec.size_bits(&key));
        prop_assert_eq!(read, written);
    }

    #[test]
    fn tuple_keys_preserve_order(a in "[a-z]{0,4}", x: i64, b in "[a-z]{0,4}", y: i64) {
        let ka = (a, x);
        let kb = (b, y);
        prop_assume!(ka < kb);
        let codec = zip(Latin1Codec::new(), I64Codec);
        let ea = encode_to_vec(&codec, &ka).unwrap();
        let eb = encode_to_vec(&codec, &kb).unwrap();
        prop_assert!(ea < eb);
    }

    #[test]
    fn successor_is_plus_one(offset in 0usize..8, x: u32) {
        // The 32-bit range starts at an arbitrary sub-byte offset, so all
        // three carry phases of the walk get exercised.
        let mut buf = vec![0u8; 6];
        let mut bits = BitCursor::new(&mut buf);
        bits.advance_bits(offset);
        let mark = bits.mark();
        bits.write_u32(x);
        let overflowed = bits.increment_from_mark(mark);

        prop_assert_eq!(overflowed, x == u32::MAX);
        bits.reset(mark);
        prop_assert_eq!(bits.read_u32(), x.wrapping_add(1));
    }
}
