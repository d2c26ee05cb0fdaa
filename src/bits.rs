//! Bit and byte helpers shared by the codecs: size conversion, the sign-swap
//! transform for signed integers and the bit-rotation transform for IEEE
//! floats, both of which make the encoded bytes sort like the source values.

/// Number of whole bytes needed to hold `bits` bits.
pub fn bits_to_bytes(bits: usize) -> usize {
    bits / 8 + if bits % 8 != 0 { 1 } else { 0 }
}

/// Flips the sign bit so that the negative range sorts before the
/// non-negative range under unsigned comparison.
pub fn swap_sign_i32(x: i32) -> i32 {
    x ^ i32::MIN
}

/// See [swap_sign_i32].
pub fn swap_sign_i64(x: i64) -> i64 {
    x ^ i64::MIN
}

// The float transforms are the sign-magnitude trick from HBase's OrderedBytes
// (and Orderly before that): negatives have all bits complemented, positives
// only the sign bit, so the raw-bit ordering matches the numeric ordering.
// NaN and the infinities are ordinary bit patterns with a deterministic slot.

/// Maps `f32` bits to unsigned bits whose byte-wise order matches numeric order.
pub fn order_f32(x: f32) -> u32 {
    let l = x.to_bits() as i32;
    (l ^ ((l >> 31) | i32::MIN)) as u32
}

/// Inverse of [order_f32].
pub fn unorder_f32(bits: u32) -> f32 {
    let l = bits as i32;
    f32::from_bits((l ^ ((!l >> 31) | i32::MIN)) as u32)
}

/// Maps `f64` bits to unsigned bits whose byte-wise order matches numeric order.
pub fn order_f64(x: f64) -> u64 {
    let l = x.to_bits() as i64;
    (l ^ ((l >> 63) | i64::MIN)) as u64
}

/// Inverse of [order_f64].
pub fn unorder_f64(bits: u64) -> f64 {
    let l = bits as i64;
    f64::from_bits((l ^ ((!l >> 63) | i64::MIN)) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_to_bytes() {
        assert_eq!(bits_to_bytes(0), 0);
        assert_eq!(bits_to_bytes(1), 1);
        assert_eq!(bits_to_bytes(8), 1);
        assert_eq!(bits_to_bytes(9), 2);
        assert_eq!(bits_to_bytes(64), 8);
    }

    #[test]
    fn test_swap_sign_orders_i32() {
        let xs = [i32::MIN, -1337, -1, 0, 1, 1337, i32::MAX];
        for w in xs.windows(2) {
            assert!((swap_sign_i32(w[0]) as u32) < (swap_sign_i32(w[1]) as u32));
        }
    }

    #[test]
    fn test_swap_sign_roundtrips() {
        for x in [i64::MIN, -1, 0, 42, i64::MAX] {
            assert_eq!(swap_sign_i64(swap_sign_i64(x)), x);
        }
    }

    #[test]
    fn test_order_f64_matches_numeric_order() {
        let xs = [
            f64::NEG_INFINITY,
            f64::MIN,
            -1.5,
            -f64::MIN_POSITIVE,
            -0.0,
            0.0,
            f64::MIN_POSITIVE,
            1.5,
            f64::MAX,
            f64::INFINITY,
        ];
        for w in xs.windows(2) {
            assert!(order_f64(w[0]) < order_f64(w[1]), "{} vs {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_order_f64_nan_is_deterministic() {
        // NaN is just another bit pattern: the standard positive quiet NaN
        // lands above +Inf, and it always lands in the same place.
        assert_eq!(order_f64(f64::NAN), order_f64(f64::NAN));
        assert!(order_f64(f64::NAN) > order_f64(f64::INFINITY));
    }

    #[test]
    fn test_order_f32_roundtrips() {
        for x in [f32::NEG_INFINITY, -0.0, 0.0, 1.25, f32::MAX, f32::INFINITY] {
            assert_eq!(unorder_f32(order_f32(x)).to_bits(), x.to_bits());
        }
        assert!(unorder_f32(order_f32(f32::NAN)).is_nan());
    }
}
