//! Bit-addressable cursor over a caller-owned byte region.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first
//! byte, so a value written as raw big-endian bits compares under unsigned
//! byte-wise comparison exactly as it compares numerically.
//!
//! The cursor never allocates. Callers size the region up front from
//! [crate::codec::Codec::size_bits]; an access past the end of the region
//! panics.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(0);

/// Sequential bit-precise reader/writer over a borrowed byte region.
pub struct BitCursor<'a> {
    data: &'a mut [u8],
    bit_pos: usize,
    epoch: u64,
}

/// A captured cursor position.
///
/// A mark is only meaningful for the cursor that produced it: each cursor is
/// stamped with a fresh epoch, and using a mark with any other cursor panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    bit_pos: usize,
    epoch: u64,
}

impl<'a> BitCursor<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self {
            data,
            bit_pos: 0,
            epoch: NEXT_EPOCH.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Current position in bits from the start of the region.
    pub fn position_bits(&self) -> usize {
        self.bit_pos
    }

    /// Captures the current position for a later [BitCursor::reset] or
    /// [BitCursor::increment_from_mark].
    pub fn mark(&self) -> Mark {
        Mark {
            bit_pos: self.bit_pos,
            epoch: self.epoch,
        }
    }

    /// Rewinds to a previously captured position.
    pub fn reset(&mut self, mark: Mark) {
        self.check_epoch(mark);
        self.bit_pos = mark.bit_pos;
    }

    fn check_epoch(&self, mark: Mark) {
        assert!(
            mark.epoch == self.epoch,
            "mark used with a different cursor or after its region was reassigned"
        );
    }

    pub fn advance_bits(&mut self, n: usize) {
        self.bit_pos += n;
    }

    pub fn advance_bytes(&mut self, n: usize) {
        self.bit_pos += n * 8;
    }

    fn read_bits(&mut self, n: usize) -> u64 {
        let mut value = 0u64;
        for _ in 0..n {
            let byte_index = self.bit_pos / 8;
            let bit_index = self.bit_pos % 8;
            let bit = (self.data[byte_index] >> (7 - bit_index)) & 1;
            value = (value << 1) | bit as u64;
            self.bit_pos += 1;
        }
        value
    }

    fn write_bits(&mut self, value: u64, n: usize) {
        for i in (0..n).rev() {
            let byte_index = self.bit_pos / 8;
            let bit_index = self.bit_pos % 8;
            let mask = 1u8 << (7 - bit_index);
            if (value >> i) & 1 != 0 {
                self.data[byte_index] |= mask;
            } else {
                self.data[byte_index] &= !mask;
            }
            self.bit_pos += 1;
        }
    }

    pub fn read_bool(&mut self) -> bool {
        self.read_bits(1) == 1
    }

    pub fn read_u8(&mut self) -> u8 {
        self.read_bits(8) as u8
    }

    pub fn read_u32(&mut self) -> u32 {
        self.read_bits(32) as u32
    }

    pub fn read_u64(&mut self) -> u64 {
        self.read_bits(64)
    }

    pub fn write_bool(&mut self, x: bool) {
        self.write_bits(x as u64, 1);
    }

    pub fn write_u8(&mut self, x: u8) {
        self.write_bits(x as u64, 8);
    }

    pub fn write_u32(&mut self, x: u32) {
        self.write_bits(x as u64, 32);
    }

    pub fn write_u64(&mut self, x: u64) {
        self.write_bits(x, 64);
    }

    /// Zeroes every bit from the current position to the end of the region
    /// and leaves the position byte-aligned.
    ///
    /// Keys must be zero-filled before they reach the store, or the stray
    /// bits after the last value would corrupt byte-wise comparisons.
    pub fn zero_fill(&mut self) {
        let bit = self.bit_pos % 8;
        let mut byte = self.bit_pos / 8;
        if bit != 0 {
            self.data[byte] &= 0xFF << (8 - bit);
            byte += 1;
        }
        for b in &mut self.data[byte..] {
            *b = 0;
        }
        self.bit_pos = byte * 8;
    }

    /// Treats the bits `[mark, position)` as one big-endian unsigned integer
    /// and adds 1 in place. Returns `true` iff the range was all-ones: the
    /// pattern has no successor of the same length and wraps to all-zeroes.
    ///
    /// The walk goes backward in up to three phases: the trailing partial
    /// byte below the current sub-byte offset, the whole bytes in between,
    /// and the leading partial bits of the mark's own byte.
    pub fn increment_from_mark(&mut self, mark: Mark) -> bool {
        self.check_epoch(mark);
        let start = mark.bit_pos;
        let end = self.bit_pos;
        debug_assert!(start <= end, "mark is ahead of the cursor");
        if start == end {
            return true;
        }

        let start_byte = start / 8;
        let start_bit = start % 8;
        let end_bit = end % 8;
        let mut byte = if end_bit == 0 { end / 8 - 1 } else { end / 8 };

        loop {
            // In-range bits of this byte. The range is contiguous, so the
            // mask is too, and carrying in at its lowest bit cannot escape
            // past its highest bit unless the whole field is already ones.
            let mut mask = 0xFFu8;
            if byte == start_byte {
                mask &= 0xFF >> start_bit;
            }
            if end_bit != 0 && byte == end / 8 {
                mask &= 0xFF << (8 - end_bit);
            }

            let field = self.data[byte] & mask;
            if field == mask {
                self.data[byte] &= !mask;
            } else {
                let carry = 1u8 << mask.trailing_zeros();
                self.data[byte] = (self.data[byte] & !mask) | (field + carry);
                return false;
            }

            if byte == start_byte {
                return true;
            }
            byte -= 1;
        }
    }
}
