//! String and byte-array codecs.
//!
//! Two framing styles exist. The continuation-bit style (one flag bit per
//! element, 0-bit terminator) handles arbitrary element values, including
//! zero bytes, at a 1-bit-per-element cost. The null-terminator style stores
//! raw bytes at no per-byte cost but rejects embedded null bytes.

use crate::{codec::Codec, cursor::BitCursor, errors::WriteError};

/// Latin-1 string codec with an optional declared maximum length: one
/// continuation bit plus 8 data bits per character, closed by a 0 bit.
///
/// Characters above U+00FE are replaced by `'?'` on write. This keeps the
/// codec compatible with previously written keys; use [NullFreeStringCodec]
/// when lossless text is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1Codec {
    max_len: Option<usize>,
}

impl Latin1Codec {
    pub fn new() -> Self {
        Self { max_len: None }
    }

    /// Writing a string with more characters than `max_len` fails with
    /// [WriteError::StringTooLong].
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
        }
    }
}

impl Codec for Latin1Codec {
    type Value = String;

    fn maximum_size_bits(&self) -> Option<usize> {
        self.max_len.map(|n| n * 9 + 1)
    }

    fn size_bits(&self, x: &String) -> usize {
        x.chars().count() * 9 + 1
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &String) -> Result<(), WriteError> {
        if let Some(max) = self.max_len {
            let len = x.chars().count();
            if len > max {
                return Err(WriteError::StringTooLong { len, max });
            }
        }

        for c in x.chars() {
            bits.write_bool(true);
            bits.write_u8(if (c as u32) < 255 { c as u8 } else { b'?' });
        }
        bits.write_bool(false);
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> String {
        let mut s = String::new();
        while bits.read_bool() {
            s.push(char::from(bits.read_u8()));
        }
        s
    }
}

/// UTF-8 string codec: raw bytes closed by a single zero byte. Strings
/// containing an embedded null byte are rejected at write time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFreeStringCodec;

impl Codec for NullFreeStringCodec {
    type Value = String;

    fn maximum_size_bits(&self) -> Option<usize> {
        None
    }

    fn size_bits(&self, x: &String) -> usize {
        x.len() * 8 + 8
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &String) -> Result<(), WriteError> {
        for (at, b) in x.bytes().enumerate() {
            if b == 0 {
                return Err(WriteError::NullByte { at });
            }
            bits.write_u8(b);
        }
        bits.write_u8(0);
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> String {
        let mut bytes = Vec::new();
        loop {
            let b = bits.read_u8();
            if b == 0 {
                break;
            }
            bytes.push(b);
        }
        String::from_utf8(bytes).expect("null-free string bytes were not valid UTF-8")
    }
}

/// Arbitrary byte-array codec with continuation-bit framing, so zero bytes
/// are representable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteArrayCodec;

impl Codec for ByteArrayCodec {
    type Value = Vec<u8>;

    fn maximum_size_bits(&self) -> Option<usize> {
        None
    }

    fn size_bits(&self, xs: &Vec<u8>) -> usize {
        xs.len() * 9 + 1
    }

    fn write(&self, bits: &mut BitCursor<'_>, xs: &Vec<u8>) -> Result<(), WriteError> {
        for &x in xs {
            bits.write_bool(true);
            bits.write_u8(x);
        }
        bits.write_bool(false);
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> Vec<u8> {
        let mut xs = Vec::new();
        while bits.read_bool() {
            xs.push(bits.read_u8());
        }
        xs
    }
}
