//! Codec combinators: tuple concatenation, optional values, value
//! transforms, and self-delimiting lists.

use std::marker::PhantomData;

use crate::{codec::Codec, cursor::BitCursor, errors::WriteError};

/// Concatenates two codecs into a codec for 2-tuples: the left encoding is
/// emitted first, then the right. This is the mechanism for composite keys.
///
/// The result is order-preserving iff both components are and the left one is
/// fixed-length or self-delimiting, so the left/right boundary is unambiguous.
pub fn zip<A: Codec, B: Codec>(left: A, right: B) -> Zip<A, B> {
    Zip { left, right }
}

/// See [zip].
#[derive(Debug, Clone, Copy)]
pub struct Zip<A, B> {
    left: A,
    right: B,
}

impl<A: Codec, B: Codec> Codec for Zip<A, B> {
    type Value = (A::Value, B::Value);

    fn maximum_size_bits(&self) -> Option<usize> {
        match (self.left.maximum_size_bits(), self.right.maximum_size_bits()) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        }
    }

    fn size_bits(&self, x: &Self::Value) -> usize {
        self.left.size_bits(&x.0) + self.right.size_bits(&x.1)
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &Self::Value) -> Result<(), WriteError> {
        self.left.write(bits, &x.0)?;
        self.right.write(bits, &x.1)
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> Self::Value {
        let a = self.left.read(bits);
        let b = self.right.read(bits);
        (a, b)
    }
}

/// One presence bit, then the payload if present. Absent sorts before any
/// present value.
#[derive(Debug, Clone, Copy)]
pub struct Optional<C> {
    inner: C,
}

impl<C> Optional<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Codec> Codec for Optional<C> {
    type Value = Option<C::Value>;

    fn maximum_size_bits(&self) -> Option<usize> {
        self.inner.maximum_size_bits().map(|n| n + 1)
    }

    fn size_bits(&self, x: &Self::Value) -> usize {
        1 + match x {
            Some(inner) => self.inner.size_bits(inner),
            None => 0,
        }
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &Self::Value) -> Result<(), WriteError> {
        match x {
            Some(inner) => {
                bits.write_bool(true);
                self.inner.write(bits, inner)
            }
            None => {
                bits.write_bool(false);
                Ok(())
            }
        }
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> Self::Value {
        if bits.read_bool() {
            Some(self.inner.read(bits))
        } else {
            None
        }
    }
}

/// Bidirectional value transform over an existing codec, built with
/// [Codec::map]. Size and order properties of the parent carry over exactly.
pub struct Mapped<C, U, F, G> {
    parent: C,
    into: F,
    from: G,
    _value: PhantomData<fn(U) -> U>,
}

impl<C, U, F, G> Mapped<C, U, F, G> {
    pub(crate) fn new(parent: C, into: F, from: G) -> Self {
        Self {
            parent,
            into,
            from,
            _value: PhantomData,
        }
    }
}

impl<C, U, F, G> Codec for Mapped<C, U, F, G>
where
    C: Codec,
    F: Fn(&U) -> C::Value,
    G: Fn(C::Value) -> U,
{
    type Value = U;

    fn maximum_size_bits(&self) -> Option<usize> {
        self.parent.maximum_size_bits()
    }

    fn size_bits(&self, x: &U) -> usize {
        self.parent.size_bits(&(self.into)(x))
    }

    fn write(&self, bits: &mut BitCursor<'_>, x: &U) -> Result<(), WriteError> {
        self.parent.write(bits, &(self.into)(x))
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> U {
        (self.from)(self.parent.read(bits))
    }
}

/// Variable-length list: each element is preceded by a 1 continuation bit and
/// the whole list is closed by a 0 bit, so encodings are self-delimiting and
/// no list encoding is a strict prefix of another.
#[derive(Debug, Clone, Copy)]
pub struct ListCodec<C> {
    element: C,
}

impl<C> ListCodec<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Codec> Codec for ListCodec<C> {
    type Value = Vec<C::Value>;

    fn maximum_size_bits(&self) -> Option<usize> {
        None
    }

    fn size_bits(&self, xs: &Self::Value) -> usize {
        let elements: usize = xs.iter().map(|x| self.element.size_bits(x)).sum();
        elements + xs.len() + 1
    }

    fn write(&self, bits: &mut BitCursor<'_>, xs: &Self::Value) -> Result<(), WriteError> {
        for x in xs {
            bits.write_bool(true);
            self.element.write(bits, x)?;
        }
        bits.write_bool(false);
        Ok(())
    }

    fn read(&self, bits: &mut BitCursor<'_>) -> Self::Value {
        let mut xs = Vec::new();
        while bits.read_bool() {
            xs.push(self.element.read(bits));
        }
        xs
    }
}
