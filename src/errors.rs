//! Error types reported at encode time.
//!
//! Only domain-rejected input is a recoverable error. Contract violations
//! (a mark used with the wrong cursor, a read applied to bytes this crate
//! never wrote) are programmer errors and panic instead.

use thiserror::Error;

/// Errors produced when a value cannot be represented by a codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// String is longer than the codec's declared maximum length.
    #[error("string of {len} chars exceeds the maximum length of {max}")]
    StringTooLong { len: usize, max: usize },
    /// String contains a null byte, which is reserved as the terminator.
    #[error("string contains a null byte at offset {at}")]
    NullByte { at: usize },
}
