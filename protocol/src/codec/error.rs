//! Error types for the canonical codec.
//!
//! Every encode or decode that can fail returns a [`CodecError`]. The
//! variants are deliberately few: the codec either refuses to represent a
//! value, or refuses to trust a byte stream.

use thiserror::Error;

use super::UintWidth;

/// Errors produced by [`super::Encoder`] and [`super::Decoder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A value does not fit the fixed width it is being encoded at.
    #[error("integer overflow: {value} does not fit in {width}")]
    IntegerOverflow {
        /// The offending value, widened to `u128`.
        value: u128,
        /// The declared width.
        width: UintWidth,
    },

    /// A variant tag that the target type does not define.
    #[error("unknown variant tag {tag} for {type_name}")]
    UnknownVariant {
        /// Name of the tagged union being decoded.
        type_name: &'static str,
        /// The tag read from the wire.
        tag: u32,
    },

    /// The input ended before a declared length or fixed-width field.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// Bytes the next read required.
        needed: usize,
        /// Bytes actually left in the input.
        remaining: usize,
    },

    /// The bytes are present but do not form a canonical encoding.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEncoding(reason.into())
    }
}
