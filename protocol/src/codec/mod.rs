//! # Canonical Codec
//!
//! A BCS-style binary encoding: deterministic, prefix-free, no padding, and
//! no self-description. The bytes a value encodes to are the only bytes it
//! can encode to, which is what lets a transaction hash computed here match
//! the one a node computes from the wire.
//!
//! ## Rules
//!
//! | Kind                | Layout                                              |
//! |---------------------|-----------------------------------------------------|
//! | `u8`..`u128`        | little-endian at the declared width                 |
//! | `bool`              | `0x00` or `0x01`, anything else is rejected         |
//! | bytes / `String`    | ULEB128 length, then the raw bytes                  |
//! | `Vec<T>`            | ULEB128 element count, then each element in order   |
//! | `Option<T>`         | tag `0` for `None`, tag `1` + payload for `Some`    |
//! | `[u8; N]`           | the `N` raw bytes, no prefix                        |
//! | tagged union        | ULEB128 variant tag, then the variant payload       |
//!
//! Lengths and tags are capped at `u32::MAX`, matching BCS.
//!
//! ## Untrusted input
//!
//! The [`Decoder`] never trusts a length prefix. Every declared length is
//! checked against the bytes that remain before anything is allocated, so a
//! hostile `0xFFFFFFFF0F` prefix costs five bytes of input and nothing more.

mod error;
mod impls;
mod reader;
mod writer;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::CodecError;
pub use reader::Decoder;
pub use writer::Encoder;

/// Largest length or variant tag the codec will emit or accept.
pub const MAX_SEQUENCE_LENGTH: u64 = u32::MAX as u64;

/// Largest number of bytes a canonical ULEB128 `u32` can occupy.
pub(crate) const MAX_ULEB128_BYTES: usize = 5;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A value with a canonical byte representation.
pub trait Encode {
    /// Appends the canonical encoding of `self` to `encoder`.
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError>;
}

/// A value that can be rebuilt from its canonical byte representation.
pub trait Decode: Sized {
    /// Reads one value from the front of `decoder`.
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        (**self).encode_to(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        (**self).encode_to(encoder)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        T::decode_from(decoder).map(Box::new)
    }
}

/// Encodes `value` into a fresh byte vector.
///
/// # Example
///
/// ```
/// use rooch_tx::codec::to_bytes;
///
/// assert_eq!(to_bytes(&7u16).unwrap(), vec![0x07, 0x00]);
/// assert_eq!(to_bytes(&vec![0xAAu8, 0xBB]).unwrap(), vec![0x02, 0xAA, 0xBB]);
/// ```
pub fn to_bytes<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut encoder = Encoder::new();
    value.encode_to(&mut encoder)?;
    Ok(encoder.into_bytes())
}

/// Decodes a single `T` that must span the whole of `bytes`.
///
/// Leftover bytes are a [`CodecError::MalformedEncoding`]: a canonical
/// encoding has exactly one length.
pub fn from_bytes<T: Decode>(bytes: &[u8]) -> Result<T, CodecError> {
    let mut decoder = Decoder::new(bytes);
    let value = T::decode_from(&mut decoder)?;
    decoder.finish()?;
    Ok(value)
}

/// Decodes a `T` from the front of `bytes`, returning it with the number of
/// bytes consumed. Used for wire layouts that concatenate several values.
pub fn from_bytes_prefix<T: Decode>(bytes: &[u8]) -> Result<(T, usize), CodecError> {
    let mut decoder = Decoder::new(bytes);
    let value = T::decode_from(&mut decoder)?;
    Ok((value, decoder.position()))
}

// ---------------------------------------------------------------------------
// UintWidth
// ---------------------------------------------------------------------------

/// The fixed widths the codec encodes unsigned integers at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    U128,
}

impl UintWidth {
    /// Width in bytes on the wire.
    pub fn byte_len(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
            Self::U128 => 16,
        }
    }

    /// Largest value representable at this width.
    pub fn max_value(self) -> u128 {
        match self {
            Self::U8 => u8::MAX as u128,
            Self::U16 => u16::MAX as u128,
            Self::U32 => u32::MAX as u128,
            Self::U64 => u64::MAX as u128,
            Self::U128 => u128::MAX,
        }
    }

    /// Fails with [`CodecError::IntegerOverflow`] if `value` does not fit.
    pub fn check(self, value: u128) -> Result<(), CodecError> {
        if value > self.max_value() {
            return Err(CodecError::IntegerOverflow { value, width: self });
        }
        Ok(())
    }

    /// Narrows a wide value to `u64`, checking against this width first.
    ///
    /// Handy for numbers that arrive from outside the type system (CLI
    /// arguments, JSON) and must land in a `u64` field.
    pub fn narrow_u64(self, value: u128) -> Result<u64, CodecError> {
        self.check(value)?;
        UintWidth::U64.check(value)?;
        Ok(value as u64)
    }
}

impl fmt::Display for UintWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::U128 => write!(f, "u128"),
        }
    }
}
