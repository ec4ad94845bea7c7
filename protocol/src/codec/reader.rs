//! The decoding half of the codec.

use super::{CodecError, Decode, MAX_SEQUENCE_LENGTH, MAX_ULEB128_BYTES};

/// Cursor over an untrusted canonical byte stream.
///
/// Every read checks the remaining input first; nothing here indexes past
/// the end of the slice or allocates on the strength of a length prefix
/// alone.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fails unless the whole input has been consumed.
    pub fn finish(&self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::malformed(format!("{n} trailing bytes"))),
        }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::TruncatedInput { needed, remaining });
        }
        let slice = &self.input[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Fixed-width integers
    // -----------------------------------------------------------------------

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        self.take_array().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.take_array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.take_array().map(u64::from_le_bytes)
    }

    pub fn read_u128(&mut self) -> Result<u128, CodecError> {
        self.take_array().map(u128::from_le_bytes)
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::malformed(format!(
                "invalid bool byte 0x{other:02x}"
            ))),
        }
    }

    // -----------------------------------------------------------------------
    // Variable-length framing
    // -----------------------------------------------------------------------

    /// Reads a canonical ULEB128 value no larger than `u32::MAX`.
    ///
    /// Rejects overlong encodings (a trailing zero group) so that every
    /// value has exactly one byte form.
    fn read_uleb128(&mut self) -> Result<u32, CodecError> {
        let mut value: u64 = 0;
        for i in 0..MAX_ULEB128_BYTES {
            let byte = self.read_u8()?;
            let digit = (byte & 0x7F) as u64;
            value |= digit << (7 * i);

            if byte & 0x80 == 0 {
                if i > 0 && digit == 0 {
                    return Err(CodecError::malformed("non-canonical ULEB128"));
                }
                if value > MAX_SEQUENCE_LENGTH {
                    return Err(CodecError::malformed(format!(
                        "ULEB128 value {value} exceeds u32"
                    )));
                }
                return Ok(value as u32);
            }
        }
        Err(CodecError::malformed("ULEB128 longer than 5 bytes"))
    }

    /// Reads a sequence length prefix.
    pub fn read_length(&mut self) -> Result<usize, CodecError> {
        self.read_uleb128().map(|len| len as usize)
    }

    /// Reads the tag of a tagged union.
    pub fn read_variant_tag(&mut self) -> Result<u32, CodecError> {
        self.read_uleb128()
    }

    /// Reads a length-prefixed byte string.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.read_length()?;
        self.take(len).map(<[u8]>::to_vec)
    }

    /// Reads exactly `len` bytes with no prefix.
    pub fn read_fixed_bytes(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        self.take(len).map(<[u8]>::to_vec)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        self.take_array()
    }

    /// Reads a length-prefixed sequence.
    ///
    /// Each element takes at least one byte, so the preallocation is
    /// bounded by what is left in the input rather than by the prefix.
    pub fn read_seq<T: Decode>(&mut self) -> Result<Vec<T>, CodecError> {
        let len = self.read_length()?;
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            items.push(T::decode_from(self)?);
        }
        Ok(items)
    }

    /// Decodes any [`Decode`] value.
    pub fn read<T: Decode>(&mut self) -> Result<T, CodecError> {
        T::decode_from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_integers() {
        let mut dec = Decoder::new(&[0x02, 0x01, 0x06, 0x05, 0x04, 0x03]);
        assert_eq!(dec.read_u16().unwrap(), 0x0102);
        assert_eq!(dec.read_u32().unwrap(), 0x0304_0506);
        assert!(dec.is_empty());
    }

    #[test]
    fn uleb128_decodes_multibyte() {
        let mut dec = Decoder::new(&[0xAC, 0x02]);
        assert_eq!(dec.read_length().unwrap(), 300);
    }

    #[test]
    fn uleb128_rejects_overlong_form() {
        // 0x80 0x00 is a padded zero.
        let mut dec = Decoder::new(&[0x80, 0x00]);
        assert!(matches!(
            dec.read_length(),
            Err(CodecError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn uleb128_rejects_values_above_u32() {
        let mut dec = Decoder::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x1F]);
        assert!(matches!(
            dec.read_length(),
            Err(CodecError::MalformedEncoding(_))
        ));

        let mut dec = Decoder::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert!(matches!(
            dec.read_length(),
            Err(CodecError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn uleb128_truncated_continuation() {
        let mut dec = Decoder::new(&[0x80]);
        assert_eq!(
            dec.read_length().unwrap_err(),
            CodecError::TruncatedInput {
                needed: 1,
                remaining: 0
            }
        );
    }

    #[test]
    fn oversized_length_prefix_is_truncation_not_allocation() {
        // Declares u32::MAX bytes, provides two.
        let mut dec = Decoder::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0xAA, 0xBB]);
        assert_eq!(
            dec.read_bytes().unwrap_err(),
            CodecError::TruncatedInput {
                needed: u32::MAX as usize,
                remaining: 2
            }
        );
    }

    #[test]
    fn oversized_element_count_fails_cleanly() {
        let mut dec = Decoder::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0x01]);
        let err = dec.read_seq::<u64>().unwrap_err();
        assert!(matches!(err, CodecError::TruncatedInput { .. }));
    }

    #[test]
    fn bool_rejects_other_bytes() {
        let mut dec = Decoder::new(&[0x02]);
        assert!(matches!(
            dec.read_bool(),
            Err(CodecError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn finish_reports_trailing_bytes() {
        let mut dec = Decoder::new(&[0x01, 0x02]);
        dec.read_u8().unwrap();
        assert!(dec.finish().is_err());
        dec.read_u8().unwrap();
        assert!(dec.finish().is_ok());
    }
}
