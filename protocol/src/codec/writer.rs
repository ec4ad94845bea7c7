//! The encoding half of the codec.

use super::{CodecError, Encode, UintWidth, MAX_SEQUENCE_LENGTH};

/// Append-only canonical byte writer.
///
/// Fixed-width writes are infallible. Anything carrying a length can fail,
/// because lengths above [`MAX_SEQUENCE_LENGTH`] have no canonical form.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -----------------------------------------------------------------------
    // Fixed-width integers
    // -----------------------------------------------------------------------

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u128(&mut self, value: u128) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Writes `value` at `width`, refusing to truncate.
    ///
    /// Nothing is written when the value does not fit.
    pub fn write_uint(&mut self, value: u128, width: UintWidth) -> Result<(), CodecError> {
        width.check(value)?;
        let le = value.to_le_bytes();
        self.buf.extend_from_slice(&le[..width.byte_len()]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Variable-length framing
    // -----------------------------------------------------------------------

    /// ULEB128: seven payload bits per byte, high bit set on every byte but
    /// the last.
    fn write_uleb128(&mut self, mut value: u32) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    /// Writes a sequence length prefix.
    pub fn write_length(&mut self, len: usize) -> Result<(), CodecError> {
        let len = len as u64;
        if len > MAX_SEQUENCE_LENGTH {
            return Err(CodecError::IntegerOverflow {
                value: len as u128,
                width: UintWidth::U32,
            });
        }
        self.write_uleb128(len as u32);
        Ok(())
    }

    /// Writes the tag that selects a variant of a tagged union.
    pub fn write_variant_tag(&mut self, tag: u32) {
        self.write_uleb128(tag);
    }

    /// Writes a length-prefixed byte string.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.write_length(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Writes bytes with no prefix. The reader must know the length.
    pub fn write_fixed_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a length-prefixed sequence, preserving element order.
    pub fn write_seq<T: Encode>(&mut self, items: &[T]) -> Result<(), CodecError> {
        self.write_length(items.len())?;
        for item in items {
            item.encode_to(self)?;
        }
        Ok(())
    }

    /// Encodes any [`Encode`] value in place.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), CodecError> {
        value.encode_to(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uleb(value: u32) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_uleb128(value);
        enc.into_bytes()
    }

    #[test]
    fn uleb128_known_vectors() {
        assert_eq!(uleb(0), vec![0x00]);
        assert_eq!(uleb(1), vec![0x01]);
        assert_eq!(uleb(127), vec![0x7F]);
        assert_eq!(uleb(128), vec![0x80, 0x01]);
        assert_eq!(uleb(300), vec![0xAC, 0x02]);
        assert_eq!(uleb(16_384), vec![0x80, 0x80, 0x01]);
        assert_eq!(uleb(u32::MAX), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn integers_are_little_endian() {
        let mut enc = Encoder::new();
        enc.write_u16(0x0102);
        enc.write_u32(0x0304_0506);
        enc.write_u64(1);
        assert_eq!(
            enc.as_bytes(),
            &[0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 1, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn write_uint_matches_typed_writers() {
        let mut typed = Encoder::new();
        typed.write_u64(1_000_000);

        let mut wide = Encoder::new();
        wide.write_uint(1_000_000, UintWidth::U64).unwrap();

        assert_eq!(typed.as_bytes(), wide.as_bytes());
    }

    #[test]
    fn write_uint_overflow_writes_nothing() {
        let mut enc = Encoder::new();
        let err = enc
            .write_uint(u64::MAX as u128 + 1, UintWidth::U64)
            .unwrap_err();
        assert!(matches!(err, CodecError::IntegerOverflow { .. }));
        assert!(enc.is_empty());
    }

    #[test]
    fn bytes_are_length_prefixed() {
        let mut enc = Encoder::new();
        enc.write_bytes(&[0x01, 0x02]).unwrap();
        assert_eq!(enc.as_bytes(), &[0x02, 0x01, 0x02]);
    }

    #[test]
    fn fixed_bytes_have_no_prefix() {
        let mut enc = Encoder::new();
        enc.write_fixed_bytes(&[0xAA; 4]);
        assert_eq!(enc.len(), 4);
    }
}
