//! [`Encode`]/[`Decode`] for the primitive and container types.

use super::{CodecError, Decode, Decoder, Encode, Encoder};

macro_rules! impl_uint {
    ($($ty:ty => $write:ident, $read:ident);* $(;)?) => {
        $(
            impl Encode for $ty {
                fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
                    encoder.$write(*self);
                    Ok(())
                }
            }

            impl Decode for $ty {
                fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
                    decoder.$read()
                }
            }
        )*
    };
}

impl_uint! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    u128 => write_u128, read_u128;
}

impl Encode for bool {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_bool(*self);
        Ok(())
    }
}

impl Decode for bool {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        decoder.read_bool()
    }
}

impl Encode for str {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_bytes(self.as_bytes())
    }
}

impl Encode for String {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        self.as_str().encode_to(encoder)
    }
}

impl Decode for String {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let bytes = decoder.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| CodecError::malformed(format!("invalid utf-8: {e}")))
    }
}

impl<T: Encode> Encode for [T] {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_seq(self)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_seq(self)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        decoder.read_seq()
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_fixed_bytes(self);
        Ok(())
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        decoder.read_array()
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        match self {
            None => {
                encoder.write_variant_tag(0);
                Ok(())
            }
            Some(value) => {
                encoder.write_variant_tag(1);
                value.encode_to(encoder)
            }
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        match decoder.read_variant_tag()? {
            0 => Ok(None),
            1 => T::decode_from(decoder).map(Some),
            tag => Err(CodecError::UnknownVariant {
                type_name: "Option",
                tag,
            }),
        }
    }
}
