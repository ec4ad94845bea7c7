//! Authenticators: the signature proof attached to a transaction.

use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use crate::codec::{self, CodecError, Decode, Decoder, Encode, Encoder};
use crate::config::{
    ED25519_PUBLIC_KEY_LENGTH, HASH_LENGTH, SECP256K1_PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};
use crate::crypto::keys::{KeyError, SignatureScheme};
use crate::types::AccountAddress;

/// Scheme, public key, and a signature over the transaction hash.
///
/// Key and signature lengths are fixed by the scheme, so on the wire
/// neither carries a length prefix:
///
/// ```text
/// scheme     ULEB128 variant tag
/// public_key 32 bytes (Ed25519) | 33 bytes (Secp256k1, compressed)
/// signature  64 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthenticatorFields")]
pub struct Authenticator {
    scheme: SignatureScheme,
    public_key: Vec<u8>,
    signature: Vec<u8>,
}

impl Authenticator {
    /// Checks both byte fields against the scheme's lengths.
    pub fn new(
        scheme: SignatureScheme,
        public_key: Vec<u8>,
        signature: Vec<u8>,
    ) -> Result<Self, TransactionError> {
        if public_key.len() != scheme.public_key_len() {
            return Err(TransactionError::InvalidAuthenticator(format!(
                "{scheme} public key must be {} bytes, got {}",
                scheme.public_key_len(),
                public_key.len()
            )));
        }
        if signature.len() != scheme.signature_len() {
            return Err(TransactionError::InvalidAuthenticator(format!(
                "{scheme} signature must be {} bytes, got {}",
                scheme.signature_len(),
                signature.len()
            )));
        }
        Ok(Self {
            scheme,
            public_key,
            signature,
        })
    }

    pub fn ed25519(
        public_key: [u8; ED25519_PUBLIC_KEY_LENGTH],
        signature: [u8; SIGNATURE_LENGTH],
    ) -> Self {
        Self {
            scheme: SignatureScheme::Ed25519,
            public_key: public_key.to_vec(),
            signature: signature.to_vec(),
        }
    }

    pub fn secp256k1(
        public_key: [u8; SECP256K1_PUBLIC_KEY_LENGTH],
        signature: [u8; SIGNATURE_LENGTH],
    ) -> Self {
        Self {
            scheme: SignatureScheme::Secp256k1,
            public_key: public_key.to_vec(),
            signature: signature.to_vec(),
        }
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The address the public key derives to locally.
    pub fn signer_address(&self) -> AccountAddress {
        self.scheme.derive_address(&self.public_key)
    }

    /// Checks that the signature covers `hash` under the embedded key.
    ///
    /// Nodes do this anyway; calling it locally is optional.
    pub fn verify(&self, hash: &[u8; HASH_LENGTH]) -> Result<(), TransactionError> {
        self.scheme
            .verify(&self.public_key, hash, &self.signature)
            .map_err(|e| match e {
                KeyError::VerificationFailed => TransactionError::SignatureMismatch,
                other => TransactionError::InvalidAuthenticator(other.to_string()),
            })
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        codec::to_bytes(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        codec::from_bytes(bytes)
    }
}

/// Unchecked serde shape; every deserialized value goes through
/// [`Authenticator::new`].
#[derive(Deserialize)]
struct AuthenticatorFields {
    scheme: SignatureScheme,
    public_key: Vec<u8>,
    signature: Vec<u8>,
}

impl TryFrom<AuthenticatorFields> for Authenticator {
    type Error = TransactionError;

    fn try_from(fields: AuthenticatorFields) -> Result<Self, Self::Error> {
        Self::new(fields.scheme, fields.public_key, fields.signature)
    }
}

impl Encode for SignatureScheme {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_variant_tag(self.variant_tag());
        Ok(())
    }
}

impl Decode for SignatureScheme {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let tag = decoder.read_variant_tag()?;
        SignatureScheme::from_variant_tag(tag).ok_or(CodecError::UnknownVariant {
            type_name: "SignatureScheme",
            tag,
        })
    }
}

impl Encode for Authenticator {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        self.scheme.encode_to(encoder)?;
        encoder.write_fixed_bytes(&self.public_key);
        encoder.write_fixed_bytes(&self.signature);
        Ok(())
    }
}

impl Decode for Authenticator {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let scheme = SignatureScheme::decode_from(decoder)?;
        let public_key = decoder.read_fixed_bytes(scheme.public_key_len())?;
        let signature = decoder.read_fixed_bytes(scheme.signature_len())?;
        Ok(Self {
            scheme,
            public_key,
            signature,
        })
    }
}
