//! # Key Management
//!
//! Local keypairs for the two signature schemes an [`Authenticator`] can
//! carry. These are the in-process stand-in for the key-management
//! collaborator: hardware wallets and browser extensions implement the same
//! [`TransactionSigner`] seam from the outside.
//!
//! Key bytes are never logged and never appear in `Debug` output.
//!
//! [`Authenticator`]: crate::transaction::Authenticator
//! [`TransactionSigner`]: crate::transaction::TransactionSigner

use std::fmt;

use ed25519_dalek::{
    Signature as Ed25519Signature, Signer as _, SigningKey as Ed25519SigningKey,
    Verifier as _, VerifyingKey as Ed25519VerifyingKey,
};
use k256::ecdsa::{
    signature::{Signer as _, Verifier as _},
    Signature as Secp256k1Signature, SigningKey as Secp256k1SigningKey,
    VerifyingKey as Secp256k1VerifyingKey,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::blake3_hash_multi;
use crate::config::{
    ED25519_PUBLIC_KEY_LENGTH, SECP256K1_PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
};
use crate::types::AccountAddress;

/// Errors from key parsing and signature checks.
///
/// Deliberately terse about *why* key material was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes")]
    InvalidSecretKey,

    #[error("invalid {0} public key")]
    InvalidPublicKey(SignatureScheme),

    #[error("invalid {0} signature encoding")]
    InvalidSignature(SignatureScheme),

    #[error("signature verification failed")]
    VerificationFailed,
}

// ---------------------------------------------------------------------------
// SignatureScheme
// ---------------------------------------------------------------------------

/// Signature schemes an authenticator may use.
///
/// The discriminant is the wire tag. New schemes get new tags at the end;
/// existing tags never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureScheme {
    Ed25519 = 0,
    Secp256k1 = 1,
}

impl SignatureScheme {
    pub fn variant_tag(self) -> u32 {
        self as u32
    }

    pub fn from_variant_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Ed25519),
            1 => Some(Self::Secp256k1),
            _ => None,
        }
    }

    /// Public key length on the wire.
    pub fn public_key_len(self) -> usize {
        match self {
            Self::Ed25519 => ED25519_PUBLIC_KEY_LENGTH,
            Self::Secp256k1 => SECP256K1_PUBLIC_KEY_LENGTH,
        }
    }

    /// Signature length on the wire.
    pub fn signature_len(self) -> usize {
        SIGNATURE_LENGTH
    }

    /// Checks `signature` over `message` under `public_key`.
    pub fn verify(
        self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), KeyError> {
        match self {
            Self::Ed25519 => {
                let pk: [u8; ED25519_PUBLIC_KEY_LENGTH] = public_key
                    .try_into()
                    .map_err(|_| KeyError::InvalidPublicKey(self))?;
                let sig: [u8; SIGNATURE_LENGTH] = signature
                    .try_into()
                    .map_err(|_| KeyError::InvalidSignature(self))?;
                let verifying_key = Ed25519VerifyingKey::from_bytes(&pk)
                    .map_err(|_| KeyError::InvalidPublicKey(self))?;
                verifying_key
                    .verify(message, &Ed25519Signature::from_bytes(&sig))
                    .map_err(|_| KeyError::VerificationFailed)
            }
            Self::Secp256k1 => {
                let verifying_key = Secp256k1VerifyingKey::from_sec1_bytes(public_key)
                    .map_err(|_| KeyError::InvalidPublicKey(self))?;
                let sig = Secp256k1Signature::from_slice(signature)
                    .map_err(|_| KeyError::InvalidSignature(self))?;
                verifying_key
                    .verify(message, &sig)
                    .map_err(|_| KeyError::VerificationFailed)
            }
        }
    }

    /// Derives the local account address for a public key under this scheme.
    ///
    /// `blake3(scheme_tag || public_key)`. The scheme tag keeps an Ed25519
    /// key and a Secp256k1 key with colliding bytes from sharing an address.
    pub fn derive_address(self, public_key: &[u8]) -> AccountAddress {
        let flag = [self as u8];
        AccountAddress::new(blake3_hash_multi(&[&flag, public_key]))
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => write!(f, "Ed25519"),
            Self::Secp256k1 => write!(f, "Secp256k1"),
        }
    }
}

impl std::str::FromStr for SignatureScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            "secp256k1" => Ok(Self::Secp256k1),
            other => Err(format!("unknown signature scheme '{other}'")),
        }
    }
}

fn parse_secret_hex(hex_str: &str) -> Result<[u8; SECRET_KEY_LENGTH], KeyError> {
    let digits = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = hex::decode(digits).map_err(|_| KeyError::InvalidSecretKey)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| KeyError::InvalidSecretKey)
}

// ---------------------------------------------------------------------------
// Ed25519Keypair
// ---------------------------------------------------------------------------

/// An Ed25519 signing key.
///
/// Does not implement `Serialize`: exporting a secret should be an explicit
/// call to [`secret_key_bytes`](Self::secret_key_bytes), not a side effect
/// of serializing a struct that happens to hold one.
pub struct Ed25519Keypair {
    signing_key: Ed25519SigningKey,
}

impl Ed25519Keypair {
    /// Fresh key from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: Ed25519SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic key from a 32-byte seed. In Ed25519 the seed *is* the
    /// secret key.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: Ed25519SigningKey::from_bytes(seed),
        }
    }

    /// Parses a hex secret key, `0x` optional.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        parse_secret_hex(hex_str).map(|seed| Self::from_seed(&seed))
    }

    pub fn public_key_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Deterministic (RFC 8032) signature over `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(message).to_bytes()
    }

    pub fn address(&self) -> AccountAddress {
        SignatureScheme::Ed25519.derive_address(&self.public_key_bytes())
    }
}

impl Clone for Ed25519Keypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for Ed25519Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Keypair(pub={})", hex::encode(self.public_key_bytes()))
    }
}

// ---------------------------------------------------------------------------
// Secp256k1Keypair
// ---------------------------------------------------------------------------

/// A secp256k1 ECDSA signing key. Signatures are SHA-256 prehashed and
/// low-S normalized by `k256`.
pub struct Secp256k1Keypair {
    signing_key: Secp256k1SigningKey,
}

impl Secp256k1Keypair {
    pub fn generate() -> Self {
        Self {
            signing_key: Secp256k1SigningKey::random(&mut OsRng),
        }
    }

    /// Rejects zero and values at or above the curve order.
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_LENGTH]) -> Result<Self, KeyError> {
        let signing_key =
            Secp256k1SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&parse_secret_hex(hex_str)?)
    }

    /// Compressed SEC1 public key.
    pub fn public_key_bytes(&self) -> [u8; SECP256K1_PUBLIC_KEY_LENGTH] {
        let point = self.signing_key.verifying_key().to_encoded_point(true);
        let mut out = [0u8; SECP256K1_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(point.as_bytes());
        out
    }

    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        let mut out = [0u8; SECRET_KEY_LENGTH];
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// `r || s`, 64 bytes.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        let signature: Secp256k1Signature = self.signing_key.sign(message);
        let mut out = [0u8; SIGNATURE_LENGTH];
        out.copy_from_slice(&signature.to_bytes());
        out
    }

    pub fn address(&self) -> AccountAddress {
        SignatureScheme::Secp256k1.derive_address(&self.public_key_bytes())
    }
}

impl Clone for Secp256k1Keypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
        }
    }
}

impl fmt::Debug for Secp256k1Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Secp256k1Keypair(pub={})",
            hex::encode(self.public_key_bytes())
        )
    }
}
