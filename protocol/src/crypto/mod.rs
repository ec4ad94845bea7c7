//! # Cryptographic Primitives
//!
//! The transaction hash function and the local signing keys. Everything
//! here wraps an audited implementation (`sha3`, `blake3`,
//! `ed25519-dalek`, `k256`); nothing is hand-rolled.

pub mod hash;
pub mod keys;

pub use hash::{from_hex_literal, sha3_256, to_hex_literal};
pub use keys::{Ed25519Keypair, KeyError, Secp256k1Keypair, SignatureScheme};
