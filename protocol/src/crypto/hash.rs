//! # Hashing Utilities
//!
//! Two hash functions, each with exactly one job:
//!
//! - **SHA3-256** hashes encoded transaction data. This is the digest a
//!   signer signs and a node recomputes, so it is a wire contract, not a
//!   preference.
//! - **BLAKE3** derives local account addresses from public keys. Nothing
//!   on the wire depends on it.

use sha3::{Digest, Sha3_256};

use crate::config::HASH_LENGTH;

/// SHA3-256 of `data` as a fixed-size array.
///
/// # Example
///
/// ```
/// use rooch_tx::crypto::sha3_256;
///
/// let digest = sha3_256(b"");
/// assert_eq!(
///     hex::encode(digest),
///     "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
/// );
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; HASH_LENGTH] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; HASH_LENGTH];
    output.copy_from_slice(&result);
    output
}

/// BLAKE3 over several slices without concatenating them first.
pub fn blake3_hash_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}

/// `0x`-prefixed lowercase hex, the form RPC endpoints expect.
pub fn to_hex_literal(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parses hex with or without a `0x` prefix.
pub fn from_hex_literal(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    hex::decode(digits)
}
