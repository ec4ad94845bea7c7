//! # Protocol Constants
//!
//! Chain identifiers, wire lengths, and defaults. Anything here that shows up
//! in encoded bytes is a wire contract: changing it changes transaction
//! hashes.

// ---------------------------------------------------------------------------
// Chain Identifiers
// ---------------------------------------------------------------------------

/// Mainnet.
pub const CHAIN_ID_MAIN: u64 = 1;

/// Public testnet.
pub const CHAIN_ID_TEST: u64 = 2;

/// Shared development network. Reset without notice.
pub const CHAIN_ID_DEV: u64 = 3;

/// A node running on the developer's own machine.
pub const CHAIN_ID_LOCAL: u64 = 4;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Account addresses are 32 bytes on the wire, no prefix.
pub const ADDRESS_LENGTH: usize = 32;

/// Bech32 human-readable part for account addresses.
pub const ADDRESS_HRP: &str = "rooch";

/// Named framework addresses accepted wherever an address literal is.
pub const NAMED_ADDRESSES: &[(&str, u8)] = &[
    ("std", 0x1),
    ("move_std", 0x1),
    ("moveos_std", 0x2),
    ("rooch_framework", 0x3),
    ("bitcoin_move", 0x4),
];

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Transaction data is hashed with SHA3-256.
pub const HASH_FUNCTION: &str = "SHA3-256";

/// Digest length in bytes.
pub const HASH_LENGTH: usize = 32;

/// Ed25519 public key length.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;

/// Secp256k1 public keys travel in compressed SEC1 form.
pub const SECP256K1_PUBLIC_KEY_LENGTH: usize = 33;

/// Both supported schemes produce 64-byte signatures (r || s for ECDSA).
pub const SIGNATURE_LENGTH: usize = 64;

/// Secret key length for both schemes.
pub const SECRET_KEY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Gas
// ---------------------------------------------------------------------------

/// Gas ceiling applied when the caller does not supply one.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 100_000_000;

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Friendly name for a chain id, mainly for logging.
pub fn chain_name(chain_id: u64) -> String {
    match chain_id {
        CHAIN_ID_MAIN => "main".to_string(),
        CHAIN_ID_TEST => "test".to_string(),
        CHAIN_ID_DEV => "dev".to_string(),
        CHAIN_ID_LOCAL => "local".to_string(),
        other => format!("custom({other})"),
    }
}

/// Resolves a named framework address to its short numeric form.
pub fn named_address(name: &str) -> Option<u8> {
    NAMED_ADDRESSES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, value)| *value)
}
