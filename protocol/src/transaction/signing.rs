//! The signing seam.
//!
//! Signing is a separate step from building because the key may not live
//! in this process (hardware wallet, browser extension, remote signer).
//! Anything that can turn a transaction hash into an [`Authenticator`]
//! implements [`TransactionSigner`]; the local keypairs do so here.

use super::auth::Authenticator;
use crate::config::HASH_LENGTH;
use crate::crypto::keys::{Ed25519Keypair, Secp256k1Keypair, SignatureScheme};
use crate::types::AccountAddress;

/// A key-management collaborator.
///
/// Receives exactly the bytes returned by
/// [`TransactionData::hash`](super::TransactionData::hash) and returns a
/// proof over them.
pub trait TransactionSigner {
    fn scheme(&self) -> SignatureScheme;

    fn public_key_bytes(&self) -> Vec<u8>;

    fn sign_hash(&self, hash: &[u8; HASH_LENGTH]) -> Authenticator;

    /// Locally derived address of this signer.
    fn address(&self) -> AccountAddress {
        self.scheme().derive_address(&self.public_key_bytes())
    }
}

impl TransactionSigner for Ed25519Keypair {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ed25519
    }

    fn public_key_bytes(&self) -> Vec<u8> {
        Ed25519Keypair::public_key_bytes(self).to_vec()
    }

    fn sign_hash(&self, hash: &[u8; HASH_LENGTH]) -> Authenticator {
        Authenticator::ed25519(Ed25519Keypair::public_key_bytes(self), self.sign(hash))
    }
}

impl TransactionSigner for Secp256k1Keypair {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Secp256k1
    }

    fn public_key_bytes(&self) -> Vec<u8> {
        Secp256k1Keypair::public_key_bytes(self).to_vec()
    }

    fn sign_hash(&self, hash: &[u8; HASH_LENGTH]) -> Authenticator {
        Authenticator::secp256k1(Secp256k1Keypair::public_key_bytes(self), self.sign(hash))
    }
}
