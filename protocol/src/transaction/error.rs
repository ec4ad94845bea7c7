//! Errors raised by the transaction layer.

use thiserror::Error;

use crate::codec::CodecError;
use crate::types::TypeError;

/// Everything that can go wrong while building, signing, or encoding a
/// transaction.
///
/// All variants are local, synchronous caller errors. None of them is
/// retryable: rebuild the state and call again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// `hash_data`, `encode_data`, or a metadata setter was called before
    /// any action was set.
    #[error("Transaction data is not initialized. Call action first.")]
    TransactionDataUninitialized,

    /// `encode` was called before an authenticator was attached.
    #[error("transaction has no authenticator; call set_auth first")]
    MissingAuthenticator,

    /// A required metadata field is still unset.
    #[error("transaction data is incomplete: {field} is not set")]
    IncompleteTransactionData { field: &'static str },

    /// A set-once field was assigned a second time.
    #[error("{field} is already set")]
    FieldAlreadySet { field: &'static str },

    /// The payload was changed after it was signed.
    #[error("authenticator already attached; transaction data is frozen")]
    AuthenticatorAttached,

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("invalid authenticator: {0}")]
    InvalidAuthenticator(String),

    /// The attached signature does not verify against the current hash.
    #[error("authenticator signature does not match the transaction hash")]
    SignatureMismatch,

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
