//! The transaction state machine.
//!
//! A [`Transaction`] moves through these states, in order:
//!
//! ```text
//! Empty ──call_function / set_action──▶ ActionSet
//!       ──set_sender / set_chain_id / set_seq_number──▶ MetadataPartial ──▶ DataComplete
//!       ──set_auth / sign_with──▶ Authenticated
//!       ──into_encoded──▶ Encoded (an EncodedTransaction; the Transaction is consumed)
//! ```
//!
//! Every out-of-order call fails fast with a [`TransactionError`] and leaves
//! the transaction unchanged. Once an authenticator is attached the payload
//! is frozen: a later metadata change would invalidate the signature, so it
//! is rejected with [`TransactionError::AuthenticatorAttached`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::MoveAction;
use super::auth::Authenticator;
use super::data::TransactionData;
use super::error::TransactionError;
use super::signing::TransactionSigner;
use crate::codec;
use crate::config::HASH_LENGTH;
use crate::types::{AccountAddress, FunctionId, Identifier, ModuleId, TypeTag};

// ---------------------------------------------------------------------------
// CallFunctionArgs
// ---------------------------------------------------------------------------

/// Where a function call goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallTarget {
    /// `"<address>::<module>::<function>"`.
    Target(String),
    /// `"<address>::<module>"` plus a function name.
    ModuleFunction { module: String, function: String },
}

impl CallTarget {
    pub fn resolve(&self) -> Result<FunctionId, TransactionError> {
        match self {
            Self::Target(target) => Ok(target.parse()?),
            Self::ModuleFunction { module, function } => {
                let module_id: ModuleId = module.parse()?;
                Ok(FunctionId::new(module_id, Identifier::new(function.as_str())?))
            }
        }
    }
}

/// Inputs for [`Transaction::call_function`].
///
/// # Example
///
/// ```
/// use rooch_tx::transaction::CallFunctionArgs;
///
/// let args = CallFunctionArgs::module_function("std::example", "run")
///     .args(vec![vec![0x01, 0x02]])
///     .max_gas(1_000_000);
/// assert_eq!(args.max_gas, Some(1_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFunctionArgs {
    pub target: CallTarget,
    pub type_args: Vec<TypeTag>,
    /// Already-encoded argument values.
    pub args: Vec<Vec<u8>>,
    /// Gas ceiling; [`DEFAULT_MAX_GAS_AMOUNT`](crate::config::DEFAULT_MAX_GAS_AMOUNT) when `None`.
    pub max_gas: Option<u64>,
    /// Free-form label carried alongside the transaction, never encoded.
    pub info: Option<String>,
}

impl CallFunctionArgs {
    pub fn target(target: impl Into<String>) -> Self {
        Self::with_target(CallTarget::Target(target.into()))
    }

    pub fn module_function(module: impl Into<String>, function: impl Into<String>) -> Self {
        Self::with_target(CallTarget::ModuleFunction {
            module: module.into(),
            function: function.into(),
        })
    }

    fn with_target(target: CallTarget) -> Self {
        Self {
            target,
            type_args: Vec::new(),
            args: Vec::new(),
            max_gas: None,
            info: None,
        }
    }

    pub fn type_args(mut self, type_args: Vec<TypeTag>) -> Self {
        self.type_args = type_args;
        self
    }

    pub fn args(mut self, args: Vec<Vec<u8>>) -> Self {
        self.args = args;
        self
    }

    pub fn max_gas(mut self, max_gas: u64) -> Self {
        self.max_gas = Some(max_gas);
        self
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// Where a [`Transaction`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionState {
    Empty,
    ActionSet,
    MetadataPartial,
    DataComplete,
    Authenticated,
}

/// An executable transaction: payload, authenticator, and an optional label.
///
/// Owned by one builder sequence at a time. Every method takes `&mut self`
/// or consumes `self`, so sharing one across tasks requires the caller to
/// wrap it; there is no internal locking.
///
/// # Example
///
/// ```
/// use rooch_tx::crypto::Ed25519Keypair;
/// use rooch_tx::transaction::{CallFunctionArgs, Transaction};
///
/// let signer = Ed25519Keypair::generate();
/// let mut tx = Transaction::new();
/// tx.call_function(CallFunctionArgs::target("0x3::empty::empty")).unwrap();
/// tx.set_sender(signer.address()).unwrap();
/// tx.set_chain_id(4).unwrap();
/// tx.set_seq_number(0).unwrap();
/// tx.sign_with(&signer).unwrap();
///
/// let encoded = tx.into_encoded().unwrap();
/// assert!(encoded.to_hex().starts_with("0x01"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    data: Option<TransactionData>,
    auth: Option<Authenticator>,
    info: Option<String>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a transaction around an existing payload.
    pub fn from_data(data: TransactionData) -> Self {
        Self {
            data: Some(data),
            auth: None,
            info: None,
        }
    }

    pub fn state(&self) -> TransactionState {
        match (&self.data, &self.auth) {
            (None, _) => TransactionState::Empty,
            (Some(_), Some(_)) => TransactionState::Authenticated,
            (Some(data), None) => match data.metadata_set_count() {
                0 => TransactionState::ActionSet,
                3 => TransactionState::DataComplete,
                _ => TransactionState::MetadataPartial,
            },
        }
    }

    pub fn data(&self) -> Option<&TransactionData> {
        self.data.as_ref()
    }

    pub fn auth(&self) -> Option<&Authenticator> {
        self.auth.as_ref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = Some(info.into());
    }

    pub fn max_gas(&self) -> Option<u64> {
        self.data.as_ref().map(TransactionData::max_gas)
    }

    /// `Empty → ActionSet` with a function call.
    pub fn call_function(&mut self, args: CallFunctionArgs) -> Result<(), TransactionError> {
        let function_id = args.target.resolve()?;
        let action = MoveAction::new_function_call(function_id, args.type_args, args.args);
        self.set_action(action, args.max_gas)?;
        if let Some(info) = args.info {
            self.info = Some(info);
        }
        Ok(())
    }

    /// `Empty → ActionSet` with any action.
    pub fn set_action(
        &mut self,
        action: MoveAction,
        max_gas: Option<u64>,
    ) -> Result<(), TransactionError> {
        if self.data.is_some() {
            return Err(TransactionError::FieldAlreadySet { field: "action" });
        }
        let mut data = TransactionData::new(action);
        if let Some(max_gas) = max_gas {
            data.set_max_gas(max_gas);
        }
        debug!(
            kind = data.action().kind(),
            max_gas = data.max_gas(),
            "transaction action set"
        );
        self.data = Some(data);
        Ok(())
    }

    fn data_mut(&mut self) -> Result<&mut TransactionData, TransactionError> {
        if self.auth.is_some() {
            return Err(TransactionError::AuthenticatorAttached);
        }
        self.data
            .as_mut()
            .ok_or(TransactionError::TransactionDataUninitialized)
    }

    fn data_ref(&self) -> Result<&TransactionData, TransactionError> {
        self.data
            .as_ref()
            .ok_or(TransactionError::TransactionDataUninitialized)
    }

    pub fn set_sender(&mut self, sender: AccountAddress) -> Result<(), TransactionError> {
        self.data_mut()?.set_sender(sender)?;
        debug!(sender = %sender.to_short_hex(), "transaction sender set");
        Ok(())
    }

    pub fn set_chain_id(&mut self, chain_id: u64) -> Result<(), TransactionError> {
        self.data_mut()?.set_chain_id(chain_id)?;
        debug!(chain_id, "transaction chain id set");
        Ok(())
    }

    pub fn set_seq_number(&mut self, sequence_number: u64) -> Result<(), TransactionError> {
        self.data_mut()?.set_sequence_number(sequence_number)?;
        debug!(sequence_number, "transaction sequence number set");
        Ok(())
    }

    pub fn set_max_gas(&mut self, max_gas: u64) -> Result<(), TransactionError> {
        self.data_mut()?.set_max_gas(max_gas);
        Ok(())
    }

    /// SHA3-256 of the encoded payload; the bytes a signer signs.
    pub fn hash_data(&self) -> Result<[u8; HASH_LENGTH], TransactionError> {
        let hash = self.data_ref()?.hash()?;
        debug!(hash = %hex::encode(hash), "transaction data hashed");
        Ok(hash)
    }

    pub fn encode_data(&self) -> Result<Vec<u8>, TransactionError> {
        self.data_ref()?.encode()
    }

    /// `DataComplete → Authenticated`.
    ///
    /// The authenticator is not checked against the hash here; call
    /// [`verify_auth`](Self::verify_auth) for that.
    pub fn set_auth(&mut self, auth: Authenticator) -> Result<(), TransactionError> {
        if self.auth.is_some() {
            return Err(TransactionError::FieldAlreadySet {
                field: "authenticator",
            });
        }
        let data = self.data_ref()?;
        if let Some(field) = data.missing_field() {
            return Err(TransactionError::IncompleteTransactionData { field });
        }
        debug!(scheme = %auth.scheme(), "transaction authenticator attached");
        self.auth = Some(auth);
        Ok(())
    }

    /// Hashes the payload, has `signer` sign it, and attaches the result.
    pub fn sign_with<S: TransactionSigner + ?Sized>(
        &mut self,
        signer: &S,
    ) -> Result<(), TransactionError> {
        let hash = self.hash_data()?;
        self.set_auth(signer.sign_hash(&hash))
    }

    /// Checks the attached signature against the current payload hash.
    pub fn verify_auth(&self) -> Result<(), TransactionError> {
        let auth = self
            .auth
            .as_ref()
            .ok_or(TransactionError::MissingAuthenticator)?;
        auth.verify(&self.hash_data()?)
    }

    /// Wire bytes: encoded payload immediately followed by the encoded
    /// authenticator.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        let data = self.data_ref()?;
        let auth = self
            .auth
            .as_ref()
            .ok_or(TransactionError::MissingAuthenticator)?;
        let mut bytes = data.encode()?;
        bytes.extend_from_slice(&auth.encode()?);
        Ok(bytes)
    }

    /// `Authenticated → Encoded`. Consumes the transaction.
    pub fn into_encoded(self) -> Result<EncodedTransaction, TransactionError> {
        let bytes = self.encode()?;
        let hash = self.hash_data()?;
        debug!(
            hash = %hex::encode(hash),
            len = bytes.len(),
            "transaction encoded"
        );
        Ok(EncodedTransaction { bytes, hash })
    }

    /// Rebuilds an authenticated transaction from wire bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let (data, consumed) = codec::from_bytes_prefix::<TransactionData>(bytes)?;
        let auth = Authenticator::decode(&bytes[consumed..])?;
        Ok(Self {
            data: Some(data),
            auth: Some(auth),
            info: None,
        })
    }
}

// ---------------------------------------------------------------------------
// EncodedTransaction
// ---------------------------------------------------------------------------

/// Terminal state: the bytes handed to a transport for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTransaction {
    bytes: Vec<u8>,
    hash: [u8; HASH_LENGTH],
}

impl EncodedTransaction {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Hash of the payload part, i.e. the transaction hash.
    pub fn hash(&self) -> &[u8; HASH_LENGTH] {
        &self.hash
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `0x`-prefixed hex, the form `sendRawTransaction` takes.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Ed25519Keypair, Secp256k1Keypair};

    fn example_args() -> CallFunctionArgs {
        CallFunctionArgs::module_function("std::example", "run")
            .args(vec![vec![0x01, 0x02]])
            .max_gas(1_000_000)
    }

    fn complete_tx() -> Transaction {
        let mut tx = Transaction::new();
        tx.call_function(example_args()).unwrap();
        tx.set_sender("0xABCD".parse().unwrap()).unwrap();
        tx.set_chain_id(4).unwrap();
        tx.set_seq_number(0).unwrap();
        tx
    }

    #[test]
    fn state_progression() {
        let mut tx = Transaction::new();
        assert_eq!(tx.state(), TransactionState::Empty);

        tx.call_function(example_args()).unwrap();
        assert_eq!(tx.state(), TransactionState::ActionSet);

        tx.set_chain_id(4).unwrap();
        assert_eq!(tx.state(), TransactionState::MetadataPartial);
        tx.set_seq_number(0).unwrap();
        tx.set_sender(AccountAddress::ONE).unwrap();
        assert_eq!(tx.state(), TransactionState::DataComplete);

        tx.set_auth(Authenticator::ed25519([0u8; 32], [0u8; 64]))
            .unwrap();
        assert_eq!(tx.state(), TransactionState::Authenticated);
    }

    #[test]
    fn hash_before_action_fails() {
        let tx = Transaction::new();
        let err = tx.hash_data().unwrap_err();
        assert_eq!(err, TransactionError::TransactionDataUninitialized);
        assert_eq!(
            err.to_string(),
            "Transaction data is not initialized. Call action first."
        );
        assert_eq!(
            tx.encode_data().unwrap_err(),
            TransactionError::TransactionDataUninitialized
        );
    }

    #[test]
    fn setters_before_action_fail() {
        let mut tx = Transaction::new();
        assert_eq!(
            tx.set_chain_id(4),
            Err(TransactionError::TransactionDataUninitialized)
        );
        assert_eq!(
            tx.set_auth(Authenticator::ed25519([0u8; 32], [0u8; 64])),
            Err(TransactionError::TransactionDataUninitialized)
        );
    }

    #[test]
    fn encode_without_auth_fails() {
        let tx = complete_tx();
        assert_eq!(tx.encode(), Err(TransactionError::MissingAuthenticator));
        assert_eq!(
            tx.clone().into_encoded().unwrap_err(),
            TransactionError::MissingAuthenticator
        );
    }

    #[test]
    fn encode_reports_missing_auth_before_incomplete_data() {
        let mut tx = Transaction::new();
        assert_eq!(
            tx.encode(),
            Err(TransactionError::TransactionDataUninitialized)
        );

        tx.call_function(example_args()).unwrap();
        assert_eq!(tx.state(), TransactionState::ActionSet);
        assert_eq!(tx.encode(), Err(TransactionError::MissingAuthenticator));

        tx.set_chain_id(4).unwrap();
        assert_eq!(tx.state(), TransactionState::MetadataPartial);
        assert_eq!(tx.encode(), Err(TransactionError::MissingAuthenticator));
    }

    #[test]
    fn auth_requires_complete_data() {
        let mut tx = Transaction::new();
        tx.call_function(example_args()).unwrap();
        tx.set_sender(AccountAddress::ONE).unwrap();
        assert_eq!(
            tx.set_auth(Authenticator::ed25519([0u8; 32], [0u8; 64])),
            Err(TransactionError::IncompleteTransactionData { field: "chain_id" })
        );
    }

    #[test]
    fn second_action_rejected() {
        let mut tx = complete_tx();
        assert_eq!(
            tx.call_function(example_args()),
            Err(TransactionError::FieldAlreadySet { field: "action" })
        );
    }

    #[test]
    fn data_frozen_after_auth() {
        let mut tx = complete_tx();
        tx.set_auth(Authenticator::ed25519([0u8; 32], [0u8; 64]))
            .unwrap();
        assert_eq!(tx.set_max_gas(5), Err(TransactionError::AuthenticatorAttached));
        assert_eq!(
            tx.set_auth(Authenticator::ed25519([1u8; 32], [1u8; 64])),
            Err(TransactionError::FieldAlreadySet {
                field: "authenticator"
            })
        );
        assert_eq!(tx.max_gas(), Some(1_000_000));
    }

    #[test]
    fn max_gas_defaults_and_info_carries() {
        let mut tx = Transaction::new();
        tx.call_function(CallFunctionArgs::target("0x3::empty::empty").info("noop"))
            .unwrap();
        assert_eq!(tx.max_gas(), Some(crate::config::DEFAULT_MAX_GAS_AMOUNT));
        assert_eq!(tx.info(), Some("noop"));
    }

    #[test]
    fn bad_target_leaves_tx_empty() {
        let mut tx = Transaction::new();
        assert!(tx
            .call_function(CallFunctionArgs::module_function("std::example", "not-an-ident"))
            .is_err());
        assert_eq!(tx.state(), TransactionState::Empty);
    }

    #[test]
    fn wire_is_data_then_auth() {
        let mut tx = complete_tx();
        let auth = Authenticator::ed25519([0u8; 32], [0u8; 64]);
        tx.set_auth(auth.clone()).unwrap();

        let data_bytes = tx.encode_data().unwrap();
        let bytes = tx.encode().unwrap();
        assert_eq!(&bytes[..data_bytes.len()], data_bytes.as_slice());
        assert_eq!(&bytes[data_bytes.len()..], auth.encode().unwrap().as_slice());
    }

    #[test]
    fn sign_and_verify_both_schemes() {
        let ed = Ed25519Keypair::generate();
        let mut tx = complete_tx();
        tx.sign_with(&ed).unwrap();
        assert!(tx.verify_auth().is_ok());

        let k1 = Secp256k1Keypair::generate();
        let mut tx = complete_tx();
        tx.sign_with(&k1).unwrap();
        assert!(tx.verify_auth().is_ok());
    }

    #[test]
    fn verify_detects_foreign_signature() {
        let mut tx = complete_tx();
        let other = Ed25519Keypair::generate();
        let foreign = other.sign(b"some other payload");
        tx.set_auth(Authenticator::ed25519(other.public_key_bytes(), foreign))
            .unwrap();
        assert_eq!(tx.verify_auth(), Err(TransactionError::SignatureMismatch));
    }

    #[test]
    fn verify_without_auth() {
        assert_eq!(
            complete_tx().verify_auth(),
            Err(TransactionError::MissingAuthenticator)
        );
    }

    #[test]
    fn decode_roundtrip() {
        let mut tx = complete_tx();
        tx.sign_with(&Secp256k1Keypair::generate()).unwrap();
        let bytes = tx.encode().unwrap();

        let decoded = Transaction::decode(&bytes).unwrap();
        assert_eq!(decoded.data(), tx.data());
        assert_eq!(decoded.auth(), tx.auth());
        assert!(decoded.verify_auth().is_ok());
    }

    #[test]
    fn encoded_hex_and_hash() {
        let mut tx = complete_tx();
        tx.set_auth(Authenticator::ed25519([0u8; 32], [0u8; 64]))
            .unwrap();
        let hash = tx.hash_data().unwrap();
        let encoded = tx.into_encoded().unwrap();
        assert_eq!(encoded.hash(), &hash);
        assert_eq!(encoded.to_hex().len(), 2 + encoded.len() * 2);
        assert!(!encoded.is_empty());
    }
}
