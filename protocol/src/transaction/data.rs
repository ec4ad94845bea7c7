//! The unsigned transaction payload.

use serde::{Deserialize, Serialize};

use super::action::MoveAction;
use super::error::TransactionError;
use crate::codec::{self, CodecError, Decode, Decoder, Encode, Encoder};
use crate::config::{DEFAULT_MAX_GAS_AMOUNT, HASH_LENGTH};
use crate::crypto::hash::sha3_256;
use crate::types::AccountAddress;

/// Action plus the metadata the chain needs to order and charge for it.
///
/// `sender`, `chain_id` and `sequence_number` start unset and may each be
/// assigned exactly once. Hashing or encoding with any of them still unset
/// fails with [`TransactionError::IncompleteTransactionData`]; nothing is
/// ever silently encoded as zero.
///
/// # Canonical Byte Format
///
/// Fields in this order, no separators:
///
/// ```text
/// action           MoveAction (variant tag + payload)
/// sender           32 raw bytes
/// chain_id         u64 LE
/// sequence_number  u64 LE
/// max_gas          u64 LE
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    action: MoveAction,
    sender: Option<AccountAddress>,
    chain_id: Option<u64>,
    sequence_number: Option<u64>,
    max_gas: u64,
}

impl TransactionData {
    /// Fresh payload with [`DEFAULT_MAX_GAS_AMOUNT`] as the gas ceiling.
    pub fn new(action: MoveAction) -> Self {
        Self {
            action,
            sender: None,
            chain_id: None,
            sequence_number: None,
            max_gas: DEFAULT_MAX_GAS_AMOUNT,
        }
    }

    /// A fully populated payload.
    pub fn from_parts(
        action: MoveAction,
        sender: AccountAddress,
        chain_id: u64,
        sequence_number: u64,
        max_gas: u64,
    ) -> Self {
        Self {
            action,
            sender: Some(sender),
            chain_id: Some(chain_id),
            sequence_number: Some(sequence_number),
            max_gas,
        }
    }

    pub fn action(&self) -> &MoveAction {
        &self.action
    }

    pub fn sender(&self) -> Option<AccountAddress> {
        self.sender
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn sequence_number(&self) -> Option<u64> {
        self.sequence_number
    }

    pub fn max_gas(&self) -> u64 {
        self.max_gas
    }

    pub fn set_sender(&mut self, sender: AccountAddress) -> Result<(), TransactionError> {
        set_once(&mut self.sender, sender, "sender")
    }

    pub fn set_chain_id(&mut self, chain_id: u64) -> Result<(), TransactionError> {
        set_once(&mut self.chain_id, chain_id, "chain_id")
    }

    pub fn set_sequence_number(&mut self, sequence_number: u64) -> Result<(), TransactionError> {
        set_once(&mut self.sequence_number, sequence_number, "sequence_number")
    }

    /// Gas ceiling is a tuning knob, not identity; it may be reassigned.
    pub fn set_max_gas(&mut self, max_gas: u64) {
        self.max_gas = max_gas;
    }

    /// The first required field that is still unset, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.sender.is_none() {
            Some("sender")
        } else if self.chain_id.is_none() {
            Some("chain_id")
        } else if self.sequence_number.is_none() {
            Some("sequence_number")
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Number of the three metadata fields that have been set.
    pub(crate) fn metadata_set_count(&self) -> usize {
        [
            self.sender.is_some(),
            self.chain_id.is_some(),
            self.sequence_number.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    fn ensure_complete(&self) -> Result<(), TransactionError> {
        match self.missing_field() {
            Some(field) => Err(TransactionError::IncompleteTransactionData { field }),
            None => Ok(()),
        }
    }

    /// Canonical bytes of the payload.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        self.ensure_complete()?;
        Ok(codec::to_bytes(self)?)
    }

    /// SHA3-256 over [`encode`](Self::encode). This is what gets signed.
    pub fn hash(&self) -> Result<[u8; HASH_LENGTH], TransactionError> {
        Ok(sha3_256(&self.encode()?))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        Ok(codec::from_bytes(bytes)?)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<(), TransactionError> {
    if slot.is_some() {
        return Err(TransactionError::FieldAlreadySet { field });
    }
    *slot = Some(value);
    Ok(())
}

impl Encode for TransactionData {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        let (Some(sender), Some(chain_id), Some(sequence_number)) =
            (self.sender, self.chain_id, self.sequence_number)
        else {
            return Err(CodecError::malformed(format!(
                "transaction data is incomplete: {} is not set",
                self.missing_field().unwrap_or("metadata")
            )));
        };
        self.action.encode_to(encoder)?;
        sender.encode_to(encoder)?;
        encoder.write_u64(chain_id);
        encoder.write_u64(sequence_number);
        encoder.write_u64(self.max_gas);
        Ok(())
    }
}

impl Decode for TransactionData {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self::from_parts(
            decoder.read()?,
            decoder.read()?,
            decoder.read_u64()?,
            decoder.read_u64()?,
            decoder.read_u64()?,
        ))
    }
}
