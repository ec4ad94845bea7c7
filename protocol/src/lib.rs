// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # rooch-tx — Move Transaction Construction
//!
//! Builds Move transactions for Rooch, hashes their payload, attaches a
//! signature proof, and encodes the result into the canonical bytes
//! execution nodes accept. Correctness here is bit-exact: a wrong integer
//! width or a shifted variant tag yields a transaction that is rejected, or
//! worse, read as something else.
//!
//! ## Architecture
//!
//! - **codec** — BCS-style canonical encoder/decoder. Knows nothing about
//!   transactions.
//! - **types** — Addresses, identifiers, type tags, module and function ids.
//! - **crypto** — SHA3-256 transaction hash, local Ed25519/secp256k1 keys.
//! - **transaction** — Actions, payload, authenticator, and the state
//!   machine that ties them together.
//! - **config** — Chain ids, lengths, and defaults.
//!
//! ## Quick Start
//!
//! ```
//! use rooch_tx::crypto::Ed25519Keypair;
//! use rooch_tx::transaction::{CallFunctionArgs, Transaction};
//!
//! let signer = Ed25519Keypair::generate();
//!
//! let mut tx = Transaction::new();
//! tx.call_function(
//!     CallFunctionArgs::module_function("std::example", "run").args(vec![vec![1, 2]]),
//! )?;
//! tx.set_sender(signer.address())?;
//! tx.set_chain_id(rooch_tx::config::CHAIN_ID_LOCAL)?;
//! tx.set_seq_number(0)?;
//! tx.sign_with(&signer)?;
//!
//! let encoded = tx.into_encoded()?;
//! assert_eq!(encoded.hash().len(), 32);
//! # Ok::<(), rooch_tx::transaction::TransactionError>(())
//! ```
//!
//! Nothing here does I/O, blocks, or holds a lock. Submitting the bytes is
//! the transport's job.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod transaction;
pub mod types;

pub use codec::{CodecError, Decode, Encode};
pub use transaction::{Transaction, TransactionError};
pub use types::AccountAddress;
