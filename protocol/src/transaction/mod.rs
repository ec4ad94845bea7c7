//! # Transaction Module
//!
//! Construction, signing, and wire encoding of Move transactions. An
//! action, the metadata that orders and charges for it, and an
//! authenticator over its hash are composed into a [`Transaction`] and
//! encoded into the bytes execution nodes parse.
//!
//! ## Architecture
//!
//! ```text
//! action.rs  — MoveAction (Script / Function / ModuleBundle)
//! data.rs    — TransactionData: action + sender, chain id, sequence number, gas
//! auth.rs    — Authenticator: scheme + public key + signature
//! signing.rs — TransactionSigner, the key-management seam
//! builder.rs — Transaction state machine, CallFunctionArgs, EncodedTransaction
//! error.rs   — TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Action** — [`Transaction::call_function`] (or `set_action`).
//! 2. **Metadata** — sender, chain id, and sequence number, each set once.
//! 3. **Hash** — [`Transaction::hash_data`] yields the SHA3-256 digest to sign.
//! 4. **Authenticate** — [`Transaction::set_auth`] or [`Transaction::sign_with`].
//! 5. **Encode** — [`Transaction::into_encoded`] produces the wire bytes.
//!
//! ## Wire Format
//!
//! ```text
//! [ TransactionData ][ Authenticator ]
//! ```
//!
//! Both parts are self-delimiting, so the payload can be decoded straight
//! off the front of an encoded transaction.

pub mod action;
pub mod auth;
pub mod builder;
pub mod data;
pub mod error;
pub mod signing;

pub use action::{FunctionCall, MoveAction, ScriptCall};
pub use auth::Authenticator;
pub use builder::{CallFunctionArgs, CallTarget, EncodedTransaction, Transaction, TransactionState};
pub use data::TransactionData;
pub use error::TransactionError;
pub use signing::TransactionSigner;

pub use crate::crypto::keys::SignatureScheme;
