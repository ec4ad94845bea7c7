//! # Move Value Types
//!
//! The on-chain vocabulary a transaction refers to: account addresses, Move
//! identifiers, type tags, and the module/function ids that name a call
//! target. All of them have a canonical encoding and a canonical string
//! form, and both round-trip.
//!
//! ```text
//! address.rs     — AccountAddress (32 bytes, hex / named / bech32)
//! identifier.rs  — Identifier (Move identifier rules)
//! type_tag.rs    — TypeTag, StructTag, ModuleId, FunctionId + string parser
//! ```

pub mod address;
pub mod identifier;
pub mod type_tag;

use thiserror::Error;

pub use address::AccountAddress;
pub use identifier::Identifier;
pub use type_tag::{FunctionId, ModuleId, StructTag, TypeTag};

/// Errors raised while parsing or validating Move value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The string is not a valid Move identifier.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// The string is not a hex, named, or bech32 address.
    #[error("invalid address '{input}': {reason}")]
    InvalidAddress {
        /// What the caller passed in.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A type tag, module id, or function id string failed to parse.
    #[error("invalid type syntax '{input}': {reason}")]
    InvalidTypeSyntax {
        /// What the caller passed in.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}
