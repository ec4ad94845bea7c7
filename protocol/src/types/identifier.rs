//! Move identifiers: module, function, and struct names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TypeError;
use crate::codec::{CodecError, Decode, Decoder, Encode, Encoder};

/// A validated Move identifier.
///
/// Rules: non-empty, ASCII letters, digits and `_`; must not start with a
/// digit; a lone `_` is reserved. Validation happens on construction and on
/// decode, so an `Identifier` in hand is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(TypeError::InvalidIdentifier(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks the identifier grammar without allocating.
pub fn is_valid(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        Some('_') if name.len() > 1 => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Identifier {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Encode for Identifier {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        self.0.encode_to(encoder)
    }
}

impl Decode for Identifier {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let raw = String::decode_from(decoder)?;
        Self::new(raw).map_err(|e| CodecError::malformed(e.to_string()))
    }
}
