//! Account addresses.
//!
//! An address is 32 raw bytes on the wire. Humans see it in one of three
//! forms, all of which parse back to the same value:
//!
//! - hex, with or without `0x`, short forms left-padded (`0xABCD`)
//! - a named framework address (`std`, `moveos_std`, `rooch_framework`, ...)
//! - bech32m with the `rooch` HRP (`rooch1...`)

use std::fmt;
use std::str::FromStr;

use bech32::{Bech32m, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::TypeError;
use crate::codec::{CodecError, Decode, Decoder, Encode, Encoder};
use crate::config::{named_address, ADDRESS_HRP, ADDRESS_LENGTH};

/// A 32-byte account address.
///
/// # Examples
///
/// ```
/// use rooch_tx::types::AccountAddress;
///
/// let addr: AccountAddress = "0xABCD".parse().unwrap();
/// assert_eq!(addr.as_bytes()[30..], [0xAB, 0xCD]);
/// assert_eq!(addr.to_short_hex(), "0xabcd");
///
/// let std: AccountAddress = "std".parse().unwrap();
/// assert_eq!(std, AccountAddress::ONE);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);
    pub const ONE: Self = Self::from_u8(0x1);
    pub const TWO: Self = Self::from_u8(0x2);
    pub const THREE: Self = Self::from_u8(0x3);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// An address whose only non-zero byte is the last one.
    pub const fn from_u8(value: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = value;
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    /// Full-width `0x`-prefixed lowercase hex (66 characters).
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// `0x`-prefixed hex with leading zeros trimmed (`0x1` for the stdlib).
    pub fn to_short_hex(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }

    /// Bech32m form with the `rooch` HRP.
    pub fn to_bech32(&self) -> String {
        let hrp = Hrp::parse_unchecked(ADDRESS_HRP);
        bech32::encode::<Bech32m>(hrp, &self.0)
            .expect("encoding a 32-byte payload should never fail")
    }

    /// Parses hex with or without `0x`. Short forms are left-padded.
    pub fn from_hex_literal(input: &str) -> Result<Self, TypeError> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);

        let invalid = |reason: &str| TypeError::InvalidAddress {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if digits.is_empty() {
            return Err(invalid("no hex digits"));
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(invalid("longer than 32 bytes"));
        }

        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Parses a bech32/bech32m string with the `rooch` HRP.
    pub fn from_bech32(input: &str) -> Result<Self, TypeError> {
        let invalid = |reason: String| TypeError::InvalidAddress {
            input: input.to_string(),
            reason,
        };

        let (hrp, data) = bech32::decode(input).map_err(|e| invalid(e.to_string()))?;
        if hrp != Hrp::parse_unchecked(ADDRESS_HRP) {
            return Err(invalid(format!("expected HRP '{ADDRESS_HRP}', got '{hrp}'")));
        }
        let bytes: [u8; ADDRESS_LENGTH] = data
            .as_slice()
            .try_into()
            .map_err(|_| invalid(format!("expected 32 bytes, got {}", data.len())))?;
        Ok(Self(bytes))
    }
}

impl FromStr for AccountAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(value) = named_address(s) {
            return Ok(Self::from_u8(value));
        }
        if s.starts_with(&format!("{ADDRESS_HRP}1")) {
            return Self::from_bech32(s);
        }
        Self::from_hex_literal(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for AccountAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_short_hex())
    }
}

impl Encode for AccountAddress {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_fixed_bytes(&self.0);
        Ok(())
    }
}

impl Decode for AccountAddress {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        decoder.read_array().map(Self)
    }
}

// JSON carries addresses as hex strings, like every RPC surface does.
impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};

    #[test]
    fn short_hex_is_left_padded() {
        let addr: AccountAddress = "0xABCD".parse().unwrap();
        let mut expected = [0u8; 32];
        expected[30] = 0xAB;
        expected[31] = 0xCD;
        assert_eq!(addr.as_bytes(), &expected);
    }

    #[test]
    fn odd_length_hex_is_accepted() {
        let addr: AccountAddress = "0x1".parse().unwrap();
        assert_eq!(addr, AccountAddress::ONE);
        let addr: AccountAddress = "abc".parse().unwrap();
        assert_eq!(addr.as_bytes()[30..], [0x0A, 0xBC]);
    }

    #[test]
    fn named_addresses_resolve() {
        assert_eq!("std".parse::<AccountAddress>().unwrap(), AccountAddress::ONE);
        assert_eq!(
            "moveos_std".parse::<AccountAddress>().unwrap(),
            AccountAddress::TWO
        );
        assert_eq!(
            "rooch_framework".parse::<AccountAddress>().unwrap(),
            AccountAddress::THREE
        );
    }

    #[test]
    fn rejects_bad_hex() {
        assert!("0x".parse::<AccountAddress>().is_err());
        assert!("0xZZ".parse::<AccountAddress>().is_err());
        let too_long = format!("0x{}", "1".repeat(65));
        assert!(too_long.parse::<AccountAddress>().is_err());
    }

    #[test]
    fn bech32_roundtrip() {
        let addr: AccountAddress = "0xABCD".parse().unwrap();
        let encoded = addr.to_bech32();
        assert!(encoded.starts_with("rooch1"));
        assert_eq!(encoded.parse::<AccountAddress>().unwrap(), addr);
    }

    #[test]
    fn bech32_wrong_hrp_rejected() {
        let hrp = Hrp::parse("bc").unwrap();
        let encoded = bech32::encode::<Bech32m>(hrp, &[0u8; 32]).unwrap();
        assert!(AccountAddress::from_bech32(&encoded).is_err());
    }

    #[test]
    fn display_forms() {
        assert_eq!(AccountAddress::ONE.to_short_hex(), "0x1");
        assert_eq!(AccountAddress::ZERO.to_short_hex(), "0x0");
        assert_eq!(AccountAddress::ONE.to_string().len(), 66);
    }

    #[test]
    fn encodes_as_32_raw_bytes() {
        let addr = AccountAddress::from_u8(7);
        let bytes = to_bytes(&addr).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(from_bytes::<AccountAddress>(&bytes).unwrap(), addr);
    }

    #[test]
    fn serde_uses_hex_string() {
        let addr = AccountAddress::THREE;
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.to_hex_literal()));
        let recovered: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, addr);
    }
}
