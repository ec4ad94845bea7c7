//! Type tags and call-target names.
//!
//! A [`TypeTag`] names a Move type in a transaction: the `T` in
//! `coin::transfer<T>`. Its variant tags follow Move's historical order
//! (`U16`, `U32` and `U256` were appended after `Struct`), and that order is
//! frozen; a node reads tag `2` as `u64` no matter what this enum looks like.
//!
//! ## String syntax
//!
//! ```text
//! bool | u8 | u16 | u32 | u64 | u128 | u256 | address | signer
//! vector<T>
//! <address>::<module>::<Name>[<T1, T2, ...>]
//! ```
//!
//! `<address>` is anything [`AccountAddress`] parses: `0x3`, `std`, or a
//! bech32 `rooch1...` string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AccountAddress, Identifier, TypeError};
use crate::codec::{CodecError, Decode, Decoder, Encode, Encoder};

/// Deepest type nesting accepted from a string or from the wire. Bounds the
/// recursion a hostile `vector<vector<...>>` can force.
pub const MAX_TYPE_TAG_DEPTH: usize = 16;

// ---------------------------------------------------------------------------
// TypeTag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

impl TypeTag {
    /// The wire tag of this variant.
    pub fn variant_tag(&self) -> u32 {
        match self {
            Self::Bool => 0,
            Self::U8 => 1,
            Self::U64 => 2,
            Self::U128 => 3,
            Self::Address => 4,
            Self::Signer => 5,
            Self::Vector(_) => 6,
            Self::Struct(_) => 7,
            Self::U16 => 8,
            Self::U32 => 9,
            Self::U256 => 10,
        }
    }

    pub fn vector(inner: TypeTag) -> Self {
        Self::Vector(Box::new(inner))
    }

    fn decode_at_depth(decoder: &mut Decoder<'_>, depth: usize) -> Result<Self, CodecError> {
        if depth > MAX_TYPE_TAG_DEPTH {
            return Err(CodecError::malformed("type tag nested too deeply"));
        }
        let tag = decoder.read_variant_tag()?;
        Ok(match tag {
            0 => Self::Bool,
            1 => Self::U8,
            2 => Self::U64,
            3 => Self::U128,
            4 => Self::Address,
            5 => Self::Signer,
            6 => Self::Vector(Box::new(Self::decode_at_depth(decoder, depth + 1)?)),
            7 => Self::Struct(Box::new(StructTag::decode_at_depth(decoder, depth + 1)?)),
            8 => Self::U16,
            9 => Self::U32,
            10 => Self::U256,
            tag => {
                return Err(CodecError::UnknownVariant {
                    type_name: "TypeTag",
                    tag,
                })
            }
        })
    }
}

impl Encode for TypeTag {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_variant_tag(self.variant_tag());
        match self {
            Self::Vector(inner) => inner.encode_to(encoder),
            Self::Struct(tag) => tag.encode_to(encoder),
            _ => Ok(()),
        }
    }
}

impl Decode for TypeTag {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Self::decode_at_depth(decoder, 0)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::U8 => f.write_str("u8"),
            Self::U16 => f.write_str("u16"),
            Self::U32 => f.write_str("u32"),
            Self::U64 => f.write_str("u64"),
            Self::U128 => f.write_str("u128"),
            Self::U256 => f.write_str("u256"),
            Self::Address => f.write_str("address"),
            Self::Signer => f.write_str("signer"),
            Self::Vector(inner) => write!(f, "vector<{inner}>"),
            Self::Struct(tag) => write!(f, "{tag}"),
        }
    }
}

impl FromStr for TypeTag {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let tag = parser.type_tag(0)?;
        parser.end()?;
        Ok(tag)
    }
}

// ---------------------------------------------------------------------------
// StructTag
// ---------------------------------------------------------------------------

/// A fully qualified struct type, e.g. `0x3::gas_coin::RGas`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: Identifier,
    pub name: Identifier,
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    fn decode_at_depth(decoder: &mut Decoder<'_>, depth: usize) -> Result<Self, CodecError> {
        let address = AccountAddress::decode_from(decoder)?;
        let module = Identifier::decode_from(decoder)?;
        let name = Identifier::decode_from(decoder)?;
        let len = decoder.read_length()?;
        let mut type_params = Vec::with_capacity(len.min(decoder.remaining()));
        for _ in 0..len {
            type_params.push(TypeTag::decode_at_depth(decoder, depth + 1)?);
        }
        Ok(Self {
            address,
            module,
            name,
            type_params,
        })
    }
}

impl Encode for StructTag {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        self.address.encode_to(encoder)?;
        self.module.encode_to(encoder)?;
        self.name.encode_to(encoder)?;
        encoder.write_seq(&self.type_params)
    }
}

impl Decode for StructTag {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Self::decode_at_depth(decoder, 0)
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_short_hex(),
            self.module,
            self.name
        )?;
        if !self.type_params.is_empty() {
            f.write_str("<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl FromStr for StructTag {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<TypeTag>()? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => Err(TypeError::InvalidTypeSyntax {
                input: s.to_string(),
                reason: format!("'{other}' is not a struct type"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ModuleId / FunctionId
// ---------------------------------------------------------------------------

/// A published module: `<address>::<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: Identifier,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: Identifier) -> Self {
        Self { address, name }
    }
}

impl Encode for ModuleId {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        self.address.encode_to(encoder)?;
        self.name.encode_to(encoder)
    }
}

impl Decode for ModuleId {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            address: decoder.read()?,
            name: decoder.read()?,
        })
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address.to_short_hex(), self.name)
    }
}

impl FromStr for ModuleId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let address = parser.address()?;
        parser.expect("::")?;
        let name = parser.identifier()?;
        parser.end()?;
        Ok(Self { address, name })
    }
}

/// A call target: `<address>::<module>::<function>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionId {
    pub module_id: ModuleId,
    pub function_name: Identifier,
}

impl FunctionId {
    pub fn new(module_id: ModuleId, function_name: Identifier) -> Self {
        Self {
            module_id,
            function_name,
        }
    }
}

impl Encode for FunctionId {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        self.module_id.encode_to(encoder)?;
        self.function_name.encode_to(encoder)
    }
}

impl Decode for FunctionId {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            module_id: decoder.read()?,
            function_name: decoder.read()?,
        })
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module_id, self.function_name)
    }
}

impl FromStr for FunctionId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let address = parser.address()?;
        parser.expect("::")?;
        let module = parser.identifier()?;
        parser.expect("::")?;
        let function_name = parser.identifier()?;
        parser.end()?;
        Ok(Self {
            module_id: ModuleId::new(address, module),
            function_name,
        })
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Recursive-descent parser over the type syntax in the module docs.
struct Parser<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, rest: input }
    }

    fn error(&self, reason: impl Into<String>) -> TypeError {
        TypeError::InvalidTypeSyntax {
            input: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, lit: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(lit) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, lit: &str) -> Result<(), TypeError> {
        if self.eat(lit) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{lit}' at '{}'", self.rest)))
        }
    }

    /// A run of `[A-Za-z0-9_]`.
    fn token(&mut self) -> Result<&'a str, TypeError> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(self.error(format!("expected a name at '{}'", self.rest)));
        }
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(token)
    }

    fn address(&mut self) -> Result<AccountAddress, TypeError> {
        let token = self.token()?;
        token.parse()
    }

    fn identifier(&mut self) -> Result<Identifier, TypeError> {
        let token = self.token()?;
        Identifier::new(token)
    }

    fn end(&mut self) -> Result<(), TypeError> {
        self.skip_ws();
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing input '{}'", self.rest)))
        }
    }

    fn type_tag(&mut self, depth: usize) -> Result<TypeTag, TypeError> {
        if depth > MAX_TYPE_TAG_DEPTH {
            return Err(self.error("type nested too deeply"));
        }

        let token = self.token()?;

        // `0x1::u8::X` is a struct even though `u8` alone is a primitive.
        self.skip_ws();
        if self.rest.starts_with("::") {
            return self.struct_tail(token, depth).map(|tag| TypeTag::Struct(Box::new(tag)));
        }

        Ok(match token {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect("<")?;
                let inner = self.type_tag(depth + 1)?;
                self.expect(">")?;
                TypeTag::vector(inner)
            }
            other => return Err(self.error(format!("unknown type '{other}'"))),
        })
    }

    fn struct_tail(&mut self, address: &str, depth: usize) -> Result<StructTag, TypeError> {
        let address: AccountAddress = address.parse()?;
        self.expect("::")?;
        let module = self.identifier()?;
        self.expect("::")?;
        let name = self.identifier()?;

        let mut type_params = Vec::new();
        if self.eat("<") {
            loop {
                type_params.push(self.type_tag(depth + 1)?);
                if self.eat(",") {
                    continue;
                }
                self.expect(">")?;
                break;
            }
        }

        Ok(StructTag {
            address,
            module,
            name,
            type_params,
        })
    }
}
