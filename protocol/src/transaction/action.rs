//! On-chain actions.
//!
//! A [`MoveAction`] is what a transaction asks the chain to execute. The
//! variant tags are part of the wire format:
//!
//! | Variant        | Tag |
//! |----------------|-----|
//! | `Script`       | 0   |
//! | `Function`     | 1   |
//! | `ModuleBundle` | 2   |
//!
//! New kinds get new tags at the end; existing tags never move.
//!
//! Arguments are opaque, already-encoded byte strings. The action frames
//! them with length prefixes and never looks inside.

use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use crate::codec::{CodecError, Decode, Decoder, Encode, Encoder};
use crate::types::{FunctionId, TypeTag};

/// Execute a compiled script blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptCall {
    pub code: Vec<u8>,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

/// Call an entry function of a published module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub function_id: FunctionId,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveAction {
    Script(ScriptCall),
    Function(FunctionCall),
    ModuleBundle(Vec<Vec<u8>>),
}

impl MoveAction {
    pub const SCRIPT_TAG: u32 = 0;
    pub const FUNCTION_TAG: u32 = 1;
    pub const MODULE_BUNDLE_TAG: u32 = 2;

    /// A function call against an already-validated [`FunctionId`].
    pub fn new_function_call(
        function_id: FunctionId,
        ty_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Self {
        Self::Function(FunctionCall {
            function_id,
            ty_args,
            args,
        })
    }

    /// A function call against a `"<address>::<module>::<function>"` target.
    ///
    /// # Example
    ///
    /// ```
    /// use rooch_tx::transaction::MoveAction;
    ///
    /// let action = MoveAction::call_function("0x3::empty::empty", vec![], vec![]).unwrap();
    /// assert_eq!(action.variant_tag(), MoveAction::FUNCTION_TAG);
    /// ```
    pub fn call_function(
        target: &str,
        ty_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Result<Self, TransactionError> {
        let function_id: FunctionId = target.parse()?;
        Ok(Self::new_function_call(function_id, ty_args, args))
    }

    pub fn new_script(
        code: Vec<u8>,
        ty_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Result<Self, TransactionError> {
        if code.is_empty() {
            return Err(TransactionError::InvalidAction(
                "script code is empty".into(),
            ));
        }
        Ok(Self::Script(ScriptCall {
            code,
            ty_args,
            args,
        }))
    }

    pub fn new_module_bundle(modules: Vec<Vec<u8>>) -> Result<Self, TransactionError> {
        if modules.is_empty() {
            return Err(TransactionError::InvalidAction(
                "module bundle has no modules".into(),
            ));
        }
        if modules.iter().any(Vec::is_empty) {
            return Err(TransactionError::InvalidAction(
                "module bundle contains an empty module".into(),
            ));
        }
        Ok(Self::ModuleBundle(modules))
    }

    pub fn variant_tag(&self) -> u32 {
        match self {
            Self::Script(_) => Self::SCRIPT_TAG,
            Self::Function(_) => Self::FUNCTION_TAG,
            Self::ModuleBundle(_) => Self::MODULE_BUNDLE_TAG,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Script(_) => "script",
            Self::Function(_) => "function",
            Self::ModuleBundle(_) => "module_bundle",
        }
    }

    pub fn function_id(&self) -> Option<&FunctionId> {
        match self {
            Self::Function(call) => Some(&call.function_id),
            _ => None,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        crate::codec::to_bytes(self)
    }
}

impl Encode for ScriptCall {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_bytes(&self.code)?;
        encoder.write_seq(&self.ty_args)?;
        encoder.write_seq(&self.args)
    }
}

impl Decode for ScriptCall {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            code: decoder.read_bytes()?,
            ty_args: decoder.read_seq()?,
            args: decoder.read_seq()?,
        })
    }
}

impl Encode for FunctionCall {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        self.function_id.encode_to(encoder)?;
        encoder.write_seq(&self.ty_args)?;
        encoder.write_seq(&self.args)
    }
}

impl Decode for FunctionCall {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            function_id: decoder.read()?,
            ty_args: decoder.read_seq()?,
            args: decoder.read_seq()?,
        })
    }
}

impl Encode for MoveAction {
    fn encode_to(&self, encoder: &mut Encoder) -> Result<(), CodecError> {
        encoder.write_variant_tag(self.variant_tag());
        match self {
            Self::Script(call) => call.encode_to(encoder),
            Self::Function(call) => call.encode_to(encoder),
            Self::ModuleBundle(modules) => encoder.write_seq(modules),
        }
    }
}

impl Decode for MoveAction {
    fn decode_from(decoder: &mut Decoder<'_>) -> Result<Self, CodecError> {
        match decoder.read_variant_tag()? {
            Self::SCRIPT_TAG => Ok(Self::Script(decoder.read()?)),
            Self::FUNCTION_TAG => Ok(Self::Function(decoder.read()?)),
            Self::MODULE_BUNDLE_TAG => Ok(Self::ModuleBundle(decoder.read_seq()?)),
            tag => Err(CodecError::UnknownVariant {
                type_name: "MoveAction",
                tag,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};
    use crate::types::{AccountAddress, Identifier, ModuleId};

    fn example_call(args: Vec<Vec<u8>>) -> MoveAction {
        MoveAction::call_function("std::example::run", vec![], args).unwrap()
    }

    #[test]
    fn function_call_layout() {
        let bytes = example_call(vec![vec![0x01, 0x02]]).encode().unwrap();

        let mut expected = vec![0x01];
        expected.extend_from_slice(AccountAddress::ONE.as_bytes());
        expected.extend_from_slice(&[7, b'e', b'x', b'a', b'm', b'p', b'l', b'e']);
        expected.extend_from_slice(&[3, b'r', b'u', b'n']);
        expected.push(0x00); // no type args
        expected.extend_from_slice(&[0x01, 0x02, 0x01, 0x02]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn tag_independent_of_argument_count() {
        for n in [0usize, 1, 5, 200] {
            let action = example_call(vec![vec![0xAA]; n]);
            assert_eq!(action.variant_tag(), MoveAction::FUNCTION_TAG);
            assert_eq!(action.encode().unwrap()[0], 0x01);
        }
    }

    #[test]
    fn tags_are_frozen() {
        let script = MoveAction::new_script(vec![0xA1], vec![], vec![]).unwrap();
        let bundle = MoveAction::new_module_bundle(vec![vec![0xA1, 0x1C]]).unwrap();
        assert_eq!(script.encode().unwrap()[0], 0);
        assert_eq!(example_call(vec![]).encode().unwrap()[0], 1);
        assert_eq!(bundle.encode().unwrap()[0], 2);
    }

    #[test]
    fn roundtrip_every_variant() {
        let actions = [
            MoveAction::new_script(vec![1, 2, 3], vec![TypeTag::U64], vec![vec![9]]).unwrap(),
            MoveAction::call_function(
                "0x3::transfer::transfer_coin",
                vec!["0x3::gas_coin::RGas".parse().unwrap()],
                vec![vec![0u8; 32], to_bytes(&100u64).unwrap()],
            )
            .unwrap(),
            MoveAction::new_module_bundle(vec![vec![0xA1], vec![0xB2, 0xC3]]).unwrap(),
        ];
        for action in actions {
            let bytes = to_bytes(&action).unwrap();
            assert_eq!(from_bytes::<MoveAction>(&bytes).unwrap(), action);
        }
    }

    #[test]
    fn invalid_target_rejected() {
        assert!(matches!(
            MoveAction::call_function("std::example", vec![], vec![]),
            Err(TransactionError::Type(_))
        ));
        assert!(MoveAction::call_function("std::exa-mple::run", vec![], vec![]).is_err());
    }

    #[test]
    fn empty_script_and_bundle_rejected() {
        assert!(matches!(
            MoveAction::new_script(vec![], vec![], vec![]),
            Err(TransactionError::InvalidAction(_))
        ));
        assert!(MoveAction::new_module_bundle(vec![]).is_err());
        assert!(MoveAction::new_module_bundle(vec![vec![]]).is_err());
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = from_bytes::<MoveAction>(&[0x03]).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownVariant {
                type_name: "MoveAction",
                tag: 3
            }
        );
    }

    #[test]
    fn typed_constructor_matches_parsed() {
        let function_id = FunctionId::new(
            ModuleId::new(AccountAddress::ONE, Identifier::new("example").unwrap()),
            Identifier::new("run").unwrap(),
        );
        let typed = MoveAction::new_function_call(function_id.clone(), vec![], vec![]);
        assert_eq!(typed, example_call(vec![]));
        assert_eq!(typed.function_id(), Some(&function_id));
    }
}
