use proptest::prelude::*;

use rooch_tx::codec::{from_bytes, to_bytes, Decoder};
use rooch_tx::transaction::{MoveAction, Transaction, TransactionData};
use rooch_tx::types::{AccountAddress, TypeTag};

fn arb_address() -> impl Strategy<Value = AccountAddress> {
    prop::array::uniform32(any::<u8>()).prop_map(AccountAddress::new)
}

fn arb_type_tag() -> impl Strategy<Value = TypeTag> {
    let leaf = prop_oneof![
        Just(TypeTag::Bool),
        Just(TypeTag::U8),
        Just(TypeTag::U16),
        Just(TypeTag::U32),
        Just(TypeTag::U64),
        Just(TypeTag::U128),
        Just(TypeTag::U256),
        Just(TypeTag::Address),
        Just(TypeTag::Signer),
    ];
    leaf.prop_recursive(4, 16, 1, |inner| inner.prop_map(TypeTag::vector))
}

fn arb_args() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..200), 0..6)
}

fn arb_action() -> impl Strategy<Value = MoveAction> {
    (
        prop::sample::select(vec![
            "0x1::example::run",
            "0x3::transfer::transfer_coin",
            "rooch_framework::account::create_account",
        ]),
        prop::collection::vec(arb_type_tag(), 0..3),
        arb_args(),
    )
        .prop_map(|(target, ty_args, args)| {
            MoveAction::call_function(target, ty_args, args).unwrap()
        })
}

fn arb_data() -> impl Strategy<Value = TransactionData> {
    (arb_action(), arb_address(), any::<u64>(), any::<u64>(), any::<u64>()).prop_map(
        |(action, sender, chain_id, seq, gas)| {
            TransactionData::from_parts(action, sender, chain_id, seq, gas)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn integers_roundtrip(a in any::<u8>(), b in any::<u16>(), c in any::<u32>(), d in any::<u64>(), e in any::<u128>()) {
        prop_assert_eq!(from_bytes::<u8>(&to_bytes(&a).unwrap()).unwrap(), a);
        prop_assert_eq!(from_bytes::<u16>(&to_bytes(&b).unwrap()).unwrap(), b);
        prop_assert_eq!(from_bytes::<u32>(&to_bytes(&c).unwrap()).unwrap(), c);
        prop_assert_eq!(from_bytes::<u64>(&to_bytes(&d).unwrap()).unwrap(), d);
        prop_assert_eq!(from_bytes::<u128>(&to_bytes(&e).unwrap()).unwrap(), e);
    }

    #[test]
    fn byte_sequences_roundtrip(v in prop::collection::vec(any::<u8>(), 0..2048)) {
        let bytes = to_bytes(&v).unwrap();
        prop_assert_eq!(from_bytes::<Vec<u8>>(&bytes).unwrap(), v);
    }

    #[test]
    fn length_prefix_frames_payload(len in 0usize..100_000) {
        let bytes = to_bytes(&vec![0u8; len]).unwrap();
        let mut decoder = Decoder::new(&bytes);
        prop_assert_eq!(decoder.read_length().unwrap(), len);
        prop_assert_eq!(decoder.remaining(), len);
    }

    #[test]
    fn type_tags_roundtrip(tag in arb_type_tag()) {
        let bytes = to_bytes(&tag).unwrap();
        prop_assert_eq!(from_bytes::<TypeTag>(&bytes).unwrap(), tag.clone());
        prop_assert_eq!(tag.to_string().parse::<TypeTag>().unwrap(), tag);
    }

    #[test]
    fn transaction_data_roundtrip_and_deterministic(data in arb_data()) {
        let first = data.encode().unwrap();
        let second = data.clone().encode().unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(TransactionData::decode(&first).unwrap(), data);
    }

    #[test]
    fn action_tag_is_stable(action in arb_action()) {
        prop_assert_eq!(to_bytes(&action).unwrap()[0], 0x01);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Transaction::decode(&bytes);
        let _ = from_bytes::<TypeTag>(&bytes);
        let _ = from_bytes::<Vec<Vec<u8>>>(&bytes);
    }
}
