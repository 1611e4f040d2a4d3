use proptest::prelude::*;

use rawtx_script::{Address, Network};
use rawtx_transaction::Transaction;

#[derive(Clone, Debug)]
enum OutputSpec {
    Pay(u64, [u8; 20], Network),
    Data(Vec<u8>),
}

#[derive(Clone, Debug)]
struct InputSpec {
    hash: [u8; 32],
    index: u32,
    amount: u64,
    script: Vec<u8>,
}

fn arb_input() -> impl Strategy<Value = InputSpec> {
    (
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        0u64..2_100_000_000_000_000,
        prop::collection::vec(any::<u8>(), 0..300),
    )
        .prop_map(|(hash, index, amount, script)| InputSpec {
            hash,
            index,
            amount,
            script,
        })
}

fn arb_output() -> impl Strategy<Value = OutputSpec> {
    prop_oneof![
        (
            any::<u64>(),
            prop::array::uniform20(any::<u8>()),
            prop_oneof![Just(Network::Mainnet), Just(Network::Testnet)],
        )
            .prop_map(|(amount, pkh, network)| OutputSpec::Pay(amount, pkh, network)),
        prop::collection::vec(any::<u8>(), 0..300).prop_map(OutputSpec::Data),
    ]
}

fn build(inputs: &[InputSpec], outputs: &[OutputSpec]) -> Transaction {
    let mut tx = Transaction::new();
    for i in inputs {
        tx.add_input(&i.hash, i.index, i.amount, &i.script).unwrap();
    }
    for o in outputs {
        match o {
            OutputSpec::Pay(amount, pkh, network) => {
                let address = Address::from_public_key_hash(pkh, *network);
                tx.add_output(*amount, &address.to_string()).unwrap();
            }
            OutputSpec::Data(payload) => tx.add_data_output(payload),
        }
    }
    tx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn records_keep_insertion_order(
        inputs in prop::collection::vec(arb_input(), 0..5),
        outputs in prop::collection::vec(arb_output(), 0..5),
    ) {
        let tx = build(&inputs, &outputs);
        prop_assert_eq!(tx.input_count(), inputs.len());
        prop_assert_eq!(tx.output_count(), outputs.len());

        for (record, spec) in tx.inputs().iter().zip(&inputs) {
            prop_assert_eq!(record.prev_output_hash().as_bytes(), &spec.hash);
            prop_assert_eq!(record.prev_output_index(), spec.index);
            prop_assert_eq!(record.amount(), spec.amount);
            prop_assert_eq!(record.unlocking_script().to_bytes(), &spec.script[..]);
        }
        for (record, spec) in tx.outputs().iter().zip(&outputs) {
            match spec {
                OutputSpec::Pay(amount, pkh, _) => {
                    prop_assert_eq!(record.amount(), *amount);
                    prop_assert_eq!(record.locking_script().public_key_hash().unwrap(), *pkh);
                }
                OutputSpec::Data(payload) => {
                    prop_assert_eq!(record.amount(), 0);
                    prop_assert_eq!(&record.locking_script().to_bytes()[1..], &payload[..]);
                }
            }
        }
    }

    #[test]
    fn serialization_is_idempotent_and_sized(
        inputs in prop::collection::vec(arb_input(), 0..4),
        outputs in prop::collection::vec(arb_output(), 0..4),
    ) {
        let tx = build(&inputs, &outputs);
        let bytes = tx.to_bytes();
        prop_assert_eq!(&bytes, &tx.to_bytes());
        prop_assert_eq!(bytes.len(), tx.size());
        prop_assert_eq!(tx.hash(), tx.hash());
    }

    #[test]
    fn parse_roundtrip(
        inputs in prop::collection::vec(arb_input(), 0..4),
        outputs in prop::collection::vec(arb_output(), 0..4),
    ) {
        let tx = build(&inputs, &outputs);
        let parsed = Transaction::from_hex(&tx.to_hex()).unwrap();
        prop_assert_eq!(parsed.to_bytes(), tx.to_bytes());
        prop_assert_eq!(parsed.tx_id(), tx.tx_id());
        prop_assert_eq!(parsed.hash(), tx.hash());

        prop_assert_eq!(parsed.input_count(), inputs.len());
        prop_assert_eq!(parsed.output_count(), outputs.len());
        for (record, spec) in parsed.inputs().iter().zip(&inputs) {
            prop_assert_eq!(record.prev_output_hash().as_bytes(), &spec.hash);
            prop_assert_eq!(record.prev_output_index(), spec.index);
            prop_assert_eq!(record.amount(), 0);
            prop_assert_eq!(record.unlocking_script().to_bytes(), &spec.script[..]);
        }
        for (record, spec) in parsed.outputs().iter().zip(&outputs) {
            match spec {
                OutputSpec::Pay(amount, pkh, _) => {
                    prop_assert_eq!(record.amount(), *amount);
                    prop_assert!(record.locking_script().is_p2pkh());
                    prop_assert_eq!(record.locking_script().public_key_hash().unwrap(), *pkh);
                }
                OutputSpec::Data(payload) => {
                    prop_assert!(record.is_data());
                    prop_assert_eq!(record.amount(), 0);
                    prop_assert_eq!(&record.locking_script().to_bytes()[1..], &payload[..]);
                }
            }
        }
        prop_assert_eq!(parsed.total_output_amount(), tx.total_output_amount());
    }
}
