// Encoding & signing benchmarks for rooch-tx.
//
// Covers payload encoding, payload hashing, full sign-and-encode for both
// schemes, and decoding of an encoded transaction at several argument sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rooch_tx::crypto::{Ed25519Keypair, Secp256k1Keypair};
use rooch_tx::transaction::{CallFunctionArgs, Transaction};

fn build(arg_len: usize) -> Transaction {
    let mut tx = Transaction::new();
    tx.call_function(
        CallFunctionArgs::target("0x3::transfer::transfer_coin")
            .type_args(vec!["0x3::gas_coin::RGas".parse().unwrap()])
            .args(vec![vec![0xAB; arg_len]]),
    )
    .unwrap();
    tx.set_sender("0xABCD".parse().unwrap()).unwrap();
    tx.set_chain_id(4).unwrap();
    tx.set_seq_number(42).unwrap();
    tx
}

fn bench_encode_data(c: &mut Criterion) {
    let tx = build(64);
    c.bench_function("tx/encode_data", |b| {
        b.iter(|| tx.encode_data().unwrap());
    });
}

fn bench_hash_data(c: &mut Criterion) {
    let tx = build(64);
    c.bench_function("tx/hash_data", |b| {
        b.iter(|| tx.hash_data().unwrap());
    });
}

fn bench_sign_and_encode(c: &mut Criterion) {
    let ed = Ed25519Keypair::generate();
    let k1 = Secp256k1Keypair::generate();

    c.bench_function("tx/sign_encode_ed25519", |b| {
        b.iter(|| {
            let mut tx = build(64);
            tx.sign_with(&ed).unwrap();
            tx.into_encoded().unwrap()
        });
    });

    c.bench_function("tx/sign_encode_secp256k1", |b| {
        b.iter(|| {
            let mut tx = build(64);
            tx.sign_with(&k1).unwrap();
            tx.into_encoded().unwrap()
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    let signer = Ed25519Keypair::generate();
    let mut group = c.benchmark_group("tx/decode");

    for size in [32usize, 1024, 16 * 1024] {
        let mut tx = build(size);
        tx.sign_with(&signer).unwrap();
        let bytes = tx.encode().unwrap();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| Transaction::decode(bytes).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_data,
    bench_hash_data,
    bench_sign_and_encode,
    bench_decode
);
criterion_main!(benches);
