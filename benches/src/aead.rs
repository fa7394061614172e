//! MGM and SIV benchmarks.
use aes::{Aes128, cipher::KeyInit};
use blockaead::{Aead, CmacSiv, Mgm, PmacSiv};
use criterion::{BenchmarkId, Throughput, criterion_group, criterion_main};

mod utils;
use utils::{Benchmarker, SIZES, config};

fn bench_aead<A: Aead>(c: &mut Benchmarker, name: &str, aead: &A) {
    let mut group = c.benchmark_group(name);
    let nonce = vec![0u8; aead.nonce_size()];

    for size in &SIZES {
        let buf = vec![0u8; *size];

        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_function(BenchmarkId::new("seal", size), |b| {
            b.iter(|| aead.seal(&nonce, &buf, b"").unwrap());
        });

        let sealed = aead.seal(&nonce, &buf, b"").unwrap();
        group.bench_function(BenchmarkId::new("open", size), |b| {
            b.iter(|| aead.open(&nonce, &sealed, b"").unwrap());
        });
    }

    group.finish();
}

fn bench(c: &mut Benchmarker) {
    let aes = Aes128::new(&Default::default());
    bench_aead(c, "mgm-aes128", &Mgm::new(aes).unwrap());

    let key = [0u8; 32];
    bench_aead(c, "cmac-siv-aes128", &CmacSiv::<Aes128>::new_from_slice(&key, 16).unwrap());
    bench_aead(c, "pmac-siv-aes128", &PmacSiv::<Aes128>::new_from_slice(&key, 16).unwrap());
}

criterion_group!(
    name = benches;
    config = config();
    targets = bench
);

criterion_main!(benches);
