//! CMAC and PMAC benchmarks.
use aes::{Aes128, cipher::KeyInit};
use blockmac::{Cmac, Mac, Pmac};
use criterion::{BenchmarkId, Throughput, criterion_group, criterion_main};

mod utils;
use utils::{Benchmarker, SIZES, config};

fn bench_mac<M: Mac>(c: &mut Benchmarker, name: &str, mut mac: M) {
    let mut group = c.benchmark_group(name);

    for size in &SIZES {
        let buf = vec![0u8; *size];

        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_function(BenchmarkId::new("write_sum", size), |b| {
            b.iter(|| {
                mac.reset();
                mac.write(&buf).unwrap();
                mac.sum().unwrap()
            });
        });
    }

    group.finish();
}

fn bench(c: &mut Benchmarker) {
    let aes = Aes128::new(&Default::default());
    bench_mac(c, "cmac-aes128", Cmac::new(aes.clone()).unwrap());
    bench_mac(c, "pmac-aes128", Pmac::new(aes).unwrap());
}

criterion_group!(
    name = benches;
    config = config();
    targets = bench
);

criterion_main!(benches);
