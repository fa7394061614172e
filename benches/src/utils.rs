use criterion::Criterion;

/// Message lengths, in bytes, every benchmark group runs over.
pub const SIZES: [usize; 4] = [10, 100, 1000, 10000];

#[cfg(not(feature = "cpb"))]
pub type Benchmarker = Criterion;

#[cfg(feature = "cpb")]
pub type Benchmarker = Criterion<criterion_cycles_per_byte::CyclesPerByte>;

#[cfg(not(feature = "cpb"))]
pub fn config() -> Benchmarker {
    Criterion::default()
}

#[cfg(feature = "cpb")]
pub fn config() -> Benchmarker {
    Criterion::default().with_measurement(criterion_cycles_per_byte::CyclesPerByte)
}
