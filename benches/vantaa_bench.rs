//! Benchmarks for the CryptoVantaa construction

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cryptovantaa::{ChaseMode, CryptoVantaa, WorkingMemory, chase::chase};

fn bench_hash(c: &mut Criterion) {
    let mut hasher = CryptoVantaa::new();
    let input = [0x5Au8; 80];

    c.bench_function("vantaa_single", |b| b.iter(|| hasher.hash(black_box(&input))));
}

fn bench_hash_varying_nonce(c: &mut Criterion) {
    let mut hasher = CryptoVantaa::new();

    c.bench_function("vantaa_varying_nonce", |b| {
        let mut header = [0u8; 80];
        let mut nonce: u32 = 0;
        b.iter(|| {
            header[76..].copy_from_slice(&nonce.to_le_bytes());
            nonce = nonce.wrapping_add(1);
            hasher.hash(black_box(&header))
        })
    });
}

fn bench_chase(c: &mut Criterion) {
    let words: Vec<u32> = (0..1u32 << 22).map(|i| i.wrapping_mul(0x9E37_79B9)).collect();
    let memory = WorkingMemory::new(&words).unwrap();
    let digest = [0xC3u8; 32];
    let seed = [0u8; 32];

    c.bench_function("vantaa_chase", |b| {
        b.iter(|| chase(&memory, black_box(&digest), &seed, ChaseMode::Tiled))
    });
}

criterion_group!(benches, bench_hash, bench_hash_varying_nonce, bench_chase);
criterion_main!(benches);
