use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use spn_core::SpnCipher;

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    group.bench_function("generate_instance", |b| {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        b.iter(|| SpnCipher::generate(8, &mut rng));
    });
    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let cipher = SpnCipher::generate(8, &mut rng);

    let mut group = c.benchmark_group("engine");
    group.bench_function("encrypt_block", |b| {
        let mut block = [0u8; 8];
        rng.fill_bytes(&mut block);
        b.iter(|| cipher.encrypt_block(&block));
    });
    group.bench_function("ecb_encrypt_1k", |b| {
        let mut stream = vec![0u8; 1024];
        rng.fill_bytes(&mut stream);
        b.iter(|| cipher.encrypt(&stream));
    });
    group.bench_function("ecb_round_trip_1k", |b| {
        let mut stream = vec![0u8; 1024];
        rng.fill_bytes(&mut stream);
        b.iter(|| {
            let ct = cipher.encrypt(&stream);
            cipher.decrypt(&ct).expect("whole blocks")
        });
    });
    group.finish();
}

criterion_group!(benches, bench_generation, bench_engine);
criterion_main!(benches);
