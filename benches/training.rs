use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use bytepair_rs::{PairHistogram, Sequence, Trainer, TrainerConfig};

/// Generate repetitive text data
fn generate_repetitive_text(size: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog ";
    pattern.repeat(size / pattern.len())
}

/// Generate source code-like data
fn generate_source_code(size: usize) -> Vec<u8> {
    let patterns: [&[u8]; 7] = [
        b"fn main() {\n",
        b"    let x = 42;\n",
        b"    println!(\"Hello, world!\");\n",
        b"    if x > 0 {\n",
        b"        return x;\n",
        b"    }\n",
        b"}\n",
    ];

    let mut result = Vec::with_capacity(size);
    let mut i = 0;
    while result.len() < size {
        result.extend_from_slice(patterns[i % patterns.len()]);
        i += 1;
    }
    result.truncate(size);
    result
}

/// Generate low-repetition binary data
fn generate_low_repetition(size: usize) -> Vec<u8> {
    let mut seed = 12345u64;
    (0..size)
        .map(|_| {
            // Simple LCG random
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            (seed >> 24) as u8
        })
        .collect()
}

fn bench_train(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let generators: [(&str, fn(usize) -> Vec<u8>); 3] = [
        ("repetitive_text", generate_repetitive_text),
        ("source_code", generate_source_code),
        ("low_repetition", generate_low_repetition),
    ];

    for (name, generate) in generators {
        let mut group = c.benchmark_group(name);
        group.sample_size(10);

        for size in sizes.iter() {
            let data = generate(*size);
            group.bench_with_input(BenchmarkId::new("train_500", size), &data, |b, data| {
                b.iter(|| {
                    let config = TrainerConfig::default().with_max_merges(500);
                    let mut trainer = Trainer::new(black_box(data), config);
                    black_box(trainer.train())
                });
            });
        }

        group.finish();
    }
}

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_build");

    for size in [10_000, 100_000, 1_000_000].iter() {
        let seq = Sequence::from_bytes(&generate_source_code(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &seq, |b, seq| {
            b.iter(|| black_box(PairHistogram::build(black_box(seq))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_train, bench_histogram);
criterion_main!(benches);
