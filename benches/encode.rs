//! Benchmarks for tree construction and packing.
//!
//! Run with: `cargo bench --bench encode`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use huffpack::{build, encode_with, extract, EncoderConfig, FrequencyTable, LengthMode};

fn sample_text(size: usize) -> Vec<u8> {
    let phrases: &[&[u8]] = &[
        b"The quick brown fox jumps over the lazy dog. ",
        b"Pack my box with five dozen liquor jugs! ",
        b"How vexingly quick daft zebras jump!! ",
    ];
    let mut data = Vec::with_capacity(size);
    let mut i = 0;
    while data.len() < size {
        data.extend_from_slice(phrases[i % phrases.len()]);
        i += 1;
    }
    data.truncate(size);
    data
}

fn bench_build(c: &mut Criterion) {
    let full: FrequencyTable = (0..=255u8).map(|s| (s, u64::from(s) * 31 % 97 + 1)).collect();
    c.bench_function("build 256 symbols", |b| b.iter(|| build(black_box(&full))));

    let text = FrequencyTable::from_bytes(&sample_text(4096));
    c.bench_function("build text alphabet", |b| b.iter(|| build(black_box(&text))));
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [1024usize, 16 * 1024, 256 * 1024] {
        let data = sample_text(size);
        let codes = extract(&build(&FrequencyTable::from_bytes(&data)).unwrap()).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        for mode in [LengthMode::ValueWidth, LengthMode::Stored] {
            let config = EncoderConfig::new().with_length_mode(mode);
            group.bench_with_input(BenchmarkId::new(format!("{:?}", mode), size), &data, |b, data| {
                b.iter(|| encode_with(&codes, black_box(data), &config))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_encode);
criterion_main!(benches);
