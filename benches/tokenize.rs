//! Tokenizer and buffer-edit benchmarks.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use strbuf::{ByteBuffer, Tokenizer};

/// Builds a CSV line with `fields` fields, every third one quoted with an
/// embedded delimiter.
fn csv_line(fields: usize) -> Vec<u8> {
    let mut line = Vec::new();
    for i in 0..fields {
        if i > 0 {
            line.push(b',');
        }
        if i % 3 == 0 {
            line.extend_from_slice(format!("\"name {i}, \"\"x\"\"\"").as_bytes());
        } else {
            line.extend_from_slice(format!("value-{i}").as_bytes());
        }
    }
    line
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize/csv");
    let tokenizer = Tokenizer::new();

    for fields in [8, 64, 512] {
        let source = ByteBuffer::from_bytes(&csv_line(fields));
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fields), &source, |b, source| {
            b.iter(|| black_box(tokenizer.tokenize(black_box(source)).unwrap()));
        });
    }
    group.finish();
}

fn bench_buffer_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");

    group.bench_function("append_bytes/1k", |b| {
        b.iter(|| {
            let mut buffer = ByteBuffer::with_capacity(16);
            for _ in 0..1024 {
                buffer.append_bytes(black_box(b"x")).unwrap();
            }
            black_box(buffer)
        });
    });

    let text = ByteBuffer::from_bytes(&b"the quick brown fox ".repeat(256));
    group.bench_function("find_replace_all", |b| {
        b.iter(|| {
            let mut buffer = text.clone();
            black_box(buffer.find_replace_all(b"fox", b"cat", 0).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_buffer_edits);
criterion_main!(benches);
