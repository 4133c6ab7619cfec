use std::io::Cursor;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plz4_core::compression::CodecOptions;
use plz4_core::stream::{run_compress_pipeline, run_decompress_pipeline, PipelineConfig};

const DATA_LEN: usize = 8 * 1024 * 1024;

/// Semi-compressible text-like data.
fn test_data(len: usize) -> Vec<u8> {
    let words: [&[u8]; 8] = [b"block ", b"frame ", b"slot ", b"worker ", b"ordered ", b"batch ", b"drain ", b"\n"];
    let mut seed = 0x2545_F491_4F6C_DD1Du64;
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        out.extend_from_slice(words[(seed % 8) as usize]);
    }
    out.truncate(len);
    out
}

fn compress(data: &[u8], config: &PipelineConfig) -> Vec<u8> {
    let mut wire = Vec::with_capacity(data.len());
    run_compress_pipeline(Cursor::new(data), &mut wire, config, &config.codec).unwrap();
    wire
}

fn bench_compress_workers(c: &mut Criterion) {
    let data = test_data(DATA_LEN);
    let mut group = c.benchmark_group("compress_lz4");
    group.sample_size(10);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for workers in [1usize, 2, 4, 8] {
        let config = PipelineConfig::default().with_workers(workers);
        group.bench_with_input(BenchmarkId::new("workers", workers), &data, |b, data| {
            b.iter(|| compress(data, &config));
        });
    }
    group.finish();
}

fn bench_decompress_workers(c: &mut Criterion) {
    let data = test_data(DATA_LEN);
    let mut group = c.benchmark_group("decompress_lz4");
    group.sample_size(10);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for workers in [1usize, 4, 8] {
        let config = PipelineConfig::default().with_workers(workers);
        let wire = compress(&data, &config);
        group.bench_with_input(BenchmarkId::new("workers", workers), &wire, |b, wire| {
            b.iter(|| {
                let mut out = Vec::with_capacity(DATA_LEN);
                run_decompress_pipeline(Cursor::new(wire), &mut out, &config, &config.codec).unwrap();
                out
            });
        });
    }
    group.finish();
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let data = test_data(DATA_LEN);
    let mut group = c.benchmark_group("compress_chunk_size");
    group.sample_size(10);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk_size in [64 * 1024usize, 256 * 1024, 1024 * 1024] {
        let config = PipelineConfig::default().with_workers(4).with_chunk_size(chunk_size);
        group.bench_with_input(BenchmarkId::new("lz4", chunk_size), &data, |b, data| {
            b.iter(|| compress(data, &config));
        });
        let config = config.with_codec(CodecOptions::zstd(Some(3)));
        group.bench_with_input(BenchmarkId::new("zstd3", chunk_size), &data, |b, data| {
            b.iter(|| compress(data, &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress_workers, bench_decompress_workers, bench_chunk_sizes);
criterion_main!(benches);
