//! Performance benchmarks for the stream pipeline
//!
//! Measures decode + frame + parse cost for bodies of different sizes and
//! chunk granularities.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fixstream::sse::{parse_event_line, ChunkDecoder, LineFramer};

/// Generate a stream body with `iterations` rounds of progress and a final result
fn generate_stream(iterations: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 1..=iterations {
        body.push_str(&format!("data: {{\"iteration\": {}}}\n", i));
        for node in ["developer", "reviewer", "qa_executor"] {
            body.push_str(&format!("data: {{\"node\": \"{}\"}}\n", node));
        }
        body.push_str(": keepalive\n");
    }
    body.push_str(concat!(
        "data: {\"status\": \"completed\", \"is_success\": true, ",
        "\"fixed_code\": \"def add(a, b):\\n    return a + b\", ",
        "\"summary\": \"Fixed the operator ✓\", \"test_output\": \"3\", ",
        "\"knowledge\": [{\"title\": \"TypeError\", \"summary\": \"Check operands\", \"score\": 88}]}\n",
    ));
    body.into_bytes()
}

/// Run the synchronous stages over `body` cut into `chunk_size` pieces
fn consume(body: &[u8], chunk_size: usize) -> usize {
    let mut decoder = ChunkDecoder::new();
    let mut framer = LineFramer::new();
    let mut outcomes = 0;

    for chunk in body.chunks(chunk_size) {
        let (text, _) = decoder.decode(chunk);
        framer.push(&text);
        for line in framer.lines() {
            black_box(parse_event_line(&line));
            outcomes += 1;
        }
    }
    outcomes
}

/// Benchmark whole-body consumption by stream length
fn bench_pipeline_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_by_size");

    for iterations in [1, 5, 25, 100].iter() {
        let body = generate_stream(*iterations);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_iterations", iterations)),
            &body,
            |b, body| b.iter(|| consume(black_box(body), 4096)),
        );
    }

    group.finish();
}

/// Benchmark a fixed body under increasingly fine fragmentation
fn bench_pipeline_by_chunk_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_by_chunk_size");
    let body = generate_stream(25);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [1, 7, 64, 1024].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            chunk_size,
            |b, &chunk_size| b.iter(|| consume(black_box(&body), chunk_size)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline_by_size, bench_pipeline_by_chunk_size);

criterion_main!(benches);
