//! Criterion benchmarks for the keyrelay JSON line codec and key lookup.
//!
//! Run with:
//! ```bash
//! cargo bench --package keyrelay-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keyrelay_core::{decode, encode, CharacterEvent, KeyMapper};

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn fixtures() -> Vec<(&'static str, CharacterEvent)> {
    vec![
        ("ascii", CharacterEvent::new("A").unwrap()),
        ("carriage_return", CharacterEvent::carriage_return()),
        ("quote", CharacterEvent::new("\"").unwrap()),
        ("multibyte", CharacterEvent::new("日").unwrap()),
    ]
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (name, event) in fixtures() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &event, |b, event| {
            b.iter(|| encode(black_box(event)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, event) in fixtures() {
        let mut record = encode(&event);
        record.pop(); // strip the terminator, as the session loop does
        group.bench_with_input(BenchmarkId::from_parameter(name), &record, |b, record| {
            b.iter(|| decode(black_box(record)))
        });
    }
    group.bench_function("malformed", |b| b.iter(|| decode(black_box(b"not-json"))));
    group.finish();
}

fn bench_key_lookup(c: &mut Criterion) {
    let event = CharacterEvent::new("k").unwrap();
    c.bench_function("position_for", |b| {
        b.iter(|| KeyMapper::position_for(black_box(&event)))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_key_lookup);
criterion_main!(benches);
