use charset_detector_rs::entity::LanguageFilter;
use charset_detector_rs::UniversalDetector;
use criterion::BenchmarkId;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const REPEAT_COUNT: usize = 20_000;
const CHUNK_SIZE: usize = 256;

/// Feeds the coordinator in small chunks rather than one call, to
/// measure the straddling-state bookkeeping (pending multi-byte leads,
/// escape-prefix partials) rather than single-shot throughput.
pub fn streaming_chunks(c: &mut Criterion) {
    // Windows-1251-shaped high-byte payload: Cyrillic lead bytes
    // interleaved with plain ASCII, repeated to benchmark scale.
    let cyrillic_like: Vec<u8> = (0..REPEAT_COUNT)
        .flat_map(|i| [0xC0 + (i % 48) as u8, b' ', b'a' + (i % 26) as u8])
        .collect();

    c.bench_with_input(
        BenchmarkId::new("streaming_chunks", cyrillic_like.len()),
        &cyrillic_like,
        |b, s| {
            b.iter(|| {
                let mut detector = UniversalDetector::new(LanguageFilter::ALL);
                for chunk in s.chunks(CHUNK_SIZE) {
                    detector.feed(chunk);
                }
                black_box(detector.close().clone())
            });
        },
    );
}

criterion_group!(benches, streaming_chunks);
criterion_main!(benches);
