use charset_detector_rs::detect;
use criterion::BenchmarkId;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const REPEAT_COUNT: usize = 50_000;

pub fn large_payload(c: &mut Criterion) {
    let mut payload = b"hello simple ascii text mixed with a little bit of everything "
        .repeat(REPEAT_COUNT)
        .to_vec();
    payload.extend("我没有埋怨，磋砣的只是一些时间。".as_bytes());
    c.bench_with_input(BenchmarkId::new("large_payload", payload.len()), &payload, |b, s| {
        b.iter(|| black_box(detect(s)));
    });
}

criterion_group!(benches, large_payload);
criterion_main!(benches);
