//! Benchmarks for the transform core.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sondeo_core::{
    Complex, CorrelationMode, Fft, Signal, chirp, correlate, fft, frft, ifft,
};

fn tone(n: usize) -> Vec<Complex<f64>> {
    (0..n)
        .map(|i| Complex::from_re((i as f64 * 0.01).sin()))
        .collect()
}

fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft");
    for exp in [8u32, 10, 12, 14] {
        let n = 1usize << exp;
        let input = tone(n);

        group.bench_with_input(BenchmarkId::new("direct", n), &input, |b, input| {
            b.iter(|| {
                let mut buf = input.clone();
                fft(black_box(&mut buf));
                ifft(black_box(&mut buf));
                buf
            });
        });

        group.bench_with_input(BenchmarkId::new("cached", n), &input, |b, input| {
            let mut engine = Fft::with_size(n);
            b.iter(|| {
                let mut buf = input.clone();
                engine.forward(black_box(&mut buf));
                engine.inverse(black_box(&mut buf));
                buf
            });
        });
    }
    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let fs = 1e6;
    let reference = Signal::sample(1000, fs, 0.0, chirp(39e3, 61e3, 1e-3));
    let mut received = Signal::zeros(30000, fs, 0.0);
    received.values[10000..11000].copy_from_slice(&reference.values);

    let mut group = c.benchmark_group("correlate");
    for (name, mode) in [
        ("basic", CorrelationMode::Basic),
        ("phat", CorrelationMode::Phat),
        ("noise_reduction", CorrelationMode::NoiseReduction),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| correlate(black_box(&reference), black_box(&received), mode, 0).unwrap());
        });
    }
    group.finish();
}

fn bench_frft(c: &mut Criterion) {
    let x = tone(1024);
    c.bench_function("frft_general_order", |b| {
        b.iter(|| frft(black_box(&x), 0.75));
    });
}

criterion_group!(benches, bench_fft, bench_correlation, bench_frft);
criterion_main!(benches);
