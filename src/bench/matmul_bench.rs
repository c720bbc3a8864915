//! Criterion benchmarks: each kernel at a few sizes, then a worker sweep.
//!
//! ```bash
//! cargo bench --bench matmul_bench
//! cargo bench --bench matmul_bench -- workers
//! ```

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tilemul::config::default_workers;
use tilemul::{Kernel, Matrix, MultiplyConfig, multiply_reference, multiply_with};

fn random_pair(n: usize) -> (Matrix, Matrix) {
    let mut rng = StdRng::seed_from_u64(12345);
    (Matrix::random(n, n, &mut rng), Matrix::random(n, n, &mut rng))
}

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernels");
    group.sample_size(10);

    for n in [128, 256, 512] {
        let (a, b) = random_pair(n);
        let mut out = vec![0.0; n * n];
        group.throughput(Throughput::Elements((2 * n * n * n) as u64));

        group.bench_with_input(BenchmarkId::new("reference", n), &n, |bench, &n| {
            bench.iter(|| {
                multiply_reference(&mut out, a.as_slice(), b.as_slice(), n, n, n);
                black_box(&out);
            })
        });

        for kernel in [Kernel::Reordered, Kernel::Tiled] {
            let config = MultiplyConfig::single_threaded().with_kernel(kernel);
            group.bench_with_input(BenchmarkId::new(kernel.to_string(), n), &n, |bench, &n| {
                bench.iter(|| {
                    multiply_with(&config, &mut out, a.as_slice(), b.as_slice(), n, n, n)
                        .expect("single-threaded multiply");
                    black_box(&out);
                })
            });
        }
    }
    group.finish();
}

fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("workers");
    group.sample_size(10);

    let n = 512;
    let (a, b) = random_pair(n);
    let mut out = vec![0.0; n * n];

    let max = default_workers().get();
    let mut counts: Vec<usize> = std::iter::successors(Some(1usize), |w| Some(w * 2))
        .take_while(|&w| w < max)
        .collect();
    counts.push(max);

    for workers in counts {
        let config = MultiplyConfig::default().with_workers(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |bench, _| {
            bench.iter(|| {
                multiply_with(&config, &mut out, a.as_slice(), b.as_slice(), n, n, n)
                    .expect("parallel multiply");
                black_box(&out);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kernels, bench_workers);
criterion_main!(benches);
