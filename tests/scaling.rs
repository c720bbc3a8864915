//! Wall-clock scaling checks. Timing-sensitive, so ignored by default:
//!
//! ```bash
//! cargo test --release --test scaling -- --ignored
//! ```

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tilemul::config::default_workers;
use tilemul::{Matrix, MultiplyConfig};

fn best_of(runs: usize, a: &Matrix, b: &Matrix, config: &MultiplyConfig) -> Duration {
    (0..runs)
        .map(|_| {
            let start = Instant::now();
            Matrix::multiply(a, b, config).unwrap();
            start.elapsed()
        })
        .min()
        .unwrap()
}

#[test]
#[ignore]
fn test_more_workers_do_not_regress() {
    let max = default_workers().get();
    if max < 2 {
        println!("Skipping - single hardware thread");
        return;
    }

    let n = 512;
    let mut rng = StdRng::seed_from_u64(1);
    let a = Matrix::random(n, n, &mut rng);
    let b = Matrix::random(n, n, &mut rng);

    let single = best_of(5, &a, &b, &MultiplyConfig::single_threaded());
    let parallel = best_of(5, &a, &b, &MultiplyConfig::default().with_workers(max));

    println!("1 worker: {single:?}, {max} workers: {parallel:?}");
    assert!(
        parallel <= single.mul_f64(1.1),
        "{max} workers ({parallel:?}) slower than 1 worker ({single:?})"
    );
}
