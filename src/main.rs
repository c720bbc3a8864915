//! Benchmark and verification harness.
//!
//! Builds two random N×N matrices, multiplies them with the reference kernel
//! and with the optimized multiplier, checks the results agree within
//! tolerance, and reports the time of each.
//!
//! ```text
//! matmul-bench [SIZE] [--workers N] [--tile T] [--kernel reference|reordered|tiled]
//!              [--iterations I] [--seed S] [--sweep]
//! ```

use std::process::ExitCode;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tilemul::config::default_workers;
use tilemul::{Kernel, MatmulError, Matrix, MultiplyConfig, Result, verify};

struct Options {
    size: usize,
    config: MultiplyConfig,
    iterations: usize,
    seed: u64,
    sweep: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut opts = Options {
            size: 512,
            config: MultiplyConfig::default(),
            iterations: 3,
            seed: 42,
            sweep: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--workers" => opts.config = opts.config.with_workers(value(&mut args, &arg)?),
                "--tile" => opts.config = opts.config.with_tile_size(value(&mut args, &arg)?),
                "--kernel" => {
                    opts.config = opts.config.with_kernel(value::<Kernel>(&mut args, &arg)?)
                }
                "--iterations" => opts.iterations = value::<usize>(&mut args, &arg)?.max(1),
                "--seed" => opts.seed = value(&mut args, &arg)?,
                "--sweep" => opts.sweep = true,
                other if !other.starts_with('-') => {
                    opts.size = other.parse().map_err(|_| {
                        MatmulError::InvalidArgument(format!(
                            "matrix size `{other}` is not a number"
                        ))
                    })?;
                }
                other => {
                    return Err(MatmulError::InvalidArgument(format!("unknown flag `{other}`")));
                }
            }
        }
        Ok(opts)
    }
}

fn value<T: std::str::FromStr>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T> {
    let raw = args
        .next()
        .ok_or_else(|| MatmulError::InvalidArgument(format!("{flag} needs a value")))?;
    raw.parse()
        .map_err(|_| MatmulError::InvalidArgument(format!("bad value `{raw}` for {flag}")))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let opts = Options::parse(std::env::args().skip(1))?;
    let n = opts.size;

    println!("=== Matrix Multiplication Benchmark ===\n");
    println!(
        "Matrix: {n}×{n}  kernel={}  workers={}  tile={}\n",
        opts.config.kernel, opts.config.workers, opts.config.tile_size
    );

    let mut rng = StdRng::seed_from_u64(opts.seed);
    let a = Matrix::random(n, n, &mut rng);
    let b = Matrix::random(n, n, &mut rng);

    let (reference, ref_ms) = time_it(opts.iterations, || Matrix::multiply_reference(&a, &b))?;
    let (fast, fast_ms) = time_it(opts.iterations, || Matrix::multiply(&a, &b, &opts.config))?;

    let tolerance = verify::tolerance(reference.as_slice(), n);
    verify::compare(reference.as_slice(), fast.as_slice(), n, tolerance)?;
    let diff = verify::max_abs_diff(reference.as_slice(), fast.as_slice());

    println!("{:<12} {:>10.2} ms  {:>8.2} GFLOPS", "Reference", ref_ms, gflops(n, ref_ms));
    println!("{:<12} {:>10.2} ms  {:>8.2} GFLOPS", "Optimized", fast_ms, gflops(n, fast_ms));
    println!("\nSpeedup: {:.2}×", ref_ms / fast_ms);
    println!("Max |diff|: {diff:e} (tolerance {tolerance:e})");

    if opts.sweep {
        sweep(&a, &b, &opts)?;
    }
    Ok(())
}

/// Times the optimized path at 1, 2, 4, ... workers up to the hardware count.
fn sweep(a: &Matrix, b: &Matrix, opts: &Options) -> Result<()> {
    let max = default_workers().get();
    let mut counts: Vec<usize> = std::iter::successors(Some(1usize), |w| Some(w * 2))
        .take_while(|&w| w < max)
        .collect();
    counts.push(max);

    println!("\n{:<10} {:>12} {:>10}", "Workers", "Time", "Speedup");
    println!("{}", "-".repeat(36));

    let mut baseline = None;
    for workers in counts {
        let config = opts.config.with_workers(workers);
        let (_, ms) = time_it(opts.iterations, || Matrix::multiply(a, b, &config))?;
        let base = *baseline.get_or_insert(ms);
        println!("{:<10} {:>9.2} ms {:>9.2}×", workers, ms, base / ms);
    }
    Ok(())
}

/// Runs `f` once to warm up, then `iterations` more times. Returns the last
/// result and the mean wall-clock time in milliseconds.
fn time_it<T>(iterations: usize, mut f: impl FnMut() -> Result<T>) -> Result<(T, f64)> {
    let mut out = f()?;
    let mut total = 0.0;
    for _ in 0..iterations {
        let start = Instant::now();
        out = f()?;
        total += start.elapsed().as_secs_f64();
    }
    Ok((out, total / iterations as f64 * 1000.0))
}

fn gflops(n: usize, ms: f64) -> f64 {
    2.0 * (n * n * n) as f64 / (ms / 1000.0) / 1e9
}
