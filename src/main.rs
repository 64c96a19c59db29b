//! Benchmark driver: sweep matrix sizes and time the parallel multiply.

use clap::{Parser, ValueEnum};
use matmul_bt::{Element, Matrix, MultiplyConfig, multiply_naive, multiply_transposed, transpose};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "matmul-bt")]
#[command(author, version, about = "Time C = A * B with a transposed B and row-parallel workers")]
struct Cli {
    /// Square matrix sizes to run, in order
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "3,4,8,32,64,128,256,512,1024"
    )]
    sizes: Vec<usize>,

    /// Worker threads (default: available parallelism)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Element type of the matrices
    #[arg(short, long, value_enum, default_value_t = ElementKind::F64)]
    element: ElementKind,

    /// Split the transpose of B across the workers as well
    #[arg(long)]
    parallel_transpose: bool,

    /// Seed for the random fill (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Check every result against the naive i-j-k reference
    #[arg(long)]
    verify: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ElementKind {
    /// Integers drawn from 0..=10
    I32,
    /// Floats drawn from [0, 1)
    F64,
}

/// Element types the driver knows how to fill.
trait RandomFill: Element {
    fn sample(rng: &mut StdRng) -> Self;

    /// Whether a result off from the reference counts as a failure.
    fn matches(expected: &[Self], actual: &[Self]) -> bool;
}

impl RandomFill for i32 {
    fn sample(rng: &mut StdRng) -> Self {
        rng.random_range(0..=10)
    }

    fn matches(expected: &[Self], actual: &[Self]) -> bool {
        expected == actual
    }
}

impl RandomFill for f64 {
    fn sample(rng: &mut StdRng) -> Self {
        rng.random::<f64>()
    }

    fn matches(expected: &[Self], actual: &[Self]) -> bool {
        expected.len() == actual.len()
            && expected
                .iter()
                .zip(actual)
                .all(|(e, a)| (e - a).abs() <= 1e-9 * e.abs().max(1.0))
    }
}

struct SizeResult {
    size: usize,
    transpose_ms: f64,
    multiply_ms: f64,
    verified: Option<bool>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("Error: result did not match the reference");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let mut config = MultiplyConfig::new().with_parallel_transpose(cli.parallel_transpose);
    if let Some(w) = cli.workers {
        config = config.with_workers(w);
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    println!("=== Transposed Row-Parallel Matrix Multiplication ===\n");
    println!(
        "Element: {:?}, workers: {}, parallel transpose: {}, seed: {}\n",
        cli.element,
        config.worker_count(),
        config.parallel_transpose,
        seed
    );

    let results = match cli.element {
        ElementKind::I32 => sweep::<i32>(&cli.sizes, &config, cli.verify, &mut rng)?,
        ElementKind::F64 => sweep::<f64>(&cli.sizes, &config, cli.verify, &mut rng)?,
    };

    print_summary_table(&results);
    Ok(results.iter().all(|r| r.verified != Some(false)))
}

fn sweep<T: RandomFill>(
    sizes: &[usize],
    config: &MultiplyConfig,
    verify: bool,
    rng: &mut StdRng,
) -> Result<Vec<SizeResult>, Box<dyn std::error::Error>> {
    let mut results = Vec::with_capacity(sizes.len());

    for &size in sizes {
        let a = Matrix::from_fn(size, size, |_, _| T::sample(rng))?;
        let b = Matrix::from_fn(size, size, |_, _| T::sample(rng))?;

        let start = Instant::now();
        let bt = transpose(&b, config)?;
        let transpose_ms = start.elapsed().as_secs_f64() * 1000.0;

        let start = Instant::now();
        let c = multiply_transposed(&a, &bt, config)?;
        let multiply_ms = start.elapsed().as_secs_f64() * 1000.0;

        let verified = if verify {
            let expected = multiply_naive(&a, &b)?;
            Some(T::matches(expected.as_slice(), c.as_slice()))
        } else {
            None
        };

        println!(
            "Processing time of {} x {} matrix: {:.3} ms",
            size, size, multiply_ms
        );
        log::info!("size {} transpose {:.3} ms", size, transpose_ms);

        results.push(SizeResult {
            size,
            transpose_ms,
            multiply_ms,
            verified,
        });
    }

    Ok(results)
}

fn print_summary_table(results: &[SizeResult]) {
    println!("\n{}", "=".repeat(72));
    println!("SUMMARY");
    println!("{}", "=".repeat(72));

    println!(
        "\n{:<12} {:>14} {:>14} {:>14} {:>12}",
        "Size", "Transpose", "Multiply", "GOPS", "Verified"
    );
    println!("{}", "-".repeat(72));

    for r in results {
        let ops = 2.0 * (r.size * r.size * r.size) as f64;
        let gops = if r.multiply_ms > 0.0 {
            ops / (r.multiply_ms / 1000.0) / 1e9
        } else {
            0.0
        };
        let verified = match r.verified {
            Some(true) => "ok",
            Some(false) => "MISMATCH",
            None => "-",
        };

        println!(
            "{:<12} {:>11.3} ms {:>11.3} ms {:>14.2} {:>12}",
            format!("{}×{}", r.size, r.size),
            r.transpose_ms,
            r.multiply_ms,
            gops,
            verified
        );
    }

    println!("{}", "=".repeat(72));
    println!("\nGOPS = billion multiply-add operations per second (2·n³ / time).\n");
}
