//! Batch Filter Benchmark Harness
//! Compares: SIMD batch sieve (native + portable lanes) vs pure trial division
//! vs `primal::is_prime` vs `primes::is_prime`
//!
//! Usage: cargo run --release --bin sieve_bench

use std::fmt;
use std::time::{Duration, Instant};

use batch_sieve::{
    filter_batch, filter_batch_with, filter_batch_with_stats, filter_scalar, LaneEngine,
    NativeEngine, Portable,
};

// ─── Workloads ─────────────────────────────────────────────────────────────

/// xorshift64* — deterministic, so every run sieves the same candidates.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

struct Workload {
    name: &'static str,
    numbers: Vec<u64>,
}

fn workloads(len: usize) -> Vec<Workload> {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

    let random_u32: Vec<u64> = (0..len).map(|_| rng.next() >> 32).collect();
    let consecutive: Vec<u64> = (1_000_000..1_000_000 + len as u64).collect();
    // Every fourth stride carries one value just past the 32-bit lane
    let mixed: Vec<u64> = (0..len)
        .map(|i| {
            if i % 32 == 5 { (1u64 << 32) + (rng.next() >> 48) } else { rng.next() >> 40 }
        })
        .collect();
    let tiny: Vec<u64> = random_u32[..15].to_vec();

    vec![
        Workload { name: "random u32", numbers: random_u32 },
        Workload { name: "consecutive from 10^6", numbers: consecutive },
        Workload { name: "mixed (>2^32 every 32)", numbers: mixed },
        Workload { name: "tiny (15, scalar only)", numbers: tiny },
    ]
}

// ─── Per-candidate crate wrappers ──────────────────────────────────────────

fn primal_batch(numbers: &[u64]) -> Vec<bool> {
    numbers.iter().map(|&n| primal::is_prime(n)).collect()
}

fn primes_batch(numbers: &[u64]) -> Vec<bool> {
    numbers.iter().map(|&n| primes::is_prime(n)).collect()
}

// ─── Benchmarking machinery ────────────────────────────────────────────────

struct BenchResult {
    name: String,
    len: usize,
    prime_count: usize,
    times: Vec<Duration>,
}

impl BenchResult {
    fn median(&self) -> Duration {
        let mut sorted: Vec<Duration> = self.times.clone();
        sorted.sort();
        sorted[sorted.len() / 2]
    }

    fn min(&self) -> Duration {
        self.times.iter().copied().min().unwrap_or_default()
    }

    fn max(&self) -> Duration {
        self.times.iter().copied().max().unwrap_or_default()
    }

    fn mean(&self) -> Duration {
        let total: Duration = self.times.iter().sum();
        total / self.times.len() as u32
    }

    fn stddev_us(&self) -> f64 {
        let mean = self.mean().as_nanos() as f64;
        let variance = self.times.iter()
            .map(|t| {
                let diff = t.as_nanos() as f64 - mean;
                diff * diff
            })
            .sum::<f64>() / self.times.len() as f64;
        variance.sqrt() / 1000.0
    }

    fn per_candidate(&self) -> Duration {
        self.median() / self.len.max(1) as u32
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<24} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>8.1} │ {:>10}",
            self.name,
            format_duration(self.min()),
            format_duration(self.median()),
            format_duration(self.mean()),
            format_duration(self.max()),
            self.stddev_us(),
            format_duration(self.per_candidate()),
        )
    }
}

fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
    }
}

fn bench<F>(name: &str, numbers: &[u64], iterations: usize, f: F) -> (BenchResult, Vec<bool>)
where
    F: Fn(&[u64]) -> Vec<bool>,
{
    // Warmup
    let _ = f(numbers);
    let _ = f(numbers);

    let mut times = Vec::with_capacity(iterations);
    let mut verdicts = Vec::new();

    for _ in 0..iterations {
        let start = Instant::now();
        let result = f(numbers);
        times.push(start.elapsed());
        std::hint::black_box(&result);
        verdicts = result;
    }

    let result = BenchResult {
        name: name.to_string(),
        len: numbers.len(),
        prime_count: verdicts.iter().filter(|&&p| p).count(),
        times,
    };
    (result, verdicts)
}

fn print_header() {
    println!("{:<24} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>8} │ {:>10}",
        "Implementation", "Min", "Median", "Mean", "Max", "σ (µs)", "Per cand.");
    println!("{}", "─".repeat(104));
}

fn main() {
    println!("🦀 Batch Primality Pre-filter Benchmark 🦀");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Native lane engine: {}", NativeEngine::NAME);
    println!();

    let len = 100_000;
    let iterations = 25;

    for workload in workloads(len) {
        let numbers = &workload.numbers;
        println!("┌─ {} — {} candidates ({} iterations) ──────────────────────────────",
            workload.name, format_with_commas(numbers.len() as u64), iterations);
        println!("│");

        print_header();

        let (native, reference) = bench("batch (native lanes)", numbers, iterations, filter_batch);
        println!("{}", native);

        let (portable, v) = bench("batch (portable lanes)", numbers, iterations, filter_batch_with::<Portable>);
        println!("{}", portable);
        assert_eq!(v, reference, "MISMATCH on {}: portable vs native", workload.name);

        let (scalar, v) = bench("scalar trial division", numbers, iterations, filter_scalar);
        println!("{}", scalar);
        assert_eq!(v, reference, "MISMATCH on {}: scalar vs native", workload.name);

        let (primal_res, v) = bench("primal::is_prime", numbers, iterations, primal_batch);
        println!("{}", primal_res);
        assert_eq!(v, reference, "MISMATCH on {}: primal vs native", workload.name);

        let (primes_res, v) = bench("primes::is_prime", numbers, iterations, primes_batch);
        println!("{}", primes_res);
        assert_eq!(v, reference, "MISMATCH on {}: primes vs native", workload.name);

        let (_, stats) = filter_batch_with_stats::<NativeEngine>(numbers);

        println!("│");
        println!("│  primes = {}   │  All implementations agree ✓",
            format_with_commas(native.prime_count as u64));
        println!("│  paths: vector {} (rejected {}), stride fallback {}, tail {}, small batch {}",
            stats.vector, stats.vector_rejected, stats.stride_fallback, stats.tail, stats.small_batch);
        println!("│  trial divisions run: {} of {}",
            format_with_commas(stats.scalar_checks() as u64), format_with_commas(stats.total() as u64));

        let all = [&native, &portable, &scalar, &primal_res, &primes_res];
        let fastest = all.iter().map(|r| r.median()).min().unwrap_or_default();
        for r in all {
            let ratio = r.median().as_nanos() as f64 / fastest.as_nanos().max(1) as f64;
            if ratio <= 1.01 {
                println!("│  {:24} : fastest 🏆", r.name);
            } else {
                println!("│  {:24} : {:.2}x slower", r.name, ratio);
            }
        }

        println!("│");
        println!("└──────────────────────────────────────────────────────────────────────────────────");
        println!();
    }

    println!("✓ Benchmark complete!");
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
