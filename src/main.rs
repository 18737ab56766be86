//! batch_sieve — classify command-line integers as prime or composite.
//!
//! Usage: batch_sieve [--strict] [--backend native|portable|scalar] <n1> <n2> ...
//!
//! Options are only recognised before the first candidate. From there on
//! every token is a candidate, so `-abc` or `-h7` read as malformed numbers
//! rather than flags.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use batch_sieve::{Backend, BatchProcessor, CliError, CliResult};

#[derive(Parser)]
#[command(name = "batch_sieve", version)]
#[command(about = "SIMD small-prime sieve with trial-division fallback", long_about = None)]
#[command(override_usage = "batch_sieve [OPTIONS] [--] <N>...")]
struct Cli {
    /// Reject malformed candidates instead of reading them as 0
    #[arg(long)]
    strict: bool,

    /// Lane engine driving the sieve
    #[arg(long, value_enum, default_value_t = BackendArg::Native)]
    backend: BackendArg,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Tokens clap gets to see; anything else starts the candidate list.
const OPTION_TOKENS: &[&str] = &[
    "--strict", "-v", "-vv", "-vvv", "--verbose", "-h", "--help", "-V", "--version",
];

/// Split raw arguments (program name excluded) into leading options and
/// candidates. `--` ends the options explicitly.
fn split_args<I>(args: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut options = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            break;
        }
        if arg == "--backend" {
            options.push(arg);
            options.extend(args.next());
        } else if arg.starts_with("--backend=") || OPTION_TOKENS.contains(&arg.as_str()) {
            options.push(arg);
        } else {
            let mut candidates = vec![arg];
            candidates.extend(args);
            return (options, candidates);
        }
    }

    (options, args.collect())
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Native,
    Portable,
    Scalar,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Native => Backend::Native,
            BackendArg::Portable => Backend::Portable,
            BackendArg::Scalar => Backend::Scalar,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Decimal `u64`; unless `strict`, anything unparseable reads as 0.
fn parse_candidate(arg: &str, strict: bool) -> CliResult<u64> {
    match arg.parse::<u64>() {
        Ok(n) => Ok(n),
        Err(source) if strict => Err(CliError::parse(arg, source)),
        Err(source) => {
            warn!(arg, %source, "malformed candidate read as 0");
            Ok(0)
        }
    }
}

fn format_verdict(n: u64, prime: bool) -> String {
    format!("{:>12} -> {}", n, if prime { "prime" } else { "composite" })
}

fn run(cli: &Cli, candidates: &[String]) -> CliResult<()> {
    if candidates.is_empty() {
        return Err(CliError::Usage);
    }

    let numbers = candidates
        .iter()
        .map(|arg| parse_candidate(arg, cli.strict))
        .collect::<CliResult<Vec<u64>>>()?;

    let mut verdicts = Vec::with_capacity(numbers.len());
    let processor = BatchProcessor::new(cli.backend.into());
    let stats = processor.process(&numbers, &mut verdicts);
    debug!(backend = processor.backend().name(), scalar_checks = stats.scalar_checks(), "verdicts ready");

    let mut out = BufWriter::new(io::stdout().lock());
    for (&n, &prime) in numbers.iter().zip(&verdicts) {
        writeln!(out, "{}", format_verdict(n, prime))?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let mut raw = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
    let bin = raw.next().unwrap_or_else(|| "batch_sieve".to_owned());
    let (options, candidates) = split_args(raw);

    let cli = Cli::parse_from(std::iter::once(bin).chain(options));
    init_tracing(cli.verbose);

    match run(&cli, &candidates) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}
