use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use heapbench::bench::{self, BenchmarkConfig, Case};
use heapbench::input::{read_sequence_with_outcome, StopReason};
use heapbench::plot;
use heapbench::timing::{report_seconds, time_sort};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "HEAPBENCH_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "heapbench",
    about = "Heapsort integers from stdin and print the sort time in seconds"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time the sort over generated inputs and write a CSV report.
    Bench {
        /// Input sizes (comma-separated).
        #[arg(long, value_delimiter = ',', default_values_t = bench::DEFAULT_SIZES)]
        sizes: Vec<usize>,
        /// Input shapes: random, sorted, reversed (comma-separated).
        #[arg(long, value_delimiter = ',', default_values_t = Case::ALL)]
        cases: Vec<Case>,
        /// Repetitions per size and case.
        #[arg(long, default_value_t = bench::DEFAULT_RUNS)]
        runs: usize,
        /// Seed for random inputs.
        #[arg(long)]
        seed: Option<u64>,
        /// Report destination.
        #[arg(long, default_value = bench::DEFAULT_OUTPUT)]
        output: PathBuf,
        /// External program with the same stdin/stdout contract to time on the same data.
        #[arg(long)]
        external: Vec<PathBuf>,
    },
    /// Render SVG charts from a benchmark report.
    Plot {
        /// Report to read.
        #[arg(long, default_value = bench::DEFAULT_OUTPUT)]
        input: PathBuf,
        /// Directory the charts are written to.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Input shape shown on the size charts.
        #[arg(long, default_value_t = Case::Random)]
        case: Case,
        /// Language shown on the per-case chart.
        #[arg(long, default_value = "rust")]
        language: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        None => run_sort()?,
        Some(Commands::Bench {
            sizes,
            cases,
            runs,
            seed,
            output,
            external,
        }) => run_bench(BenchmarkConfig {
            sizes,
            cases,
            runs,
            seed,
            output,
            external,
        })?,
        Some(Commands::Plot {
            input,
            out_dir,
            case,
            language,
        }) => run_plot(&input, &out_dir, case, &language)?,
    }

    Ok(())
}

/// Logs go to stderr; stdout carries only the reported timing.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_sort() -> Result<()> {
    let outcome = read_sequence_with_outcome(io::stdin().lock()).context("failed to read stdin")?;
    match outcome.stop {
        StopReason::EndOfInput => tracing::debug!(count = outcome.values.len(), "input exhausted"),
        StopReason::InvalidToken { token_index } => {
            tracing::debug!(count = outcome.values.len(), token_index, "stopped at malformed token")
        }
    }

    let mut values = outcome.values;
    let elapsed = time_sort(&mut values);
    tracing::info!(count = values.len(), seconds = elapsed.as_secs_f64(), "sorted input");

    report_seconds(io::stdout().lock(), elapsed).context("failed to write timing")?;
    Ok(())
}

fn run_bench(config: BenchmarkConfig) -> Result<()> {
    let records = bench::run_benchmarks(&config).context("benchmark failed")?;

    let file = File::create(&config.output)
        .with_context(|| format!("failed to create {}", config.output.display()))?;
    bench::write_csv(BufWriter::new(file), &records)
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    for record in &records {
        println!(
            "{}\t{}\tn={}\tmean={:.6}s\tstd={:.6}s",
            record.language, record.case, record.size, record.mean_sec, record.std_dev_sec
        );
    }
    println!("results written to {}", config.output.display());
    Ok(())
}

fn run_plot(input: &Path, out_dir: &Path, case: Case, language: &str) -> Result<()> {
    let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let records = bench::read_csv(BufReader::new(file))
        .with_context(|| format!("failed to read {}", input.display()))?;

    let written =
        plot::render_all(&records, case, language, out_dir).context("failed to render charts")?;
    for path in &written {
        println!("chart written to {}", path.display());
    }
    Ok(())
}
