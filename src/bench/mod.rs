//! Benchmark harness
//!
//! Times the sort over generated inputs of several sizes and shapes,
//! repeating each measurement and summarising mean and spread. Besides the
//! in-process heapsort, any external program following the same stdin/stdout
//! contract as the `heapbench` binary can be timed on identical data.

mod data;
mod report;
mod runner;
mod stats;

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

pub use data::{generate, Case, ParseCaseError};
pub use report::{read_csv, write_csv, BenchmarkRecord, CSV_HEADER};
pub use runner::{parse_seconds, render_input, ExternalRunner, InProcessRunner, Runner};
pub use stats::Summary;

/// Default input sizes.
pub const DEFAULT_SIZES: [usize; 5] = [1_000, 10_000, 50_000, 100_000, 250_000];
/// Default repetitions per (size, case).
pub const DEFAULT_RUNS: usize = 30;
/// Default report path.
pub const DEFAULT_OUTPUT: &str = "benchmark_results.csv";

/// Errors raised by the benchmark harness.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// Number of runs must be positive.
    #[error("number of runs must be at least 1")]
    NoRuns,

    /// No sizes to benchmark.
    #[error("no input sizes given")]
    NoSizes,

    /// No cases to benchmark.
    #[error("no input cases given")]
    NoCases,

    /// Size cannot be represented by the generated `i32` data.
    #[error("input size {0} exceeds the supported maximum {max}", max = i32::MAX)]
    SizeTooLarge(usize),

    /// A summary was requested over zero samples.
    #[error("cannot summarise an empty set of samples")]
    NoSamples,

    /// External program could not be started.
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        /// Program path.
        program: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// External program exited unsuccessfully.
    #[error("{} exited with {status}: {stderr}", program.display())]
    ExternalFailed {
        /// Program path.
        program: PathBuf,
        /// Exit status.
        status: ExitStatus,
        /// Captured stderr.
        stderr: String,
    },

    /// External program printed something other than a duration.
    #[error("{} printed '{output}', expected elapsed seconds", program.display())]
    InvalidTiming {
        /// Program path.
        program: PathBuf,
        /// Captured stdout.
        output: String,
    },

    /// A CSV report could not be parsed.
    #[error("malformed report at line {line}: {reason}")]
    MalformedReport {
        /// One-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// I/O failure while talking to an external program or reading a report.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Parameters of a benchmark session.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Input sizes, in report order.
    pub sizes: Vec<usize>,
    /// Input shapes, in report order.
    pub cases: Vec<Case>,
    /// Repetitions per (size, case) and runner.
    pub runs: usize,
    /// Seed for random inputs; `None` picks one at random (it is logged).
    pub seed: Option<u64>,
    /// Where the CSV report is written.
    pub output: PathBuf,
    /// External programs timed alongside the in-process sort.
    pub external: Vec<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            cases: Case::ALL.to_vec(),
            runs: DEFAULT_RUNS,
            seed: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            external: Vec::new(),
        }
    }
}

impl BenchmarkConfig {
    /// Reject configurations that cannot produce a report.
    pub fn validate(&self) -> Result<(), BenchmarkError> {
        if self.runs == 0 {
            return Err(BenchmarkError::NoRuns);
        }
        if self.sizes.is_empty() {
            return Err(BenchmarkError::NoSizes);
        }
        if self.cases.is_empty() {
            return Err(BenchmarkError::NoCases);
        }
        if let Some(&size) = self.sizes.iter().find(|&&s| s > i32::MAX as usize) {
            return Err(BenchmarkError::SizeTooLarge(size));
        }
        Ok(())
    }

    /// In-process runner followed by one runner per external program.
    pub fn runners(&self) -> Vec<Box<dyn Runner>> {
        let mut runners: Vec<Box<dyn Runner>> = vec![Box::new(InProcessRunner)];
        runners.extend(
            self.external
                .iter()
                .map(|program| Box::new(ExternalRunner::new(program.clone())) as Box<dyn Runner>),
        );
        runners
    }
}

/// Run every (size, case) pair against the configured runners.
pub fn run_benchmarks(config: &BenchmarkConfig) -> Result<Vec<BenchmarkRecord>, BenchmarkError> {
    let mut runners = config.runners();
    run_with_runners(config, &mut runners)
}

/// Run every (size, case) pair against `runners`.
///
/// Each dataset is generated once and handed unchanged to every runner, so
/// implementations are compared on identical input.
pub fn run_with_runners(
    config: &BenchmarkConfig,
    runners: &mut [Box<dyn Runner>],
) -> Result<Vec<BenchmarkRecord>, BenchmarkError> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        runs = config.runs,
        sizes = ?config.sizes,
        cases = ?config.cases,
        "starting benchmark"
    );
    let mut rng = StdRng::seed_from_u64(seed);

    let mut records = Vec::with_capacity(config.sizes.len() * config.cases.len() * runners.len());
    for &size in &config.sizes {
        for &case in &config.cases {
            let data = generate(size, case, &mut rng)?;

            for runner in runners.iter_mut() {
                let mut samples = Vec::with_capacity(config.runs);
                for run in 0..config.runs {
                    let seconds = runner.run_once(&data)?;
                    tracing::debug!(language = runner.language(), %case, size, run, seconds);
                    samples.push(seconds);
                }

                let summary = Summary::from_samples(&samples)?;
                tracing::info!(
                    language = runner.language(),
                    %case,
                    size,
                    mean_sec = summary.mean,
                    std_dev_sec = summary.std_dev,
                    "benchmark finished"
                );
                records.push(BenchmarkRecord::new(runner.language(), case, size, &summary));
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Seen = Rc<RefCell<Vec<Vec<i32>>>>;

    /// Reports a fixed duration and records what it was given.
    struct FixedRunner {
        seconds: f64,
        seen: Seen,
    }

    impl Runner for FixedRunner {
        fn language(&self) -> &str {
            "fixed"
        }

        fn run_once(&mut self, data: &[i32]) -> Result<f64, BenchmarkError> {
            self.seen.borrow_mut().push(data.to_vec());
            Ok(self.seconds)
        }
    }

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            sizes: vec![4, 16],
            cases: vec![Case::Sorted, Case::Random],
            runs: 3,
            seed: Some(11),
            ..BenchmarkConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.sizes, DEFAULT_SIZES);
        assert_eq!(config.cases, Case::ALL);
        assert_eq!(config.runs, 30);
        assert_eq!(config.output, PathBuf::from("benchmark_results.csv"));
        assert!(config.validate().is_ok());
        assert_eq!(config.runners().len(), 1);
    }

    #[test]
    fn test_validate_rejects_degenerate_configs() {
        let mut config = small_config();
        config.runs = 0;
        assert!(matches!(config.validate(), Err(BenchmarkError::NoRuns)));

        let mut config = small_config();
        config.sizes.clear();
        assert!(matches!(config.validate(), Err(BenchmarkError::NoSizes)));

        let mut config = small_config();
        config.cases.clear();
        assert!(matches!(config.validate(), Err(BenchmarkError::NoCases)));

        let mut config = small_config();
        config.sizes.push(i32::MAX as usize + 1);
        assert!(matches!(
            config.validate(),
            Err(BenchmarkError::SizeTooLarge(_))
        ));
    }

    #[test]
    fn test_records_follow_size_then_case_order() {
        let config = small_config();
        let records = run_benchmarks(&config).unwrap();

        let keys: Vec<(usize, Case)> = records.iter().map(|r| (r.size, r.case)).collect();
        assert_eq!(
            keys,
            [
                (4, Case::Sorted),
                (4, Case::Random),
                (16, Case::Sorted),
                (16, Case::Random)
            ]
        );
        assert!(records.iter().all(|r| r.language == "rust"));
        assert!(records.iter().all(|r| r.mean_sec >= 0.0 && r.std_dev_sec >= 0.0));
    }

    #[test]
    fn test_runners_see_identical_data() {
        let config = BenchmarkConfig {
            sizes: vec![8],
            cases: vec![Case::Random],
            runs: 2,
            seed: Some(3),
            ..BenchmarkConfig::default()
        };
        let first = Seen::default();
        let second = Seen::default();
        let mut runners: Vec<Box<dyn Runner>> = vec![
            Box::new(FixedRunner {
                seconds: 0.5,
                seen: Rc::clone(&first),
            }),
            Box::new(FixedRunner {
                seconds: 1.0,
                seen: Rc::clone(&second),
            }),
        ];

        let records = run_with_runners(&config, &mut runners).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mean_sec, 0.5);
        assert_eq!(records[0].std_dev_sec, 0.0);
        assert_eq!(records[1].mean_sec, 1.0);

        let expected = generate(8, Case::Random, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(*first.borrow(), vec![expected.clone(), expected.clone()]);
        assert_eq!(*second.borrow(), vec![expected.clone(), expected]);
    }
}
