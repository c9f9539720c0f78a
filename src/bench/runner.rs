use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use super::BenchmarkError;
use crate::timing::time_sort;

/// Something that can sort a dataset and report the time it took.
pub trait Runner {
    /// Label written to the `language` column of the report.
    fn language(&self) -> &str;

    /// Sort a private copy of `data` once and return the elapsed seconds.
    fn run_once(&mut self, data: &[i32]) -> Result<f64, BenchmarkError>;
}

/// Runs the heapsort of this crate in the current process.
#[derive(Debug, Default)]
pub struct InProcessRunner;

impl Runner for InProcessRunner {
    fn language(&self) -> &str {
        "rust"
    }

    fn run_once(&mut self, data: &[i32]) -> Result<f64, BenchmarkError> {
        let mut copy = data.to_vec();
        Ok(time_sort(&mut copy).as_secs_f64())
    }
}

/// Runs an external program that reads integers on stdin and prints the
/// sort time in seconds on stdout, the same contract as this crate's binary.
#[derive(Debug, Clone)]
pub struct ExternalRunner {
    program: PathBuf,
    label: String,
}

impl ExternalRunner {
    /// Runner for `program`, labelled by its file stem.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let label = program
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.display().to_string());
        Self { program, label }
    }

    /// Override the report label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Program being run.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Runner for ExternalRunner {
    fn language(&self) -> &str {
        &self.label
    }

    fn run_once(&mut self, data: &[i32]) -> Result<f64, BenchmarkError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BenchmarkError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Fed from a separate thread so a child that writes before it has
        // drained stdin cannot deadlock against us.
        let feeder = child.stdin.take().map(|mut stdin| {
            let input = render_input(data);
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        // Always reaped, even when feeding failed.
        let output = child.wait_with_output()?;
        let fed = match feeder {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "stdin feeder panicked"))
            }),
            None => Ok(()),
        };

        if !output.status.success() {
            return Err(BenchmarkError::ExternalFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        fed?;

        parse_seconds(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
            BenchmarkError::InvalidTiming {
                program: self.program.clone(),
                output: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            }
        })
    }
}

/// Space-separated rendering of `data`, as fed to external programs.
pub fn render_input(data: &[i32]) -> String {
    let mut rendered = String::with_capacity(data.len() * 8);
    for (idx, value) in data.iter().enumerate() {
        if idx > 0 {
            rendered.push(' ');
        }
        rendered.push_str(&value.to_string());
    }
    rendered
}

/// Parse a reported duration; negative and non-finite values are rejected.
pub fn parse_seconds(stdout: &str) -> Option<f64> {
    let seconds: f64 = stdout.trim().parse().ok()?;
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_process_leaves_input_untouched() {
        let data = vec![3, 1, 2];
        let mut runner = InProcessRunner;
        let seconds = runner.run_once(&data).unwrap();
        assert!(seconds >= 0.0);
        assert_eq!(data, [3, 1, 2]);
        assert_eq!(runner.language(), "rust");
    }

    #[test]
    fn test_render_input() {
        assert_eq!(render_input(&[]), "");
        assert_eq!(render_input(&[4, -10, 3]), "4 -10 3");
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("0.0125\n"), Some(0.0125));
        assert_eq!(parse_seconds("1.5e-6"), Some(1.5e-6));
        assert_eq!(parse_seconds("-1"), None);
        assert_eq!(parse_seconds("NaN"), None);
        assert_eq!(parse_seconds(""), None);
    }

    #[test]
    fn test_external_label() {
        let runner = ExternalRunner::new("/opt/bin/heapsort_cpp");
        assert_eq!(runner.language(), "heapsort_cpp");
        assert_eq!(runner.with_label("c++").language(), "c++");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_reports_status() {
        let mut runner = ExternalRunner::new("/bin/false");
        let err = runner.run_once(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, BenchmarkError::ExternalFailed { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_program_exiting_before_reading_reports_status() {
        // Large enough that the pipe fills and the write breaks.
        let data: Vec<i32> = (0..250_000).collect();
        let mut runner = ExternalRunner::new("/bin/false");
        let err = runner.run_once(&data).unwrap_err();
        match err {
            BenchmarkError::ExternalFailed { status, .. } => assert!(!status.success()),
            other => panic!("expected ExternalFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_numeric_output_reports_invalid_timing() {
        // `cat` echoes its input back, which is not a duration.
        let mut runner = ExternalRunner::new("/bin/cat");
        let err = runner.run_once(&[4, 5, 6]).unwrap_err();
        match err {
            BenchmarkError::InvalidTiming { output, .. } => assert_eq!(output, "4 5 6"),
            other => panic!("expected InvalidTiming, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_reports_spawn_error() {
        let mut runner = ExternalRunner::new("/nonexistent/heapbench-missing-binary");
        let err = runner.run_once(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, BenchmarkError::Spawn { .. }));
    }
}
