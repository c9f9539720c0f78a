use super::BenchmarkError;

/// Mean and spread of repeated timings, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator), zero for a single run.
    pub std_dev: f64,
    /// Number of samples.
    pub runs: usize,
}

impl Summary {
    /// Summarise a non-empty set of samples.
    pub fn from_samples(samples: &[f64]) -> Result<Self, BenchmarkError> {
        if samples.is_empty() {
            return Err(BenchmarkError::NoSamples);
        }

        let runs = samples.len();
        let mean = samples.iter().sum::<f64>() / runs as f64;
        let std_dev = if runs > 1 {
            let sq: f64 = samples.iter().map(|s| (s - mean).powi(2)).sum();
            (sq / (runs - 1) as f64).sqrt()
        } else {
            0.0
        };

        Ok(Self {
            mean,
            std_dev,
            runs,
        })
    }
}
