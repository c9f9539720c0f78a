use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use super::BenchmarkError;

/// Shape of a generated benchmark input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// Uniform values in `[0, 10n)`.
    Random,
    /// `0, 1, ..., n-1`.
    Sorted,
    /// `n-1, ..., 1, 0`.
    Reversed,
}

impl Case {
    /// Every case, in report order.
    pub const ALL: [Case; 3] = [Case::Random, Case::Sorted, Case::Reversed];

    /// Lowercase label used on the command line and in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Case::Random => "random",
            Case::Sorted => "sorted",
            Case::Reversed => "reversed",
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown case label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown case '{0}' (expected random, sorted or reversed)")]
pub struct ParseCaseError(pub String);

impl FromStr for Case {
    type Err = ParseCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Case::Random),
            "sorted" => Ok(Case::Sorted),
            "reversed" => Ok(Case::Reversed),
            _ => Err(ParseCaseError(s.to_string())),
        }
    }
}

/// Generate `n` values shaped by `case`.
///
/// Fails with [`BenchmarkError::SizeTooLarge`] when `n` does not fit in `i32`.
pub fn generate<R: Rng>(n: usize, case: Case, rng: &mut R) -> Result<Vec<i32>, BenchmarkError> {
    let len = i32::try_from(n).map_err(|_| BenchmarkError::SizeTooLarge(n))?;
    let values = match case {
        Case::Random => {
            if len == 0 {
                return Ok(Vec::new());
            }
            let upper = len.saturating_mul(10);
            (0..len).map(|_| rng.random_range(0..upper)).collect()
        }
        Case::Sorted => (0..len).collect(),
        Case::Reversed => (0..len).rev().collect(),
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_case_labels_roundtrip() {
        for case in Case::ALL {
            assert_eq!(case.as_str().parse::<Case>(), Ok(case));
        }
        assert_eq!(" Reversed ".parse::<Case>(), Ok(Case::Reversed));
        assert!("shuffled".parse::<Case>().is_err());
    }

    #[test]
    fn test_sorted_and_reversed() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate(5, Case::Sorted, &mut rng).unwrap(), [0, 1, 2, 3, 4]);
        assert_eq!(generate(5, Case::Reversed, &mut rng).unwrap(), [4, 3, 2, 1, 0]);
        assert!(generate(0, Case::Reversed, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_random_range_and_determinism() {
        let a = generate(1000, Case::Random, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(1000, Case::Random, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1000);
        assert!(a.iter().all(|&v| (0..10_000).contains(&v)));

        assert!(generate(0, Case::Random, &mut StdRng::seed_from_u64(1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let too_large = i32::MAX as usize + 1;
        for case in Case::ALL {
            assert!(matches!(
                generate(too_large, case, &mut rng),
                Err(BenchmarkError::SizeTooLarge(n)) if n == too_large
            ));
        }
    }
}
