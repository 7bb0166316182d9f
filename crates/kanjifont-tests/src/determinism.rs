//! Determinism checks.
//!
//! Given the same config and font, every emitted byte must be identical
//! across runs. These helpers run a generation closure several times and
//! report the first byte that differs.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the first run's output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// First difference found, if any.
    pub diff_info: Option<DiffInfo>,
}

/// The first byte difference found between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Byte offset of the difference. Equal to the shorter length when one
    /// output is a prefix of the other.
    pub offset: usize,
    pub expected: Option<u8>,
    pub actual: Option<u8>,
    /// Which run (0-indexed) differed from run 0.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |b: Option<u8>| match b {
            Some(b) => format!("0x{:02X}", b),
            None => "EOF".to_string(),
        };
        write!(
            f,
            "Difference at byte {}: expected {}, got {} (run {})",
            self.offset,
            show(self.expected),
            show(self.actual),
            self.run_index
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(ref diff) = self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output size: {} bytes\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_size, self.hash, diff
            );
        }
    }
}

/// BLAKE3 hex digest of `data`.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

fn first_difference(expected: &[u8], actual: &[u8]) -> Option<usize> {
    let shared = expected.len().min(actual.len());
    (0..shared)
        .find(|&i| expected[i] != actual[i])
        .or_else(|| (expected.len() != actual.len()).then_some(shared))
}

/// Run `generate_fn` `runs` times (at least 2) and compare every output
/// with the first.
pub fn verify_determinism<F>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<u8>,
{
    let runs = runs.max(2);
    let reference = generate_fn();
    let hash = compute_hash(&reference);

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(offset) = first_difference(&reference, &output) {
            return DeterminismResult {
                is_deterministic: false,
                runs: run_index + 1,
                output_size: reference.len(),
                hash,
                diff_info: Some(DiffInfo {
                    offset,
                    expected: reference.get(offset).copied(),
                    actual: output.get(offset).copied(),
                    run_index,
                }),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: reference.len(),
        hash,
        diff_info: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_identical_runs() {
        let result = verify_determinism(|| vec![1, 2, 3], 3);
        assert!(result.is_deterministic);
        assert_eq!(result.runs, 3);
        assert_eq!(result.output_size, 3);
        result.assert_deterministic();
    }

    #[test]
    fn test_detects_difference() {
        let counter = Cell::new(0u8);
        let result = verify_determinism(
            || {
                counter.set(counter.get() + 1);
                vec![0, counter.get()]
            },
            3,
        );
        assert!(!result.is_deterministic);
        let diff = result.diff_info.unwrap();
        assert_eq!(diff.offset, 1);
        assert_eq!(diff.expected, Some(1));
        assert_eq!(diff.actual, Some(2));
        assert_eq!(diff.run_index, 1);
    }

    #[test]
    fn test_length_difference() {
        assert_eq!(first_difference(&[1, 2], &[1, 2, 3]), Some(2));
        assert_eq!(first_difference(&[1, 2], &[1, 2]), None);
    }
}
