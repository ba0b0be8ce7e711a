//! Probabilistic decoders
//!
//! Viterbi finds the most likely hidden-state path of an HMM; the turbo
//! decoder iterates two soft decoders until their outputs agree.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod turbo;
pub mod viterbi;

pub use self::turbo::{TurboDecoder, TurboInput, TurboState};
pub use self::viterbi::{Viterbi, ViterbiInput, ViterbiState};

use crate::algorithm::traits::AlgorithmError;

/// Reject a probability vector with entries outside [0, 1] or a sum far from 1
pub(crate) fn check_distribution(name: &str, row: &[f64]) -> Result<(), AlgorithmError> {
    if let Some(bad) = row.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: format!("probability {} outside [0, 1]", bad),
        });
    }
    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > 1e-3 {
        return Err(AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: format!("probabilities sum to {}", sum),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_distribution() {
        assert!(check_distribution("row", &[0.3, 0.7]).is_ok());
        assert!(check_distribution("row", &[0.3, 0.3]).is_err());
        assert!(check_distribution("row", &[1.5, -0.5]).is_err());
        assert!(check_distribution("row", &[f64::NAN, 1.0]).is_err());
    }
}
