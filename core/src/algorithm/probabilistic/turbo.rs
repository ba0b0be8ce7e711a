//! Turbo decoding step generator
//!
//! Two constituent codes protect the same information bits, the second
//! one through an interleaver. Each constituent code is the memory-one
//! parity chain `p[k] = x[k] ^ x[k - 1]` (with `x[-1] = 0`), so a soft
//! decoder can compute the extrinsic LLR of every bit from its two
//! neighbouring parity checks with the box-plus rule.
//!
//! Every decoder half-iteration is one step. After the second decoder
//! the sum of absolute changes in its extrinsic output is compared with
//! the threshold, and decoding stops early once it falls below. A
//! posterior LLR is the channel value plus both extrinsic terms, so that
//! sum is also the total absolute change in posteriors between the
//! first and second decoder of the same iteration.
//!
//! LLRs are `ln(P(bit = 0) / P(bit = 1))`: positive means zero.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{
    check_len, check_range, AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId,
    StepGenerator, StepState,
};
use crate::config::InputLimits;

/// Magnitude cap for every LLR
pub const LLR_MAX: f64 = 20.0;

/// Received block and decoder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurboInput {
    /// Channel LLRs of the information bits
    pub systematic: Vec<f64>,
    /// Channel LLRs of the first encoder's parity, natural order
    pub parity1: Vec<f64>,
    /// Channel LLRs of the second encoder's parity, interleaved order
    pub parity2: Vec<f64>,
    /// Position `j` of the interleaved block holds bit `interleaver[j]`
    pub interleaver: Vec<usize>,
    pub max_iterations: usize,
    /// Stop once the extrinsic change summed over the block drops below this
    pub threshold: f64,
}

impl TurboInput {
    /// Noiseless transmission of `bits` with every LLR at `reliability`
    pub fn transmit(
        bits: &[u8],
        interleaver: Vec<usize>,
        reliability: f64,
        max_iterations: usize,
        threshold: f64,
    ) -> Self {
        let interleaved: Vec<u8> = interleaver.iter().filter_map(|&k| bits.get(k).copied()).collect();
        let to_llr = |bit: u8| if bit == 0 { reliability } else { -reliability };
        Self {
            systematic: bits.iter().map(|&b| to_llr(b)).collect(),
            parity1: parity_chain(bits).into_iter().map(to_llr).collect(),
            parity2: parity_chain(&interleaved).into_iter().map(to_llr).collect(),
            interleaver,
            max_iterations,
            threshold,
        }
    }
}

/// Encode `p[k] = x[k] ^ x[k - 1]`
pub fn parity_chain(bits: &[u8]) -> Vec<u8> {
    let mut previous = 0;
    bits.iter()
        .map(|&bit| {
            let parity = (bit ^ previous) & 1;
            previous = bit & 1;
            parity
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoderStage {
    First,
    Second,
}

/// One decoder half-iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurboState {
    /// 1-based; 0 on the empty-block step
    pub iteration: usize,
    pub stage: DecoderStage,
    /// A-priori LLRs this decoder consumed, natural order
    pub a_priori: Vec<f64>,
    /// Extrinsic LLRs this decoder produced, natural order
    pub extrinsic: Vec<f64>,
    /// Channel plus both extrinsics
    pub posterior: Vec<f64>,
    pub decisions: Vec<u8>,
    /// Extrinsic change of the second decoder, set on its steps
    pub difference: Option<f64>,
    pub converged: bool,
}

impl StepState for TurboState {
    fn is_decision_point(&self) -> bool {
        self.converged
    }
}

/// LLR of the XOR of two bits
fn box_plus(a: f64, b: f64) -> f64 {
    let product = (a / 2.0).tanh() * (b / 2.0).tanh();
    (2.0 * product.atanh()).clamp(-LLR_MAX, LLR_MAX)
}

/// Extrinsic LLRs of one parity chain given channel-plus-prior input LLRs
fn decode_chain(input: &[f64], parity: &[f64]) -> Vec<f64> {
    let n = input.len();
    (0..n)
        .map(|k| {
            // x[k] = p[k] ^ x[k - 1], with x[-1] known to be zero
            let backward = if k == 0 {
                parity[0]
            } else {
                box_plus(parity[k], input[k - 1])
            };
            // x[k] = p[k + 1] ^ x[k + 1]
            let forward = if k + 1 < n {
                box_plus(parity[k + 1], input[k + 1])
            } else {
                0.0
            };
            (backward + forward).clamp(-LLR_MAX, LLR_MAX)
        })
        .collect()
}

fn hard_decisions(posterior: &[f64]) -> Vec<u8> {
    posterior.iter().map(|&l| if l < 0.0 { 1 } else { 0 }).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TurboDecoder;

impl StepGenerator for TurboDecoder {
    type Input = TurboInput;
    type State = TurboState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("turbo_decoding")
    }

    fn name(&self) -> &'static str {
        "Turbo Decoding"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::Probabilistic
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(I * K)", "O(K)", "O(K)", "O(I * K)", "O(I * K)")
    }

    fn validate(&self, input: &TurboInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        let n = input.systematic.len();
        check_len("systematic", n, 1, limits.max_turbo_block)?;
        for (name, len) in [
            ("parity1", input.parity1.len()),
            ("parity2", input.parity2.len()),
            ("interleaver", input.interleaver.len()),
        ] {
            if len != n {
                return Err(AlgorithmError::DimensionMismatch(format!(
                    "{} has {} entries for a {}-bit block",
                    name, len, n
                )));
            }
        }

        let mut seen = vec![false; n];
        for &k in &input.interleaver {
            if k >= n || seen[k] {
                return Err(AlgorithmError::InvalidParameter {
                    name: "interleaver".to_owned(),
                    reason: format!("not a permutation of 0..{}", n),
                });
            }
            seen[k] = true;
        }

        let mut channel = input.systematic.iter().chain(&input.parity1).chain(&input.parity2);
        if channel.any(|l| !l.is_finite()) {
            return Err(AlgorithmError::InvalidParameter {
                name: "llr".to_owned(),
                reason: "channel values must be finite".to_owned(),
            });
        }

        check_range(
            "max_iterations",
            input.max_iterations as f64,
            1.0,
            limits.max_turbo_iterations as f64,
        )?;
        check_range("threshold", input.threshold, 0.0, f64::MAX)
    }

    fn generate(&self, input: &TurboInput) -> StepSequence<TurboState> {
        let n = input.systematic.len();
        let mut recorder = StepRecorder::with_capacity(2 * input.max_iterations);

        if n == 0 || input.max_iterations == 0 {
            recorder.record(
                TurboState {
                    iteration: 0,
                    stage: DecoderStage::First,
                    a_priori: Vec::new(),
                    extrinsic: Vec::new(),
                    posterior: input.systematic.clone(),
                    decisions: hard_decisions(&input.systematic),
                    difference: None,
                    converged: false,
                },
                "Nothing to decode",
            );
            return recorder.finish();
        }

        let channel = &input.systematic;
        let interleaver = &input.interleaver;
        let mut extrinsic1 = vec![0.0; n];
        let mut extrinsic2 = vec![0.0; n];
        let mut converged = false;

        for iteration in 1..=input.max_iterations {
            // First decoder: natural order, prior from the second decoder
            let a_priori = extrinsic2.clone();
            let combined: Vec<f64> = (0..n).map(|k| channel[k] + a_priori[k]).collect();
            extrinsic1 = decode_chain(&combined, &input.parity1);
            let posterior: Vec<f64> = (0..n)
                .map(|k| channel[k] + extrinsic1[k] + extrinsic2[k])
                .collect();
            recorder.record(
                TurboState {
                    iteration,
                    stage: DecoderStage::First,
                    a_priori,
                    extrinsic: extrinsic1.clone(),
                    decisions: hard_decisions(&posterior),
                    posterior,
                    difference: None,
                    converged: false,
                },
                format!("Iteration {}: decoder 1 passes extrinsic information on", iteration),
            );

            // Second decoder: interleaved order, prior from the first decoder
            let combined: Vec<f64> = interleaver
                .iter()
                .map(|&k| channel[k] + extrinsic1[k])
                .collect();
            let interleaved = decode_chain(&combined, &input.parity2);
            let mut updated = vec![0.0; n];
            for (j, &k) in interleaver.iter().enumerate() {
                updated[k] = interleaved[j];
            }

            let difference: f64 = updated
                .iter()
                .zip(&extrinsic2)
                .map(|(new, old)| (new - old).abs())
                .sum();
            converged = difference < input.threshold;
            extrinsic2 = updated;

            let posterior: Vec<f64> = (0..n)
                .map(|k| channel[k] + extrinsic1[k] + extrinsic2[k])
                .collect();
            let annotation = if converged {
                format!(
                    "Iteration {}: decoder 2 changed by {:.4}, below {}; converged",
                    iteration, difference, input.threshold
                )
            } else {
                format!("Iteration {}: decoder 2 changed by {:.4}", iteration, difference)
            };
            log::trace!("turbo iteration {}: difference {}", iteration, difference);
            recorder.record(
                TurboState {
                    iteration,
                    stage: DecoderStage::Second,
                    a_priori: extrinsic1.clone(),
                    extrinsic: extrinsic2.clone(),
                    decisions: hard_decisions(&posterior),
                    posterior,
                    difference: Some(difference),
                    converged,
                },
                annotation,
            );

            if converged {
                break;
            }
        }

        log::debug!(
            "turbo_decoding: {} bits, converged {}, {} steps",
            n,
            converged,
            recorder.len()
        );
        recorder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITS: [u8; 8] = [1, 0, 1, 1, 0, 0, 1, 0];

    fn interleaver() -> Vec<usize> {
        vec![3, 7, 0, 5, 2, 6, 1, 4]
    }

    #[test]
    fn test_parity_chain() {
        assert_eq!(parity_chain(&[1, 0, 1, 1]), vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_box_plus_signs() {
        assert!(box_plus(3.0, 3.0) > 0.0);
        assert!(box_plus(-3.0, 3.0) < 0.0);
        assert!(box_plus(-3.0, -3.0) > 0.0);
        assert!(box_plus(3.0, 3.0) < 3.0);
        assert_eq!(box_plus(0.0, 5.0), 0.0);
    }

    #[test]
    fn test_converges_before_iteration_limit() {
        let input = TurboInput::transmit(&BITS, interleaver(), 2.0, 10, 0.01);
        let sequence = TurboDecoder.generate(&input);
        assert!(sequence.len() < 2 * input.max_iterations);
        assert_eq!(sequence.len() % 2, 0);

        let last = &sequence.last().unwrap().payload;
        assert!(last.converged);
        assert_eq!(last.stage, DecoderStage::Second);
        assert!(last.difference.unwrap() < 0.01);
        assert_eq!(last.decisions, BITS.to_vec());
        assert!(sequence.iter().rev().skip(1).all(|step| !step.payload.converged));
    }

    #[test]
    fn test_zero_threshold_runs_every_iteration() {
        let input = TurboInput::transmit(&BITS, interleaver(), 2.0, 6, 0.0);
        let sequence = TurboDecoder.generate(&input);
        assert_eq!(sequence.len(), 12);
        assert!(!sequence.last().unwrap().payload.converged);
        assert_eq!(sequence.last().unwrap().payload.iteration, 6);
    }

    #[test]
    fn test_corrects_unreliable_bit() {
        let mut input = TurboInput::transmit(&BITS, interleaver(), 3.0, 10, 0.01);
        // bit 2 is a one but arrives weakly as a zero
        input.systematic[2] = 0.5;
        let sequence = TurboDecoder.generate(&input);
        assert_eq!(sequence.last().unwrap().payload.decisions, BITS.to_vec());
        assert_eq!(sequence[0].payload.iteration, 1);
        assert!(sequence[0].payload.extrinsic[2] < 0.0);
    }

    #[test]
    fn test_first_decoder_starts_without_prior() {
        let input = TurboInput::transmit(&BITS, interleaver(), 2.0, 4, 0.01);
        let sequence = TurboDecoder.generate(&input);
        assert!(sequence[0].payload.a_priori.iter().all(|&l| l == 0.0));
        assert_eq!(sequence[1].payload.a_priori, sequence[0].payload.extrinsic);
    }

    #[test]
    fn test_validate() {
        let limits = InputLimits::default();
        let good = TurboInput::transmit(&BITS, interleaver(), 2.0, 10, 0.01);
        assert!(TurboDecoder.validate(&good, &limits).is_ok());

        let mut repeated = good.clone();
        repeated.interleaver[0] = 7;
        assert!(matches!(
            TurboDecoder.validate(&repeated, &limits),
            Err(AlgorithmError::InvalidParameter { .. })
        ));

        let mut short = good.clone();
        short.parity2.pop();
        assert!(matches!(
            TurboDecoder.validate(&short, &limits),
            Err(AlgorithmError::DimensionMismatch(_))
        ));

        let mut endless = good;
        endless.max_iterations = 21;
        assert!(TurboDecoder.validate(&endless, &limits).is_err());
    }
}
