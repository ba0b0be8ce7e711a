//! Viterbi decoding step generator
//!
//! Fills the trellis one time column per step, keeping the best
//! predecessor of every cell, then walks the predecessors back from the
//! most probable final state. Observations the model gives zero
//! probability end in a `NoResult` step instead of a path.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::probabilistic::check_distribution;
use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{
    check_len, AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
    StepState,
};
use crate::config::InputLimits;

/// Hidden Markov model plus an observation sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiInput {
    pub states: Vec<String>,
    pub symbols: Vec<String>,
    /// Indices into `symbols`
    pub observations: Vec<usize>,
    pub initial: Vec<f64>,
    /// `transition[i][j]`: probability of moving from state `i` to `j`
    pub transition: Vec<Vec<f64>>,
    /// `emission[j][o]`: probability of state `j` emitting symbol `o`
    pub emission: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViterbiPhase {
    Initialize,
    Column,
    Backtrace,
    NoResult,
}

/// Trellis snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViterbiState {
    pub phase: ViterbiPhase,
    /// Time column filled at this step
    pub time: Option<usize>,
    /// `probabilities[state][t]`, `None` until filled
    pub probabilities: Vec<Vec<Option<f64>>>,
    /// `backpointers[state][t]`, `None` for `t = 0` and unfilled cells
    pub backpointers: Vec<Vec<Option<usize>>>,
    /// Most probable state in the column just filled
    pub column_best: Option<usize>,
    /// Decoded state indices, set on the backtrace step
    pub path: Vec<usize>,
    pub path_probability: Option<f64>,
}

impl StepState for ViterbiState {
    fn is_decision_point(&self) -> bool {
        self.phase == ViterbiPhase::Backtrace
    }
}

/// Index of the largest value; the lowest index wins ties
fn argmax(values: impl Iterator<Item = f64>) -> Option<(usize, f64)> {
    values.enumerate().fold(None, |best, (i, value)| match best {
        Some((_, top)) if value <= top => best,
        _ => Some((i, value)),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Viterbi;

impl StepGenerator for Viterbi {
    type Input = ViterbiInput;
    type State = ViterbiState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("viterbi")
    }

    fn name(&self) -> &'static str {
        "Viterbi Algorithm"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::Probabilistic
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::uniform("O(T * N^2)", "O(T * N)")
    }

    fn validate(&self, input: &ViterbiInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        let states = input.states.len();
        let symbols = input.symbols.len();
        check_len("states", states, 1, usize::MAX)?;
        check_len("symbols", symbols, 1, usize::MAX)?;
        check_len("observations", input.observations.len(), 1, limits.max_observations)?;

        if input.initial.len() != states {
            return Err(AlgorithmError::DimensionMismatch(format!(
                "initial has {} entries for {} states",
                input.initial.len(),
                states
            )));
        }
        check_distribution("initial", &input.initial)?;

        if input.transition.len() != states || input.transition.iter().any(|row| row.len() != states) {
            return Err(AlgorithmError::DimensionMismatch(format!(
                "transition must be {0} x {0}",
                states
            )));
        }
        for (i, row) in input.transition.iter().enumerate() {
            check_distribution(&format!("transition[{}]", i), row)?;
        }

        if input.emission.len() != states || input.emission.iter().any(|row| row.len() != symbols) {
            return Err(AlgorithmError::DimensionMismatch(format!(
                "emission must be {} x {}",
                states, symbols
            )));
        }
        for (j, row) in input.emission.iter().enumerate() {
            check_distribution(&format!("emission[{}]", j), row)?;
        }

        if let Some(&bad) = input.observations.iter().find(|&&o| o >= symbols) {
            return Err(AlgorithmError::OutOfRange {
                name: "observation".to_owned(),
                value: bad as f64,
                min: 0.0,
                max: (symbols - 1) as f64,
            });
        }
        Ok(())
    }

    fn generate(&self, input: &ViterbiInput) -> StepSequence<ViterbiState> {
        let n = input.states.len();
        let horizon = input.observations.len();
        let mut recorder = StepRecorder::with_capacity(horizon + 1);
        let mut probabilities = vec![vec![None; horizon]; n];
        let mut backpointers = vec![vec![None; horizon]; n];

        if n == 0 || horizon == 0 {
            recorder.record(
                ViterbiState {
                    phase: ViterbiPhase::NoResult,
                    time: None,
                    probabilities,
                    backpointers,
                    column_best: None,
                    path: Vec::new(),
                    path_probability: None,
                },
                "Nothing observed; no path to decode",
            );
            return recorder.finish();
        }

        let emit = |state: usize, t: usize| input.emission[state][input.observations[t]];
        let mut previous: Vec<f64> = (0..n).map(|j| input.initial[j] * emit(j, 0)).collect();
        for (j, &p) in previous.iter().enumerate() {
            probabilities[j][0] = Some(p);
        }
        let best = argmax(previous.iter().copied());
        recorder.record(
            ViterbiState {
                phase: ViterbiPhase::Initialize,
                time: Some(0),
                probabilities: probabilities.clone(),
                backpointers: backpointers.clone(),
                column_best: best.map(|(j, _)| j),
                path: Vec::new(),
                path_probability: None,
            },
            format!(
                "t=0, observed '{}': start probability times emission",
                input.symbols[input.observations[0]]
            ),
        );

        for t in 1..horizon {
            let mut column = vec![0.0; n];
            for j in 0..n {
                let (from, p) = argmax((0..n).map(|i| previous[i] * input.transition[i][j]))
                    .unwrap_or((0, 0.0));
                column[j] = p * emit(j, t);
                probabilities[j][t] = Some(column[j]);
                backpointers[j][t] = Some(from);
            }
            let best = argmax(column.iter().copied());
            let annotation = match best {
                Some((j, p)) => format!(
                    "t={}, observed '{}': most likely state {} ({:.3e})",
                    t, input.symbols[input.observations[t]], input.states[j], p
                ),
                None => format!("t={}", t),
            };
            recorder.record(
                ViterbiState {
                    phase: ViterbiPhase::Column,
                    time: Some(t),
                    probabilities: probabilities.clone(),
                    backpointers: backpointers.clone(),
                    column_best: best.map(|(j, _)| j),
                    path: Vec::new(),
                    path_probability: None,
                },
                annotation,
            );
            previous = column;
        }

        let (last, probability) = argmax(previous.iter().copied()).unwrap_or((0, 0.0));
        if probability <= 0.0 {
            recorder.record(
                ViterbiState {
                    phase: ViterbiPhase::NoResult,
                    time: Some(horizon - 1),
                    probabilities,
                    backpointers,
                    column_best: None,
                    path: Vec::new(),
                    path_probability: Some(0.0),
                },
                "No state sequence can produce these observations",
            );
            log::debug!("viterbi: observations have zero probability under the model");
            return recorder.finish();
        }

        let mut path = vec![last; horizon];
        for t in (1..horizon).rev() {
            path[t - 1] = backpointers[path[t]][t].unwrap_or(0);
        }
        let names: Vec<&str> = path.iter().map(|&s| input.states[s].as_str()).collect();
        let annotation = format!(
            "Most likely path {} with probability {:.3e}",
            names.join(" -> "),
            probability
        );
        recorder.record(
            ViterbiState {
                phase: ViterbiPhase::Backtrace,
                time: Some(horizon - 1),
                probabilities,
                backpointers,
                column_best: Some(last),
                path,
                path_probability: Some(probability),
            },
            annotation,
        );

        log::debug!("viterbi: {} observations, {} steps", horizon, recorder.len());
        recorder.finish()
    }
}
