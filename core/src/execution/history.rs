//! Execution history for generated step sequences
//!
//! An `ExecutionHistory` is the record of one generator run: the validated
//! input, the complete step sequence, and an index of the steps that
//! record a decision (placements, direction reversals, convergence).
//! Cumulative values are derived by replaying a prefix, never stored.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::Serialize;

use crate::algorithm::step::{Step, StepSequence};
use crate::algorithm::traits::{AlgorithmDescriptor, AlgorithmError, StepGenerator, StepState};
use crate::config::InputLimits;

/// Metadata for execution history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionMetadata {
    /// Generator that produced the sequence
    pub algorithm: AlgorithmDescriptor,

    /// Input the generator ran on, as debug text
    pub parameters: String,

    /// Total number of execution steps
    pub step_count: usize,
}

/// Decision point in execution history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionPointEntry {
    /// Index in the sequence
    pub index: usize,

    /// Annotation of the step at that index
    pub description: String,
}

/// Execution history of one generator run
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionHistory<S: StepState> {
    metadata: ExecutionMetadata,
    decision_points: Vec<DecisionPointEntry>,
    steps: StepSequence<S>,
}

impl<S: StepState> ExecutionHistory<S> {
    /// Validate `input`, run `generator` to completion and index the result
    pub fn record<G>(generator: &G, input: &G::Input, limits: &InputLimits) -> Result<Self, AlgorithmError>
    where
        G: StepGenerator<State = S>,
    {
        generator.validate(input, limits)?;
        let steps = generator.generate(input);

        let decision_points: Vec<DecisionPointEntry> = steps
            .iter()
            .filter(|step| step.payload.is_decision_point())
            .map(|step| DecisionPointEntry {
                index: step.index,
                description: step.annotation.clone(),
            })
            .collect();

        log::info!(
            "Recorded {}: {} steps, {} decision points",
            generator.id(),
            steps.len(),
            decision_points.len()
        );

        Ok(Self {
            metadata: ExecutionMetadata {
                algorithm: generator.descriptor(),
                parameters: format!("{:?}", input),
                step_count: steps.len(),
            },
            decision_points,
            steps,
        })
    }

    pub fn metadata(&self) -> &ExecutionMetadata {
        &self.metadata
    }

    /// Shared handle to the recorded steps
    pub fn sequence(&self) -> StepSequence<S> {
        self.steps.clone()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    pub fn decision_points(&self) -> &[DecisionPointEntry] {
        &self.decision_points
    }

    /// Nearest decision point strictly after `index`
    pub fn next_decision_after(&self, index: Option<usize>) -> Option<usize> {
        self.decision_points
            .iter()
            .map(|entry| entry.index)
            .find(|&i| index.map_or(true, |current| i > current))
    }

    /// Fold over steps `0..=index`
    pub fn replay_to<T, F>(&self, index: usize, init: T, fold: F) -> T
    where
        F: FnMut(T, &Step<S>) -> T,
    {
        self.steps.replay_to(index, init, fold)
    }

    /// Render metadata, decision points, and steps as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::disk::{Direction, DiskInput, Scan};
    use crate::algorithm::search::{BinarySearch, SearchInput};

    fn scan_input() -> DiskInput {
        DiskInput {
            disk_size: 200,
            head: 53,
            requests: vec![98, 183, 37, 122, 14, 124, 65, 67],
            direction: Direction::Right,
        }
    }

    #[test]
    fn test_record_indexes_boundary_stop() {
        let history = ExecutionHistory::record(&Scan, &scan_input(), &InputLimits::default()).unwrap();
        assert_eq!(history.metadata().algorithm.name, "SCAN (Elevator)");
        assert_eq!(history.metadata().step_count, history.step_count());
        assert_eq!(history.decision_points().len(), 1);

        let boundary = history.decision_points()[0].index;
        assert_eq!(history.step(boundary).unwrap().payload.head, 199);
        assert_eq!(history.next_decision_after(None), Some(boundary));
        assert_eq!(history.next_decision_after(Some(boundary)), None);
    }

    #[test]
    fn test_record_rejects_invalid_input() {
        let mut input = scan_input();
        input.requests.push(500);
        assert!(matches!(
            ExecutionHistory::record(&Scan, &input, &InputLimits::default()),
            Err(AlgorithmError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_replay_sums_seek_distance() {
        let history = ExecutionHistory::record(&Scan, &scan_input(), &InputLimits::default()).unwrap();
        let last = history.step_count() - 1;
        let replayed = history.replay_to(last, 0u64, |acc, step| acc + step.payload.seek_distance as u64);
        assert_eq!(replayed, history.step(last).unwrap().payload.total_seek);
        assert_eq!(replayed, 331);
    }

    #[test]
    fn test_to_json_contains_steps() {
        let input = SearchInput { array: vec![1, 3, 5, 7, 9], target: 7 };
        let history = ExecutionHistory::record(&BinarySearch, &input, &InputLimits::default()).unwrap();
        let json = history.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["algorithm"]["id"], "binary_search");
        assert_eq!(
            value["steps"].as_array().unwrap().len(),
            history.step_count()
        );
    }
}
