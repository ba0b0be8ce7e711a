//! Immutable step records
//!
//! A `StepSequence` is built once through a `StepRecorder` and is never
//! mutated afterwards. Each `Step` owns its payload outright: generators
//! clone their working arrays and tables into every step, so later
//! mutation of the working state can never leak into an earlier step.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::ops::Index;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::algorithm::traits::StepState;

/// One instant of algorithm state plus its description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step<S> {
    /// Position in the owning sequence (0-based)
    pub index: usize,
    /// Algorithm-specific snapshot
    pub payload: S,
    /// Human-readable description of what happened
    pub annotation: String,
}

/// Complete, immutable step sequence.
///
/// Cloning shares the underlying steps.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSequence<S> {
    steps: Arc<[Step<S>]>,
}

impl<S: StepState> StepSequence<S> {
    /// Sequence with no steps
    pub fn empty() -> Self {
        Self { steps: Arc::from(Vec::new()) }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&Step<S>> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step<S>> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<S>> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[Step<S>] {
        &self.steps
    }

    /// Fold over steps `0..=index`, the only supported way to derive
    /// cumulative values for a position.
    pub fn replay_to<A, F>(&self, index: usize, init: A, fold: F) -> A
    where
        F: FnMut(A, &Step<S>) -> A,
    {
        let end = index.saturating_add(1).min(self.steps.len());
        self.steps[..end].iter().fold(init, fold)
    }
}

impl<S> Index<usize> for StepSequence<S> {
    type Output = Step<S>;

    fn index(&self, index: usize) -> &Step<S> {
        &self.steps[index]
    }
}

impl<'a, S> IntoIterator for &'a StepSequence<S> {
    type Item = &'a Step<S>;
    type IntoIter = std::slice::Iter<'a, Step<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<S: Serialize> Serialize for StepSequence<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.collect_seq(self.steps.iter())
    }
}

/// Append-only builder for a `StepSequence`
#[derive(Debug)]
pub struct StepRecorder<S> {
    steps: Vec<Step<S>>,
}

impl<S: StepState> StepRecorder<S> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { steps: Vec::with_capacity(capacity) }
    }

    /// Append a snapshot; the index is assigned here
    pub fn record(&mut self, payload: S, annotation: impl Into<String>) -> usize {
        let index = self.steps.len();
        self.steps.push(Step {
            index,
            payload,
            annotation: annotation.into(),
        });
        index
    }

    /// Number of steps recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seal the sequence
    pub fn finish(self) -> StepSequence<S> {
        StepSequence { steps: Arc::from(self.steps) }
    }
}

impl<S: StepState> Default for StepRecorder<S> {
    fn default() -> Self {
        Self::new()
    }
}
