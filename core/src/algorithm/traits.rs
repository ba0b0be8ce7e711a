//! Core step-generator trait definitions
//!
//! Every visualized algorithm is a `StepGenerator`: a pure, total,
//! deterministic function from validated input to a complete
//! `StepSequence`. Validation is a separate, fallible pass so that
//! generation itself never fails.
//!
//! # Key Design Principles
//! - Generation owns all algorithm-specific math and all mutable working state
//! - Each step owns a structural snapshot; nothing is aliased across steps
//! - Identical input yields an identical sequence
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use crate::algorithm::step::StepSequence;
use crate::config::InputLimits;

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Algorithm families shown by the visualizers
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmCategory {
    Searching,
    Sorting,
    DiskScheduling,
    Backtracking,
    DynamicProgramming,
    Greedy,
    Probabilistic,
}

/// Input validation errors.
///
/// These are raised before generation; a generator handed valid input
/// never produces one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Parameter {name} = {value} outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub best_case: String,
    pub average_case: String,
    pub worst_case: String,
}

impl AlgorithmComplexity {
    pub fn new(time: &str, space: &str, best: &str, average: &str, worst: &str) -> Self {
        Self {
            time_complexity: time.to_owned(),
            space_complexity: space.to_owned(),
            best_case: best.to_owned(),
            average_case: average.to_owned(),
            worst_case: worst.to_owned(),
        }
    }

    /// Complexity where every case shares the same bound
    pub fn uniform(time: &str, space: &str) -> Self {
        Self::new(time, space, time, time, time)
    }
}

/// Serializable summary of a generator, for listing pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmDescriptor {
    pub id: AlgorithmId,
    pub name: String,
    pub category: AlgorithmCategory,
    pub complexity: AlgorithmComplexity,
}

/// Algorithm-specific payload carried by every step
pub trait StepState: Debug + Clone + PartialEq + Serialize + Send + Sync + 'static {
    /// Whether this step records a decision worth indexing
    /// (a placement, a selection, a direction reversal).
    fn is_decision_point(&self) -> bool {
        false
    }
}

/// Step generator contract
///
/// # Invariants
/// - `generate` is total for any input accepted by `validate`
/// - Deterministic: same input, structurally identical output
/// - No I/O, no shared state between calls
pub trait StepGenerator: Debug + Send + Sync {
    /// Input the generator consumes
    type Input: Debug + Clone;

    /// Payload carried by each step
    type State: StepState;

    /// Returns the algorithm's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's family
    fn category(&self) -> AlgorithmCategory;

    /// Returns the algorithm's asymptotic complexity
    fn complexity(&self) -> AlgorithmComplexity;

    /// Checks boundary constraints before generation
    fn validate(&self, input: &Self::Input, limits: &InputLimits) -> Result<(), AlgorithmError>;

    /// Runs the algorithm to completion, recording every step
    fn generate(&self, input: &Self::Input) -> StepSequence<Self::State>;

    /// Summary for listing
    fn descriptor(&self) -> AlgorithmDescriptor {
        AlgorithmDescriptor {
            id: self.id(),
            name: self.name().to_owned(),
            category: self.category(),
            complexity: self.complexity(),
        }
    }
}

/// Reject a length outside `[min, max]`
pub(crate) fn check_len(name: &str, len: usize, min: usize, max: usize) -> Result<(), AlgorithmError> {
    if len == 0 && min > 0 {
        return Err(AlgorithmError::EmptyInput(name.to_owned()));
    }
    check_range(name, len as f64, min as f64, max as f64)
}

/// Reject a value outside `[min, max]`
pub(crate) fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), AlgorithmError> {
    if value.is_nan() || value < min || value > max {
        log::warn!("Rejected {} = {} (allowed [{}, {}])", name, value, min, max);
        return Err(AlgorithmError::OutOfRange {
            name: name.to_owned(),
            value,
            min,
            max,
        });
    }
    Ok(())
}
