//! Search step generators
//!
//! Both searches share one payload shape so the presentation layer can
//! render them with the same array view.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod binary;
pub mod linear;

pub use self::binary::BinarySearch;
pub use self::linear::LinearSearch;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{check_len, AlgorithmError, StepState};
use crate::config::InputLimits;

/// Array and value to look for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInput {
    pub array: Vec<i64>,
    pub target: i64,
}

/// How the probed element compares to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Less,
    Equal,
    Greater,
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

/// Search result as of a given step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum SearchOutcome {
    Searching,
    Found(usize),
    NotFound,
}

/// Search snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub array: Vec<i64>,
    pub target: i64,
    /// Inclusive index window still under consideration
    pub window: Option<(usize, usize)>,
    /// Index compared at this step
    pub probe: Option<usize>,
    /// `array[probe]` compared to `target`
    pub comparison: Option<Comparison>,
    pub outcome: SearchOutcome,
}

impl SearchState {
    /// Whether this step performed a comparison
    pub fn is_comparison(&self) -> bool {
        self.comparison.is_some()
    }
}

impl StepState for SearchState {
    fn is_decision_point(&self) -> bool {
        !matches!(self.outcome, SearchOutcome::Searching)
    }
}

pub(crate) fn validate_array(input: &SearchInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
    check_len("array", input.array.len(), limits.min_array_len, limits.max_array_len)
}
