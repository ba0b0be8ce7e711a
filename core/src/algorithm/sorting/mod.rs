//! Sorting step generators
//!
//! The three comparison sorts share a payload: the array snapshot, the
//! indices touched at this step, what happened to them, and how much of
//! the array is known to be in final position.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod bubble;
pub mod insertion;
pub mod selection;

pub use self::bubble::BubbleSort;
pub use self::insertion::InsertionSort;
pub use self::selection::SelectionSort;

use serde::{Deserialize, Serialize};

use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{check_len, AlgorithmError, StepState};
use crate::config::InputLimits;

/// Array to sort ascending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortInput {
    pub array: Vec<i64>,
}

/// What a sort step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAction {
    /// Two elements compared, nothing moved
    Compare,
    /// Two elements exchanged
    Swap,
    /// Element shifted one slot right (insertion sort)
    Shift,
    /// Key written into its slot (insertion sort)
    Insert,
    /// New running minimum found (selection sort)
    NewMinimum,
    /// Array fully sorted
    Sorted,
}

/// Sort snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortState {
    pub array: Vec<i64>,
    /// Indices highlighted at this step
    pub active: Vec<usize>,
    pub action: SortAction,
    /// Indices of the sorted region (final positions for bubble and
    /// selection sort, the sorted prefix for insertion sort)
    pub sorted: Vec<usize>,
    pub comparisons: usize,
    pub writes: usize,
}

impl StepState for SortState {
    fn is_decision_point(&self) -> bool {
        matches!(self.action, SortAction::Swap | SortAction::Insert | SortAction::Sorted)
    }
}

pub(crate) fn validate_array(input: &SortInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
    check_len("array", input.array.len(), limits.min_array_len, limits.max_array_len)
}

/// Tracks counters and emits snapshots for one sort run
pub(crate) struct SortTrace {
    pub(crate) recorder: StepRecorder<SortState>,
    pub(crate) comparisons: usize,
    pub(crate) writes: usize,
}

impl SortTrace {
    pub(crate) fn new() -> Self {
        Self {
            recorder: StepRecorder::new(),
            comparisons: 0,
            writes: 0,
        }
    }

    pub(crate) fn emit(
        &mut self,
        array: &[i64],
        active: Vec<usize>,
        action: SortAction,
        sorted: Vec<usize>,
        annotation: String,
    ) {
        match action {
            SortAction::Compare | SortAction::NewMinimum => self.comparisons += 1,
            SortAction::Swap => self.writes += 2,
            SortAction::Shift | SortAction::Insert => self.writes += 1,
            SortAction::Sorted => {}
        }
        self.recorder.record(
            SortState {
                array: array.to_vec(),
                active,
                action,
                sorted,
                comparisons: self.comparisons,
                writes: self.writes,
            },
            annotation,
        );
    }

    pub(crate) fn finish_sorted(
        mut self,
        array: &[i64],
        algorithm: &str,
    ) -> StepSequence<SortState> {
        let all: Vec<usize> = (0..array.len()).collect();
        let annotation = format!(
            "Array sorted after {} comparisons and {} writes",
            self.comparisons, self.writes
        );
        self.emit(array, Vec::new(), SortAction::Sorted, all, annotation);
        log::debug!("{}: {} steps", algorithm, self.recorder.len());
        self.recorder.finish()
    }
}
