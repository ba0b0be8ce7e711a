//! Binary search step generator
//!
//! One step per comparison. The window halves each time, so a present
//! target is reached in at most `floor(log2 n) + 1` comparisons. An absent
//! target ends with an explicit `NotFound` step after the window empties.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::search::{validate_array, Comparison, SearchInput, SearchOutcome, SearchState};
use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

/// Binary search over a non-decreasing array
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl StepGenerator for BinarySearch {
    type Input = SearchInput;
    type State = SearchState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("binary_search")
    }

    fn name(&self) -> &'static str {
        "Binary Search"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::Searching
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(log n)", "O(1)", "O(1)", "O(log n)", "O(log n)")
    }

    fn validate(&self, input: &SearchInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_array(input, limits)?;
        if input.array.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(AlgorithmError::InvalidParameter {
                name: "array".to_owned(),
                reason: "binary search requires a sorted array".to_owned(),
            });
        }
        Ok(())
    }

    fn generate(&self, input: &SearchInput) -> StepSequence<SearchState> {
        let array = &input.array;
        let target = input.target;
        let mut recorder = StepRecorder::new();

        // Half-open window [lo, hi)
        let mut lo = 0usize;
        let mut hi = array.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let comparison = Comparison::from(array[mid].cmp(&target));
            let window = Some((lo, hi - 1));

            let (outcome, annotation) = match comparison {
                Comparison::Equal => (
                    SearchOutcome::Found(mid),
                    format!("array[{}] = {} equals the target; found at index {}", mid, array[mid], mid),
                ),
                Comparison::Less => (
                    SearchOutcome::Searching,
                    format!(
                        "array[{}] = {} < {}; discard the left half, search [{}, {}]",
                        mid,
                        array[mid],
                        target,
                        mid + 1,
                        hi - 1
                    ),
                ),
                Comparison::Greater => (
                    SearchOutcome::Searching,
                    format!(
                        "array[{}] = {} > {}; discard the right half, search [{}, {}]",
                        mid, array[mid], target, lo, mid as isize - 1
                    ),
                ),
            };

            recorder.record(
                SearchState {
                    array: array.clone(),
                    target,
                    window,
                    probe: Some(mid),
                    comparison: Some(comparison),
                    outcome,
                },
                annotation,
            );

            match comparison {
                Comparison::Equal => {
                    log::debug!("binary_search: found {} after {} steps", target, recorder.len());
                    return recorder.finish();
                }
                Comparison::Less => lo = mid + 1,
                Comparison::Greater => hi = mid,
            }
        }

        recorder.record(
            SearchState {
                array: array.clone(),
                target,
                window: None,
                probe: None,
                comparison: None,
                outcome: SearchOutcome::NotFound,
            },
            format!("Window is empty; {} is not in the array", target),
        );
        log::debug!("binary_search: {} not found after {} steps", target, recorder.len());
        recorder.finish()
    }
}
