//! Linear search step generator
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::search::{validate_array, Comparison, SearchInput, SearchOutcome, SearchState};
use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

/// Left-to-right scan; works on unsorted input
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl StepGenerator for LinearSearch {
    type Input = SearchInput;
    type State = SearchState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("linear_search")
    }

    fn name(&self) -> &'static str {
        "Linear Search"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::Searching
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(n)", "O(1)", "O(1)", "O(n)", "O(n)")
    }

    fn validate(&self, input: &SearchInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_array(input, limits)
    }

    fn generate(&self, input: &SearchInput) -> StepSequence<SearchState> {
        let array = &input.array;
        let target = input.target;
        let mut recorder = StepRecorder::with_capacity(array.len() + 1);

        for (i, &value) in array.iter().enumerate() {
            let comparison = Comparison::from(value.cmp(&target));
            let found = comparison == Comparison::Equal;
            let annotation = if found {
                format!("array[{}] = {} equals the target; found at index {}", i, value, i)
            } else {
                format!("array[{}] = {} is not {}; move on", i, value, target)
            };

            recorder.record(
                SearchState {
                    array: array.clone(),
                    target,
                    window: None,
                    probe: Some(i),
                    comparison: Some(comparison),
                    outcome: if found { SearchOutcome::Found(i) } else { SearchOutcome::Searching },
                },
                annotation,
            );

            if found {
                log::debug!("linear_search: found {} after {} steps", target, recorder.len());
                return recorder.finish();
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
            format!("Reached the end of the array; {} is not present", target),
        );
        log::debug!("linear_search: {} not found after {} steps", target, recorder.len());
        recorder.finish()
    }
}
