//! Bubble sort step generator
//!
//! Each pass bubbles the largest remaining element to the end. A pass with
//! no swaps ends the sort early.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::sorting::{validate_array, SortAction, SortInput, SortState, SortTrace};
use crate::algorithm::step::StepSequence;
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl StepGenerator for BubbleSort {
    type Input = SortInput;
    type State = SortState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("bubble_sort")
    }

    fn name(&self) -> &'static str {
        "Bubble Sort"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::Sorting
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(n^2)", "O(1)", "O(n)", "O(n^2)", "O(n^2)")
    }

    fn validate(&self, input: &SortInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_array(input, limits)
    }

    fn generate(&self, input: &SortInput) -> StepSequence<SortState> {
        let mut array = input.array.clone();
        let n = array.len();
        let mut trace = SortTrace::new();

        for pass in 0..n.saturating_sub(1) {
            let settled: Vec<usize> = (n - pass..n).collect();
            let mut swapped = false;

            for j in 0..n - 1 - pass {
                trace.emit(
                    &array,
                    vec![j, j + 1],
                    SortAction::Compare,
                    settled.clone(),
                    format!("Pass {}: compare {} and {}", pass + 1, array[j], array[j + 1]),
                );
                if array[j] > array[j + 1] {
                    array.swap(j, j + 1);
                    swapped = true;
                    trace.emit(
                        &array,
                        vec![j, j + 1],
                        SortAction::Swap,
                        settled.clone(),
                        format!("{} > {}; swap them", array[j + 1], array[j]),
                    );
                }
            }

            if !swapped {
                break;
            }
        }

        trace.finish_sorted(&array, "bubble_sort")
    }
}
