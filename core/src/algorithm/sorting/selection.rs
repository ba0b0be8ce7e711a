//! Selection sort step generator
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::sorting::{validate_array, SortAction, SortInput, SortState, SortTrace};
use crate::algorithm::step::StepSequence;
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

/// Repeatedly selects the minimum of the unsorted suffix
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl StepGenerator for SelectionSort {
    type Input = SortInput;
    type State = SortState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("selection_sort")
    }

    fn name(&self) -> &'static str {
        "Selection Sort"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::Sorting
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::uniform("O(n^2)", "O(1)")
    }

    fn validate(&self, input: &SortInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_array(input, limits)
    }

    fn generate(&self, input: &SortInput) -> StepSequence<SortState> {
        let mut array = input.array.clone();
        let n = array.len();
        let mut trace = SortTrace::new();

        for i in 0..n.saturating_sub(1) {
            let settled: Vec<usize> = (0..i).collect();
            let mut min = i;

            for j in i + 1..n {
                // Strict comparison keeps the earliest minimum
                if array[j] < array[min] {
                    let previous = array[min];
                    min = j;
                    trace.emit(
                        &array,
                        vec![min],
                        SortAction::NewMinimum,
                        settled.clone(),
                        format!("{} < {}; new minimum at index {}", array[j], previous, j),
                    );
                } else {
                    trace.emit(
                        &array,
                        vec![min, j],
                        SortAction::Compare,
                        settled.clone(),
                        format!("{} is not smaller than the minimum {}", array[j], array[min]),
                    );
                }
            }

            if min != i {
                array.swap(i, min);
                trace.emit(
                    &array,
                    vec![i, min],
                    SortAction::Swap,
                    (0..=i).collect(),
                    format!("Move minimum {} into index {}", array[i], i),
                );
            }
        }

        trace.finish_sorted(&array, "selection_sort")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts() {
        let sequence = SelectionSort.generate(&SortInput { array: vec![64, 25, 12, 22, 11] });
        assert_eq!(sequence.last().unwrap().payload.array, vec![11, 12, 22, 25, 64]);
    }

    #[test]
    fn test_comparison_count_is_quadratic() {
        let sequence = SelectionSort.generate(&SortInput { array: vec![5, 4, 3, 2, 1] });
        // n(n-1)/2 comparisons regardless of input
        assert_eq!(sequence.last().unwrap().payload.comparisons, 10);
    }

    #[test]
    fn test_no_swap_when_minimum_in_place() {
        let sequence = SelectionSort.generate(&SortInput { array: vec![1, 2, 3, 4, 5] });
        assert!(sequence.iter().all(|s| s.payload.action != SortAction::Swap));
    }
}
