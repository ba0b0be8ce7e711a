//! Insertion sort step generator
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::sorting::{validate_array, SortAction, SortInput, SortState, SortTrace};
use crate::algorithm::step::StepSequence;
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

/// Grows a sorted prefix by shifting each new key left into place
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl StepGenerator for InsertionSort {
    type Input = SortInput;
    type State = SortState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("insertion_sort")
    }

    fn name(&self) -> &'static str {
        "Insertion Sort"
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
        let mut trace = SortTrace::new();

        for i in 1..array.len() {
            let key = array[i];
            let prefix: Vec<usize> = (0..i).collect();
            let mut j = i;

            while j > 0 {
                trace.emit(
                    &array,
                    vec![j - 1, j],
                    SortAction::Compare,
                    prefix.clone(),
                    format!("Compare key {} with {}", key, array[j - 1]),
                );
                if array[j - 1] <= key {
                    break;
                }
                array[j] = array[j - 1];
                trace.emit(
                    &array,
                    vec![j - 1, j],
                    SortAction::Shift,
                    prefix.clone(),
                    format!("{} > {}; shift it right", array[j], key),
                );
                j -= 1;
            }

            array[j] = key;
            trace.emit(
                &array,
                vec![j],
                SortAction::Insert,
                (0..=i).collect(),
                format!("Insert {} at index {}", key, j),
            );
        }

        trace.finish_sorted(&array, "insertion_sort")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_with_duplicates() {
        let sequence = InsertionSort.generate(&SortInput { array: vec![4, 3, 4, 1, 2] });
        assert_eq!(sequence.last().unwrap().payload.array, vec![1, 2, 3, 4, 4]);
    }

    #[test]
    fn test_sorted_input_one_comparison_per_key() {
        let sequence = InsertionSort.generate(&SortInput { array: vec![1, 2, 3, 4, 5] });
        let last = sequence.last().unwrap();
        assert_eq!(last.payload.comparisons, 4);
        // every key is written back in place
        assert_eq!(last.payload.writes, 4);
    }

    #[test]
    fn test_shift_then_insert() {
        let sequence = InsertionSort.generate(&SortInput { array: vec![2, 1] });
        let actions: Vec<SortAction> = sequence.iter().map(|s| s.payload.action).collect();
        assert_eq!(
            actions,
            vec![SortAction::Compare, SortAction::Shift, SortAction::Insert, SortAction::Sorted]
        );
        assert_eq!(sequence[1].payload.array, vec![2, 2]);
        assert_eq!(sequence[2].payload.array, vec![1, 2]);
    }
}
