//! Stepwise Algorithm Framework
//! Deterministic step generators for every visualized algorithm family
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod backtracking;
pub mod disk;
pub mod dynamic;
pub mod probabilistic;
pub mod search;
pub mod sorting;
pub mod step;
pub mod traits;

pub use self::step::{Step, StepRecorder, StepSequence};
pub use self::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmDescriptor, AlgorithmError, AlgorithmId,
    StepGenerator, StepState,
};

/// Descriptors of every shipped generator, grouped by family
pub fn catalog() -> Vec<AlgorithmDescriptor> {
    vec![
        search::LinearSearch.descriptor(),
        search::BinarySearch.descriptor(),
        sorting::BubbleSort.descriptor(),
        sorting::SelectionSort.descriptor(),
        sorting::InsertionSort.descriptor(),
        disk::Fcfs.descriptor(),
        disk::Sstf.descriptor(),
        disk::Scan.descriptor(),
        disk::Look.descriptor(),
        disk::CScan.descriptor(),
        backtracking::NQueens.descriptor(),
        dynamic::Knapsack.descriptor(),
        dynamic::FractionalKnapsack.descriptor(),
        probabilistic::Viterbi.descriptor(),
        probabilistic::TurboDecoder.descriptor(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = catalog();
        let ids: HashSet<_> = catalog.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 15);
    }

    #[test]
    fn test_catalog_covers_every_family() {
        let families: HashSet<_> = catalog().iter().map(|d| d.category).collect();
        assert_eq!(families.len(), 7);
    }
}
