//! First-come, first-served disk scheduling
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::disk::{validate_disk_input, DiskInput, DiskState, DiskTrace};
use crate::algorithm::step::StepSequence;
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

/// Serves requests strictly in arrival order
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl StepGenerator for Fcfs {
    type Input = DiskInput;
    type State = DiskState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("fcfs")
    }

    fn name(&self) -> &'static str {
        "First-Come, First-Served"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::DiskScheduling
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::uniform("O(n)", "O(n)")
    }

    fn validate(&self, input: &DiskInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_disk_input(input, limits)
    }

    fn generate(&self, input: &DiskInput) -> StepSequence<DiskState> {
        let mut trace = DiskTrace::new(input, None);
        trace.start(if input.requests.is_empty() {
            format!("Head at {}; no pending requests", input.head)
        } else {
            format!(
                "Head at {}; serve {} requests in arrival order",
                input.head,
                input.requests.len()
            )
        });

        for index in 0..input.requests.len() {
            trace.serve(index);
        }

        trace.finish("fcfs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::disk::test_support::{total_seek, visits};
    use crate::algorithm::disk::Direction;

    #[test]
    fn test_arrival_order_and_seek() {
        let input = DiskInput {
            disk_size: 200,
            head: 53,
            requests: vec![98, 183, 37, 122, 14, 124, 65, 67],
            direction: Direction::Right,
        };
        let sequence = Fcfs.generate(&input);

        assert_eq!(sequence.len(), 9);
        assert_eq!(visits(&sequence), input.requests);
        assert_eq!(sequence[1].payload.seek_distance, 45);
        assert_eq!(total_seek(&sequence), 640);
    }

    #[test]
    fn test_request_at_head_costs_nothing() {
        let input = DiskInput { disk_size: 100, head: 30, requests: vec![30], direction: Direction::Left };
        let sequence = Fcfs.generate(&input);
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence[1].payload.seek_distance, 0);
        assert_eq!(sequence[1].payload.served, 1);
    }

    #[test]
    fn test_no_requests_yields_start_only() {
        let input = DiskInput { disk_size: 100, head: 30, requests: vec![], direction: Direction::Left };
        let sequence = Fcfs.generate(&input);
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].payload.served, 0);
    }
}
