//! SCAN (elevator) disk scheduling
//!
//! The head sweeps toward one edge serving requests in passing, bounces off
//! the edge, then sweeps back for the requests it left behind.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::disk::{validate_disk_input, Direction, DiskInput, DiskState, DiskTrace};
use crate::algorithm::step::StepSequence;
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

#[derive(Debug, Clone, Copy, Default)]
pub struct Scan;

impl StepGenerator for Scan {
    type Input = DiskInput;
    type State = DiskState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("scan")
    }

    fn name(&self) -> &'static str {
        "SCAN (Elevator)"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::DiskScheduling
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::uniform("O(n log n)", "O(n)")
    }

    fn validate(&self, input: &DiskInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_disk_input(input, limits)
    }

    fn generate(&self, input: &DiskInput) -> StepSequence<DiskState> {
        let direction = input.direction;
        let mut trace = DiskTrace::new(input, Some(direction));

        let absorbed = trace.absorb_at_head();
        trace.start(format!(
            "Head at {} moving {}; {} request(s) already under the head",
            input.head, direction, absorbed
        ));

        let first_pass = trace.pending_toward(direction);
        let return_pass = trace.pending_toward(direction.reversed());

        for index in first_pass {
            trace.serve(index);
        }

        if !return_pass.is_empty() {
            let edge = match direction {
                Direction::Left => 0,
                Direction::Right => trace.last_cylinder(),
            };
            if trace.head() != edge {
                trace.boundary(edge, direction.reversed(), "Reach the disk edge and reverse");
            } else {
                trace.set_direction(direction.reversed());
            }
            for index in return_pass {
                trace.serve(index);
            }
        }

        trace.finish("scan")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::disk::test_support::{total_seek, visits};
    use crate::algorithm::disk::StopKind;
    use crate::algorithm::traits::StepState;

    fn textbook(direction: Direction) -> DiskInput {
        DiskInput {
            disk_size: 200,
            head: 53,
            requests: vec![98, 183, 37, 122, 14, 124, 65, 67],
            direction,
        }
    }

    #[test]
    fn test_sweep_right_then_bounce() {
        let sequence = Scan.generate(&textbook(Direction::Right));
        assert_eq!(visits(&sequence), vec![65, 67, 98, 122, 124, 183, 199, 37, 14]);

        let boundary = &sequence[7].payload;
        assert_eq!(boundary.stop, StopKind::Boundary);
        assert_eq!(boundary.seek_distance, 16);
        assert_eq!(boundary.served, 6);
        assert_eq!(boundary.direction, Some(Direction::Left));

        assert_eq!(total_seek(&sequence), (199 - 53) + (199 - 14));
        assert_eq!(sequence.last().unwrap().payload.served, 8);
    }

    #[test]
    fn test_sweep_left_then_bounce() {
        let sequence = Scan.generate(&textbook(Direction::Left));
        assert_eq!(visits(&sequence), vec![37, 14, 0, 65, 67, 98, 122, 124, 183]);
        assert_eq!(total_seek(&sequence), 53 + 183);
    }

    #[test]
    fn test_boundary_counts_seek_not_service() {
        let sequence = Scan.generate(&textbook(Direction::Right));
        let boundaries: Vec<_> = sequence
            .iter()
            .filter(|s| s.payload.stop == StopKind::Boundary)
            .collect();
        assert_eq!(boundaries.len(), 1);
        assert!(boundaries[0].payload.is_decision_point());
        let before = &sequence[boundaries[0].index - 1].payload;
        assert_eq!(boundaries[0].payload.served, before.served);
        assert!(boundaries[0].payload.total_seek > before.total_seek);
        assert!(!boundaries[0].payload.order.contains(&199));
    }

    #[test]
    fn test_request_at_head_is_already_served() {
        let input = DiskInput { disk_size: 100, head: 40, requests: vec![40, 70, 10], direction: Direction::Right };
        let sequence = Scan.generate(&input);
        let start = &sequence[0].payload;
        assert!(start.requests[0].processed);
        assert_eq!(start.served, 1);
        assert_eq!(start.total_seek, 0);
        assert_eq!(visits(&sequence), vec![70, 99, 10]);
    }

    #[test]
    fn test_no_bounce_without_return_work() {
        let input = DiskInput { disk_size: 100, head: 10, requests: vec![20, 30], direction: Direction::Right };
        let sequence = Scan.generate(&input);
        assert_eq!(visits(&sequence), vec![20, 30]);
    }

    #[test]
    fn test_everything_behind_the_head() {
        let input = DiskInput { disk_size: 100, head: 50, requests: vec![20, 30], direction: Direction::Right };
        let sequence = Scan.generate(&input);
        assert_eq!(visits(&sequence), vec![99, 30, 20]);
        assert_eq!(total_seek(&sequence), 49 + 79);
    }
}
