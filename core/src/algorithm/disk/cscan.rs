//! C-SCAN (circular SCAN) disk scheduling
//!
//! The head only serves while moving in one direction. At the edge it jumps
//! to the opposite edge and sweeps again. Both edge stops are boundary
//! stops: they add seek distance but serve nothing.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::disk::{validate_disk_input, Direction, DiskInput, DiskState, DiskTrace};
use crate::algorithm::step::StepSequence;
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

#[derive(Debug, Clone, Copy, Default)]
pub struct CScan;

impl StepGenerator for CScan {
    type Input = DiskInput;
    type State = DiskState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("c_scan")
    }

    fn name(&self) -> &'static str {
        "C-SCAN (Circular SCAN)"
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
            "Head at {} serving while moving {}; {} request(s) already under the head",
            input.head, direction, absorbed
        ));

        let first_pass = trace.pending_toward(direction);
        let wrapped = !trace.pending_toward(direction.reversed()).is_empty();

        for index in first_pass {
            trace.serve(index);
        }

        if wrapped {
            let (edge, opposite) = match direction {
                Direction::Right => (trace.last_cylinder(), 0),
                Direction::Left => (0, trace.last_cylinder()),
            };
            if trace.head() != edge {
                trace.boundary(edge, direction, "Reach the disk edge");
            }
            trace.boundary(opposite, direction, "Jump to the opposite edge");
            for index in trace.sweep_from(direction, opposite) {
                trace.serve(index);
            }
        }

        trace.finish("c_scan")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::disk::test_support::{total_seek, visits};
    use crate::algorithm::disk::StopKind;

    #[test]
    fn test_wraps_around() {
        let input = DiskInput {
            disk_size: 200,
            head: 53,
            requests: vec![98, 183, 37, 122, 14, 124, 65, 67],
            direction: Direction::Right,
        };
        let sequence = CScan.generate(&input);
        assert_eq!(visits(&sequence), vec![65, 67, 98, 122, 124, 183, 199, 0, 14, 37]);
        assert_eq!(total_seek(&sequence), (199 - 53) + 199 + 37);

        let boundaries = sequence.iter().filter(|s| s.payload.stop == StopKind::Boundary).count();
        assert_eq!(boundaries, 2);
        assert_eq!(sequence.last().unwrap().payload.served, 8);
    }

    #[test]
    fn test_request_on_opposite_edge() {
        let input = DiskInput { disk_size: 100, head: 50, requests: vec![0, 60], direction: Direction::Right };
        let sequence = CScan.generate(&input);
        assert_eq!(visits(&sequence), vec![60, 99, 0, 0]);
        assert_eq!(sequence.last().unwrap().payload.seek_distance, 0);
    }

    #[test]
    fn test_leftward_wrap() {
        let input = DiskInput { disk_size: 100, head: 50, requests: vec![40, 70, 90], direction: Direction::Left };
        let sequence = CScan.generate(&input);
        assert_eq!(visits(&sequence), vec![40, 0, 99, 90, 70]);
    }
}
