//! LOOK disk scheduling
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::disk::{validate_disk_input, DiskInput, DiskState, DiskTrace};
use crate::algorithm::step::StepSequence;
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

/// SCAN that reverses at the last request instead of the disk edge
#[derive(Debug, Clone, Copy, Default)]
pub struct Look;

impl StepGenerator for Look {
    type Input = DiskInput;
    type State = DiskState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("look")
    }

    fn name(&self) -> &'static str {
        "LOOK"
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
        for index in return_pass {
            trace.serve(index);
        }

        trace.finish("look")
    }
}
