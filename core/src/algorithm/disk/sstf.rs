//! Shortest-seek-time-first disk scheduling
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::disk::{validate_disk_input, DiskInput, DiskState, DiskTrace};
use crate::algorithm::step::StepSequence;
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator,
};
use crate::config::InputLimits;

/// Greedy nearest-request policy.
///
/// Ties on distance go to the lower cylinder, then to the earlier arrival.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sstf;

impl Sstf {
    fn nearest(trace: &DiskTrace) -> Option<usize> {
        let head = trace.head();
        trace
            .requests()
            .iter()
            .enumerate()
            .filter(|(_, request)| !request.processed)
            .min_by_key(|(index, request)| (request.position.abs_diff(head), request.position, *index))
            .map(|(index, _)| index)
    }
}

impl StepGenerator for Sstf {
    type Input = DiskInput;
    type State = DiskState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("sstf")
    }

    fn name(&self) -> &'static str {
        "Shortest Seek Time First"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::DiskScheduling
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::uniform("O(n^2)", "O(n)")
    }

    fn validate(&self, input: &DiskInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_disk_input(input, limits)
    }

    fn generate(&self, input: &DiskInput) -> StepSequence<DiskState> {
        let mut trace = DiskTrace::new(input, None);
        trace.start(format!(
            "Head at {}; always serve the closest pending request",
            input.head
        ));

        while let Some(index) = Self::nearest(&trace) {
            trace.serve(index);
        }

        trace.finish("sstf")
    }
}
