//! Fractional knapsack step generator
//!
//! Greedy by value density. Items are visited in descending value/weight
//! order (ties keep input order) and each visit is one step.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::algorithm::dynamic::{validate_knapsack, KnapsackInput, KnapsackItem};
use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator, StepState,
};
use crate::config::InputLimits;

/// What happened to the visited item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fraction", rename_all = "snake_case")]
pub enum ItemDecision {
    Accept,
    /// Only this share of the item fit
    Fractional(f64),
    Reject,
}

/// Fractional knapsack snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionalState {
    /// Item indices in visiting order
    pub order: Vec<usize>,
    /// Item visited at this step, if any
    pub item: Option<usize>,
    pub decision: Option<ItemDecision>,
    /// Share taken of each item, in input order
    pub taken: Vec<f64>,
    pub remaining_capacity: f64,
    pub total_value: f64,
}

impl StepState for FractionalState {
    fn is_decision_point(&self) -> bool {
        matches!(self.decision, Some(ItemDecision::Fractional(_)))
    }
}

fn density(item: &KnapsackItem) -> f64 {
    item.value as f64 / item.weight as f64
}

/// Visiting order: density descending, input order on ties
pub fn density_order(items: &[KnapsackItem]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        density(&items[b])
            .partial_cmp(&density(&items[a]))
            .unwrap_or(Ordering::Equal)
    });
    order
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FractionalKnapsack;

impl StepGenerator for FractionalKnapsack {
    type Input = KnapsackInput;
    type State = FractionalState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("fractional_knapsack")
    }

    fn name(&self) -> &'static str {
        "Fractional Knapsack"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::Greedy
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::uniform("O(n log n)", "O(n)")
    }

    fn validate(&self, input: &KnapsackInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_knapsack(input, limits)
    }

    fn generate(&self, input: &KnapsackInput) -> StepSequence<FractionalState> {
        let items = &input.items;
        let order = density_order(items);
        let mut taken = vec![0.0; items.len()];
        let mut remaining = input.capacity as f64;
        let mut total_value = 0.0;
        let mut recorder = StepRecorder::with_capacity(items.len().max(1));

        if items.is_empty() {
            recorder.record(
                FractionalState {
                    order,
                    item: None,
                    decision: None,
                    taken,
                    remaining_capacity: remaining,
                    total_value,
                },
                "No items to pack",
            );
            return recorder.finish();
        }

        for &index in &order {
            let item = items[index];
            let weight = item.weight as f64;

            let (decision, annotation) = if remaining <= 0.0 {
                (
                    ItemDecision::Reject,
                    format!("Item {} (w={}, v={}): knapsack full, reject", index + 1, item.weight, item.value),
                )
            } else if weight <= remaining {
                taken[index] = 1.0;
                remaining -= weight;
                total_value += item.value as f64;
                (
                    ItemDecision::Accept,
                    format!(
                        "Item {} (ratio {:.2}): take whole, {} capacity left",
                        index + 1,
                        density(&item),
                        remaining
                    ),
                )
            } else {
                let fraction = remaining / weight;
                taken[index] = fraction;
                total_value += item.value as f64 * fraction;
                remaining = 0.0;
                (
                    ItemDecision::Fractional(fraction),
                    format!(
                        "Item {} (ratio {:.2}): take {:.2} of it, knapsack full",
                        index + 1,
                        density(&item),
                        fraction
                    ),
                )
            };

            recorder.record(
                FractionalState {
                    order: order.clone(),
                    item: Some(index),
                    decision: Some(decision),
                    taken: taken.clone(),
                    remaining_capacity: remaining,
                    total_value,
                },
                annotation,
            );
        }

        log::debug!(
            "fractional_knapsack: total value {:.3}, {} steps",
            total_value,
            recorder.len()
        );
        recorder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: &[(usize, u64)], capacity: usize) -> KnapsackInput {
        KnapsackInput {
            items: pairs
                .iter()
                .map(|&(weight, value)| KnapsackItem { weight, value })
                .collect(),
            capacity,
        }
    }

    #[test]
    fn test_classic_fractional() {
        // densities 6, 5, 4
        let sequence = FractionalKnapsack.generate(&input(&[(10, 60), (20, 100), (30, 120)], 50));
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence[0].payload.order, vec![0, 1, 2]);
        assert_eq!(sequence[0].payload.decision, Some(ItemDecision::Accept));
        assert_eq!(sequence[1].payload.decision, Some(ItemDecision::Accept));
        let last = &sequence[2].payload;
        match last.decision {
            Some(ItemDecision::Fractional(f)) => assert!((f - 2.0 / 3.0).abs() < 1e-9),
            other => panic!("expected fractional, got {:?}", other),
        }
        assert!((last.total_value - 240.0).abs() < 1e-9);
        assert_eq!(last.remaining_capacity, 0.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = input(&[(2, 4), (1, 3), (3, 6)], 4).items;
        assert_eq!(density_order(&items), vec![1, 0, 2]);
    }

    #[test]
    fn test_rejects_after_full() {
        let sequence = FractionalKnapsack.generate(&input(&[(2, 10), (2, 2), (4, 1)], 2));
        assert_eq!(sequence[0].payload.decision, Some(ItemDecision::Accept));
        assert_eq!(sequence[1].payload.decision, Some(ItemDecision::Reject));
        assert_eq!(sequence[2].payload.decision, Some(ItemDecision::Reject));
        assert_eq!(sequence[2].payload.taken, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let sequence = FractionalKnapsack.generate(&input(&[(1, 1), (2, 5)], 0));
        assert!(sequence
            .iter()
            .all(|step| step.payload.decision == Some(ItemDecision::Reject)));
        assert_eq!(sequence.last().unwrap().payload.total_value, 0.0);
    }

    #[test]
    fn test_empty_items() {
        let sequence = FractionalKnapsack.generate(&input(&[], 10));
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].payload.item, None);
    }
}
