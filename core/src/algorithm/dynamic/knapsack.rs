//! 0/1 knapsack step generator
//!
//! The table is filled bottom-up in row-major order, one step per cell.
//! The optimal selection is reconstructed once after the fill and then
//! attached to every step, so any point in the trace can show the answer.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::dynamic::{validate_knapsack, KnapsackInput, KnapsackItem};
use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{
    AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId, StepGenerator, StepState,
};
use crate::config::InputLimits;

/// How a cell's value was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellChoice {
    /// Item heavier than the cell's capacity; value copied from above
    TooHeavy,
    /// Item fits but leaving it out is at least as good
    Exclude,
    /// Taking the item beats the row above
    Include,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnapsackPhase {
    Fill,
    Backtrace,
    /// Nothing can be carried
    NoResult,
}

/// Knapsack snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnapsackState {
    /// `(n + 1) x (capacity + 1)`; `None` marks cells not yet computed
    pub table: Vec<Vec<Option<u64>>>,
    /// `(item row, capacity)` computed at this step
    pub cell: Option<(usize, usize)>,
    pub choice: Option<CellChoice>,
    pub phase: KnapsackPhase,
    /// Indices of the optimal item subset, same on every step
    pub selected: Vec<usize>,
    /// Cells walked by the backtrace, populated on the final step only
    pub backtrace: Vec<(usize, usize)>,
    pub best_value: u64,
}

impl StepState for KnapsackState {
    fn is_decision_point(&self) -> bool {
        self.choice == Some(CellChoice::Include) || self.phase != KnapsackPhase::Fill
    }
}

/// Filled table and the choice made at every cell
struct Solution {
    table: Vec<Vec<u64>>,
    choices: Vec<Vec<CellChoice>>,
}

fn solve(items: &[KnapsackItem], capacity: usize) -> Solution {
    let n = items.len();
    let mut table = vec![vec![0u64; capacity + 1]; n + 1];
    let mut choices = vec![vec![CellChoice::TooHeavy; capacity + 1]; n + 1];

    for i in 1..=n {
        let item = items[i - 1];
        for w in 0..=capacity {
            let above = table[i - 1][w];
            if item.weight > w {
                table[i][w] = above;
                choices[i][w] = CellChoice::TooHeavy;
            } else {
                let with_item = item.value + table[i - 1][w - item.weight];
                if with_item > above {
                    table[i][w] = with_item;
                    choices[i][w] = CellChoice::Include;
                } else {
                    table[i][w] = above;
                    choices[i][w] = CellChoice::Exclude;
                }
            }
        }
    }

    Solution { table, choices }
}

/// Walk back from `table[n][capacity]`; returns selected item indices in
/// ascending order and the cells visited
fn backtrace(
    items: &[KnapsackItem],
    table: &[Vec<u64>],
    capacity: usize,
) -> (Vec<usize>, Vec<(usize, usize)>) {
    let mut selected = Vec::new();
    let mut path = Vec::with_capacity(items.len() + 1);
    let mut w = capacity;

    for i in (1..=items.len()).rev() {
        path.push((i, w));
        if table[i][w] != table[i - 1][w] {
            selected.push(i - 1);
            w -= items[i - 1].weight;
        }
    }
    path.push((0, w));
    selected.reverse();
    (selected, path)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Knapsack;

impl StepGenerator for Knapsack {
    type Input = KnapsackInput;
    type State = KnapsackState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("knapsack_01")
    }

    fn name(&self) -> &'static str {
        "0/1 Knapsack"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::DynamicProgramming
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::uniform("O(nW)", "O(nW)")
    }

    fn validate(&self, input: &KnapsackInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        validate_knapsack(input, limits)
    }

    fn generate(&self, input: &KnapsackInput) -> StepSequence<KnapsackState> {
        let items = &input.items;
        let capacity = input.capacity;
        let n = items.len();

        let solution = solve(items, capacity);
        let (selected, path) = backtrace(items, &solution.table, capacity);
        let best_value = solution.table[n][capacity];

        let mut recorder = StepRecorder::with_capacity(n * (capacity + 1) + 1);
        let mut table: Vec<Vec<Option<u64>>> = (0..=n)
            .map(|i| vec![if i == 0 { Some(0) } else { None }; capacity + 1])
            .collect();

        for i in 1..=n {
            let item = items[i - 1];
            for w in 0..=capacity {
                let value = solution.table[i][w];
                let choice = solution.choices[i][w];
                table[i][w] = Some(value);

                let annotation = match choice {
                    CellChoice::TooHeavy => format!(
                        "Item {} (w={}) exceeds capacity {}; keep {}",
                        i, item.weight, w, value
                    ),
                    CellChoice::Exclude => format!(
                        "Item {} at capacity {}: skip ({}) vs take ({} + {}); keep {}",
                        i,
                        w,
                        solution.table[i - 1][w],
                        item.value,
                        solution.table[i - 1][w - item.weight],
                        value
                    ),
                    CellChoice::Include => format!(
                        "Item {} at capacity {}: take ({} + {}) beats skip ({}); value {}",
                        i,
                        w,
                        item.value,
                        solution.table[i - 1][w - item.weight],
                        solution.table[i - 1][w],
                        value
                    ),
                };

                recorder.record(
                    KnapsackState {
                        table: table.clone(),
                        cell: Some((i, w)),
                        choice: Some(choice),
                        phase: KnapsackPhase::Fill,
                        selected: selected.clone(),
                        backtrace: Vec::new(),
                        best_value,
                    },
                    annotation,
                );
            }
        }

        let (phase, annotation) = if selected.is_empty() {
            (
                KnapsackPhase::NoResult,
                format!("No item fits in capacity {}", capacity),
            )
        } else {
            let names: Vec<String> = selected.iter().map(|i| (i + 1).to_string()).collect();
            (
                KnapsackPhase::Backtrace,
                format!("Optimal value {} using items {}", best_value, names.join(", ")),
            )
        };
        recorder.record(
            KnapsackState {
                table,
                cell: Some((n, capacity)),
                choice: None,
                phase,
                selected,
                backtrace: path,
                best_value,
            },
            annotation,
        );

        log::debug!("knapsack_01: best value {}, {} steps", best_value, recorder.len());
        recorder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(pairs: &[(usize, u64)]) -> Vec<KnapsackItem> {
        pairs
            .iter()
            .map(|&(weight, value)| KnapsackItem { weight, value })
            .collect()
    }

    fn classic() -> KnapsackInput {
        KnapsackInput {
            items: items(&[(2, 3), (3, 4), (4, 5), (5, 6)]),
            capacity: 5,
        }
    }

    #[test]
    fn test_classic_optimum() {
        let sequence = Knapsack.generate(&classic());
        let last = sequence.last().unwrap();
        assert_eq!(last.payload.best_value, 7);
        assert_eq!(last.payload.selected, vec![0, 1]);
        assert_eq!(last.payload.phase, KnapsackPhase::Backtrace);
        assert_eq!(last.payload.table[4][5], Some(7));
    }

    #[test]
    fn test_one_step_per_cell_plus_backtrace() {
        let sequence = Knapsack.generate(&classic());
        assert_eq!(sequence.len(), 4 * 6 + 1);
        assert_eq!(sequence[0].payload.cell, Some((1, 0)));
        assert_eq!(sequence[6].payload.cell, Some((2, 0)));
    }

    #[test]
    fn test_selection_attached_to_every_step() {
        let sequence = Knapsack.generate(&classic());
        assert!(sequence.iter().all(|step| step.payload.selected == vec![0, 1]));
    }

    #[test]
    fn test_table_fills_incrementally() {
        let sequence = Knapsack.generate(&classic());
        let first = &sequence[0].payload;
        assert_eq!(first.table[1][0], Some(0));
        assert_eq!(first.table[1][1], None);
        assert_eq!(first.table[0][5], Some(0));
        // cell (1, 2) is where item 1 first fits
        assert_eq!(sequence[2].payload.choice, Some(CellChoice::Include));
        assert_eq!(sequence[2].payload.table[1][2], Some(3));
        assert_eq!(sequence[1].payload.table[1][2], None);
    }

    #[test]
    fn test_backtrace_path_walks_rows() {
        let sequence = Knapsack.generate(&classic());
        let path = &sequence.last().unwrap().payload.backtrace;
        assert_eq!(path, &vec![(4, 5), (3, 5), (2, 5), (1, 2), (0, 0)]);
    }

    #[test]
    fn test_zero_capacity_has_no_result() {
        let input = KnapsackInput { items: items(&[(2, 3), (3, 4)]), capacity: 0 };
        let sequence = Knapsack.generate(&input);
        assert_eq!(sequence.len(), 3);
        let last = sequence.last().unwrap();
        assert_eq!(last.payload.phase, KnapsackPhase::NoResult);
        assert_eq!(last.payload.best_value, 0);
        assert!(last.payload.selected.is_empty());
    }

    #[test]
    fn test_no_items() {
        let sequence = Knapsack.generate(&KnapsackInput { items: vec![], capacity: 5 });
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].payload.phase, KnapsackPhase::NoResult);
    }

    #[test]
    fn test_validate_limits() {
        let limits = InputLimits::default();
        assert!(Knapsack.validate(&classic(), &limits).is_ok());
        let heavy = KnapsackInput { items: items(&[(0, 3)]), capacity: 5 };
        assert!(matches!(
            Knapsack.validate(&heavy, &limits),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
        let big = KnapsackInput { items: items(&[(1, 1)]), capacity: 51 };
        assert!(Knapsack.validate(&big, &limits).is_err());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(Knapsack.generate(&classic()), Knapsack.generate(&classic()));
    }
}
