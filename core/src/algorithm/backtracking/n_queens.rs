//! N-Queens enumeration and search-trace synthesis
//!
//! Queens are placed column by column, left to right, so a candidate can
//! only conflict with queens to its left: same row, upper-left diagonal, or
//! lower-left diagonal. Enumeration is a depth-first search with
//! chronological backtracking that keeps going after each solution, so every
//! solution is found.
//!
//! The step trace for a selected solution is driven by that solution's rows:
//! in each column every row above the target row is tried and rejected,
//! then the target row is committed. Which rejections appear in which
//! column differs per solution, so the trace is rebuilt for each selection.
//!
//! # Algorithmic Complexity
//!
//! - Enumeration: O(N!) worst case, pruned by the safety check
//! - Trace synthesis: O(N^3) (N columns, up to N trials, O(N) safety check each)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{
    check_range, AlgorithmCategory, AlgorithmComplexity, AlgorithmError, AlgorithmId,
    StepGenerator, StepState,
};
use crate::config::InputLimits;

/// Board size and which solution to trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NQueensInput {
    pub n: usize,
    /// Index into `enumerate_solutions(n)`
    pub solution: usize,
}

/// Board square coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

/// Rendered board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Queen,
    /// Candidate being tried at this step
    Trial,
    /// Placed queen attacking the candidate
    Conflict,
}

/// What the search did at this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueenPhase {
    Start,
    /// Candidate tried and rejected
    Trial,
    /// Queen committed
    Place,
    Solution,
    NoSolution,
}

/// Board snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NQueensState {
    pub n: usize,
    /// Row of the queen in each column, `None` while unplaced
    pub queens: Vec<Option<usize>>,
    /// `grid[row][col]`
    pub grid: Vec<Vec<Cell>>,
    pub trial: Option<Square>,
    pub conflicts: Vec<Square>,
    pub phase: QueenPhase,
    pub is_solution: bool,
    /// Index of the traced solution
    pub solution_index: Option<usize>,
    /// Total number of solutions for this board size
    pub solution_count: usize,
}

impl StepState for NQueensState {
    fn is_decision_point(&self) -> bool {
        matches!(self.phase, QueenPhase::Place | QueenPhase::Solution)
    }
}

/// Placed queens (one per column, left to right) attacking `(row, col)`
fn attackers(placed: &[usize], row: usize, col: usize) -> Vec<Square> {
    placed
        .iter()
        .enumerate()
        .filter(|&(c, &r)| r == row || col - c == row.abs_diff(r))
        .map(|(c, &r)| Square { row: r, col: c })
        .collect()
}

fn is_safe(placed: &[usize], row: usize, col: usize) -> bool {
    attackers(placed, row, col).is_empty()
}

fn search(n: usize, placed: &mut Vec<usize>, solutions: &mut Vec<Vec<usize>>) {
    let col = placed.len();
    if col == n {
        solutions.push(placed.clone());
        return;
    }
    for row in 0..n {
        if is_safe(placed, row, col) {
            placed.push(row);
            search(n, placed, solutions);
            placed.pop();
        }
    }
}

/// All solutions for an `n`×`n` board, in lexicographic order of rows.
///
/// Subtrees under each first-column row are searched in parallel and
/// concatenated in row order, which is exactly the sequential DFS order.
/// Sizes 2 and 3 have no solutions and yield an empty set.
pub fn enumerate_solutions(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .into_par_iter()
        .map(|first_row| {
            let mut placed = Vec::with_capacity(n);
            placed.push(first_row);
            let mut found = Vec::new();
            search(n, &mut placed, &mut found);
            found
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Builds board snapshots while the trace is synthesized
struct Board {
    n: usize,
    placed: Vec<usize>,
    solution_index: Option<usize>,
    solution_count: usize,
}

impl Board {
    fn snapshot(&self, trial: Option<Square>, conflicts: Vec<Square>, phase: QueenPhase) -> NQueensState {
        let mut grid = vec![vec![Cell::Empty; self.n]; self.n];
        for (col, &row) in self.placed.iter().enumerate() {
            grid[row][col] = Cell::Queen;
        }
        for square in &conflicts {
            grid[square.row][square.col] = Cell::Conflict;
        }
        if let Some(square) = trial {
            grid[square.row][square.col] = Cell::Trial;
        }

        let mut queens = vec![None; self.n];
        for (col, &row) in self.placed.iter().enumerate() {
            queens[col] = Some(row);
        }

        NQueensState {
            n: self.n,
            queens,
            grid,
            trial,
            conflicts,
            phase,
            is_solution: phase == QueenPhase::Solution,
            solution_index: self.solution_index,
            solution_count: self.solution_count,
        }
    }
}

/// N-Queens backtracking visualizer
#[derive(Debug, Clone, Copy, Default)]
pub struct NQueens;

impl StepGenerator for NQueens {
    type Input = NQueensInput;
    type State = NQueensState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("n_queens")
    }

    fn name(&self) -> &'static str {
        "N-Queens"
    }

    fn category(&self) -> AlgorithmCategory {
        AlgorithmCategory::Backtracking
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(N!)", "O(N)", "O(N^2)", "O(N!)", "O(N!)")
    }

    fn validate(&self, input: &NQueensInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
        check_range(
            "n",
            input.n as f64,
            limits.min_board_size as f64,
            limits.max_board_size as f64,
        )?;
        let count = enumerate_solutions(input.n).len();
        if count > 0 && input.solution >= count {
            return Err(AlgorithmError::OutOfRange {
                name: "solution".to_owned(),
                value: input.solution as f64,
                min: 0.0,
                max: (count - 1) as f64,
            });
        }
        Ok(())
    }

    /// Trace the selected solution; an out-of-range selection is clamped
    /// to the last solution.
    fn generate(&self, input: &NQueensInput) -> StepSequence<NQueensState> {
        let n = input.n;
        let solutions = enumerate_solutions(n);
        let mut recorder = StepRecorder::new();

        let Some(last) = solutions.len().checked_sub(1) else {
            let board = Board { n, placed: Vec::new(), solution_index: None, solution_count: 0 };
            recorder.record(
                board.snapshot(None, Vec::new(), QueenPhase::NoSolution),
                format!("No placement of {} queens on a {}x{} board is safe", n, n, n),
            );
            log::debug!("n_queens: no solutions for n = {}", n);
            return recorder.finish();
        };

        let index = input.solution.min(last);
        let target = &solutions[index];
        let mut board = Board {
            n,
            placed: Vec::with_capacity(n),
            solution_index: Some(index),
            solution_count: solutions.len(),
        };

        recorder.record(
            board.snapshot(None, Vec::new(), QueenPhase::Start),
            format!(
                "Empty {}x{} board; tracing solution {} of {}",
                n,
                n,
                index + 1,
                solutions.len()
            ),
        );

        for (col, &target_row) in target.iter().enumerate() {
            for row in 0..target_row {
                let square = Square { row, col };
                let conflicts = attackers(&board.placed, row, col);
                let annotation = match conflicts.first() {
                    Some(attacker) => format!(
                        "Try row {} in column {}: attacked by the queen at row {}, column {}",
                        row, col, attacker.row, attacker.col
                    ),
                    None => format!(
                        "Try row {} in column {}: safe, but every completion fails; backtrack",
                        row, col
                    ),
                };
                recorder.record(board.snapshot(Some(square), conflicts, QueenPhase::Trial), annotation);
            }

            board.placed.push(target_row);
            recorder.record(
                board.snapshot(None, Vec::new(), QueenPhase::Place),
                format!("Place a queen at row {} in column {}", target_row, col),
            );
        }

        recorder.record(
            board.snapshot(None, Vec::new(), QueenPhase::Solution),
            format!("All {} queens placed without conflict: solution {}", n, index + 1),
        );

        log::debug!(
            "n_queens: n = {}, solution {} of {}, {} steps",
            n,
            index + 1,
            solutions.len(),
            recorder.len()
        );
        recorder.finish()
    }
}
