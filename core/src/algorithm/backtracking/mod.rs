//! Backtracking step generators
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod n_queens;

pub use self::n_queens::{enumerate_solutions, NQueens, NQueensInput, NQueensState};
