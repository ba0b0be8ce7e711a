//! Knapsack step generators
//!
//! The 0/1 variant fills a dynamic-programming table; the fractional
//! variant is its greedy counterpart and shares the item type.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod fractional;
pub mod knapsack;

pub use self::fractional::FractionalKnapsack;
pub use self::knapsack::Knapsack;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{check_len, check_range, AlgorithmError};
use crate::config::InputLimits;

/// Item with an integer weight and value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackItem {
    pub weight: usize,
    pub value: u64,
}

/// Items and the knapsack capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnapsackInput {
    pub items: Vec<KnapsackItem>,
    pub capacity: usize,
}

pub(crate) fn validate_knapsack(input: &KnapsackInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
    check_len("items", input.items.len(), 1, limits.max_knapsack_items)?;
    check_range(
        "capacity",
        input.capacity as f64,
        0.0,
        limits.max_knapsack_capacity as f64,
    )?;
    if let Some(index) = input.items.iter().position(|item| item.weight == 0) {
        return Err(AlgorithmError::InvalidParameter {
            name: format!("items[{}].weight", index),
            reason: "weight must be positive".to_owned(),
        });
    }
    Ok(())
}
