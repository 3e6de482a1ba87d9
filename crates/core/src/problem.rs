//! Problem module - falling arithmetic expressions and their generation

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::rng::SimpleRng;
use crate::types::Operator;

/// One falling arithmetic expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Spawn sequence number, unique within a session
    pub id: u64,
    pub operator: Operator,
    pub left: u32,
    pub right: u32,
    /// Rendered expression, e.g. `"3 + 4"`
    pub question: String,
    pub answer: u32,
    /// Fall distance; never decreases while the problem is active
    pub vertical_position: u32,
    /// Matching a special problem clears every active problem
    pub is_special: bool,
}

impl Problem {
    /// Build a problem at the top of the lane.
    ///
    /// Returns `None` if `left op right` is not a non-negative integer.
    pub fn new(id: u64, operator: Operator, left: u32, right: u32, is_special: bool) -> Option<Self> {
        let answer = operator.apply(left, right)?;
        Some(Self {
            id,
            operator,
            left,
            right,
            question: format!("{} {} {}", left, operator.symbol(), right),
            answer,
            vertical_position: 0,
            is_special,
        })
    }

    pub fn has_fallen_past(&self, lane_height: u32) -> bool {
        self.vertical_position > lane_height
    }
}

/// Draw operands for `operator` following the generation rules:
///
/// - `÷`: divisor in `[min, divisor_max]`, quotient in `[min, max]`, dividend is their product
/// - `-`: both in `[min, max]`, swapped so the result is non-negative
/// - `+`, `×`: both in `[min, max]`
pub fn draw_operands(rng: &mut SimpleRng, operator: Operator, config: &GameConfig) -> (u32, u32) {
    let (min, max) = (config.operand_min, config.operand_max);
    match operator {
        Operator::Div => {
            let divisor = rng.next_inclusive(min, config.divisor_max);
            let quotient = rng.next_inclusive(min, max);
            (divisor.saturating_mul(quotient), divisor)
        }
        Operator::Sub => {
            let a = rng.next_inclusive(min, max);
            let b = rng.next_inclusive(min, max);
            if a < b {
                (b, a)
            } else {
                (a, b)
            }
        }
        Operator::Add | Operator::Mul => {
            let a = rng.next_inclusive(min, max);
            let b = rng.next_inclusive(min, max);
            (a, b)
        }
    }
}

/// Generate one random problem.
pub fn generate(rng: &mut SimpleRng, id: u64, is_special: bool, config: &GameConfig) -> Problem {
    let operator = rng.next_operator();
    let (left, right) = draw_operands(rng, operator, config);
    // Drawn operands always evaluate exactly; overflow from an extreme
    // config degrades to a fixed problem.
    Problem::new(id, operator, left, right, is_special)
        .unwrap_or_else(|| Problem::fallback(id, is_special))
}

impl Problem {
    fn fallback(id: u64, is_special: bool) -> Self {
        Self {
            id,
            operator: Operator::Add,
            left: 1,
            right: 1,
            question: "1 + 1".to_string(),
            answer: 2,
            vertical_position: 0,
            is_special,
        }
    }
}
