//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, usable from the core logic, the
//! stores, the renderers and the async runtime alike.
//!
//! # Lane Geometry
//!
//! Problems fall down a single lane measured in abstract units:
//!
//! - **Lane height**: 380 units; a problem strictly below that is a miss
//! - **Fall step**: 5 units per physics tick
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_INTERVAL_MS` | 2000 | One new problem per spawn tick |
//! | `PHYSICS_INTERVAL_MS` | 500 | Fall step + miss detection |
//!
//! The two periods are independent. A problem spawned at the top needs
//! `LANE_HEIGHT / FALL_STEP + 1` physics ticks (about 38.5s) to be missed.
//!
//! # Scoring
//!
//! - `HIT_REWARD`: 500 points per matched (non-special) problem
//! - `MISS_LIMIT`: the session ends on the second miss
//! - `SPECIAL_MILESTONES`: scores at which a one-shot clear-all problem spawns
//!
//! # Examples
//!
//! ```
//! use raindrop_types::{GameAction, Operator, LANE_HEIGHT, MISS_LIMIT};
//!
//! let op = Operator::from_str("x").unwrap();
//! assert_eq!(op, Operator::Mul);
//! assert_eq!(op.apply(3, 4), Some(12));
//!
//! assert_eq!(GameAction::from_str("submit"), Some(GameAction::Submit));
//!
//! assert_eq!(LANE_HEIGHT, 380);
//! assert_eq!(MISS_LIMIT, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Spawn period (one new falling problem every 2 seconds)
pub const SPAWN_INTERVAL_MS: u32 = 2000;

/// Physics period (fall step and miss detection every 500ms)
pub const PHYSICS_INTERVAL_MS: u32 = 500;

/// Distance a problem falls per physics tick
pub const FALL_STEP: u32 = 5;

/// Lane height; a problem whose position exceeds this is missed
pub const LANE_HEIGHT: u32 = 380;

/// Points awarded for matching a regular problem
pub const HIT_REWARD: u32 = 500;

/// Misses that end the session
pub const MISS_LIMIT: u32 = 2;

/// Scores at which a special clear-all problem spawns (once each per session)
pub const SPECIAL_MILESTONES: [u32; 2] = [10_000, 11_000];

/// Smallest operand for `+`, `-`, `×` and smallest quotient for `÷`
pub const OPERAND_MIN: u32 = 1;

/// Largest operand for `+`, `-`, `×` and largest quotient for `÷`
pub const OPERAND_MAX: u32 = 10;

/// Largest divisor for `÷` (smallest is `OPERAND_MIN`)
pub const DIVISOR_MAX: u32 = 9;

/// Maximum digits the answer buffer accepts.
///
/// The largest generated answer is `10 × 10 = 100`, so this leaves headroom
/// without letting a held key grow the buffer unbounded.
pub const MAX_ANSWER_DIGITS: usize = 6;

/// Persisted key for the current/final score
pub const SCORE_KEY: &str = "Rain_drops_score";

/// Persisted key for the survival time (`"minutes.seconds"`)
pub const TIME_KEY: &str = "Rain_Drops_Time";

/// Persisted key for the cross-game assessment result JSON blob
pub const ASSESSMENT_RESULT_KEY: &str = "assessmentResult";

/// Field inside the assessment result that holds the math score
pub const MATH_SCORE_FIELD: &str = "p_M";

/// The four arithmetic operators a problem can use
///
/// - **Add**: `a + b`
/// - **Sub**: `a - b`, generated with `a >= b`
/// - **Mul**: `a × b`
/// - **Div**: `a ÷ b`, generated so that `b` divides `a` exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// All operators, in the order used for uniform selection
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Parse an operator from its symbol or name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use raindrop_types::Operator;
    ///
    /// assert_eq!(Operator::from_str("+"), Some(Operator::Add));
    /// assert_eq!(Operator::from_str("÷"), Some(Operator::Div));
    /// assert_eq!(Operator::from_str("/"), Some(Operator::Div));
    /// assert_eq!(Operator::from_str("MUL"), Some(Operator::Mul));
    /// assert_eq!(Operator::from_str("%"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "+" | "add" => Some(Operator::Add),
            "-" | "−" | "sub" => Some(Operator::Sub),
            "×" | "*" | "x" | "mul" => Some(Operator::Mul),
            "÷" | "/" | "div" => Some(Operator::Div),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
        }
    }

    /// Display symbol used in problem questions
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }

    /// Evaluate `left op right` over non-negative integers.
    ///
    /// Returns `None` when the result would be negative, fractional, or
    /// overflow; generated problems never hit those cases.
    pub fn apply(&self, left: u32, right: u32) -> Option<u32> {
        match self {
            Operator::Add => left.checked_add(right),
            Operator::Sub => left.checked_sub(right),
            Operator::Mul => left.checked_mul(right),
            Operator::Div => {
                if right == 0 || left % right != 0 {
                    None
                } else {
                    Some(left / right)
                }
            }
        }
    }
}

/// Player actions that can be applied to a running game
///
/// Produced by the terminal key map and by the async runtime's command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Append a decimal digit (0-9) to the answer buffer
    Digit(u8),
    /// Remove the last digit from the answer buffer
    Backspace,
    /// Submit the answer buffer and clear it
    Submit,
    /// Start a fresh session
    Restart,
    /// Flush results and hand control back to the assessment screen
    ReturnToAssessment,
}

impl GameAction {
    /// Parse a non-digit action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use raindrop_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("backspace"), Some(GameAction::Backspace));
    /// assert_eq!(GameAction::from_str("returnToAssessment"), Some(GameAction::ReturnToAssessment));
    /// assert_eq!(GameAction::from_str("7"), Some(GameAction::Digit(7)));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let [b @ b'0'..=b'9'] = lower.as_bytes() {
            return Some(GameAction::Digit(b - b'0'));
        }
        match lower.as_str() {
            "backspace" => Some(GameAction::Backspace),
            "submit" => Some(GameAction::Submit),
            "restart" => Some(GameAction::Restart),
            "returntoassessment" => Some(GameAction::ReturnToAssessment),
            _ => None,
        }
    }
}

/// The two repeating tasks owned by a session's schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Creates a new falling problem
    Spawn,
    /// Advances every problem and detects misses
    Physics,
}

/// Why the last submission did or did not change the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Input was empty, non-numeric, or matched nothing
    NoMatch,
    /// A regular problem was matched and removed
    Hit { problem_id: u64, reward: u32 },
    /// A special problem was matched; every active problem was cleared
    ClearAll { cleared: u32 },
    /// The session is over; input is not processed
    Ignored,
}
