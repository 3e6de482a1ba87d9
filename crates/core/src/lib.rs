//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the Raindrop rules, session state and scoring. It has
//! no dependencies on rendering, storage or timers, which makes it:
//!
//! - **Deterministic**: same seed and same tick sequence produce the same run
//! - **Testable**: every rule is reachable from plain method calls
//! - **Portable**: driven by a terminal loop, a tokio task or a test alike
//!
//! # Module Structure
//!
//! - [`config`]: tunables with environment overrides
//! - [`problem`]: falling expressions and operand generation
//! - [`rng`]: seeded LCG used for operators and operands
//! - [`scoring`]: survival time formatting and the ratchet comparison
//! - [`session`]: spawn / physics / submit state machine
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Game Rules
//!
//! - A spawn tick appends one random `+`, `-`, `×` or `÷` problem
//! - A physics tick moves every problem down by the fall step; any problem past
//!   the lane height is removed and counts as a miss
//! - The second miss ends the session in that same tick
//! - Submitting a value removes the first problem (in spawn order) with that
//!   answer and awards the hit reward; a special problem instead clears all
//! - At scores 10000 and 11000 the next spawn is a special problem, once each
//!
//! # Example
//!
//! ```
//! use raindrop_core::{GameConfig, GameSession};
//! use raindrop_types::{Operator, SubmitOutcome};
//!
//! let mut session = GameSession::new(GameConfig::default(), 12345);
//! session.start(0);
//!
//! session.push_problem(Operator::Add, 3, 4, false);
//! assert!(matches!(session.submit_answer("7"), SubmitOutcome::Hit { .. }));
//! assert_eq!(session.score(), 500);
//! ```

pub mod config;
pub mod problem;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use raindrop_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use problem::Problem;
pub use rng::SimpleRng;
pub use scoring::{format_survival, ratchet, SurvivalTime};
pub use session::{GameSession, PhysicsOutcome, SessionResult};
pub use snapshot::{GameSnapshot, ProblemSnapshot};
