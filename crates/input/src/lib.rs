//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework apart from `crossterm` key
//! events. It maps keys into [`crate::types::GameAction`] and provides the
//! fixed-capacity answer buffer the player types into.

pub mod buffer;
pub mod map;

pub use raindrop_types as types;

pub use buffer::AnswerBuffer;
pub use map::{handle_key_event, should_quit};
