//! Runtime module - hosts a game on a tokio task
//!
//! The game still runs on a single logical thread: one spawned task owns the
//! [`RaindropGame`] and is the only code that touches it. Everything else talks
//! to that task through channels:
//!
//! - commands (player actions, free-text answers, teardown) over `mpsc`
//! - the latest [`GameSnapshot`] over `watch`, for renderers to subscribe to
//!
//! Time is fed into the engine's schedule from a single `tokio::time::interval`
//! frame clock, so both repeating tasks keep living in one [`Schedule`] and are
//! cancelled together.
//!
//! [`RaindropGame`]: raindrop_engine::RaindropGame
//! [`GameSnapshot`]: raindrop_core::GameSnapshot
//! [`Schedule`]: raindrop_engine::Schedule

pub mod error;
pub mod host;

pub use raindrop_core as core;
pub use raindrop_engine as engine;
pub use raindrop_types as types;

pub use error::RuntimeError;
pub use host::{spawn_game, spawn_game_with, RuntimeCommand, RuntimeConfig, RuntimeHandle};
