//! Engine module - schedule and orchestration around the pure core
//!
//! [`RaindropGame`] is what hosts drive: a terminal loop, the tokio runtime,
//! or a test calling [`RaindropGame::advance`] with fixed steps.
//!
//! ```
//! use raindrop_core::GameConfig;
//! use raindrop_engine::{NoNavigation, RaindropGame};
//! use raindrop_store::MemoryStore;
//!
//! let mut game = RaindropGame::new(GameConfig::default(), 7, MemoryStore::new(), NoNavigation);
//! game.start();
//! let report = game.advance(2_000);
//! assert_eq!(report.spawned, 1);
//! ```

pub mod game;
pub mod navigate;
pub mod schedule;

pub use raindrop_core as core;
pub use raindrop_input as input;
pub use raindrop_store as store;
pub use raindrop_types as types;

pub use game::{AdvanceReport, RaindropGame};
pub use navigate::{NoNavigation, Navigator};
pub use schedule::{RepeatingTask, Schedule};
