//! Raindrop (workspace facade crate).
//!
//! Re-exports the workspace crates under one `raindrop::{...}` path and hosts
//! the logging setup shared by binaries.

pub mod logging;

pub use raindrop_core as core;
pub use raindrop_engine as engine;
pub use raindrop_input as input;
pub use raindrop_runtime as runtime;
pub use raindrop_store as store;
pub use raindrop_term as term;
pub use raindrop_types as types;
