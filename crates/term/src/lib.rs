//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal gameplay. It consumes
//! [`core::GameSnapshot`] values and never reaches into the engine, rendering
//! into a framebuffer that is then flushed to the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use raindrop_core as core;
pub use raindrop_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{changed_rows, encode_rows_into, TerminalRenderer};
