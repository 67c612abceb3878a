//! Translation of raw terminal events into game intents

pub mod handler;
pub mod pointer;

pub use handler::{InputHandler, KeyAction};
pub use pointer::quadrant_direction;
