//! Trivia Snake - a Snake game that stops for a quiz at score milestones
//!
//! This library provides:
//! - Core game logic (game module): movement, collisions, apples, speed ramp
//!   and the trivia gate, as pure state transitions
//! - Tick/timing driver (driver module): countdown and movement triggers,
//!   steering guard, high score bookkeeping
//! - High score persistence (store module)
//! - Terminal input and rendering (input and render modules)
//! - The interactive game loop (modes module)

pub mod driver;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod store;
