//! Core game logic module for the trivia-gated Snake
//!
//! This module contains all the game logic without any I/O, timer or rendering
//! dependencies. Every operation maps a [`GameState`] to its successor.

pub mod action;
pub mod config;
pub mod engine;
pub mod speed;
pub mod state;
pub mod trivia;

// Re-export commonly used types
pub use action::{Direction, Velocity};
pub use config::{ConfigError, GameConfig};
pub use engine::{EngineError, GameEngine, Outcome, Transition};
pub use speed::movement_period;
pub use state::{GameOverCause, GameState, Lifecycle, Position, Snake};
pub use trivia::{
    Question, QuestionBank, SelectionPolicy, TriviaError, TriviaState, MAX_OPTIONS,
};
