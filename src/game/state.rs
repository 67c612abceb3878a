use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::action::Velocity;
use super::trivia::TriviaState;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by a velocity
    pub fn moved_by(&self, velocity: Velocity) -> Self {
        Self {
            x: self.x + velocity.dx(),
            y: self.y + velocity.dy(),
        }
    }
}

/// The snake: a head plus the cells it recently left, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub head: Position,
    pub trail: VecDeque<Position>,
}

impl Snake {
    /// Create a snake that is only a head
    pub fn new(head: Position) -> Self {
        Self {
            head,
            trail: VecDeque::new(),
        }
    }

    /// Check if position is covered by the head or any trail cell
    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.trail.contains(&pos)
    }

    /// Check if position collides with the trail (excluding head)
    pub fn collides_with_trail(&self, pos: Position) -> bool {
        self.trail.contains(&pos)
    }

    /// Number of cells covered, head included
    pub fn len(&self) -> usize {
        self.trail.len() + 1
    }

    /// Always false: a snake has at least a head
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// What ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// A trivia question was answered incorrectly
    WrongAnswer,
}

/// Where a game session is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Nothing started yet
    Idle,
    /// Pre-game countdown showing `n`
    CountingDown(u8),
    /// Snake moves on every movement tick
    Running,
    /// Paused until the current trivia question is answered
    AwaitingAnswer,
    GameOver(GameOverCause),
}

impl Lifecycle {
    pub fn is_running(&self) -> bool {
        matches!(self, Lifecycle::Running)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Lifecycle::GameOver(_))
    }

    /// Steering intents are buffered in every state where a game is live
    pub fn accepts_steering(&self) -> bool {
        matches!(
            self,
            Lifecycle::CountingDown(_) | Lifecycle::Running | Lifecycle::AwaitingAnswer
        )
    }
}

/// Complete game state
///
/// Transitions never mutate a state in place; the engine clones and returns
/// the successor.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` until the first apple is placed
    pub target: Option<Position>,
    /// Velocity applied on the next move; steering overwrites it
    pub velocity: Velocity,
    /// Velocity of the last committed move
    pub previous_velocity: Velocity,
    pub score: u32,
    /// Committed moves since start
    pub moves: u32,
    pub lifecycle: Lifecycle,
    pub trivia: TriviaState,
}

impl GameState {
    /// The state before any game has been started
    pub fn idle(head: Position) -> Self {
        Self {
            snake: Snake::new(head),
            target: None,
            velocity: Velocity::STILL,
            previous_velocity: Velocity::STILL,
            score: 0,
            moves: 0,
            lifecycle: Lifecycle::Idle,
            trivia: TriviaState::default(),
        }
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
