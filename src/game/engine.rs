use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    action::{Direction, Velocity},
    config::{ConfigError, GameConfig},
    state::{GameOverCause, GameState, Lifecycle, Position, Snake},
    trivia::{QuestionBank, TriviaState},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Every cell is covered by the snake, so no apple can be placed
    #[error("no free cell left on the {width}x{height} grid")]
    GridSaturated { width: u32, height: u32 },
}

/// What a transition did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation is not valid in the current lifecycle; state unchanged
    Ignored,
    /// Countdown stepped down and now shows this value
    CountdownTick(u8),
    /// Countdown finished, the snake starts moving
    Started,
    /// The snake moved one cell
    Moved { ate: bool },
    /// The snake moved and reached a milestone, play is paused on a question
    QuestionAsked,
    /// Correct answer, play continues
    Resumed,
    GameOver(GameOverCause),
}

/// Result of applying one operation to a state
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub outcome: Outcome,
}

impl Transition {
    fn ignored(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            outcome: Outcome::Ignored,
        }
    }

    fn game_over(state: &GameState, cause: GameOverCause) -> Self {
        let mut next = state.clone();
        next.lifecycle = Lifecycle::GameOver(cause);
        info!(score = next.score, ?cause, "game over");
        Self {
            state: next,
            outcome: Outcome::GameOver(cause),
        }
    }
}

/// The game engine that handles all game logic
///
/// Every operation reads a [`GameState`] and returns its successor; the engine
/// itself only owns the configuration, the question bank, and the RNG.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    questions: QuestionBank,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from system entropy
    pub fn new(config: GameConfig, questions: QuestionBank) -> Result<Self, ConfigError> {
        Self::with_rng(config, questions, StdRng::from_entropy())
    }

    /// Create an engine whose apples and questions are reproducible
    pub fn seeded(
        config: GameConfig,
        questions: QuestionBank,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, questions, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Build an engine around a caller-supplied RNG
    ///
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn with_rng(
        config: GameConfig,
        questions: QuestionBank,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            questions,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// State shown before the first game
    pub fn idle_state(&self) -> GameState {
        GameState::idle(self.config.start_head)
    }

    /// Reset everything and begin the countdown
    pub fn start(&mut self) -> Result<GameState, EngineError> {
        let snake = Snake::new(self.config.start_head);
        let target = self.place_target(&snake, None)?;

        debug!(?target, "game started");

        Ok(GameState {
            snake,
            target: Some(target),
            velocity: Direction::Up.velocity(),
            previous_velocity: Velocity::STILL,
            score: 0,
            moves: 0,
            lifecycle: Lifecycle::CountingDown(self.config.countdown_steps),
            trivia: TriviaState::default(),
        })
    }

    /// Advance the pre-game countdown by one step
    pub fn tick_countdown(&self, state: &GameState) -> Transition {
        let Lifecycle::CountingDown(n) = state.lifecycle else {
            return Transition::ignored(state);
        };

        let mut next = state.clone();
        let outcome = if n > 1 {
            next.lifecycle = Lifecycle::CountingDown(n - 1);
            Outcome::CountdownTick(n - 1)
        } else {
            next.lifecycle = Lifecycle::Running;
            Outcome::Started
        };

        Transition {
            state: next,
            outcome,
        }
    }

    /// Execute one movement tick
    pub fn tick_move(&mut self, state: &GameState) -> Result<Transition, EngineError> {
        if !state.lifecycle.is_running() {
            return Ok(Transition::ignored(state));
        }

        let next_head = state.snake.head.moved_by(state.velocity);

        if !self.config.is_in_bounds(next_head) {
            return Ok(Transition::game_over(state, GameOverCause::Wall));
        }

        let mut next = state.clone();

        let ate = state.target == Some(next_head);
        if ate {
            next.score += 1;
            next.target = Some(self.place_target(&state.snake, Some(next_head))?);
            debug!(score = next.score, target = ?next.target, "apple eaten");
        }

        // The trail keeps score + 2 cells of history, the cell just left included
        next.snake.trail.push_back(state.snake.head);
        let max_trail = next.score as usize + 2;
        while next.snake.trail.len() > max_trail {
            next.snake.trail.pop_front();
        }

        if next.snake.collides_with_trail(next_head) {
            return Ok(Transition::game_over(state, GameOverCause::SelfCollision));
        }

        next.snake.head = next_head;
        next.previous_velocity = state.velocity;
        next.moves += 1;

        if next.score > 0 && next.score % self.config.milestone_interval == 0 {
            if !next.trivia.asked_for_milestone {
                if let Some((question, cursor)) =
                    self.questions.draw(next.trivia.cursor, &mut self.rng)
                {
                    debug!(score = next.score, question = %question.text, "milestone reached");
                    next.trivia.current = Some(question);
                    next.trivia.cursor = cursor;
                    next.trivia.asked_for_milestone = true;
                    next.lifecycle = Lifecycle::AwaitingAnswer;
                    return Ok(Transition {
                        state: next,
                        outcome: Outcome::QuestionAsked,
                    });
                }
            }
        } else {
            next.trivia.asked_for_milestone = false;
        }

        Ok(Transition {
            state: next,
            outcome: Outcome::Moved { ate },
        })
    }

    /// Answer the question the game is paused on
    pub fn submit_answer(&self, state: &GameState, selected: &str) -> Transition {
        if state.lifecycle != Lifecycle::AwaitingAnswer {
            return Transition::ignored(state);
        }

        let correct = state
            .trivia
            .current
            .as_ref()
            .is_some_and(|question| question.is_correct(selected));

        if !correct {
            return Transition::game_over(state, GameOverCause::WrongAnswer);
        }

        let mut next = state.clone();
        next.trivia.current = None;
        next.lifecycle = Lifecycle::Running;
        Transition {
            state: next,
            outcome: Outcome::Resumed,
        }
    }

    /// Pick a random cell not covered by `snake` (nor by `also_avoid`).
    ///
    /// Rejection sampling is bounded; once the bound is hit a free cell is
    /// drawn from an explicit enumeration instead.
    pub fn place_target(
        &mut self,
        snake: &Snake,
        also_avoid: Option<Position>,
    ) -> Result<Position, EngineError> {
        let width = self.config.grid_width();
        let height = self.config.grid_height();
        if width == 0 || height == 0 {
            return Err(EngineError::GridSaturated { width, height });
        }
        let blocked = |pos: Position| snake.occupies(pos) || also_avoid == Some(pos);

        for _ in 0..self.config.max_placement_attempts {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !blocked(pos) {
                return Ok(pos);
            }
        }

        warn!(
            attempts = self.config.max_placement_attempts,
            "apple placement fell back to free-cell enumeration"
        );

        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !blocked(*pos))
            .collect();

        if free.is_empty() {
            return Err(EngineError::GridSaturated { width, height });
        }
        Ok(free[self.rng.gen_range(0..free.len())])
    }
}
