//! Tick/timing driver
//!
//! Owns the two periodic triggers that move the game forward:
//! - a countdown trigger, armed only while counting down, at a fixed period
//! - a movement trigger, armed only while running, at the speed-ramp period
//!
//! After every state change the session's [`Schedule`] is re-applied, so a
//! trigger that is not needed is torn down rather than left ticking.

pub mod session;
pub mod trigger;

pub use session::{GameSession, Schedule};
pub use trigger::Trigger;

use rand::rngs::StdRng;
use rand::Rng;

use crate::game::{Direction, EngineError, Outcome};
use crate::store::HighScoreStore;

/// Which trigger fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Countdown,
    Move,
}

pub struct Driver<S, R = StdRng> {
    session: GameSession<S, R>,
    movement: Trigger,
    countdown: Trigger,
}

impl<S: HighScoreStore, R: Rng> Driver<S, R> {
    pub fn new(session: GameSession<S, R>) -> Self {
        Self {
            session,
            movement: Trigger::new(),
            countdown: Trigger::new(),
        }
    }

    pub fn session(&self) -> &GameSession<S, R> {
        &self.session
    }

    pub fn movement(&self) -> &Trigger {
        &self.movement
    }

    pub fn countdown(&self) -> &Trigger {
        &self.countdown
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        let result = self.session.start();
        self.reschedule();
        result
    }

    pub fn steer(&mut self, direction: Direction) -> bool {
        self.session.steer(direction)
    }

    pub fn answer_index(&mut self, index: usize) -> Outcome {
        let outcome = self.session.answer_index(index);
        self.reschedule();
        outcome
    }

    /// Wait for whichever armed trigger fires next
    pub async fn next_tick(&mut self) -> Tick {
        tokio::select! {
            _ = self.movement.tick() => Tick::Move,
            _ = self.countdown.tick() => Tick::Countdown,
        }
    }

    /// Apply a fired tick to the session
    pub fn fire(&mut self, tick: Tick) -> Result<Outcome, EngineError> {
        let result = match tick {
            Tick::Countdown => Ok(self.session.on_countdown_tick()),
            Tick::Move => self.session.on_move_tick(),
        };
        self.reschedule();
        result
    }

    /// Bring both triggers in line with the session's lifecycle and score
    pub fn reschedule(&mut self) {
        let schedule = self.session.schedule();
        self.movement.apply(schedule.movement);
        self.countdown.apply(schedule.countdown);
    }

    /// Disarm both triggers
    pub fn shutdown(&mut self) {
        self.movement.disarm();
        self.countdown.disarm();
    }
}
