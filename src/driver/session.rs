use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::game::{
    movement_period, Direction, EngineError, GameConfig, GameEngine, GameState, Lifecycle,
    Outcome, Transition,
};
use crate::store::HighScoreStore;

/// Which periodic triggers should be armed, and how fast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schedule {
    pub movement: Option<Duration>,
    pub countdown: Option<Duration>,
}

/// One game's worth of mutable context around the pure engine
///
/// Holds the current state, applies the reversal guard to steering intents,
/// and keeps the high score in sync with its store.
pub struct GameSession<S, R = StdRng> {
    engine: GameEngine<R>,
    store: S,
    state: GameState,
    high_score: u32,
    new_high_score: bool,
}

impl<S: HighScoreStore, R: Rng> GameSession<S, R> {
    pub fn new(engine: GameEngine<R>, store: S) -> Self {
        let high_score = store.get();
        let state = engine.idle_state();
        debug!(high_score, "session created");

        Self {
            engine,
            store,
            state,
            high_score,
            new_high_score: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the last finished game set a new high score
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    /// Start (or restart) a game; valid from any lifecycle
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.state = self.engine.start()?;
        self.new_high_score = false;
        info!(high_score = self.high_score, "game starting");
        Ok(())
    }

    pub fn on_countdown_tick(&mut self) -> Outcome {
        let transition = self.engine.tick_countdown(&self.state);
        self.commit(transition)
    }

    pub fn on_move_tick(&mut self) -> Result<Outcome, EngineError> {
        let transition = self.engine.tick_move(&self.state)?;
        Ok(self.commit(transition))
    }

    /// Answer the pending question with the text of an option
    pub fn answer(&mut self, selected: &str) -> Outcome {
        let transition = self.engine.submit_answer(&self.state, selected);
        self.commit(transition)
    }

    /// Answer the pending question by option position.
    ///
    /// An index past the last option is not an answer and is ignored.
    pub fn answer_index(&mut self, index: usize) -> Outcome {
        let selected = self
            .state
            .trivia
            .current
            .as_ref()
            .and_then(|question| question.options.get(index))
            .cloned();

        match selected {
            Some(selected) => self.answer(&selected),
            None => Outcome::Ignored,
        }
    }

    /// Buffer a steering intent for the next move.
    ///
    /// Returns false when the intent is dropped: either no game is live, or
    /// it would reverse the last committed move.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.state.lifecycle.accepts_steering() {
            return false;
        }

        let candidate = direction.velocity();
        if self.state.previous_velocity.reverses(candidate) {
            debug!(?direction, "reversal rejected");
            return false;
        }

        self.state.velocity = candidate;
        true
    }

    /// Triggers the driver must keep armed for the current state
    pub fn schedule(&self) -> Schedule {
        match self.state.lifecycle {
            Lifecycle::Running => Schedule {
                movement: Some(movement_period(self.state.score, self.config())),
                countdown: None,
            },
            Lifecycle::CountingDown(_) => Schedule {
                movement: None,
                countdown: Some(self.config().countdown_period()),
            },
            Lifecycle::Idle | Lifecycle::AwaitingAnswer | Lifecycle::GameOver(_) => {
                Schedule::default()
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    fn commit(&mut self, transition: Transition) -> Outcome {
        self.state = transition.state;
        if let Outcome::GameOver(_) = transition.outcome {
            self.record_final_score();
        }
        transition.outcome
    }

    fn record_final_score(&mut self) {
        let score = self.state.score;
        if score <= self.high_score {
            return;
        }

        self.high_score = score;
        self.new_high_score = true;
        info!(score, "new high score");

        if let Err(err) = self.store.set(score) {
            warn!(error = %format!("{err:#}"), "failed to persist high score");
        }
    }
}
