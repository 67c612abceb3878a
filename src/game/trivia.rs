//! Trivia questions that gate play at score milestones
//!
//! A [`QuestionBank`] holds the questions and the [`SelectionPolicy`] used to
//! pick the next one. The per-game [`TriviaState`] remembers the question on
//! screen, whether the current milestone has already asked, and the cursor
//! for sequential selection.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriviaError {
    #[error("question bank is empty")]
    EmptyBank,
    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse question bank {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Most options a question may offer; answers are picked with keys 1 to 9
pub const MAX_OPTIONS: usize = 9;

/// A multiple-choice question with exactly one correct option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correct_answer")]
    pub correct: String,
}

impl Question {
    pub fn new(text: &str, options: &[&str], correct: &str) -> Self {
        Self {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct: correct.to_string(),
        }
    }

    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct == selected
    }

    fn check(&self, index: usize) -> Result<(), TriviaError> {
        let invalid = |reason: &str| TriviaError::InvalidQuestion {
            index,
            reason: reason.to_string(),
        };

        if self.options.is_empty() {
            return Err(invalid("no options"));
        }
        if self.options.len() > MAX_OPTIONS {
            return Err(invalid("more than 9 options"));
        }
        if !self.options.contains(&self.correct) {
            return Err(invalid("correct answer is not among the options"));
        }
        Ok(())
    }
}

/// How the next question is picked from the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Uniformly at random, with replacement
    #[default]
    Random,
    /// In bank order, wrapping around after the last question
    Sequential,
}

/// Per-game trivia bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriviaState {
    /// Question awaiting an answer, if any
    pub current: Option<Question>,
    /// Set once the current milestone has asked its question
    pub asked_for_milestone: bool,
    /// Index of the next question under [`SelectionPolicy::Sequential`]
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    policy: SelectionPolicy,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, policy: SelectionPolicy) -> Result<Self, TriviaError> {
        let bank = Self { questions, policy };
        bank.validate()?;
        Ok(bank)
    }

    /// The questions shipped with the game
    pub fn builtin(policy: SelectionPolicy) -> Self {
        let questions = vec![
            Question::new("What is 2 + 2?", &["4", "5", "6", "7"], "4"),
            Question::new("How many sides does a hexagon have?", &["5", "6", "7", "8"], "6"),
            Question::new(
                "Which planet is closest to the sun?",
                &["Venus", "Earth", "Mercury", "Mars"],
                "Mercury",
            ),
            Question::new("What is 7 x 8?", &["54", "56", "58", "64"], "56"),
            Question::new(
                "What is the chemical symbol for gold?",
                &["Ag", "Go", "Gd", "Au"],
                "Au",
            ),
        ];
        Self { questions, policy }
    }

    /// Load a JSON array of `{"question", "options", "correct_answer"}` objects
    pub fn load(path: &Path, policy: SelectionPolicy) -> Result<Self, TriviaError> {
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| TriviaError::Io {
            path: display.clone(),
            source,
        })?;
        let questions: Vec<Question> =
            serde_json::from_str(&json).map_err(|source| TriviaError::Json {
                path: display,
                source,
            })?;
        Self::new(questions, policy)
    }

    pub fn validate(&self) -> Result<(), TriviaError> {
        if self.questions.is_empty() {
            return Err(TriviaError::EmptyBank);
        }
        for (index, question) in self.questions.iter().enumerate() {
            question.check(index)?;
        }
        Ok(())
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Pick a question, returning it with the cursor to use next time.
    ///
    /// Returns `None` only for an empty bank.
    pub fn draw<R: Rng>(&self, cursor: usize, rng: &mut R) -> Option<(Question, usize)> {
        if self.questions.is_empty() {
            return None;
        }
        let len = self.questions.len();
        let (index, next_cursor) = match self.policy {
            SelectionPolicy::Random => (rng.gen_range(0..len), cursor),
            SelectionPolicy::Sequential => {
                let index = cursor % len;
                (index, (index + 1) % len)
            }
        };
        Some((self.questions[index].clone(), next_cursor))
    }
}
