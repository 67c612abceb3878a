use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use trivia_snake::driver::GameSession;
use trivia_snake::game::{GameConfig, GameEngine, QuestionBank, SelectionPolicy};
use trivia_snake::modes::HumanMode;
use trivia_snake::store::JsonFileStore;

#[derive(Parser)]
#[command(name = "trivia_snake")]
#[command(version, about = "Snake game that quizzes you at every milestone")]
struct Cli {
    /// JSON game configuration; the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    canvas_width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    canvas_height: Option<u32>,

    /// Pixels per grid cell
    #[arg(long)]
    cell_size: Option<u32>,

    /// Starting speed in moves per second
    #[arg(long)]
    min_speed: Option<u32>,

    /// Top speed in moves per second
    #[arg(long)]
    max_speed: Option<u32>,

    /// JSON question bank (built-in questions when omitted)
    #[arg(long)]
    questions: Option<PathBuf>,

    /// How the next trivia question is picked
    #[arg(long, default_value = "random")]
    trivia_policy: TriviaPolicy,

    /// Where the high score is kept
    #[arg(long, default_value = "highscore.json")]
    highscore_file: PathBuf,

    /// Seed for apple placement and question order
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG filters, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TriviaPolicy {
    /// Uniformly at random
    Random,
    /// In bank order, wrapping around
    Sequential,
}

impl From<TriviaPolicy> for SelectionPolicy {
    fn from(policy: TriviaPolicy) -> Self {
        match policy {
            TriviaPolicy::Random => SelectionPolicy::Random,
            TriviaPolicy::Sequential => SelectionPolicy::Sequential,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.canvas_width {
            config.canvas_width = width;
        }
        if let Some(height) = self.canvas_height {
            config.canvas_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(min_speed) = self.min_speed {
            config.min_speed = min_speed;
        }
        if let Some(max_speed) = self.max_speed {
            config.max_speed = max_speed;
        }

        Ok(config)
    }

    fn question_bank(&self) -> Result<QuestionBank> {
        let policy = SelectionPolicy::from(self.trivia_policy);
        match &self.questions {
            Some(path) => QuestionBank::load(path, policy).context("Failed to load questions"),
            None => Ok(QuestionBank::builtin(policy)),
        }
    }
}

/// Route tracing to a file; the terminal itself belongs to the game
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let questions = cli.question_bank()?;

    tracing::info!(
        grid_width = config.grid_width(),
        grid_height = config.grid_height(),
        questions = questions.len(),
        policy = ?questions.policy(),
        "configuration loaded"
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, questions, seed),
        None => GameEngine::new(config, questions),
    }
    .context("Invalid game configuration")?;
    let session = GameSession::new(engine, JsonFileStore::new(&cli.highscore_file));

    let mut human_mode = HumanMode::new(session);
    human_mode.run().await?;

    Ok(())
}
