use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use retro_snake::game::{GameConfig, GameEngine};
use retro_snake::modes::HumanMode;
use retro_snake::storage::{self, FileStore, HighScoreStore, MemoryStore};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "retro_snake")]
#[command(version, about = "Single-player Snake in the terminal")]
struct Cli {
    /// JSON game configuration; command line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width and height of the square board
    #[arg(long)]
    board_size: Option<i32>,

    /// Initial tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Where to keep the high score
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long, conflicts_with = "high_score_file")]
    no_persist: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_file.as_deref(), storage::default_log_path())?;

    let config = build_config(&cli)?;
    let store = build_store(&cli);

    let mut engine = GameEngine::new(config, store);
    if let Some(seed) = cli.seed {
        engine = engine.seeded(seed);
    }
    info!(
        board_size = engine.config().board_size,
        speed_ms = engine.speed_ms(),
        high_score = engine.state().high_score,
        "retro snake starting"
    );

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => GameConfig::default(),
    };

    if let Some(size) = cli.board_size {
        let layout = GameConfig::new(size);
        config.board_size = size;
        config.initial_snake = layout.initial_snake;
        config.initial_food = layout.initial_food;
    }
    if let Some(speed) = cli.speed {
        config.initial_speed_ms = speed;
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

fn build_store(cli: &Cli) -> Box<dyn HighScoreStore> {
    if cli.no_persist {
        return Box::new(MemoryStore::new());
    }

    match cli.high_score_file.clone().or_else(storage::default_high_score_path) {
        Some(path) => Box::new(FileStore::new(path)),
        None => {
            warn!("no data directory available, high score will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

/// An explicit `--log-file` must work; the default location is best effort
fn setup_logging(explicit: Option<&Path>, fallback: Option<PathBuf>) -> Result<()> {
    match (explicit, fallback) {
        (Some(path), _) => init_logging(path),
        (None, Some(path)) => {
            if let Err(e) = init_logging(&path) {
                eprintln!("logging disabled: {e:#}");
            }
            Ok(())
        }
        (None, None) => Ok(()),
    }
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "retro_snake=info".into()),
        )
        .init();

    Ok(())
}
