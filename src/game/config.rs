use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::Direction;
use super::state::{Position, Snake};

pub const DEFAULT_BOARD_SIZE: i32 = 20;
pub const DEFAULT_INITIAL_SPEED_MS: u64 = 200;
pub const DEFAULT_MIN_SPEED_MS: u64 = 50;
pub const DEFAULT_SPEED_INCREMENT_MS: u64 = 5;
const INITIAL_SNAKE_LENGTH: i32 = 3;
/// Distance between the initial head and the initial food
const FOOD_LEAD: i32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board size must be at least 1, got {0}")]
    BoardTooSmall(i32),
    #[error("initial snake must have at least one cell")]
    EmptySnake,
    #[error("initial snake cell {0} is outside the board")]
    SnakeOutOfBounds(Position),
    #[error("initial snake visits {0} more than once")]
    DuplicateSnakeCell(Position),
    #[error("initial food {0} is outside the board")]
    FoodOutOfBounds(Position),
    #[error("initial food {0} sits on the snake")]
    FoodOnSnake(Position),
    #[error("minimum speed must be positive")]
    ZeroMinSpeed,
    #[error("minimum speed {min_ms}ms exceeds initial speed {initial_ms}ms")]
    SpeedRange { min_ms: u64, initial_ms: u64 },
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square board
    pub board_size: i32,
    /// Tick interval at the start of a game
    pub initial_speed_ms: u64,
    /// Fastest tick interval the game speeds up to
    pub min_speed_ms: u64,
    /// Interval reduction per food eaten
    pub speed_increment_ms: u64,
    /// Snake cells at the start of a game, head first
    pub initial_snake: Vec<Position>,
    /// Food shown before the first game starts
    pub initial_food: Position,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl GameConfig {
    /// Create a configuration for a custom board size with the snake centred
    pub fn new(board_size: i32) -> Self {
        let center = board_size / 2;
        let head = Position::new(center, center);
        let initial_snake = Snake::straight(head, Direction::Right, INITIAL_SNAKE_LENGTH)
            .cells()
            .copied()
            .collect();
        let food_x = (center + FOOD_LEAD).min(board_size - 1);

        Self {
            board_size,
            initial_speed_ms: DEFAULT_INITIAL_SPEED_MS,
            min_speed_ms: DEFAULT_MIN_SPEED_MS,
            speed_increment_ms: DEFAULT_SPEED_INCREMENT_MS,
            initial_snake,
            initial_food: Position::new(food_x, center),
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Override the initial tick interval
    pub fn with_initial_speed(mut self, initial_speed_ms: u64) -> Self {
        self.initial_speed_ms = initial_speed_ms;
        self
    }

    /// Load and validate a JSON configuration; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 1 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        if self.initial_snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        let mut seen = HashSet::new();
        for &cell in &self.initial_snake {
            if !cell.is_within(self.board_size) {
                return Err(ConfigError::SnakeOutOfBounds(cell));
            }
            if !seen.insert(cell) {
                return Err(ConfigError::DuplicateSnakeCell(cell));
            }
        }

        if !self.initial_food.is_within(self.board_size) {
            return Err(ConfigError::FoodOutOfBounds(self.initial_food));
        }
        if seen.contains(&self.initial_food) {
            return Err(ConfigError::FoodOnSnake(self.initial_food));
        }

        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::SpeedRange {
                min_ms: self.min_speed_ms,
                initial_ms: self.initial_speed_ms,
            });
        }

        Ok(())
    }

    /// The snake every game starts with
    pub fn initial_snake(&self) -> Snake {
        Snake::from_cells(self.initial_snake.iter().copied())
            .unwrap_or_else(|| Snake::straight(Position::new(0, 0), Direction::Right, 1))
    }

    /// Tick interval after one more food, floored at the minimum
    pub fn next_speed(&self, current_ms: u64) -> u64 {
        current_ms
            .saturating_sub(self.speed_increment_ms)
            .max(self.min_speed_ms)
    }
}
