use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    action::{Direction, Intent},
    config::GameConfig,
    state::{CollisionKind, GameState, Phase, Position, Snake},
};
use crate::storage::HighScoreStore;

/// What a call to [`GameEngine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running, nothing changed
    Skipped,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew
    Ate,
    /// The snake hit something and the game is over
    Collided(CollisionKind),
}

/// The game engine: owns the state and applies every rule to it
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    store: Box<dyn HighScoreStore>,
    rng: StdRng,
}

impl GameEngine {
    /// Create an IDLE engine, loading the high score from `store`
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = match store.load() {
            Ok(score) => score,
            Err(e) => {
                warn!(error = %e, "could not load high score, starting from 0");
                0
            }
        };

        let state = GameState::new(
            config.initial_snake(),
            Some(config.initial_food),
            config.board_size,
            config.initial_speed_ms,
            high_score,
        );

        Self::with_state(config, store, state)
    }

    /// Build an engine around an existing snapshot, used for replays and tests
    pub fn with_state(config: GameConfig, store: Box<dyn HighScoreStore>, state: GameState) -> Self {
        Self {
            config,
            state,
            store,
            rng: StdRng::from_entropy(),
        }
    }

    /// Make food placement deterministic
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn speed_ms(&self) -> u64 {
        self.state.speed_ms
    }

    /// Dispatch an intent; returns whether anything changed
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Steer(direction) => self.steer(direction),
            Intent::Pause => self.pause(),
            Intent::Resume => self.resume(),
            Intent::TogglePause => self.toggle_pause(),
            Intent::Start => self.start(),
            Intent::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Begin a fresh game; only from IDLE or GAME_OVER
    pub fn start(&mut self) -> bool {
        if !self.state.phase.can_start() {
            return false;
        }
        self.restart();
        true
    }

    /// Begin a fresh game from any phase
    pub fn restart(&mut self) {
        let snake = self.config.initial_snake();
        let food = spawn_food_avoid_snake(&mut self.rng, self.config.board_size, &snake);

        self.state = GameState {
            phase: Phase::Running,
            snake,
            food,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            high_score: self.state.high_score,
            speed_ms: self.config.initial_speed_ms,
            board_size: self.config.board_size,
        };

        info!(high_score = self.state.high_score, "game started");
    }

    /// Queue a direction for the next tick, ignoring reversals
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.state.direction.is_opposite(direction) {
            return false;
        }
        let changed = self.state.pending_direction != direction;
        self.state.pending_direction = direction;
        changed
    }

    pub fn pause(&mut self) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        self.state.phase = Phase::Paused;
        debug!("game paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }
        self.state.phase = Phase::Running;
        debug!("game resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Execute one step of the game
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase != Phase::Running {
            return TickOutcome::Skipped;
        }

        self.state.direction = self.state.pending_direction;
        let new_head = self.state.snake.head().moved_in_direction(self.state.direction);

        if let Some(kind) = self.check_collision(new_head) {
            self.state.phase = Phase::GameOver;
            info!(
                score = self.state.score,
                high_score = self.state.high_score,
                collision = ?kind,
                "game over"
            );
            return TickOutcome::Collided(kind);
        }

        let ate_food = self.state.food == Some(new_head);
        self.state.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved;
        }

        self.state.score += 1;
        if self.state.score > self.state.high_score {
            self.record_high_score(self.state.score);
        }
        self.state.food =
            spawn_food_avoid_snake(&mut self.rng, self.config.board_size, &self.state.snake);
        self.state.speed_ms = self.config.next_speed(self.state.speed_ms);
        debug!(
            score = self.state.score,
            speed_ms = self.state.speed_ms,
            food = ?self.state.food,
            "food eaten"
        );

        TickOutcome::Ate
    }

    /// Check if the new head position causes a collision; walls first
    fn check_collision(&self, pos: Position) -> Option<CollisionKind> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionKind::Wall);
        }

        if self.state.snake.collides_with_body(pos) {
            return Some(CollisionKind::SelfCollision);
        }

        None
    }

    fn record_high_score(&mut self, score: u32) {
        self.state.high_score = score;
        if let Err(e) = self.store.save(score) {
            warn!(error = %e, score, "could not persist high score");
        }
    }
}

/// Spawn food at a random empty cell; `None` when the board is full
fn spawn_food_avoid_snake(rng: &mut StdRng, board_size: i32, snake: &Snake) -> Option<Position> {
    let total_cells = (board_size.max(0) as usize).pow(2);
    if snake.len() >= total_cells {
        debug!("board is full, no food placed");
        return None;
    }

    loop {
        let x = rng.gen_range(0..board_size);
        let y = rng.gen_range(0..board_size);
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn engine_with(config: GameConfig) -> GameEngine {
        GameEngine::new(config, Box::new(MemoryStore::new())).seeded(7)
    }

    fn running_state(config: &GameConfig, cells: &[(i32, i32)], direction: Direction) -> GameState {
        let snake = Snake::from_cells(cells.iter().map(|&(x, y)| Position::new(x, y))).unwrap();
        let mut state = GameState::new(
            snake,
            Some(Position::new(config.board_size - 1, config.board_size - 1)),
            config.board_size,
            config.initial_speed_ms,
            0,
        );
        state.phase = Phase::Running;
        state.direction = direction;
        state.pending_direction = direction;
        state
    }

    #[test]
    fn test_initial_state() {
        let engine = GameEngine::new(GameConfig::default(), Box::new(MemoryStore::with_score(12)));
        let state = engine.state();

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.food, Some(Position::new(15, 10)));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.pending_direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, 200);
        assert_eq!(state.high_score, 12);
    }

    #[test]
    fn test_start_resets_and_runs() {
        let mut engine = engine_with(GameConfig::default());
        assert!(engine.start());

        let state = engine.state();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
        assert!(state.is_in_bounds(food));
    }

    #[test]
    fn test_start_ignored_while_running_or_paused() {
        let mut engine = engine_with(GameConfig::default());
        engine.start();
        engine.tick();
        let head = engine.state().snake.head();

        assert!(!engine.start());
        assert_eq!(engine.state().snake.head(), head);

        engine.pause();
        assert!(!engine.start());
        assert_eq!(engine.phase(), Phase::Paused);
    }

    #[test]
    fn test_restart_is_reentrant() {
        let mut engine = engine_with(GameConfig::default());
        engine.start();
        engine.tick();
        engine.restart();

        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.state().snake.head(), Position::new(10, 10));

        engine.pause();
        engine.restart();
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_start_after_game_over_resets_everything() {
        let config = GameConfig::default();
        let mut state = running_state(&config, &[(10, 10), (9, 10), (8, 10)], Direction::Right);
        state.food = Some(Position::new(11, 10));
        let mut engine =
            GameEngine::with_state(config.clone(), Box::new(MemoryStore::new()), state).seeded(3);

        assert_eq!(engine.tick(), TickOutcome::Ate);
        assert_eq!(engine.speed_ms(), 195);
        engine.steer(Direction::Up);
        while engine.phase() == Phase::Running {
            engine.tick();
        }
        assert_eq!(engine.phase(), Phase::GameOver);
        let best = engine.state().high_score;
        assert!(best >= 1);

        assert!(engine.start());
        let state = engine.state();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, config.initial_speed_ms);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.pending_direction, Direction::Right);
        assert_eq!(state.snake, config.initial_snake());
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
        assert!(state.is_in_bounds(food));
        assert_eq!(state.high_score, best);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine_with(GameConfig::default());
        engine.start();
        let food = engine.state().food;

        let outcome = engine.tick();

        let state = engine.state();
        if food == Some(Position::new(11, 10)) {
            assert_eq!(outcome, TickOutcome::Ate);
        } else {
            assert_eq!(outcome, TickOutcome::Moved);
            assert_eq!(state.snake.len(), 3);
            assert_eq!(state.snake.tail(), Position::new(9, 10));
        }
        assert_eq!(state.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_food_consumption() {
        let config = GameConfig::default();
        let mut state = running_state(&config, &[(10, 10), (9, 10), (8, 10)], Direction::Right);
        state.food = Some(Position::new(11, 10));
        let mut engine =
            GameEngine::with_state(config, Box::new(MemoryStore::new()), state).seeded(1);

        assert_eq!(engine.tick(), TickOutcome::Ate);

        let state = engine.state();
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.speed_ms, 195);
        assert_eq!(state.high_score, 1);
        assert!(!state.snake.occupies(state.food.unwrap()));
    }

    #[test]
    fn test_high_score_persisted_only_when_beaten() {
        let config = GameConfig::default();
        let store = MemoryStore::with_score(1);
        let mut state = running_state(&config, &[(10, 10), (9, 10), (8, 10)], Direction::Right);
        state.food = Some(Position::new(11, 10));
        state.high_score = 1;
        let mut engine =
            GameEngine::with_state(config, Box::new(store.clone()), state).seeded(1);

        // Score 1 ties the record: nothing saved
        engine.tick();
        assert_eq!(store.save_count(), 0);
        assert_eq!(engine.state().high_score, 1);
    }

    #[test]
    fn test_wall_collision() {
        let config = GameConfig::small();
        let state = running_state(&config, &[(0, 5), (1, 5), (2, 5)], Direction::Left);
        let before = state.snake.clone();
        let mut engine = GameEngine::with_state(config, Box::new(MemoryStore::new()), state);

        let outcome = engine.tick();

        assert_eq!(outcome, TickOutcome::Collided(CollisionKind::Wall));
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.state().snake, before);
    }

    #[test]
    fn test_self_collision() {
        let config = GameConfig::small();
        // Body: (5,5), (4,5), (3,5), (2,5)
        let state = running_state(&config, &[(5, 5), (4, 5), (3, 5), (2, 5)], Direction::Right);
        let mut engine = GameEngine::with_state(config, Box::new(MemoryStore::new()), state);

        // Right: (6,5), (5,5), (4,5), (3,5)
        engine.tick();
        // Down: (6,6), (6,5), (5,5), (4,5)
        engine.steer(Direction::Down);
        engine.tick();
        // Left: (5,6), (6,6), (6,5), (5,5)
        engine.steer(Direction::Left);
        engine.tick();
        // Up: (5,5) collides with the body
        engine.steer(Direction::Up);
        let before = engine.state().snake.clone();
        let outcome = engine.tick();

        assert_eq!(outcome, TickOutcome::Collided(CollisionKind::SelfCollision));
        assert_eq!(engine.state().snake, before);
    }

    #[test]
    fn test_wall_collision_top_edge() {
        let config = GameConfig::small();
        let state = running_state(&config, &[(0, 0), (0, 1)], Direction::Up);
        let mut engine = GameEngine::with_state(config, Box::new(MemoryStore::new()), state);

        assert_eq!(engine.tick(), TickOutcome::Collided(CollisionKind::Wall));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine_with(GameConfig::default());
        engine.start();

        assert!(!engine.steer(Direction::Left));
        assert_eq!(engine.state().pending_direction, Direction::Right);

        engine.tick();
        assert_eq!(engine.state().direction, Direction::Right);
    }

    #[test]
    fn test_reversal_checked_against_committed_direction() {
        let mut engine = engine_with(GameConfig::default());
        engine.start();

        // Up is queued, but Left is still a reversal of the committed Right
        assert!(engine.steer(Direction::Up));
        assert!(!engine.steer(Direction::Left));
        assert_eq!(engine.state().pending_direction, Direction::Up);
    }

    #[test]
    fn test_last_steer_wins() {
        let mut engine = engine_with(GameConfig::default());
        engine.start();

        engine.steer(Direction::Up);
        engine.steer(Direction::Down);
        engine.tick();

        assert_eq!(engine.state().direction, Direction::Down);
        assert_eq!(engine.state().snake.head(), Position::new(10, 11));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut engine = engine_with(GameConfig::default());
        assert!(!engine.pause());
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!engine.resume());

        engine.start();
        assert!(engine.pause());
        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert!(!engine.pause());
        assert!(engine.resume());
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_toggle_pause() {
        let mut engine = engine_with(GameConfig::default());
        assert!(!engine.toggle_pause());

        engine.start();
        assert!(engine.apply(Intent::TogglePause));
        assert_eq!(engine.phase(), Phase::Paused);
        assert!(engine.apply(Intent::TogglePause));
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let config = GameConfig::small();
        let state = running_state(&config, &[(0, 5), (1, 5)], Direction::Left);
        let mut engine = GameEngine::with_state(config, Box::new(MemoryStore::new()), state);
        engine.tick();
        let frozen = engine.state().clone();

        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert!(!engine.pause());
        assert!(!engine.resume());
        assert_eq!(engine.state(), &frozen);
    }

    #[test]
    fn test_full_board_places_no_food() {
        let mut config = GameConfig::new(2);
        config.initial_snake = vec![Position::new(1, 0), Position::new(0, 0)];
        config.initial_food = Position::new(0, 1);
        let mut state = running_state(&config, &[(1, 0), (0, 0), (0, 1)], Direction::Down);
        state.food = Some(Position::new(1, 1));
        let mut engine = GameEngine::with_state(config, Box::new(MemoryStore::new()), state);

        assert_eq!(engine.tick(), TickOutcome::Ate);
        assert_eq!(engine.state().food, None);
        assert_eq!(engine.state().snake.len(), 4);
    }
}
