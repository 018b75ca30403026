use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check whether the position lies on a `board_size` x `board_size` board
    pub fn is_within(&self, board_size: i32) -> bool {
        (0..board_size).contains(&self.x) && (0..board_size).contains(&self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The snake body, head at the front and tail at the back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a snake from explicit cells, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_cells<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    /// Create a straight snake whose body trails behind `head`
    pub fn straight(head: Position, direction: Direction, length: i32) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1))
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body }
    }

    pub fn head(&self) -> Position {
        // A snake is never empty: both constructors guarantee at least one cell.
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Check if a cell collides with the snake body, head excluded
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&cell| cell == pos)
    }

    /// Check if a cell is occupied by any part of the snake
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance onto `new_head`, keeping the tail when `grow` is set
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Coarse state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    /// Phases from which a fresh game may begin with `start`
    pub fn can_start(&self) -> bool {
        matches!(self, Phase::Idle | Phase::GameOver)
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Complete snapshot of a game, everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    pub snake: Snake,
    /// `None` only when the snake covers the whole board
    pub food: Option<Position>,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub score: u32,
    pub high_score: u32,
    /// Tick interval in milliseconds
    pub speed_ms: u64,
    pub board_size: i32,
}

impl GameState {
    /// Create an IDLE snapshot heading right with a zero score
    pub fn new(
        snake: Snake,
        food: Option<Position>,
        board_size: i32,
        speed_ms: u64,
        high_score: u32,
    ) -> Self {
        Self {
            phase: Phase::Idle,
            snake,
            food,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            high_score,
            speed_ms,
            board_size,
        }
    }

    /// Check if a position is within the board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.board_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_straight_snake() {
        let snake = Snake::straight(Position::new(10, 10), Direction::Right, 3);
        let cells: Vec<_> = snake.cells().copied().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert_eq!(snake.tail(), Position::new(8, 10));
    }

    #[test]
    fn test_from_cells_rejects_empty() {
        assert!(Snake::from_cells(Vec::new()).is_none());
        let snake = Snake::from_cells([Position::new(0, 0)]).unwrap();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), snake.tail());
    }

    #[test]
    fn test_straight_snake_has_at_least_a_head() {
        let snake = Snake::straight(Position::new(3, 3), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());

        let snake = Snake::straight(Position::new(3, 3), Direction::Up, -4);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_advance() {
        let mut snake = Snake::straight(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::straight(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::straight(Position::new(5, 5), Direction::Right, 3),
            Some(Position::new(10, 10)),
            20,
            200,
            0,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_phase_can_start() {
        assert!(Phase::Idle.can_start());
        assert!(Phase::GameOver.can_start());
        assert!(!Phase::Running.can_start());
        assert!(!Phase::Paused.can_start());
    }
}
