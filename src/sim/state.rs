//! Game state and core simulation types

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tick;
use crate::consts::*;

/// A cell coordinate on the play field, 0-indexed from the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether the cell lies on the play field
    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

/// Travel direction, always a single axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta in screen coordinates (y grows downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// True when turning from `self` to `other` would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// True when both directions run along the same axis
    pub fn same_axis(self, other: Direction) -> bool {
        self == other || self.is_opposite(other)
    }
}

/// The snake, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    segments: Vec<Cell>,
}

impl Snake {
    /// A single-segment snake at `head`
    pub fn new(head: Cell) -> Self {
        Self {
            segments: vec![head],
        }
    }

    /// Build from explicit segments, head first. Must be non-empty.
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    /// The segment that vacates on a non-growing tick
    pub fn tail(&self) -> Cell {
        *self.segments.last().unwrap()
    }

    /// Body segments, head first
    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether any segment occupies `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Prepend `new_head`; the tail stays put when `grow` is set
    pub(crate) fn advance(&mut self, new_head: Cell, grow: bool) {
        self.segments.insert(0, new_head);
        if !grow {
            self.segments.pop();
        }
    }
}

/// How a cell should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    SnakeHead,
    SnakeBody,
    Food,
}

/// Everything the simulation owns and mutates per tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub snake: Snake,
    /// Direction of travel the last tick committed to
    pub direction: Direction,
    /// Direction the next tick will commit; buffered separately so two key
    /// presses inside one tick window cannot fold into a reversal
    pub next_direction: Direction,
    pub food: Cell,
    pub score: u32,
    /// Starts at 1
    pub level: u32,
    /// Current tick interval (ms)
    pub speed_ms: u32,
    /// Best score ever seen, carried across games
    pub high_score: u32,
}

impl GameData {
    /// A fresh game: single-segment snake heading right, food on a free cell
    pub fn new(high_score: u32, rng: &mut impl Rng) -> Self {
        let snake = Snake::new(Cell::new(START_HEAD.0, START_HEAD.1));
        // one segment on the whole field, placement cannot come up empty
        let food = tick::place_food(&snake, rng)
            .unwrap_or(Cell::new(START_FOOD.0, START_FOOD.1));
        Self {
            snake,
            direction: Direction::Right,
            next_direction: Direction::Right,
            food,
            score: 0,
            level: 1,
            speed_ms: INITIAL_SPEED_MS,
            high_score,
        }
    }

    /// Buffer a turn for the next tick.
    ///
    /// Input on the current axis of travel is ignored - a reversal or a
    /// redundant press. The check runs against the committed direction, not
    /// the buffer, so rapid presses cannot queue an illegal reversal.
    pub fn buffer_direction(&mut self, dir: Direction) {
        if !self.direction.same_axis(dir) {
            self.next_direction = dir;
        }
    }

    /// Classification used by the renderer
    pub fn cell_kind(&self, cell: Cell) -> CellKind {
        if self.snake.head() == cell {
            CellKind::SnakeHead
        } else if self.snake.segments()[1..].contains(&cell) {
            CellKind::SnakeBody
        } else if self.food == cell {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_cell_step() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.step(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.step(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.step(Direction::Right), Cell::new(6, 5));
    }

    #[test]
    fn test_cell_bounds() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(GRID_SIZE - 1, GRID_SIZE - 1).in_bounds());
        assert!(!Cell::new(-1, 0).in_bounds());
        assert!(!Cell::new(0, -1).in_bounds());
        assert!(!Cell::new(GRID_SIZE, 0).in_bounds());
        assert!(!Cell::new(0, GRID_SIZE).in_bounds());
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Cell::new(5, 5));

        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(6, 5));

        snake.advance(Cell::new(7, 5), true);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Cell::new(7, 5));
        assert_eq!(snake.tail(), Cell::new(6, 5));
    }

    #[test]
    fn test_buffer_direction_rejects_reversal() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut data = GameData::new(0, &mut rng);
        assert_eq!(data.direction, Direction::Right);

        data.buffer_direction(Direction::Left);
        assert_eq!(data.next_direction, Direction::Right);

        data.buffer_direction(Direction::Up);
        assert_eq!(data.next_direction, Direction::Up);

        // still travelling right; a reversal cannot sneak in behind the
        // buffered turn
        data.buffer_direction(Direction::Left);
        assert_eq!(data.next_direction, Direction::Up);
    }

    #[test]
    fn test_buffer_direction_ignores_same_axis_press() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut data = GameData::new(0, &mut rng);

        data.buffer_direction(Direction::Up);
        data.buffer_direction(Direction::Right);
        assert_eq!(data.next_direction, Direction::Up);
    }

    #[test]
    fn test_fresh_game() {
        let mut rng = Pcg32::seed_from_u64(42);
        let data = GameData::new(120, &mut rng);

        assert_eq!(data.snake.len(), 1);
        assert_eq!(data.snake.head(), Cell::new(10, 10));
        assert_eq!(data.score, 0);
        assert_eq!(data.level, 1);
        assert_eq!(data.speed_ms, INITIAL_SPEED_MS);
        assert_eq!(data.high_score, 120);
        assert!(data.food.in_bounds());
        assert!(!data.snake.contains(data.food));
    }

    #[test]
    fn test_cell_kind_classification() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut data = GameData::new(0, &mut rng);
        data.snake = Snake::from_segments(vec![Cell::new(5, 5), Cell::new(4, 5)]);
        data.food = Cell::new(9, 9);

        assert_eq!(data.cell_kind(Cell::new(5, 5)), CellKind::SnakeHead);
        assert_eq!(data.cell_kind(Cell::new(4, 5)), CellKind::SnakeBody);
        assert_eq!(data.cell_kind(Cell::new(9, 9)), CellKind::Food);
        assert_eq!(data.cell_kind(Cell::new(0, 0)), CellKind::Empty);
    }
}
