//! Single-tick simulation advance
//!
//! Advancing is deterministic except for food placement, which draws from
//! the injected RNG.

use rand::Rng;

use super::state::{Cell, GameData, Snake};
use crate::consts::*;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the play field
    Wall,
    /// Head ran into the snake's own body
    Body,
}

/// Result of advancing the simulation by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved on
    Moved {
        /// Head landed on food (snake grew by one)
        ate_food: bool,
        /// The food crossed a level boundary and raised the level
        level_up: bool,
    },
    /// Terminal: wall or self collision; `data` was left untouched
    Collision {
        kind: CollisionKind,
        final_score: u32,
    },
    /// Terminal: the snake covers every cell, nothing left to eat
    Cleared { final_score: u32 },
}

/// Advance `data` by one tick.
///
/// Commits the buffered direction, moves the head, then applies food,
/// scoring, leveling and speed in order.
pub fn advance(data: &mut GameData, rng: &mut impl Rng) -> TickOutcome {
    let dir = data.next_direction;
    let new_head = data.snake.head().step(dir);
    let ate = new_head == data.food;

    if let Some(kind) = collision(&data.snake, new_head, ate) {
        return TickOutcome::Collision {
            kind,
            final_score: data.score,
        };
    }

    data.direction = dir;
    data.snake.advance(new_head, ate);

    let mut level_up = false;
    if ate {
        data.score += FOOD_POINTS * data.level;
        match place_food(&data.snake, rng) {
            Some(cell) => data.food = cell,
            // perfect game: the snake covers the whole field
            None => {
                return TickOutcome::Cleared {
                    final_score: data.score,
                };
            }
        }
        if data.score / LEVEL_STEP_POINTS > data.level - 1 {
            data.level += 1;
            data.speed_ms = data.speed_ms.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS);
            level_up = true;
        }
    }

    TickOutcome::Moved {
        ate_food: ate,
        level_up,
    }
}

/// Wall and self-collision check for a prospective head cell.
///
/// The tail is exempt on a non-growing tick: it vacates in the same step
/// the head arrives. Eating keeps the tail in place, so no exemption then.
fn collision(snake: &Snake, new_head: Cell, ate: bool) -> Option<CollisionKind> {
    if !new_head.in_bounds() {
        return Some(CollisionKind::Wall);
    }
    let body = snake.segments();
    let blocking = if ate { body } else { &body[..body.len() - 1] };
    blocking
        .contains(&new_head)
        .then_some(CollisionKind::Body)
}

/// Choose a food cell uniformly among cells the snake does not occupy.
///
/// Rejection sampling resolves quickly while the field is sparse; a dense
/// endgame falls back to collecting the free cells and picking one of them.
/// Returns `None` only when the snake covers the whole field.
pub fn place_food(snake: &Snake, rng: &mut impl Rng) -> Option<Cell> {
    for _ in 0..FOOD_SAMPLE_LIMIT {
        let cell = Cell::new(
            rng.random_range(0..GRID_SIZE),
            rng.random_range(0..GRID_SIZE),
        );
        if !snake.contains(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::new(x, y)))
        .filter(|&cell| !snake.contains(cell))
        .collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Direction;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0xF00D)
    }

    /// Minimal hand-built state; fields not under test get quiet defaults
    fn data(segments: Vec<Cell>, dir: Direction, food: Cell) -> GameData {
        GameData {
            snake: Snake::from_segments(segments),
            direction: dir,
            next_direction: dir,
            food,
            score: 0,
            level: 1,
            speed_ms: INITIAL_SPEED_MS,
            high_score: 0,
        }
    }

    #[test]
    fn test_plain_move() {
        let mut d = data(vec![Cell::new(5, 5), Cell::new(4, 5)], Direction::Right, Cell::new(0, 0));
        let outcome = advance(&mut d, &mut rng());

        assert_eq!(
            outcome,
            TickOutcome::Moved {
                ate_food: false,
                level_up: false
            }
        );
        assert_eq!(d.snake.segments(), &[Cell::new(6, 5), Cell::new(5, 5)]);
        assert_eq!(d.score, 0);
    }

    #[test]
    fn test_eat_and_grow() {
        let mut d = data(vec![Cell::new(10, 10)], Direction::Right, Cell::new(11, 10));
        let outcome = advance(&mut d, &mut rng());

        assert_eq!(
            outcome,
            TickOutcome::Moved {
                ate_food: true,
                level_up: false
            }
        );
        assert_eq!(d.snake.segments(), &[Cell::new(11, 10), Cell::new(10, 10)]);
        assert_eq!(d.score, FOOD_POINTS);
        assert!(d.food.in_bounds());
        assert!(!d.snake.contains(d.food));
    }

    #[test]
    fn test_buffered_turn_commits() {
        let mut d = data(vec![Cell::new(5, 5)], Direction::Right, Cell::new(0, 0));
        d.buffer_direction(Direction::Down);
        let outcome = advance(&mut d, &mut rng());

        assert!(matches!(outcome, TickOutcome::Moved { .. }));
        assert_eq!(d.snake.head(), Cell::new(5, 6));
        assert_eq!(d.direction, Direction::Down);
    }

    #[test]
    fn test_wall_collision_leaves_state_untouched() {
        let mut d = data(vec![Cell::new(0, 5), Cell::new(1, 5)], Direction::Left, Cell::new(9, 9));
        d.score = 30;
        let before = d.clone();

        let outcome = advance(&mut d, &mut rng());
        assert_eq!(
            outcome,
            TickOutcome::Collision {
                kind: CollisionKind::Wall,
                final_score: 30
            }
        );
        assert_eq!(d, before);
    }

    #[test]
    fn test_body_collision() {
        // head at (5,5) turning down into (5,6), which is not the tail
        let segments = vec![
            Cell::new(5, 5),
            Cell::new(4, 5),
            Cell::new(4, 6),
            Cell::new(5, 6),
            Cell::new(6, 6),
        ];
        let mut d = data(segments, Direction::Right, Cell::new(0, 0));
        d.next_direction = Direction::Down;

        let outcome = advance(&mut d, &mut rng());
        assert_eq!(
            outcome,
            TickOutcome::Collision {
                kind: CollisionKind::Body,
                final_score: 0
            }
        );
    }

    #[test]
    fn test_tail_cell_is_fair_game() {
        // moving into the tail cell is legal: the tail vacates this tick
        let segments = vec![
            Cell::new(5, 5),
            Cell::new(4, 5),
            Cell::new(4, 6),
            Cell::new(5, 6),
        ];
        let mut d = data(segments, Direction::Right, Cell::new(0, 0));
        d.next_direction = Direction::Down;

        let outcome = advance(&mut d, &mut rng());
        assert!(matches!(
            outcome,
            TickOutcome::Moved {
                ate_food: false,
                ..
            }
        ));
        assert_eq!(
            d.snake.segments(),
            &[
                Cell::new(5, 6),
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(4, 6)
            ]
        );
    }

    #[test]
    fn test_no_tail_exemption_when_eating() {
        // eating keeps the tail in place, so the tail cell blocks
        let segments = vec![
            Cell::new(5, 5),
            Cell::new(4, 5),
            Cell::new(4, 6),
            Cell::new(5, 6),
        ];
        let mut d = data(segments, Direction::Right, Cell::new(5, 6));
        d.next_direction = Direction::Down;

        let outcome = advance(&mut d, &mut rng());
        assert_eq!(
            outcome,
            TickOutcome::Collision {
                kind: CollisionKind::Body,
                final_score: 0
            }
        );
    }

    #[test]
    fn test_level_up_at_boundary() {
        let mut d = data(vec![Cell::new(10, 10)], Direction::Right, Cell::new(11, 10));
        d.score = 40;

        let outcome = advance(&mut d, &mut rng());
        assert_eq!(
            outcome,
            TickOutcome::Moved {
                ate_food: true,
                level_up: true
            }
        );
        assert_eq!(d.score, 50);
        assert_eq!(d.level, 2);
        assert_eq!(d.speed_ms, INITIAL_SPEED_MS - SPEED_STEP_MS);
    }

    #[test]
    fn test_no_level_up_between_boundaries() {
        let mut d = data(vec![Cell::new(10, 10)], Direction::Right, Cell::new(11, 10));
        d.score = 50;
        d.level = 2;
        d.speed_ms = 135;

        let outcome = advance(&mut d, &mut rng());
        // 50 + 20 = 70, still inside level 2
        assert_eq!(
            outcome,
            TickOutcome::Moved {
                ate_food: true,
                level_up: false
            }
        );
        assert_eq!(d.score, 70);
        assert_eq!(d.level, 2);
        assert_eq!(d.speed_ms, 135);
    }

    #[test]
    fn test_speed_floors_at_minimum() {
        let mut d = data(vec![Cell::new(10, 10)], Direction::Right, Cell::new(11, 10));
        d.score = 240;
        d.level = 5;
        d.speed_ms = MIN_SPEED_MS + 5;

        advance(&mut d, &mut rng());
        assert_eq!(d.level, 6);
        assert_eq!(d.speed_ms, MIN_SPEED_MS);
    }

    #[test]
    fn test_place_food_avoids_snake() {
        let snake = Snake::from_segments(vec![
            Cell::new(5, 5),
            Cell::new(4, 5),
            Cell::new(3, 5),
        ]);
        let mut r = rng();
        for _ in 0..200 {
            let food = place_food(&snake, &mut r).unwrap();
            assert!(food.in_bounds());
            assert!(!snake.contains(food));
        }
    }

    /// All cells except the ones listed, head first on `head`
    fn near_full_snake(head: Cell, spare: &[Cell]) -> Snake {
        let mut segments = vec![head];
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let cell = Cell::new(x, y);
                if cell != head && !spare.contains(&cell) {
                    segments.push(cell);
                }
            }
        }
        Snake::from_segments(segments)
    }

    #[test]
    fn test_place_food_dense_board_fallback() {
        let snake = near_full_snake(Cell::new(1, 0), &[Cell::new(0, 0)]);
        assert_eq!(place_food(&snake, &mut rng()), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_place_food_full_board() {
        let snake = near_full_snake(Cell::new(1, 0), &[]);
        assert_eq!(place_food(&snake, &mut rng()), None);
    }

    #[test]
    fn test_last_free_cell_clears_the_field() {
        let mut d = data(
            near_full_snake(Cell::new(1, 0), &[Cell::new(0, 0)])
                .segments()
                .to_vec(),
            Direction::Left,
            Cell::new(0, 0),
        );
        d.score = 990;
        d.level = 3;

        let outcome = advance(&mut d, &mut rng());
        assert_eq!(
            outcome,
            TickOutcome::Cleared {
                final_score: 990 + 3 * FOOD_POINTS
            }
        );
        assert_eq!(d.snake.len(), (GRID_SIZE * GRID_SIZE) as usize);
    }
}
