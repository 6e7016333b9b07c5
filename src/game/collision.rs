//! Collision detection

use super::cell::Cell;
use super::snake::Snake;
use crate::config::SELF_COLLISION_SKIP;

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head ran into its own body
    SelfBite,
    /// Head ran into the barrier
    Barrier,
}

/// Head against the body, ignoring the segments nearest the head so tight turns don't register
pub fn hits_self(snake: &Snake) -> bool {
    let head = snake.head();
    snake
        .segments()
        .iter()
        .skip(SELF_COLLISION_SKIP)
        .any(|&segment| segment == head)
}

pub fn hits_barrier(snake: &Snake, barrier: Option<Cell>) -> bool {
    barrier == Some(snake.head())
}

/// Check for a fatal collision. The barrier only counts once it is active.
pub fn check(snake: &Snake, barrier: Option<Cell>, barrier_active: bool) -> Option<Collision> {
    if hits_self(snake) {
        Some(Collision::SelfBite)
    } else if barrier_active && hits_barrier(snake, barrier) {
        Some(Collision::Barrier)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_with_head_repeated_at(index: usize) -> Snake {
        let mut cells: Vec<Cell> = (0..6).map(|i| Cell::new(100 - 10 * i, 100)).collect();
        cells[index] = cells[0];
        Snake::from_segments(&cells)
    }

    #[test]
    fn test_no_collision() {
        let snake = Snake::from_segments(&[Cell::new(100, 100), Cell::new(90, 100)]);
        assert_eq!(check(&snake, None, true), None);
    }

    #[test]
    fn test_near_segments_are_ignored() {
        for index in 1..SELF_COLLISION_SKIP {
            assert!(!hits_self(&snake_with_head_repeated_at(index)));
        }
    }

    #[test]
    fn test_far_segments_collide() {
        for index in SELF_COLLISION_SKIP..6 {
            assert!(hits_self(&snake_with_head_repeated_at(index)));
        }
    }

    #[test]
    fn test_barrier_only_when_active() {
        let snake = Snake::new(Cell::new(50, 50));
        let barrier = Some(Cell::new(50, 50));

        assert_eq!(check(&snake, barrier, false), None);
        assert_eq!(check(&snake, barrier, true), Some(Collision::Barrier));
        assert_eq!(check(&snake, Some(Cell::new(60, 50)), true), None);
    }
}
