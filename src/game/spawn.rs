//! Food, barrier and bad-food placement

use rand::Rng;
use tracing::debug;

use super::bad_food::{self, BadFood};
use super::cell::Cell;
use super::snake::Snake;
use crate::config::{
    BARRIER_CLEARANCE, BARRIER_NUDGE, CENTER_MAX_X, CENTER_MAX_Y, CENTER_MIN_X, CENTER_MIN_Y,
    CORNER_BOTTOM_Y, CORNER_LEFT_X, CORNER_RIGHT_X, CORNER_TOP_Y, MAX_PLACEMENT_ATTEMPTS,
};

/// Draw cells from `sample` until one is off the snake, giving up after a fixed number of
/// attempts. On give-up the last sample is kept even though it overlaps.
pub fn place_clear_of<R, F>(rng: &mut R, snake: &Snake, mut sample: F) -> Cell
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Cell,
{
    let mut cell = sample(rng);
    for _ in 1..MAX_PLACEMENT_ATTEMPTS {
        if !snake.contains(cell) {
            return cell;
        }
        cell = sample(rng);
    }
    if snake.contains(cell) {
        debug!("Placement gave up after {} attempts at {:?}", MAX_PLACEMENT_ATTEMPTS, cell);
    }
    cell
}

pub fn place_food<R: Rng + ?Sized>(rng: &mut R, snake: &Snake) -> Cell {
    place_clear_of(rng, snake, |r| Cell::random(r))
}

pub fn head_in_center(head: Cell) -> bool {
    (CENTER_MIN_X..=CENTER_MAX_X).contains(&head.x) && (CENTER_MIN_Y..=CENTER_MAX_Y).contains(&head.y)
}

/// Place the barrier after food was eaten and re-placed at `food`.
///
/// A snake eating in the middle of the board gets the barrier sent to a random corner.
/// Otherwise it lands anywhere off the snake, and is pushed diagonally away when it
/// would sit right next to the food. The pushed cell is not checked against the snake.
pub fn place_barrier<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, food: Cell) -> Cell {
    if head_in_center(snake.head()) {
        let (xs, ys) = match rng.gen_range(0..4) {
            0 => (CORNER_LEFT_X, CORNER_TOP_Y),
            1 => (CORNER_RIGHT_X, CORNER_TOP_Y),
            2 => (CORNER_LEFT_X, CORNER_BOTTOM_Y),
            _ => (CORNER_RIGHT_X, CORNER_BOTTOM_Y),
        };
        return place_clear_of(rng, snake, |r| Cell::random_in(r, xs, ys));
    }

    let barrier = place_clear_of(rng, snake, |r| Cell::random(r));
    if (food.x - barrier.x).abs() <= BARRIER_CLEARANCE && (food.y - barrier.y).abs() <= BARRIER_CLEARANCE {
        Cell::new(barrier.x + BARRIER_NUDGE, barrier.y + BARRIER_NUDGE).wrapped()
    } else {
        barrier
    }
}

/// Replace the bad-food set with the number of cells `level` calls for
pub fn place_bad_food<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, level: u32, bad: &mut BadFood) {
    bad.clear();
    for _ in 0..bad_food::count_for_level(level) {
        bad.push(place_clear_of(rng, snake, |r| Cell::random(r)));
    }
}
