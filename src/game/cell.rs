//! Grid cells on the playfield

use rand::Rng;

use super::direction::Direction;
use crate::config::{
    GRID_SIZE, PLAYFIELD_MAX_X, PLAYFIELD_MAX_Y, PLAYFIELD_MIN_X, PLAYFIELD_MIN_Y,
};

/// Top-left pixel of a 10×10 grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`, wrapping across the playfield edges
    pub fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = match direction {
            Direction::Up => (0, -GRID_SIZE),
            Direction::Down => (0, GRID_SIZE),
            Direction::Left => (-GRID_SIZE, 0),
            Direction::Right => (GRID_SIZE, 0),
        };
        Cell::new(self.x + dx, self.y + dy).wrapped()
    }

    /// Fold a cell that left the playfield back in from the opposite edge
    pub fn wrapped(self) -> Cell {
        Cell::new(
            wrap_axis(self.x, PLAYFIELD_MIN_X, PLAYFIELD_MAX_X),
            wrap_axis(self.y, PLAYFIELD_MIN_Y, PLAYFIELD_MAX_Y),
        )
    }

    pub fn in_playfield(self) -> bool {
        (PLAYFIELD_MIN_X..=PLAYFIELD_MAX_X).contains(&self.x)
            && (PLAYFIELD_MIN_Y..=PLAYFIELD_MAX_Y).contains(&self.y)
    }

    /// A uniformly random cell inside the playfield
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Cell {
        Cell::random_in(rng, (PLAYFIELD_MIN_X, PLAYFIELD_MAX_X), (PLAYFIELD_MIN_Y, PLAYFIELD_MAX_Y))
    }

    /// A uniformly random grid-aligned cell with both coordinates in the inclusive ranges
    pub fn random_in<R: Rng + ?Sized>(rng: &mut R, xs: (i32, i32), ys: (i32, i32)) -> Cell {
        let x = rng.gen_range(xs.0 / GRID_SIZE..=xs.1 / GRID_SIZE) * GRID_SIZE;
        let y = rng.gen_range(ys.0 / GRID_SIZE..=ys.1 / GRID_SIZE) * GRID_SIZE;
        Cell::new(x, y)
    }
}

fn wrap_axis(value: i32, min: i32, max: i32) -> i32 {
    let span = max - min + GRID_SIZE;
    min + (value - min).rem_euclid(span)
}
