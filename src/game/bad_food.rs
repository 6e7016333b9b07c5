//! Fixed-capacity set of bad-food cells

use heapless::Vec;

use super::cell::Cell;
use crate::config::{BAD_FOOD_LEVEL, MAX_BAD_FOOD};

/// Number of bad-food cells that belong on the board at `level`
pub fn count_for_level(level: u32) -> usize {
    if level < BAD_FOOD_LEVEL {
        return 0;
    }
    ((level - BAD_FOOD_LEVEL + 1) as usize).min(MAX_BAD_FOOD)
}

#[derive(Debug, Clone)]
pub struct BadFood {
    cells: Vec<Cell, MAX_BAD_FOOD>,
}

impl BadFood {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Returns false when the set is already at capacity
    pub fn push(&mut self, cell: Cell) -> bool {
        self.cells.push(cell).is_ok()
    }

    /// Remove the first cell equal to `cell`. Order of the remaining cells is not kept.
    pub fn take(&mut self, cell: Cell) -> bool {
        match self.cells.iter().position(|&c| c == cell) {
            Some(index) => {
                self.cells.swap_remove(index);
                true
            }
            None => false,
        }
    }
}

impl Default for BadFood {
    fn default() -> Self {
        Self::new()
    }
}
