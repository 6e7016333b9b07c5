//! Fixed-capacity snake body

use heapless::Vec;

use super::cell::Cell;
use super::direction::Direction;
use crate::config::MAX_SNAKE_LENGTH;

/// Snake body segments, head at index 0
#[derive(Debug, Clone)]
pub struct Snake {
    segments: Vec<Cell, MAX_SNAKE_LENGTH>,
}

impl Snake {
    /// A one-segment snake at `head`
    pub fn new(head: Cell) -> Self {
        let mut segments = Vec::new();
        // Capacity is far above one
        let _ = segments.push(head);
        Self { segments }
    }

    /// Build a snake from explicit segments, truncated to capacity
    pub fn from_segments(cells: &[Cell]) -> Self {
        let mut snake = Self::new(cells.first().copied().unwrap_or_default());
        for &cell in cells.iter().skip(1) {
            if !snake.push_tail(cell) {
                break;
            }
        }
        snake
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false, a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_full(&self) -> bool {
        self.segments.is_full()
    }

    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Shift every segment into its predecessor's cell and advance the head.
    /// Returns the cell the tail vacated.
    pub fn advance(&mut self, direction: Direction) -> Cell {
        let vacated = self.tail();
        let body = self.segments.as_mut_slice();
        body.copy_within(0..body.len() - 1, 1);
        body[0] = body[0].step(direction);
        vacated
    }

    /// Append a segment at the tail. Returns false when the body is at capacity.
    pub fn push_tail(&mut self, cell: Cell) -> bool {
        self.segments.push(cell).is_ok()
    }

    /// Drop the tail segment. Returns the removed cell, or `None` when only the head is left.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.segments.len() == 1 {
            return None;
        }
        self.segments.pop()
    }
}
