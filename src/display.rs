//! Drawing primitives of the TFT panel and the screens built from them

use crate::app::MenuItem;
use crate::config::{GRID_SIZE, SCREEN_WIDTH};
use crate::game::{Cell, GameState};

/// The subset of the ILI9341 palette the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

/// A TFT panel with Adafruit-GFX style primitives
pub trait Display {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);
    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color);
    /// Print `text` with its top-left corner at the cursor
    fn print(&mut self, x: i32, y: i32, size: u8, color: Color, text: &str);

    /// Width and height of `text` at `size`, using the built-in 6×8 font by default
    fn text_bounds(&self, text: &str, size: u8) -> (i32, i32) {
        let size = i32::from(size);
        (text.chars().count() as i32 * 6 * size, 8 * size)
    }
}

/// Per-frame extras that are not part of the game state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud {
    /// Seconds left on the food timer, `Some(0)` once the food was missed
    pub countdown: Option<u32>,
}

/// Print `text` horizontally centered on the panel
pub fn print_centered<D: Display + ?Sized>(display: &mut D, text: &str, y: i32, size: u8, color: Color) {
    let (w, _) = display.text_bounds(text, size);
    display.print((SCREEN_WIDTH - w) / 2, y, size, color, text);
}

const MENU_ROWS: [(MenuItem, &str, i32); 2] = [(MenuItem::Start, "START", 90), (MenuItem::HighScores, "HIGH SCORES", 130)];

pub fn draw_menu<D: Display + ?Sized>(display: &mut D, selected: MenuItem) {
    display.clear(Color::Black);
    print_centered(display, "SNAKE GAME", 40, 3, Color::Red);
    for (item, label, y) in MENU_ROWS {
        let background = if item == selected { Color::Orange } else { Color::Black };
        display.fill_rect(30, y, 180, 20, background);
        print_centered(display, label, y, 2, Color::White);
    }
}

fn draw_food<D: Display + ?Sized>(display: &mut D, cell: Cell, color: Color) {
    let half = GRID_SIZE / 2;
    display.fill_circle(cell.x + half, cell.y + half, half - 1, color);
}

pub fn draw_game<D: Display + ?Sized>(display: &mut D, state: &GameState, hud: &Hud) {
    display.clear(Color::Black);
    display.draw_rect(0, 30, 240, 260, Color::Yellow);

    if state.food_visible() {
        draw_food(display, state.food(), Color::Orange);
    }
    if let Some(barrier) = state.barrier() {
        display.print(barrier.x, barrier.y, 2, Color::Red, "7");
    }
    for &cell in state.bad_food() {
        draw_food(display, cell, Color::Red);
    }
    for segment in state.snake().segments() {
        display.fill_rect(segment.x, segment.y, GRID_SIZE, GRID_SIZE, Color::Green);
    }

    display.print(20, 10, 2, Color::White, &format!("Level {}", state.level()));
    display.print(80, 300, 2, Color::White, &format!("Score: {}", state.points()));
    match hud.countdown {
        Some(0) => display.print(120, 10, 2, Color::White, "Missed!"),
        Some(seconds) => display.print(120, 10, 2, Color::White, &format!("Food: {}s", seconds)),
        None => {}
    }
}

pub fn draw_paused<D: Display + ?Sized>(display: &mut D) {
    display.print(50, 140, 2, Color::Yellow, "Game Paused!");
}

pub fn draw_game_over<D: Display + ?Sized>(display: &mut D, points: u32, new_best: bool) {
    display.fill_rect(10, 10, 220, 300, Color::White);
    display.print(50, 140, 3, Color::Red, "GAME OVER!");
    display.print(50, 180, 3, Color::Black, &format!("SCORE: {}", points));
    if new_best {
        display.print(20, 80, 2, Color::Black, "NEW HIGHSCORE!");
    }
}

pub fn draw_high_score<D: Display + ?Sized>(display: &mut D, best: u32) {
    display.clear(Color::Black);
    display.print(50, 50, 2, Color::White, &format!("High Score: {}", best));
    display.fill_rect(10, 300, 80, 20, Color::Blue);
    display.print(20, 305, 2, Color::White, "BACK");
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear(Color),
        FillRect(i32, i32, i32, i32, Color),
        DrawRect(i32, i32, i32, i32, Color),
        FillCircle(i32, i32, i32, Color),
        Print(i32, i32, u8, Color, String),
    }

    /// Records every primitive, clearing the log on `clear`
    #[derive(Debug, Default)]
    pub struct RecordingDisplay {
        pub ops: Vec<Op>,
    }

    impl RecordingDisplay {
        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Print(_, _, _, _, text) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Display for RecordingDisplay {
        fn width(&self) -> i32 {
            240
        }
        fn height(&self) -> i32 {
            320
        }
        fn clear(&mut self, color: Color) {
            self.ops.clear();
            self.ops.push(Op::Clear(color));
        }
        fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
            self.ops.push(Op::FillRect(x, y, w, h, color));
        }
        fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
            self.ops.push(Op::DrawRect(x, y, w, h, color));
        }
        fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color) {
            self.ops.push(Op::FillCircle(cx, cy, r, color));
        }
        fn print(&mut self, x: i32, y: i32, size: u8, color: Color, text: &str) {
            self.ops.push(Op::Print(x, y, size, color, text.to_string()));
        }
    }
}
