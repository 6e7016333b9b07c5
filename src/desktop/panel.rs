use macroquad::prelude::*;

use tft_snake::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use tft_snake::display::{Color as PanelColor, Display};

/// The 240×320 panel scaled into the window and centered
pub struct WindowPanel;

impl WindowPanel {
    pub fn new() -> Self {
        Self
    }

    // Pixels per panel pixel and the top-left of the panel in the window
    fn layout(&self) -> (f32, f32, f32) {
        let sw = screen_width();
        let sh = screen_height();
        let scale = (sw / SCREEN_WIDTH as f32).min(sh / SCREEN_HEIGHT as f32).max(0.1);
        let off_x = (sw - SCREEN_WIDTH as f32 * scale) * 0.5;
        let off_y = (sh - SCREEN_HEIGHT as f32 * scale) * 0.5;
        (scale, off_x, off_y)
    }

    fn font_size(&self, size: u8, scale: f32) -> u16 {
        (10.0 * f32::from(size) * scale).max(6.0) as u16
    }
}

fn color(c: PanelColor) -> Color {
    match c {
        PanelColor::Black => BLACK,
        PanelColor::White => WHITE,
        PanelColor::Red => RED,
        PanelColor::Orange => ORANGE,
        PanelColor::Yellow => YELLOW,
        PanelColor::Green => GREEN,
        PanelColor::Blue => BLUE,
    }
}

impl Display for WindowPanel {
    fn width(&self) -> i32 {
        SCREEN_WIDTH
    }

    fn height(&self) -> i32 {
        SCREEN_HEIGHT
    }

    fn clear(&mut self, c: PanelColor) {
        clear_background(DARKGRAY);
        let (scale, off_x, off_y) = self.layout();
        draw_rectangle(off_x, off_y, SCREEN_WIDTH as f32 * scale, SCREEN_HEIGHT as f32 * scale, color(c));
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: PanelColor) {
        let (scale, off_x, off_y) = self.layout();
        draw_rectangle(off_x + x as f32 * scale, off_y + y as f32 * scale, w as f32 * scale, h as f32 * scale, color(c));
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: PanelColor) {
        let (scale, off_x, off_y) = self.layout();
        draw_rectangle_lines(
            off_x + x as f32 * scale,
            off_y + y as f32 * scale,
            w as f32 * scale,
            h as f32 * scale,
            scale.max(1.0),
            color(c),
        );
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, c: PanelColor) {
        let (scale, off_x, off_y) = self.layout();
        draw_circle(off_x + cx as f32 * scale, off_y + cy as f32 * scale, r as f32 * scale, color(c));
    }

    fn print(&mut self, x: i32, y: i32, size: u8, c: PanelColor, text: &str) {
        let (scale, off_x, off_y) = self.layout();
        let baseline = y as f32 + 7.0 * f32::from(size); // GFX cursor is the top-left corner
        draw_text(text, off_x + x as f32 * scale, off_y + baseline * scale, self.font_size(size, scale) as f32, color(c));
    }

    fn text_bounds(&self, text: &str, size: u8) -> (i32, i32) {
        let (scale, _, _) = self.layout();
        let m = measure_text(text, None, self.font_size(size, scale), 1.0);
        ((m.width / scale).round() as i32, (m.height / scale).round() as i32)
    }
}
