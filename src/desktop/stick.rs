use macroquad::prelude::*;

use tft_snake::config::ADC_MAX;
use tft_snake::input::Joystick;

const REST: u16 = 512;

/// Arrow keys or WASD pushed to the end stops of a two-axis stick.
///
/// The stick is mounted rotated on the board, so steering right reads as a low X sample.
pub struct KeyboardJoystick;

fn axis(low: bool, high: bool) -> u16 {
    match (low, high) {
        (true, false) => 0,
        (false, true) => ADC_MAX,
        _ => REST,
    }
}

impl Joystick for KeyboardJoystick {
    fn read_x(&mut self) -> u16 {
        let right = is_key_down(KeyCode::Right) || is_key_down(KeyCode::D);
        let left = is_key_down(KeyCode::Left) || is_key_down(KeyCode::A);
        axis(right, left)
    }

    fn read_y(&mut self) -> u16 {
        let down = is_key_down(KeyCode::Down) || is_key_down(KeyCode::S);
        let up = is_key_down(KeyCode::Up) || is_key_down(KeyCode::W);
        axis(down, up)
    }
}
