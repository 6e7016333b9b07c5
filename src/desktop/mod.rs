//! macroquad stand-ins for the board's panel, joystick and buzzer

mod audio;
mod panel;
mod stick;

pub use audio::SpeakerBuzzer;
pub use panel::WindowPanel;
pub use stick::KeyboardJoystick;
