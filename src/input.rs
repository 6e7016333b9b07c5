//! Joystick sampling and the push-button latch

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::{ADC_MAX, AXIS_CENTER, AXIS_RANGE, AXIS_THRESHOLD, BUTTON_DEBOUNCE};
use crate::game::Direction;

/// Two analog channels, each read as a raw 0–1023 sample
pub trait Joystick {
    fn read_x(&mut self) -> u16;
    fn read_y(&mut self) -> u16;
}

/// Scale a raw sample into -2..=2, collapsing readings near the center to 0
pub fn scale_axis(raw: u16) -> i32 {
    let raw = i32::from(raw.min(ADC_MAX));
    let reading = raw * AXIS_RANGE / i32::from(ADC_MAX);
    let distance = reading - AXIS_CENTER;
    if distance.abs() < AXIS_THRESHOLD { 0 } else { distance }
}

/// Map scaled axis values to a direction. The larger deflection wins; a tie means no change.
pub fn intent(x: i32, y: i32) -> Option<Direction> {
    if x.abs() > y.abs() {
        // The stick is mounted rotated: pushing towards low X steers right
        if x < 0 { Some(Direction::Right) } else { Some(Direction::Left) }
    } else if y.abs() > x.abs() {
        if y < 0 { Some(Direction::Down) } else { Some(Direction::Up) }
    } else {
        None
    }
}

/// Read both axes and map them to a direction
pub fn sample(raw_x: u16, raw_y: u16) -> Option<Direction> {
    intent(scale_axis(raw_x), scale_axis(raw_y))
}

/// Press flag shared between the button's edge handler and the main loop.
///
/// The handler is the only writer of `true`; the main loop is the only reader and
/// the only writer of `false`.
#[derive(Debug, Default)]
pub struct ButtonLatch {
    pressed: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            pressed: AtomicBool::new(false),
        }
    }

    /// Called from the falling-edge handler
    pub fn signal(&self) {
        self.pressed.store(true, Ordering::Release);
    }

    /// Read and clear the flag
    pub fn take(&self) -> bool {
        self.pressed.swap(false, Ordering::AcqRel)
    }
}

/// Accepts at most one press per debounce window
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    last_accepted: Option<Duration>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, now: Duration) -> bool {
        match self.last_accepted {
            Some(last) if now.saturating_sub(last) < BUTTON_DEBOUNCE => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

/// Turns a polled button level into released → pressed edges
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    was_down: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, is_down: bool) -> bool {
        let edge = is_down && !self.was_down;
        self.was_down = is_down;
        edge
    }
}

/// The main loop's side of the latch, with debouncing
#[derive(Debug)]
pub struct Button {
    latch: Arc<ButtonLatch>,
    debouncer: Debouncer,
}

impl Button {
    pub fn new(latch: Arc<ButtonLatch>) -> Self {
        Self {
            latch,
            debouncer: Debouncer::new(),
        }
    }

    pub fn latch(&self) -> &Arc<ButtonLatch> {
        &self.latch
    }

    /// A debounced press, if one was signalled since the last poll
    pub fn poll(&mut self, now: Duration) -> bool {
        self.latch.take() && self.debouncer.accept(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_axis() {
        assert_eq!(scale_axis(0), -2);
        assert_eq!(scale_axis(256), -1);
        assert_eq!(scale_axis(512), 0);
        assert_eq!(scale_axis(767), 0);
        assert_eq!(scale_axis(768), 1);
        assert_eq!(scale_axis(1023), 2);
        assert_eq!(scale_axis(u16::MAX), 2);
    }

    #[test]
    fn test_larger_axis_wins() {
        assert_eq!(intent(-2, 1), Some(Direction::Right));
        assert_eq!(intent(2, -1), Some(Direction::Left));
        assert_eq!(intent(1, -2), Some(Direction::Down));
        assert_eq!(intent(0, 2), Some(Direction::Up));
    }

    #[test]
    fn test_ties_give_no_intent() {
        assert_eq!(intent(0, 0), None);
        assert_eq!(intent(2, 2), None);
        assert_eq!(intent(-1, 1), None);
        assert_eq!(sample(512, 512), None);
    }

    #[test]
    fn test_latch_take_clears() {
        let latch = ButtonLatch::new();
        assert!(!latch.take());
        latch.signal();
        latch.signal();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_debounce_window() {
        let mut debouncer = Debouncer::new();
        assert!(debouncer.accept(Duration::from_millis(1000)));
        assert!(!debouncer.accept(Duration::from_millis(1100)));
        assert!(!debouncer.accept(Duration::from_millis(1199)));
        assert!(debouncer.accept(Duration::from_millis(1200)));
    }

    #[test]
    fn test_edge_detector() {
        let mut edges = EdgeDetector::new();
        assert!(!edges.update(false));
        assert!(edges.update(true));
        assert!(!edges.update(true));
        assert!(!edges.update(false));
        assert!(edges.update(true));
    }

    #[test]
    fn test_button_poll_debounces() {
        let latch = Arc::new(ButtonLatch::new());
        let mut button = Button::new(Arc::clone(&latch));
        latch.signal();
        assert!(button.poll(Duration::from_millis(0)));

        latch.signal();
        assert!(!button.poll(Duration::from_millis(50)));
        assert!(!button.poll(Duration::from_millis(300)));

        button.latch().signal();
        assert!(button.poll(Duration::from_millis(300)));
    }
}
