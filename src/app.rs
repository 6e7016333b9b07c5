//! The main loop: menu, play session, game over and high score screens

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

use crate::config::{GAME_OVER_HOLD, MENU_REPEAT};
use crate::display::{self, Display, Hud};
use crate::game::{GameEvent, GameState, Phase};
use crate::input::{self, Button, ButtonLatch, Joystick};
use crate::sound::{Buzzer, SoundCue};
use crate::storage::{Eeprom, HighScoreStore};

/// Time since power-up
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Clock backed by `Instant`, starting at zero when created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    HighScores,
}

impl MenuItem {
    /// The other entry; the two-item menu wraps in both directions
    pub fn toggled(self) -> MenuItem {
        match self {
            MenuItem::Start => MenuItem::HighScores,
            MenuItem::HighScores => MenuItem::Start,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Menu { selected: MenuItem },
    Playing { game: GameState, hud: Hud },
    /// Final frame of the session, held before the high score screen
    GameOver { game: GameState, new_best: bool, since: Duration },
    /// Waits for a press on BACK
    HighScore { best: u32 },
}

/// Owns the hardware and the current screen
pub struct GameContext<D, J, B, E> {
    display: D,
    joystick: J,
    buzzer: B,
    scores: HighScoreStore<E>,
    button: Button,
    screen: Screen,
    menu_moved_at: Option<Duration>,
    seeder: StdRng,
}

impl<D, J, B, E> GameContext<D, J, B, E>
where
    D: Display,
    J: Joystick,
    B: Buzzer,
    E: Eeprom,
{
    /// Power-up: plays the start melody and shows the menu
    pub fn new(display: D, joystick: J, mut buzzer: B, eeprom: E, latch: Arc<ButtonLatch>, seed: u64) -> Self {
        buzzer.play(SoundCue::GameStart);
        let mut ctx = Self {
            display,
            joystick,
            buzzer,
            scores: HighScoreStore::new(eeprom),
            button: Button::new(latch),
            screen: Screen::Menu { selected: MenuItem::Start },
            menu_moved_at: None,
            seeder: StdRng::seed_from_u64(seed),
        };
        ctx.render();
        ctx
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }

    pub fn joystick_mut(&mut self) -> &mut J {
        &mut self.joystick
    }

    pub fn scores(&mut self) -> &mut HighScoreStore<E> {
        &mut self.scores
    }

    /// The latch the button's edge handler signals
    pub fn latch(&self) -> Arc<ButtonLatch> {
        Arc::clone(self.button.latch())
    }

    /// Start a play session with `game`
    pub fn play(&mut self, game: GameState) {
        self.screen = Screen::Playing { game, hud: Hud::default() };
        self.render();
    }

    pub fn tick<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.step(clock.now());
    }

    /// One pass of the main loop at `now`
    pub fn step(&mut self, now: Duration) {
        let pressed = self.button.poll(now);
        let x = input::scale_axis(self.joystick.read_x());
        let y = input::scale_axis(self.joystick.read_y());

        let next = match &mut self.screen {
            Screen::Menu { selected } => {
                let menu_ready = self.menu_moved_at.is_none_or(|at| now.saturating_sub(at) >= MENU_REPEAT);
                if y != 0 && menu_ready {
                    *selected = selected.toggled();
                    self.menu_moved_at = Some(now);
                    self.buzzer.play(SoundCue::Click);
                }
                if pressed {
                    Some(self.select(now))
                } else {
                    None
                }
            }
            Screen::Playing { game, hud } => {
                if pressed {
                    self.buzzer.play(SoundCue::Click);
                    if let Some(event) = game.press(now) {
                        if let Some(cue) = event.cue() {
                            self.buzzer.play(cue);
                        }
                    }
                }
                game.steer(input::intent(x, y));

                let mut game_over = None;
                for event in game.update(now) {
                    if let Some(cue) = event.cue() {
                        self.buzzer.play(cue);
                    }
                    match event {
                        GameEvent::Countdown { seconds } => hud.countdown = Some(seconds),
                        GameEvent::FoodMissed { .. } => hud.countdown = Some(0),
                        GameEvent::FoodEaten { .. } => hud.countdown = None,
                        GameEvent::GameOver { points, .. } => game_over = Some(points),
                        _ => {}
                    }
                }
                game_over.map(|points| {
                    let new_best = record_score(&mut self.scores, points);
                    Screen::GameOver { game: game.clone(), new_best, since: now }
                })
            }
            Screen::GameOver { since, .. } => {
                if now.saturating_sub(*since) >= GAME_OVER_HOLD {
                    self.buzzer.play(SoundCue::GameOver);
                    Some(Screen::HighScore { best: read_best(&mut self.scores) })
                } else {
                    None
                }
            }
            Screen::HighScore { .. } => {
                if pressed {
                    self.buzzer.play(SoundCue::Click);
                    Some(Screen::Menu { selected: MenuItem::Start })
                } else {
                    None
                }
            }
        };

        if let Some(next) = next {
            self.screen = next;
        }
        self.render();
    }

    fn select(&mut self, now: Duration) -> Screen {
        self.buzzer.play(SoundCue::Click);
        match &self.screen {
            Screen::Menu { selected: MenuItem::HighScores } => Screen::HighScore {
                best: read_best(&mut self.scores),
            },
            _ => {
                let rng = StdRng::seed_from_u64(self.seeder.next_u64());
                Screen::Playing {
                    game: GameState::new(rng, now),
                    hud: Hud::default(),
                }
            }
        }
    }

    fn render(&mut self) {
        match &self.screen {
            Screen::Menu { selected } => display::draw_menu(&mut self.display, *selected),
            Screen::Playing { game, hud } => {
                display::draw_game(&mut self.display, game, hud);
                if game.phase() == Phase::Paused {
                    display::draw_paused(&mut self.display);
                }
            }
            Screen::GameOver { game, new_best, .. } => {
                display::draw_game(&mut self.display, game, &Hud::default());
                display::draw_game_over(&mut self.display, game.points(), *new_best);
            }
            Screen::HighScore { best } => display::draw_high_score(&mut self.display, *best),
        }
    }
}

fn record_score<E: Eeprom>(scores: &mut HighScoreStore<E>, points: u32) -> bool {
    match scores.record(points) {
        Ok(new_best) => new_best,
        Err(e) => {
            warn!("Could not store high score {}: {}", points, e);
            false
        }
    }
}

fn read_best<E: Eeprom>(scores: &mut HighScoreStore<E>) -> u32 {
    match scores.read() {
        Ok(best) => {
            debug!("High score {}", best);
            best
        }
        Err(e) => {
            warn!("Could not read high score: {}", e);
            0
        }
    }
}
