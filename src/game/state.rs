//! Play session state and the per-iteration update

use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, info};

use super::bad_food::BadFood;
use super::cell::Cell;
use super::collision::{self, Collision};
use super::direction::Direction;
use super::snake::Snake;
use super::spawn;
use crate::config::{
    BAD_FOOD_LEVEL, BARRIER_LEVEL, BASE_MOVE_DELAY, COUNTDOWN_INTERVAL, FOOD_LIFETIME,
    FOOD_TIMER_LEVEL, SPEEDUP_FACTOR, SPEEDUP_LEVEL,
};
use crate::sound::SoundCue;

/// Level reached with `points`
pub fn level_for(points: u32) -> u32 {
    points / 2 + 1
}

/// Time between snake moves at `level`
pub fn move_delay(level: u32) -> Duration {
    if level < SPEEDUP_LEVEL {
        return BASE_MOVE_DELAY;
    }
    let steps = (level - SPEEDUP_LEVEL + 1).min(i32::MAX as u32) as i32;
    BASE_MOVE_DELAY.mul_f64(SPEEDUP_FACTOR.powi(steps))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Something that happened during an update, for the screen and the buzzer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The snake moved and its old tail cell is free
    Moved { vacated: Cell },
    FoodEaten { at: Cell },
    BadFoodEaten { at: Cell },
    ScoreChanged { points: u32, level: u32 },
    BarrierPlaced { at: Cell },
    BadFoodPlaced { at: Cell },
    /// Whole seconds left before the food disappears
    Countdown { seconds: u32 },
    /// The food timed out at `at` and was moved elsewhere
    FoodMissed { at: Cell },
    Paused,
    Resumed,
    GameOver { cause: Collision, points: u32 },
}

impl GameEvent {
    pub fn cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::FoodEaten { .. } => Some(SoundCue::FoodEaten),
            GameEvent::BadFoodEaten { .. } => Some(SoundCue::BadFoodEaten),
            GameEvent::BadFoodPlaced { .. } => Some(SoundCue::BadFoodWarning),
            GameEvent::Paused => Some(SoundCue::Pause),
            GameEvent::Resumed => Some(SoundCue::PauseRelease),
            _ => None,
        }
    }
}

/// One play session
#[derive(Debug, Clone)]
pub struct GameState {
    rng: StdRng,
    phase: Phase,
    snake: Snake,
    direction: Direction,
    next_direction: Direction,
    points: u32,
    level: u32,
    food: Cell,
    food_visible: bool,
    food_spawned_at: Duration,
    countdown_at: Duration,
    barrier: Option<Cell>,
    bad_food: BadFood,
    last_move_at: Duration,
    paused_at: Option<Duration>,
}

impl GameState {
    /// A fresh session at a random spot, waiting for the first press
    pub fn new(mut rng: StdRng, now: Duration) -> Self {
        let snake = Snake::new(Cell::random(&mut rng));
        let food = spawn::place_food(&mut rng, &snake);
        let mut state = Self::running(rng, snake, Direction::Right, food, now);
        state.phase = Phase::Paused;
        state.paused_at = Some(now);
        info!("New session, head at {:?}", state.snake.head());
        state
    }

    /// A session already in play with the given body and heading
    pub fn running(rng: StdRng, snake: Snake, direction: Direction, food: Cell, now: Duration) -> Self {
        Self {
            rng,
            phase: Phase::Running,
            snake,
            direction,
            next_direction: direction,
            points: 0,
            level: 1,
            food,
            food_visible: true,
            food_spawned_at: now,
            countdown_at: Duration::ZERO,
            barrier: None,
            bad_food: BadFood::new(),
            last_move_at: now,
            paused_at: None,
        }
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self.level = level_for(points);
        self
    }

    pub fn with_barrier(mut self, barrier: Cell) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn with_bad_food(mut self, cells: &[Cell]) -> Self {
        self.bad_food.clear();
        for &cell in cells {
            self.bad_food.push(cell);
        }
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading the snake will take on its next move
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn move_delay(&self) -> Duration {
        move_delay(self.level)
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn food_visible(&self) -> bool {
        self.food_visible
    }

    /// The barrier, if placed and active at the current level
    pub fn barrier(&self) -> Option<Cell> {
        self.barrier.filter(|_| self.level >= BARRIER_LEVEL)
    }

    pub fn bad_food(&self) -> &[Cell] {
        self.bad_food.cells()
    }

    /// Take a joystick intent. Reversing onto the body is ignored, as is any input while not running.
    pub fn steer(&mut self, intent: Option<Direction>) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(direction) = intent {
            if !direction.is_opposite(self.direction) {
                self.next_direction = direction;
            }
        }
    }

    /// Button press: toggles between running and paused
    pub fn press(&mut self, now: Duration) -> Option<GameEvent> {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.paused_at = Some(now);
                debug!("Paused with {} points", self.points);
                Some(GameEvent::Paused)
            }
            Phase::Paused => {
                let paused_for = self.paused_at.take().map_or(Duration::ZERO, |at| now.saturating_sub(at));
                self.last_move_at += paused_for;
                self.food_spawned_at += paused_for;
                self.countdown_at += paused_for;
                self.phase = Phase::Running;
                debug!("Resumed after {:?}", paused_for);
                Some(GameEvent::Resumed)
            }
            Phase::GameOver => None,
        }
    }

    /// Advance the session to `now`
    pub fn update(&mut self, now: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }

        if now.saturating_sub(self.last_move_at) >= self.move_delay() {
            self.last_move_at = now;
            self.move_step(now, &mut events);
        }

        if let Some(cause) = collision::check(&self.snake, self.barrier, self.level >= BARRIER_LEVEL) {
            self.phase = Phase::GameOver;
            info!("Game over ({:?}) with {} points at level {}", cause, self.points, self.level);
            events.push(GameEvent::GameOver { cause, points: self.points });
        }
        events
    }

    fn move_step(&mut self, now: Duration, events: &mut Vec<GameEvent>) {
        self.direction = self.next_direction;
        let vacated = self.snake.advance(self.direction);
        events.push(GameEvent::Moved { vacated });

        let head = self.snake.head();
        if head == self.food {
            self.eat_food(vacated, now, events);
            return;
        }
        if self.level >= FOOD_TIMER_LEVEL {
            self.run_food_timer(now, events);
        }
        // An eaten bad-food cell is used up; it does not keep costing points on later passes
        if self.level >= BAD_FOOD_LEVEL && self.bad_food.take(head) {
            self.eat_bad_food(head, events);
        }
    }

    fn eat_food(&mut self, vacated: Cell, now: Duration, events: &mut Vec<GameEvent>) {
        let at = self.food;
        self.set_points(self.points + 1);
        self.snake.push_tail(vacated);
        events.push(GameEvent::FoodEaten { at });
        events.push(GameEvent::ScoreChanged { points: self.points, level: self.level });

        self.food = spawn::place_food(&mut self.rng, &self.snake);
        self.food_visible = true;
        self.food_spawned_at = now;

        if self.level >= BARRIER_LEVEL {
            let barrier = spawn::place_barrier(&mut self.rng, &self.snake, self.food);
            debug!("Barrier at {:?}", barrier);
            self.barrier = Some(barrier);
            events.push(GameEvent::BarrierPlaced { at: barrier });
        }

        spawn::place_bad_food(&mut self.rng, &self.snake, self.level, &mut self.bad_food);
        events.extend(self.bad_food.cells().iter().map(|&at| GameEvent::BadFoodPlaced { at }));
    }

    fn eat_bad_food(&mut self, at: Cell, events: &mut Vec<GameEvent>) {
        self.set_points(self.points.saturating_sub(1));
        self.snake.pop_tail();
        if self.level < BAD_FOOD_LEVEL {
            self.bad_food.clear();
        }
        events.push(GameEvent::BadFoodEaten { at });
        events.push(GameEvent::ScoreChanged { points: self.points, level: self.level });
    }

    fn run_food_timer(&mut self, now: Duration, events: &mut Vec<GameEvent>) {
        let age = now.saturating_sub(self.food_spawned_at);
        if self.food_visible {
            if now.saturating_sub(self.countdown_at) >= COUNTDOWN_INTERVAL {
                let seconds = FOOD_LIFETIME.saturating_sub(age).as_secs() as u32;
                events.push(GameEvent::Countdown { seconds });
                self.countdown_at = now;
            }
            if age >= FOOD_LIFETIME {
                self.food_visible = false;
                events.push(GameEvent::FoodMissed { at: self.food });
            }
        }

        if !self.food_visible {
            self.food = spawn::place_food(&mut self.rng, &self.snake);
            self.food_visible = true;
            self.food_spawned_at = now;
        }
    }

    fn set_points(&mut self, points: u32) {
        self.points = points;
        let level = level_for(points);
        if level != self.level {
            debug!("Level {} -> {}", self.level, level);
            self.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_SNAKE_LENGTH, PLAYFIELD_MAX_X};
    use rand::SeedableRng;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    fn line(head: Cell, len: usize) -> Snake {
        let cells: Vec<Cell> = (0..len as i32).map(|i| Cell::new(head.x - 10 * i, head.y)).collect();
        Snake::from_segments(&cells)
    }

    fn running(snake: Snake, food: Cell) -> GameState {
        GameState::running(rng(), snake, Direction::Right, food, ms(0))
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(1), 1);
        assert_eq!(level_for(3), 2);
        assert_eq!(level_for(7), 4);
    }

    #[test]
    fn test_move_delay_curve() {
        for level in 1..SPEEDUP_LEVEL {
            assert_eq!(move_delay(level), ms(200));
        }
        assert_eq!(move_delay(5), ms(160));
        for level in SPEEDUP_LEVEL..60 {
            assert!(move_delay(level + 1) < move_delay(level), "level {}", level);
        }
        assert_eq!(move_delay(u32::MAX), Duration::ZERO);
    }

    #[test]
    fn test_new_session_starts_paused() {
        let mut state = GameState::new(rng(), ms(0));
        let head = state.snake().head();

        assert_eq!(state.phase(), Phase::Paused);
        assert!(state.update(ms(1000)).is_empty());
        assert_eq!(state.snake().head(), head);
        assert!(!state.snake().contains(state.food()));
    }

    #[test]
    fn test_single_move() {
        let mut state = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200));

        assert!(state.update(ms(199)).is_empty());
        let events = state.update(ms(200));

        assert_eq!(events, vec![GameEvent::Moved { vacated: Cell::new(100, 100) }]);
        assert_eq!(state.snake().head(), Cell::new(110, 100));
        assert_eq!(state.snake().len(), 1);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut state = running(line(Cell::new(100, 100), 3), Cell::new(200, 200));

        state.steer(Some(Direction::Left));
        assert_eq!(state.next_direction(), Direction::Right);

        // Two quick turns between moves still can't fold the snake back
        state.steer(Some(Direction::Up));
        state.steer(Some(Direction::Left));
        assert_eq!(state.next_direction(), Direction::Up);
        state.update(ms(200));
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.snake().head(), Cell::new(100, 90));
    }

    #[test]
    fn test_no_intent_keeps_heading() {
        let mut state = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200));
        state.steer(Some(Direction::Down));
        state.steer(None);
        assert_eq!(state.next_direction(), Direction::Down);
    }

    #[test]
    fn test_wrap_never_ends_the_game() {
        let mut state = running(Snake::new(Cell::new(PLAYFIELD_MAX_X, 100)), Cell::new(200, 200));
        let events = state.update(ms(200));

        assert_eq!(state.snake().head().x, 10);
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = running(line(Cell::new(100, 100), 5), Cell::new(110, 100));
        let events = state.update(ms(200));

        assert_eq!(state.points(), 1);
        assert_eq!(state.level(), 1);
        assert_eq!(state.snake().len(), 6);
        assert_eq!(state.snake().tail(), Cell::new(60, 100));
        assert!(events.contains(&GameEvent::FoodEaten { at: Cell::new(110, 100) }));
        assert!(events.contains(&GameEvent::ScoreChanged { points: 1, level: 1 }));
        assert_ne!(state.food(), Cell::new(110, 100));
        assert!(state.barrier().is_none());
    }

    #[test]
    fn test_growth_capped_at_capacity() {
        let cells: Vec<Cell> = (0..MAX_SNAKE_LENGTH as i32)
            .map(|i| Cell::new(10 + 10 * (i % 23), 40 + 10 * (i / 23)))
            .collect();
        // Head on the last row, moving down and away from the body
        let reversed: Vec<Cell> = cells.into_iter().rev().collect();
        let snake = Snake::from_segments(&reversed);
        let head = snake.head();
        let food = head.step(Direction::Down);
        let mut state = GameState::running(rng(), snake, Direction::Down, food, ms(0));

        state.update(ms(200));
        assert_eq!(state.points(), 1);
        assert_eq!(state.snake().len(), MAX_SNAKE_LENGTH);
    }

    #[test]
    fn test_barrier_appears_at_level_two() {
        let mut state = running(line(Cell::new(20, 60), 2), Cell::new(30, 60)).with_points(2);
        let events = state.update(ms(200));

        assert_eq!(state.points(), 3);
        assert_eq!(state.level(), 2);
        let barrier = state.barrier().expect("barrier placed");
        assert!(events.contains(&GameEvent::BarrierPlaced { at: barrier }));
        assert!(state.bad_food().is_empty());
    }

    #[test]
    fn test_bad_food_appears_at_level_four() {
        let mut state = running(line(Cell::new(20, 60), 2), Cell::new(30, 60)).with_points(6);
        let events = state.update(ms(200));

        assert_eq!(state.points(), 7);
        assert_eq!(state.level(), 4);
        assert_eq!(state.bad_food().len(), 1);
        let placed = events.iter().filter(|e| matches!(e, GameEvent::BadFoodPlaced { .. })).count();
        assert_eq!(placed, 1);
    }

    #[test]
    fn test_bad_food_costs_point_and_segment() {
        let mut state = running(line(Cell::new(100, 100), 4), Cell::new(200, 200))
            .with_points(8)
            .with_bad_food(&[Cell::new(110, 100)]);
        let events = state.update(ms(200));

        assert_eq!(state.points(), 7);
        assert_eq!(state.level(), 4);
        assert_eq!(state.snake().len(), 3);
        assert!(state.bad_food().is_empty());
        assert!(events.contains(&GameEvent::BadFoodEaten { at: Cell::new(110, 100) }));
        assert!(events.iter().any(|e| e.cue() == Some(SoundCue::BadFoodEaten)));
    }

    #[test]
    fn test_bad_food_floors() {
        let mut state = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200))
            .with_points(6)
            .with_bad_food(&[Cell::new(110, 100), Cell::new(120, 100)]);
        state.points = 0;

        state.update(ms(200));
        assert_eq!(state.points(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.snake().len(), 1);
    }

    #[test]
    fn test_dropping_below_level_four_clears_bad_food() {
        let mut state = running(line(Cell::new(100, 100), 3), Cell::new(200, 200))
            .with_points(6)
            .with_bad_food(&[Cell::new(110, 100), Cell::new(150, 150)]);

        state.update(ms(200));
        assert_eq!(state.level(), 3);
        assert!(state.bad_food().is_empty());
    }

    #[test]
    fn test_self_collision_ends_session() {
        // Head at (100,100) heading up into a loop that comes back to (100,90)
        let snake = Snake::from_segments(&[
            Cell::new(100, 100),
            Cell::new(110, 100),
            Cell::new(110, 90),
            Cell::new(100, 90),
            Cell::new(90, 90),
        ]);
        let mut state = GameState::running(rng(), snake, Direction::Up, Cell::new(200, 200), ms(0));
        let events = state.update(ms(200));

        assert_eq!(state.phase(), Phase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { cause: Collision::SelfBite, points: 0 }));
        assert!(state.update(ms(400)).is_empty());
    }

    #[test]
    fn test_barrier_collision_needs_level_two() {
        let mut low = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200)).with_barrier(Cell::new(110, 100));
        low.update(ms(200));
        assert_eq!(low.phase(), Phase::Running);

        let mut high = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200))
            .with_points(2)
            .with_barrier(Cell::new(110, 100));
        let events = high.update(ms(200));
        assert_eq!(high.phase(), Phase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { cause: Collision::Barrier, points: 2 }));
    }

    #[test]
    fn test_pause_freezes_and_resumes_timers() {
        let mut state = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200));

        state.update(ms(100));
        assert_eq!(state.press(ms(150)), Some(GameEvent::Paused));
        assert!(state.update(ms(5000)).is_empty());
        assert_eq!(state.press(ms(10_000)), Some(GameEvent::Resumed));

        // 50ms were left before the next move when paused
        assert!(state.update(ms(10_049)).is_empty());
        assert_eq!(state.update(ms(10_050)).len(), 1);
        assert_eq!(state.snake().head(), Cell::new(110, 100));
    }

    #[test]
    fn test_food_times_out_at_level_three() {
        let mut state = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200)).with_points(4);
        let food = state.food();

        let events = state.update(ms(1000));
        assert!(events.contains(&GameEvent::Countdown { seconds: 4 }));

        let mut now = 1000;
        let mut missed = None;
        while now < 6000 {
            now += 200;
            for event in state.update(ms(now)) {
                if let GameEvent::FoodMissed { at } = event {
                    missed = Some((now, at));
                }
            }
        }
        let (when, at) = missed.expect("food timed out");
        assert_eq!(when, 5000);
        assert_eq!(at, food);
        assert!(state.food_visible());
    }

    #[test]
    fn test_pause_keeps_food_age() {
        let mut state = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200)).with_points(4);
        state.update(ms(1000));
        state.press(ms(1000));
        state.press(ms(60_000));

        let events = state.update(ms(60_200));
        assert!(events.iter().all(|e| !matches!(e, GameEvent::FoodMissed { .. })));
        assert_eq!(state.food(), Cell::new(200, 200));
    }

    #[test]
    fn test_countdown_once_per_second() {
        let mut state = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200)).with_points(4);
        let mut countdown = Vec::new();
        for now in (200..5000).step_by(200) {
            for event in state.update(ms(now)) {
                if let GameEvent::Countdown { seconds } = event {
                    countdown.push((now, seconds));
                }
            }
        }
        assert_eq!(countdown, vec![(1000, 4), (2000, 3), (3000, 2), (4000, 1)]);
    }

    #[test]
    fn test_food_never_times_out_below_level_three() {
        let mut state = running(Snake::new(Cell::new(100, 100)), Cell::new(200, 200)).with_points(3);
        let mut now = 0;
        while now < 8000 {
            now += 200;
            assert!(
                state
                    .update(ms(now))
                    .iter()
                    .all(|e| !matches!(e, GameEvent::FoodMissed { .. } | GameEvent::Countdown { .. }))
            );
        }
        assert_eq!(state.food(), Cell::new(200, 200));
    }
}
