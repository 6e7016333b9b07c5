//! Game rules: the snake, hazards, collisions and the play session

pub mod bad_food;
pub mod cell;
pub mod collision;
pub mod direction;
pub mod snake;
pub mod spawn;
pub mod state;

pub use cell::Cell;
pub use collision::Collision;
pub use direction::Direction;
pub use snake::Snake;
pub use state::{GameEvent, GameState, Phase};
