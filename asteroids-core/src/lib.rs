//! Game-object simulation core for an Asteroids-style arcade game:
//! entities on a toroidal playfield, a fixed tick order, and pluggable
//! controllers that translate snapshots into discrete actions.

pub mod config;
pub mod controller;
pub mod draw;
pub mod entities;
pub mod error;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod vec2;

pub use config::GameConfig;
pub use controller::{Action, Controller, ControllerError};
pub use error::{ConfigError, Fault};
pub use snapshot::GameSnapshot;
pub use state::{AsteroidsGame, TickEvents};
pub use vec2::Vec2;
