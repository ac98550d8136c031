use crate::entities::{Asteroid, Missile, Motion, Ship, SizeIndex};
use crate::vec2::Vec2;

/// Deep copies of the live state, rebuilt every tick for the controller.
/// Positions and velocities are copied by value; mutating a snapshot can
/// never touch the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f64,
    pub radius: f64,
    pub cooldown: u32,
    pub thrusting: bool,
    pub alive: bool,
    pub respawn_timer: u32,
}

impl From<&Ship> for ShipSnapshot {
    fn from(ship: &Ship) -> Self {
        Self {
            pos: ship.pos,
            vel: ship.vel,
            heading: ship.heading,
            radius: ship.radius,
            cooldown: ship.cooldown,
            thrusting: ship.thrusting,
            alive: ship.alive,
            respawn_timer: ship.respawn_timer,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    pub size: SizeIndex,
    /// Curve-followers are decorative and outside the collision set.
    pub scenic: bool,
}

impl From<&Asteroid> for AsteroidSnapshot {
    fn from(asteroid: &Asteroid) -> Self {
        Self {
            pos: asteroid.pos,
            vel: asteroid.vel,
            radius: asteroid.radius,
            size: asteroid.size,
            scenic: matches!(asteroid.motion, Motion::Lissajous { .. }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MissileSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    pub ttl: u32,
}

impl From<&Missile> for MissileSnapshot {
    fn from(missile: &Missile) -> Self {
        Self {
            pos: missile.pos,
            vel: missile.vel,
            radius: missile.radius,
            ttl: missile.ttl,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub ship: ShipSnapshot,
    pub asteroids: Vec<AsteroidSnapshot>,
    pub missiles: Vec<MissileSnapshot>,
}
