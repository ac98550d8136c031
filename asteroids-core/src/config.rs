use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub radius: f64,
    /// Acceleration per tick while thrusting.
    pub accel: f64,
    /// Hard cap on speed, applied after thrust each tick.
    pub max_speed: f64,
    /// Per-tick velocity retention factor, in (0, 1].
    pub drag: f64,
    /// Heading change per tick for a full turn input, radians.
    pub turn_rate: f64,
    /// Ticks between death and reappearing at the playfield center.
    pub respawn_delay: u32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            accel: 0.25,
            max_speed: 8.0,
            drag: 0.99,
            turn_rate: std::f64::consts::PI / 30.0,
            respawn_delay: 60,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileConfig {
    /// Ticks a missile lives after launch.
    pub ttl: u32,
    /// Launch speed added along the ship heading, on top of ship velocity.
    pub muzzle_speed: f64,
    /// Minimum ticks between shots.
    pub fire_interval: u32,
    pub radius: f64,
}

impl Default for MissileConfig {
    fn default() -> Self {
        Self {
            ttl: 100,
            muzzle_speed: 5.0,
            fire_interval: 10,
            radius: 2.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Radius per size index (small, medium, large).
    pub radii: [f64; 3],
    /// Spawn speed per size index (small, medium, large).
    pub base_speeds: [f64; 3],
    /// Children leave the split rotated this many radians off the parent
    /// velocity, one child each way.
    pub split_angle: f64,
    /// Child speed as a fraction of the parent speed. 1.0 preserves it.
    pub split_speed_scale: f64,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            radii: [12.0, 24.0, 40.0],
            base_speeds: [2.4, 1.7, 1.1],
            split_angle: 0.5,
            split_speed_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    pub ship: ShipConfig,
    pub missile: MissileConfig,
    pub asteroid: AsteroidConfig,
    /// Large ballistic asteroids seeded at game start.
    pub starting_asteroids: usize,
    /// Decorative Lissajous asteroids seeded at game start.
    pub lissajous_asteroids: usize,
    /// Initial asteroids spawn at least this far from the ship.
    pub spawn_clearance: f64,
    pub rng_seed: u64,
    /// Advisory episode length for hosts; the core never stops on its own.
    pub max_ticks: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            ship: ShipConfig::default(),
            missile: MissileConfig::default(),
            asteroid: AsteroidConfig::default(),
            starting_asteroids: 4,
            lissajous_asteroids: 1,
            spawn_clearance: 120.0,
            rng_seed: 0xDEAD_BEEF,
            max_ticks: None,
        }
    }
}

impl GameConfig {
    /// Construction-time validation; the only fatal error path in the core.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(self.width, "width")?;
        require_positive(self.height, "height")?;
        require_non_negative(self.ship.radius, "ship.radius")?;
        require_non_negative(self.ship.accel, "ship.accel")?;
        require_positive(self.ship.max_speed, "ship.max_speed")?;
        require_non_negative(self.ship.turn_rate, "ship.turn_rate")?;
        if !self.ship.drag.is_finite() || self.ship.drag <= 0.0 || self.ship.drag > 1.0 {
            return Err(ConfigError::DragOutOfRange {
                value: self.ship.drag,
            });
        }
        if self.missile.ttl == 0 {
            return Err(ConfigError::ZeroMissileTtl);
        }
        require_positive(self.missile.muzzle_speed, "missile.muzzle_speed")?;
        require_non_negative(self.missile.radius, "missile.radius")?;
        for radius in self.asteroid.radii {
            require_non_negative(radius, "asteroid.radii")?;
        }
        for speed in self.asteroid.base_speeds {
            require_positive(speed, "asteroid.base_speeds")?;
        }
        require_non_negative(self.asteroid.split_angle, "asteroid.split_angle")?;
        require_positive(self.asteroid.split_speed_scale, "asteroid.split_speed_scale")?;
        require_non_negative(self.spawn_clearance, "spawn_clearance")?;
        Ok(())
    }
}

fn require_positive(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field });
    }
    Ok(())
}

fn require_non_negative(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field });
    }
    Ok(())
}
