use std::f64::consts::PI;

use crate::config::{AsteroidConfig, GameConfig, MissileConfig};
use crate::controller::Action;
use crate::vec2::Vec2;

/// Phase step of the Lissajous curve per tick.
pub const LISSAJOUS_DT: f64 = 0.005;
/// The decorative asteroid keeps this radius regardless of its size index.
pub const LISSAJOUS_RADIUS: f64 = 10.0;
/// Ships spawn and respawn pointing up.
pub const SHIP_START_HEADING: f64 = -PI / 2.0;

/// Toroidal wrap of one coordinate into [0, extent).
#[inline]
pub fn wrap_component(value: f64, extent: f64) -> f64 {
    ((value % extent) + extent) % extent
}

#[inline]
fn wrap_into_field(pos: &mut Vec2, config: &GameConfig) {
    pos.x = wrap_component(pos.x, config.width);
    pos.y = wrap_component(pos.y, config.height);
}

// ── Ship ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    /// Facing angle in radians; the thrust and fire direction.
    pub heading: f64,
    /// Ticks until the next missile may launch.
    pub cooldown: u32,
    /// Whether thrust was applied this tick; renderers key the flame off it.
    pub thrusting: bool,
    pub alive: bool,
    pub respawn_timer: u32,
}

impl Ship {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.width / 2.0, config.height / 2.0),
            vel: Vec2::ZERO,
            radius: config.ship.radius,
            heading: SHIP_START_HEADING,
            cooldown: 0,
            thrusting: false,
            alive: true,
            respawn_timer: 0,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    #[inline]
    pub fn wrappable(&self) -> bool {
        true
    }

    /// Apply one tick of control input, then integrate and wrap. Returns a
    /// newly launched missile for the caller to stage; births are merged at
    /// end of tick, never mid-sweep.
    pub fn update(&mut self, action: Action, config: &GameConfig) -> Option<Missile> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }

        if !self.alive {
            if self.respawn_timer > 0 {
                self.respawn_timer -= 1;
            }
            if self.respawn_timer == 0 {
                self.respawn(config);
            }
            return None;
        }

        self.heading += f64::from(action.turn) * config.ship.turn_rate;

        self.thrusting = action.thrust != 0;
        if self.thrusting {
            let mut boost = self.direction();
            boost.scale(f64::from(action.thrust) * config.ship.accel);
            self.vel.add(boost);
        }
        self.vel.scale(config.ship.drag);
        self.vel.limit(config.ship.max_speed);

        let launched = if action.fire && self.cooldown == 0 {
            self.cooldown = config.missile.fire_interval;
            let direction = self.direction();
            Some(Missile::new(
                self.pos + direction * self.radius,
                self.vel + direction * config.missile.muzzle_speed,
                &config.missile,
            ))
        } else {
            None
        };

        self.pos.add(self.vel);
        wrap_into_field(&mut self.pos, config);
        launched
    }

    /// Mark the ship destroyed and start the respawn countdown.
    pub fn kill(&mut self, respawn_delay: u32) {
        self.alive = false;
        self.vel = Vec2::ZERO;
        self.thrusting = false;
        self.respawn_timer = respawn_delay;
    }

    fn respawn(&mut self, config: &GameConfig) {
        self.pos = Vec2::new(config.width / 2.0, config.height / 2.0);
        self.vel = Vec2::ZERO;
        self.heading = SHIP_START_HEADING;
        self.cooldown = 0;
        self.alive = true;
    }
}

// ── Asteroid ────────────────────────────────────────────────────────

/// Categorical asteroid size; smaller index, smaller rock. Controls radius,
/// spawn speed, and split depth (at most three generations).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeIndex {
    Small,
    Medium,
    Large,
}

impl SizeIndex {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Small => 0,
            Self::Medium => 1,
            Self::Large => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Small),
            1 => Some(Self::Medium),
            2 => Some(Self::Large),
            _ => None,
        }
    }

    #[inline]
    pub fn smaller(self) -> Option<Self> {
        match self {
            Self::Large => Some(Self::Medium),
            Self::Medium => Some(Self::Small),
            Self::Small => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Position integrates from velocity.
    Ballistic,
    /// Position follows the closed-form curve at phase `t`; velocity is
    /// carried but ignored.
    Lissajous { t: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    pub size: SizeIndex,
    pub motion: Motion,
    pub alive: bool,
}

impl Asteroid {
    pub fn ballistic(pos: Vec2, vel: Vec2, size: SizeIndex, config: &AsteroidConfig) -> Self {
        Self {
            pos,
            vel,
            radius: config.radii[size.index()],
            size,
            motion: Motion::Ballistic,
            alive: true,
        }
    }

    /// Decorative curve-follower. The size index is accepted but does not
    /// vary the radius.
    pub fn lissajous(size: SizeIndex, t: f64, config: &GameConfig) -> Self {
        Self {
            pos: lissajous_position(t, config.width, config.height),
            vel: Vec2::ZERO,
            radius: LISSAJOUS_RADIUS,
            size,
            motion: Motion::Lissajous { t },
            alive: true,
        }
    }

    #[inline]
    pub fn wrappable(&self) -> bool {
        true
    }

    /// Scenic asteroids sit outside the collision set.
    #[inline]
    pub fn scenic(&self) -> bool {
        matches!(self.motion, Motion::Lissajous { .. })
    }

    pub fn update(&mut self, config: &GameConfig) {
        match &mut self.motion {
            Motion::Ballistic => {
                self.pos.add(self.vel);
                wrap_into_field(&mut self.pos, config);
            }
            Motion::Lissajous { t } => {
                *t += LISSAJOUS_DT;
                self.pos = lissajous_position(*t, config.width, config.height);
            }
        }
    }

    /// Two children of the next smaller size at the parent position, with
    /// velocities rotated one split angle each way. Returns `None` for the
    /// smallest size, which shatters without remains.
    pub fn split(&self, config: &AsteroidConfig) -> Option<[Asteroid; 2]> {
        let child_size = self.size.smaller()?;

        let mut clockwise = self.vel;
        clockwise.rotate(-config.split_angle);
        clockwise.scale(config.split_speed_scale);

        let mut counter = self.vel;
        counter.rotate(config.split_angle);
        counter.scale(config.split_speed_scale);

        Some([
            Asteroid::ballistic(self.pos, clockwise, child_size, config),
            Asteroid::ballistic(self.pos, counter, child_size, config),
        ])
    }
}

/// Closed-form position of the decorative asteroid at phase `t`.
pub fn lissajous_position(t: f64, width: f64, height: f64) -> Vec2 {
    let x = (t + PI / 6.0).sin() + (2.0 * t + PI).sin() + 0.5 * (4.0 * t).sin();
    let y = t.sin() + (PI / 5.0 + 2.0 * t).sin() + 0.5 * (3.0 * t + PI / 8.0).sin();
    Vec2::new(
        0.5 * x * width + width / 2.0,
        0.5 * y * height + height / 2.0,
    )
}

// ── Missile ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Missile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    /// Ticks to live; the single death path is this reaching zero.
    pub ttl: u32,
}

impl Missile {
    pub fn new(pos: Vec2, vel: Vec2, config: &MissileConfig) -> Self {
        Self {
            pos,
            vel,
            radius: config.radius,
            ttl: config.ttl,
        }
    }

    /// Missiles fly off the field rather than wrapping.
    #[inline]
    pub fn wrappable(&self) -> bool {
        false
    }

    pub fn update(&mut self) {
        if !self.dead() {
            self.pos.add(self.vel);
            self.ttl -= 1;
        }
    }

    /// Kill by zeroing the ttl; calling it again changes nothing.
    #[inline]
    pub fn hit(&mut self) {
        self.ttl = 0;
    }

    #[inline]
    pub fn dead(&self) -> bool {
        self.ttl == 0
    }
}
