use log::warn;

use crate::config::GameConfig;
use crate::controller::{Action, Controller};
use crate::entities::{Asteroid, Missile, Ship, SizeIndex};
use crate::error::{ConfigError, Fault, ObjectKind};
use crate::rng::GameRng;
use crate::snapshot::{AsteroidSnapshot, GameSnapshot, MissileSnapshot, ShipSnapshot};
use crate::vec2::Vec2;

/// Attempts to place a starting asteroid clear of the ship before giving
/// up and accepting the last candidate.
const SPAWN_PLACEMENT_TRIES: u32 = 20;

/// What happened during one call to [`AsteroidsGame::tick`]. Hosts that
/// keep statistics fold these up; the simulation itself stores none of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub missile_fired: bool,
    pub asteroids_destroyed: u32,
    pub asteroids_split: u32,
    pub ship_destroyed: bool,
    pub faults: u32,
}

/// The aggregate game state: one ship, the live asteroid and missile
/// lists, the playfield, and the tick counter. All mutation happens inside
/// `tick`, which runs the fixed update order to completion.
pub struct AsteroidsGame {
    config: GameConfig,
    rng: GameRng,
    tick: u64,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    missiles: Vec<Missile>,
    faults: Vec<Fault>,
    controller: Box<dyn Controller>,
}

impl AsteroidsGame {
    /// Build the starting state. Configuration problems are the only fatal
    /// error; everything after construction degrades instead of failing.
    pub fn new(
        config: GameConfig,
        mut controller: Box<dyn Controller>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(config.rng_seed);
        let ship = Ship::new(&config);

        let mut asteroids = Vec::with_capacity(
            config.starting_asteroids * 4 + config.lissajous_asteroids,
        );
        for _ in 0..config.starting_asteroids {
            asteroids.push(spawn_field_asteroid(&config, ship.pos, &mut rng));
        }
        for _ in 0..config.lissajous_asteroids {
            let phase = rng.next_f64();
            asteroids.push(Asteroid::lissajous(SizeIndex::Large, phase, &config));
        }

        controller.set_vehicle(&ShipSnapshot::from(&ship));

        Ok(Self {
            config,
            rng,
            tick: 0,
            ship,
            asteroids,
            missiles: Vec::new(),
            faults: Vec::new(),
            controller,
        })
    }

    /// Replace the controller between ticks; it is rebound to the ship.
    pub fn set_controller(&mut self, mut controller: Box<dyn Controller>) {
        controller.set_vehicle(&ShipSnapshot::from(&self.ship));
        self.controller = controller;
    }

    /// Host-side birth: level scripts and scenario setups place extra
    /// asteroids through this. The object joins the field immediately and
    /// is updated from the next tick on.
    pub fn spawn_asteroid(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn rng_state(&self) -> u64 {
        self.rng.state()
    }

    /// Diagnostics accumulated since the last drain.
    pub fn drain_faults(&mut self) -> Vec<Fault> {
        std::mem::take(&mut self.faults)
    }

    /// Deep copy of the visible state for controllers and hosts.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            tick: self.tick,
            width: self.config.width,
            height: self.config.height,
            ship: ShipSnapshot::from(&self.ship),
            asteroids: self.asteroids.iter().map(AsteroidSnapshot::from).collect(),
            missiles: self.missiles.iter().map(MissileSnapshot::from).collect(),
        }
    }

    /// One simulation step: controller, ship, asteroids, missiles, fault
    /// isolation, collisions, deaths, births, tick increment. Births stay
    /// in a staging buffer until the sweep is over; the live lists are
    /// never grown mid-iteration.
    pub fn tick(&mut self) -> TickEvents {
        let mut events = TickEvents::default();

        let snapshot = self.snapshot();
        let action = match self.controller.action(&snapshot) {
            Ok(action) => action,
            Err(err) => {
                events.faults += 1;
                self.record_fault(Fault::ControllerFailure {
                    tick: self.tick,
                    message: err.to_string(),
                });
                Action::NONE
            }
        };

        let launched = self.ship.update(action, &self.config);
        events.missile_fired = launched.is_some();

        for asteroid in &mut self.asteroids {
            if asteroid.alive {
                asteroid.update(&self.config);
            }
        }
        for missile in &mut self.missiles {
            missile.update();
        }

        self.isolate_non_finite(&mut events);

        let mut split_children: Vec<Asteroid> = Vec::new();
        for missile in &mut self.missiles {
            if missile.dead() {
                continue;
            }
            for asteroid in &mut self.asteroids {
                if !asteroid.alive || asteroid.scenic() {
                    continue;
                }
                if circles_overlap(missile.pos, missile.radius, asteroid.pos, asteroid.radius) {
                    missile.hit();
                    asteroid.alive = false;
                    events.asteroids_destroyed += 1;
                    if let Some(children) = asteroid.split(&self.config.asteroid) {
                        split_children.extend(children);
                        events.asteroids_split += 1;
                    }
                    // One kill per missile per tick; later overlaps keep
                    // their asteroids.
                    break;
                }
            }
        }

        if self.ship.alive {
            let collided = self.asteroids.iter().any(|asteroid| {
                asteroid.alive
                    && !asteroid.scenic()
                    && circles_overlap(self.ship.pos, self.ship.radius, asteroid.pos, asteroid.radius)
            });
            if collided {
                self.ship.kill(self.config.ship.respawn_delay);
                events.ship_destroyed = true;
            }
        }

        self.asteroids.retain(|asteroid| asteroid.alive);
        self.missiles.retain(|missile| !missile.dead());
        self.asteroids.append(&mut split_children);
        if let Some(missile) = launched {
            self.missiles.push(missile);
        }

        self.tick += 1;
        events
    }

    /// Destroy anything integration pushed out of the reals. The tick
    /// carries on without the offender.
    fn isolate_non_finite(&mut self, events: &mut TickEvents) {
        if self.ship.alive && !(self.ship.pos.is_finite() && self.ship.vel.is_finite()) {
            events.faults += 1;
            events.ship_destroyed = true;
            let fault = Fault::NonFiniteState {
                object: ObjectKind::Ship,
                tick: self.tick,
            };
            self.ship.kill(self.config.ship.respawn_delay);
            self.record_fault(fault);
        }

        for asteroid in &mut self.asteroids {
            if asteroid.alive && !(asteroid.pos.is_finite() && asteroid.vel.is_finite()) {
                asteroid.alive = false;
                events.faults += 1;
                self.faults.push(Fault::NonFiniteState {
                    object: ObjectKind::Asteroid,
                    tick: self.tick,
                });
                warn!(
                    "non-finite state on asteroid at tick {}; object destroyed",
                    self.tick
                );
            }
        }

        for missile in &mut self.missiles {
            if !missile.dead() && !(missile.pos.is_finite() && missile.vel.is_finite()) {
                missile.hit();
                events.faults += 1;
                self.faults.push(Fault::NonFiniteState {
                    object: ObjectKind::Missile,
                    tick: self.tick,
                });
                warn!(
                    "non-finite state on missile at tick {}; object destroyed",
                    self.tick
                );
            }
        }
    }

    fn record_fault(&mut self, fault: Fault) {
        warn!("{fault}");
        self.faults.push(fault);
    }
}

#[inline]
fn circles_overlap(a: Vec2, a_radius: f64, b: Vec2, b_radius: f64) -> bool {
    let hit_distance = a_radius + b_radius;
    a.distance_squared_to(b) <= hit_distance * hit_distance
}

/// Random large asteroid, kept clear of the ship spawn. After enough
/// failed placements the last candidate stands; a crowded tiny field is
/// the caller's configuration choice.
fn spawn_field_asteroid(config: &GameConfig, ship_pos: Vec2, rng: &mut GameRng) -> Asteroid {
    let clearance = config.spawn_clearance;
    let mut pos = Vec2::new(
        rng.next_range(0.0, config.width),
        rng.next_range(0.0, config.height),
    );
    let mut tries = 0;
    while pos.distance_to(ship_pos) < clearance && tries < SPAWN_PLACEMENT_TRIES {
        pos = Vec2::new(
            rng.next_range(0.0, config.width),
            rng.next_range(0.0, config.height),
        );
        tries += 1;
    }

    let speed = config.asteroid.base_speeds[SizeIndex::Large.index()] * rng.next_range(0.8, 1.2);
    let vel = Vec2::from_angle(rng.next_angle()) * speed;
    Asteroid::ballistic(pos, vel, SizeIndex::Large, &config.asteroid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerError;

    struct Fixed(Action);

    impl Controller for Fixed {
        fn set_vehicle(&mut self, _ship: &ShipSnapshot) {}
        fn action(&mut self, _snapshot: &GameSnapshot) -> Result<Action, ControllerError> {
            Ok(self.0)
        }
    }

    struct AlwaysFails;

    impl Controller for AlwaysFails {
        fn set_vehicle(&mut self, _ship: &ShipSnapshot) {}
        fn action(&mut self, _snapshot: &GameSnapshot) -> Result<Action, ControllerError> {
            Err("deliberately broken".into())
        }
    }

    fn quiet_config() -> GameConfig {
        GameConfig {
            width: 200.0,
            height: 200.0,
            starting_asteroids: 0,
            lissajous_asteroids: 0,
            ..GameConfig::default()
        }
    }

    fn inert_game(config: GameConfig) -> AsteroidsGame {
        AsteroidsGame::new(config, Box::new(Fixed(Action::NONE))).unwrap()
    }

    #[test]
    fn construction_rejects_bad_config() {
        let mut config = quiet_config();
        config.width = -1.0;
        let result = AsteroidsGame::new(config, Box::new(Fixed(Action::NONE)));
        assert!(matches!(result, Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn tick_counter_is_monotone() {
        let mut game = inert_game(quiet_config());
        for expected in 0..10u64 {
            assert_eq!(game.tick_count(), expected);
            game.tick();
        }
    }

    #[test]
    fn controller_failure_is_a_surfaced_no_op() {
        let mut config = quiet_config();
        config.rng_seed = 3;
        let mut game = AsteroidsGame::new(config, Box::new(AlwaysFails)).unwrap();

        // Give the ship some inertia first, then watch it coast.
        game.ship.vel = Vec2::new(1.0, 0.0);
        let before = game.ship.pos;
        let events = game.tick();

        assert_eq!(events.faults, 1);
        assert!(game.ship.pos.x > before.x, "ship drifts under inertia");
        let faults = game.drain_faults();
        assert_eq!(faults.len(), 1);
        assert!(matches!(faults[0], Fault::ControllerFailure { tick: 0, .. }));
        assert!(game.drain_faults().is_empty(), "drain empties the buffer");
    }

    #[test]
    fn snapshot_mutation_cannot_reach_the_live_state() {
        let mut config = quiet_config();
        config.starting_asteroids = 2;
        let game = inert_game(config);

        let mut snapshot = game.snapshot();
        snapshot.ship.pos = Vec2::new(-999.0, -999.0);
        for asteroid in &mut snapshot.asteroids {
            asteroid.pos = Vec2::new(-1.0, -1.0);
        }

        let fresh = game.snapshot();
        assert_ne!(fresh.ship.pos, snapshot.ship.pos);
        assert!(fresh
            .asteroids
            .iter()
            .all(|asteroid| asteroid.pos != Vec2::new(-1.0, -1.0)));
    }

    #[test]
    fn fired_missile_joins_the_field_one_tick_late() {
        let mut game = AsteroidsGame::new(
            quiet_config(),
            Box::new(Fixed(Action {
                fire: true,
                ..Action::default()
            })),
        )
        .unwrap();

        let events = game.tick();
        assert!(events.missile_fired);
        assert_eq!(game.missiles().len(), 1);

        // The birth-tick missile was staged after the sweep: it has not
        // integrated yet, so it still sits at the muzzle.
        let muzzle = game.ship().pos + game.ship().direction() * game.ship().radius;
        let missile = game.missiles()[0];
        assert!((missile.pos.x - muzzle.x).abs() < 1e-9);
        assert!((missile.pos.y - muzzle.y).abs() < 1e-9);
    }

    #[test]
    fn ship_asteroid_collision_triggers_respawn_cycle() {
        let mut config = quiet_config();
        config.ship.respawn_delay = 3;
        let mut game = inert_game(config);

        // Park a stationary rock on the ship.
        let rock = Asteroid::ballistic(
            game.ship.pos,
            Vec2::ZERO,
            SizeIndex::Small,
            &game.config.asteroid,
        );
        game.asteroids.push(rock);

        let events = game.tick();
        assert!(events.ship_destroyed);
        assert!(!game.ship().alive);

        // Remove the rock so the respawned ship survives.
        game.asteroids.clear();
        for _ in 0..3 {
            assert!(!game.ship().alive);
            game.tick();
        }
        assert!(game.ship().alive, "back after the configured delay");
        assert_eq!(game.ship().pos, Vec2::new(100.0, 100.0));
        assert_eq!(game.ship().vel, Vec2::ZERO);
    }

    #[test]
    fn non_finite_asteroid_is_destroyed_and_reported() {
        let mut game = inert_game(quiet_config());
        let rock = Asteroid::ballistic(
            Vec2::new(10.0, 10.0),
            Vec2::new(f64::NAN, 0.0),
            SizeIndex::Medium,
            &game.config.asteroid,
        );
        game.asteroids.push(rock);

        let events = game.tick();
        assert_eq!(events.faults, 1);
        assert!(game.asteroids().is_empty(), "offender removed");
        let faults = game.drain_faults();
        assert!(matches!(
            faults[0],
            Fault::NonFiniteState {
                object: ObjectKind::Asteroid,
                tick: 0,
            }
        ));
    }

    #[test]
    fn scenic_asteroid_never_collides() {
        let mut game = inert_game(quiet_config());
        let mut scenic = Asteroid::lissajous(SizeIndex::Large, 0.0, &game.config);
        scenic.pos = game.ship.pos;
        game.asteroids.push(scenic);

        let events = game.tick();
        assert!(!events.ship_destroyed);
        assert!(game.ship().alive);
    }

    #[test]
    fn missile_kill_splits_at_most_one_asteroid_per_missile() {
        let mut game = inert_game(quiet_config());

        // Two overlapping rocks; the missile may take only the first.
        let spot = Vec2::new(60.0, 60.0);
        for _ in 0..2 {
            game.asteroids.push(Asteroid::ballistic(
                spot,
                Vec2::ZERO,
                SizeIndex::Small,
                &game.config.asteroid,
            ));
        }
        game.missiles.push(Missile::new(
            spot,
            Vec2::ZERO,
            &game.config.missile,
        ));

        let events = game.tick();
        assert_eq!(events.asteroids_destroyed, 1);
        assert_eq!(game.asteroids().len(), 1, "second rock survives");
        assert!(game.missiles().is_empty(), "missile spent");
    }
}
