use asteroids_core::controller::{Action, Controller, ControllerError};
use asteroids_core::rng::GameRng;
use asteroids_core::snapshot::{GameSnapshot, ShipSnapshot};

pub fn controller_ids() -> Vec<&'static str> {
    vec!["inert", "random", "erratic"]
}

pub fn describe_controllers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("inert", "No-op every tick; the ship drifts under inertia."),
        ("random", "Seeded random walk over the discrete action space."),
        (
            "erratic",
            "Fails every consultation; exercises the fault path end to end.",
        ),
        (
            "script:<steps>",
            "Cycles a comma-separated action script, e.g. script:t,t,tl,f,.",
        ),
    ]
}

/// Instantiate a controller from its id (or a `script:` spec). The seed
/// feeds controllers that draw randomness; deterministic ones ignore it.
pub fn create_controller(spec: &str, seed: u64) -> Option<Box<dyn Controller>> {
    match spec {
        "inert" => Some(Box::new(Inert)),
        "random" => Some(Box::new(Random::new(seed))),
        "erratic" => Some(Box::new(Erratic)),
        _ => spec
            .strip_prefix("script:")
            .and_then(Scripted::parse)
            .map(|scripted| Box::new(scripted) as Box<dyn Controller>),
    }
}

struct Inert;

impl Controller for Inert {
    fn set_vehicle(&mut self, _ship: &ShipSnapshot) {}

    fn action(&mut self, _snapshot: &GameSnapshot) -> Result<Action, ControllerError> {
        Ok(Action::NONE)
    }
}

struct Random {
    rng: GameRng,
}

impl Random {
    fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Controller for Random {
    fn set_vehicle(&mut self, _ship: &ShipSnapshot) {}

    fn action(&mut self, _snapshot: &GameSnapshot) -> Result<Action, ControllerError> {
        let turn = (self.rng.next_u64() % 3) as i8 - 1;
        let thrust = (self.rng.next_u64() % 3) as i8 - 1;
        let fire = self.rng.next_f64() < 0.25;
        Ok(Action::new(turn, thrust, fire))
    }
}

struct Erratic;

impl Controller for Erratic {
    fn set_vehicle(&mut self, _ship: &ShipSnapshot) {}

    fn action(&mut self, _snapshot: &GameSnapshot) -> Result<Action, ControllerError> {
        Err("erratic controller always fails".into())
    }
}

/// Fixed input sequence, cycled for the whole episode. One token per tick;
/// a token combines flag characters: l/r turn, t/b thrust, f fire, `.` is
/// the explicit no-op.
struct Scripted {
    steps: Vec<Action>,
    cursor: usize,
}

impl Scripted {
    fn parse(body: &str) -> Option<Self> {
        let mut steps = Vec::new();
        for token in body.split(',') {
            let mut action = Action::NONE;
            for flag in token.trim().chars() {
                match flag {
                    'l' => action.turn = -1,
                    'r' => action.turn = 1,
                    't' => action.thrust = 1,
                    'b' => action.thrust = -1,
                    'f' => action.fire = true,
                    '.' => {}
                    _ => return None,
                }
            }
            steps.push(action);
        }
        if steps.is_empty() {
            return None;
        }
        Some(Self { steps, cursor: 0 })
    }
}

impl Controller for Scripted {
    fn set_vehicle(&mut self, _ship: &ShipSnapshot) {
        self.cursor = 0;
    }

    fn action(&mut self, _snapshot: &GameSnapshot) -> Result<Action, ControllerError> {
        let action = self.steps[self.cursor % self.steps.len()];
        self.cursor += 1;
        Ok(action)
    }
}
