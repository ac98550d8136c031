use crate::snapshot::{GameSnapshot, ShipSnapshot};

/// Errors from controller implementations; any error type goes. The game
/// maps a failure to a no-op action and keeps running.
pub type ControllerError = Box<dyn std::error::Error + Send + Sync>;

/// Discrete per-tick control input: turn and thrust in {-1, 0, 1}, plus a
/// fire flag. The default is a no-op on every axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Action {
    /// -1 turns left (counter-clockwise), +1 turns right.
    pub turn: i8,
    /// -1 thrusts against the heading, +1 along it.
    pub thrust: i8,
    pub fire: bool,
}

impl Action {
    pub const NONE: Self = Self {
        turn: 0,
        thrust: 0,
        fire: false,
    };

    /// Build an action, clamping out-of-range components into {-1, 0, 1}.
    pub fn new(turn: i8, thrust: i8, fire: bool) -> Self {
        Self {
            turn: turn.clamp(-1, 1),
            thrust: thrust.clamp(-1, 1),
            fire,
        }
    }
}

/// Strategy bound to exactly one ship, consulted once per tick.
///
/// The snapshot shares no storage with the live simulation, so an
/// implementation may scribble on its own copy freely; nothing it does to
/// the snapshot reaches the game.
pub trait Controller {
    /// Bind to the ship whose action this controller produces. Called at
    /// game construction and again whenever the controller is replaced.
    fn set_vehicle(&mut self, ship: &ShipSnapshot);

    /// Produce this tick's input. An `Err` is surfaced as a diagnostic and
    /// treated as [`Action::NONE`]; it never stops the game.
    fn action(&mut self, snapshot: &GameSnapshot) -> Result<Action, ControllerError>;
}
