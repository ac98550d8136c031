use std::fmt;

/// Rejected at game construction. The only fatal error kind in the core.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonFinite { field: &'static str },
    NonPositive { field: &'static str },
    Negative { field: &'static str },
    DragOutOfRange { value: f64 },
    ZeroMissileTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::NonPositive { field } => write!(f, "{field} must be > 0"),
            Self::Negative { field } => write!(f, "{field} must be >= 0"),
            Self::DragOutOfRange { value } => {
                write!(f, "drag must be in (0, 1], got {value}")
            }
            Self::ZeroMissileTtl => write!(f, "missile ttl must be at least 1 tick"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which live object a fault was attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Ship,
    Asteroid,
    Missile,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ship => write!(f, "ship"),
            Self::Asteroid => write!(f, "asteroid"),
            Self::Missile => write!(f, "missile"),
        }
    }
}

/// Surfaced, non-fatal diagnostic. The faulting object is isolated and the
/// tick continues; the host drains these from the game state.
#[derive(Clone, Debug, PartialEq)]
pub enum Fault {
    NonFiniteState { object: ObjectKind, tick: u64 },
    ControllerFailure { tick: u64, message: String },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteState { object, tick } => {
                write!(f, "non-finite state on {object} at tick {tick}; object destroyed")
            }
            Self::ControllerFailure { tick, message } => {
                write!(f, "controller failed at tick {tick}: {message}")
            }
        }
    }
}

impl std::error::Error for Fault {}
