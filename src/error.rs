//! Error types for marga-plan.

use thiserror::Error;

use crate::core::RobotState;

/// Planning error type.
///
/// Every variant is recoverable at the request boundary: the planner never
/// panics on bad input, it returns one of these with enough context to act
/// on (offending identifiers, attempted state pair).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Start and goal are disconnected under the current occupancy.
    #[error("no path found from {from} to {to}")]
    NoPathFound { from: RobotState, to: RobotState },

    /// One or more obstacles could not be assigned a legal viewing state.
    #[error("unreachable viewpoints for obstacles: {ids:?}")]
    UnreachableViewpoint { ids: Vec<String> },

    /// A configured capacity limit was exceeded before or during the solve.
    #[error("{what} exceeds capacity: {value} > {limit}")]
    CapacityExceeded {
        what: &'static str,
        value: usize,
        limit: usize,
    },

    /// Malformed request: out-of-bounds obstacle, duplicate identifier, etc.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<std::io::Error> for PlanError {
    fn from(e: std::io::Error) -> Self {
        PlanError::InvalidConfiguration(e.to_string())
    }
}

impl From<toml::de::Error> for PlanError {
    fn from(e: toml::de::Error) -> Self {
        PlanError::InvalidConfiguration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
