//! Simulation error taxonomy.
//!
//! Invalid inputs are rejected at the simulator call boundary before any
//! state is built, so a failed call leaves nothing behind: every run
//! constructs its server pool and process table fresh.
//!
//! Unknown strategy names are also rejected here (via `FromStr` on the
//! strategy enums) rather than silently falling back to a default.

use thiserror::Error;

/// Errors reported by the stage simulators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A service declared a negative build duration.
    #[error("service '{id}' has negative build duration {duration}")]
    NegativeDuration {
        /// Offending service ID.
        id: String,
        /// Declared duration.
        duration: f64,
    },

    /// A request declared a negative service cost.
    #[error("request '{id}' has negative cost {cost}")]
    NegativeCost {
        /// Offending request ID.
        id: String,
        /// Declared cost.
        cost: f64,
    },

    /// The server pool is empty.
    #[error("server count must be positive")]
    NoServers,

    /// Scheduling requires at least one process.
    #[error("process set is empty")]
    EmptyProcessSet,

    /// A process declared a negative arrival time.
    #[error("process '{id}' has negative arrival time {arrival}")]
    NegativeArrival {
        /// Offending process ID.
        id: String,
        /// Declared arrival time.
        arrival: i64,
    },

    /// A process declared a zero or negative burst time.
    #[error("process '{id}' has non-positive burst time {burst}")]
    NonPositiveBurst {
        /// Offending process ID.
        id: String,
        /// Declared burst time.
        burst: i64,
    },

    /// A strategy name did not match any known strategy.
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

/// Result alias used across the simulators.
pub type SimResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimulationError::NegativeDuration {
            id: "svc-1".into(),
            duration: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "service 'svc-1' has negative build duration -2"
        );

        let err = SimulationError::UnknownStrategy("fastest".into());
        assert_eq!(err.to_string(), "unknown strategy 'fastest'");
    }
}
