//! Scheduled work unit.

use serde::{Deserialize, Serialize};

/// A unit of scheduled work (a CI job in the pipeline analogy).
///
/// Arrival and burst times are integer ticks; the consumer defines the
/// tick length. The mutable run state (remaining time, completion time)
/// lives inside the scheduling simulator, not on this input type, so a
/// process set can be replayed under several policies unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: String,
    /// Arrival time (ticks, must be >= 0).
    pub arrival: i64,
    /// Burst (service) time (ticks, must be > 0).
    pub burst: i64,
}

impl Process {
    /// Creates a process with the given ID, arrival time, and burst time.
    pub fn new(id: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
        }
    }
}
