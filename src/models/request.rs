//! Incoming traffic unit.

use serde::{Deserialize, Serialize};

/// A unit of incoming traffic to be routed to a server.
///
/// The cost is the declared service time of the request, used by
/// cost-aware strategies (Least Connections, Genetic) for weighting.
/// Arrival order is the request's position in the input sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Unique request identifier.
    pub id: String,
    /// Declared service cost (must be >= 0).
    pub cost: f64,
}

impl Request {
    /// Creates a request with the given ID and service cost.
    pub fn new(id: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            cost,
        }
    }

    /// Creates `count` unit-cost requests (`r0`, `r1`, ...).
    pub fn unit_batch(count: usize) -> Vec<Self> {
        (0..count).map(|i| Self::new(format!("r{i}"), 1.0)).collect()
    }
}
