//! Simulated backend server.

use serde::{Deserialize, Serialize};

/// A simulated backend instance accumulating assigned work.
///
/// Mutated incrementally as requests are assigned during one
/// load-balancing run. A fresh pool is constructed per invocation
/// (never a shared singleton), so concurrent runs stay independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Server index within the pool.
    pub id: usize,
    /// Sum of costs of requests assigned so far.
    pub load: f64,
    /// Number of requests assigned so far.
    pub connections: usize,
}

impl Server {
    /// Creates an idle server.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            load: 0.0,
            connections: 0,
        }
    }

    /// Assigns one request of the given cost to this server.
    pub fn assign(&mut self, cost: f64) {
        self.load += cost;
        self.connections += 1;
    }

    /// Creates a pool of `count` idle servers.
    pub fn pool(count: usize) -> Vec<Self> {
        (0..count).map(Self::new).collect()
    }
}
