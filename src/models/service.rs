//! Build work unit.

use serde::{Deserialize, Serialize};

/// A unit of build work with a declared duration.
///
/// Durations are synthetic inputs (e.g. minutes per container image)
/// declared by the dataset provider, never measured wall-clock time.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Unique service identifier.
    pub id: String,
    /// Declared build duration (time units, must be >= 0).
    pub duration: f64,
}

impl Service {
    /// Creates a service with the given ID and build duration.
    pub fn new(id: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            duration,
        }
    }
}
