//! Synthetic dataset generation.
//!
//! Seeded generators for the three stage inputs, used by the runner
//! and by tests that need datasets larger than hand-written fixtures.
//! Value ranges mirror a small CI fleet: build durations of a few
//! minutes, request costs around one unit, job arrivals spread over a
//! long window with short bursts.
//!
//! All generators draw from the caller's RNG, so a fixed seed yields
//! the same dataset everywhere.

use rand::Rng;

use crate::models::{Process, Request, Service};

/// Build duration range (time units).
const DURATION_RANGE: std::ops::Range<f64> = 2.0..10.0;
/// Request cost range.
const COST_RANGE: std::ops::Range<f64> = 0.5..2.0;
/// Process arrival window (ticks).
const ARRIVAL_RANGE: std::ops::RangeInclusive<i64> = 0..=1000;
/// Process burst range (ticks).
const BURST_RANGE: std::ops::RangeInclusive<i64> = 1..=20;

/// Generates `count` services with durations in [2, 10).
pub fn services<R: Rng>(count: usize, rng: &mut R) -> Vec<Service> {
    (0..count)
        .map(|i| Service::new(format!("svc{i}"), rng.random_range(DURATION_RANGE)))
        .collect()
}

/// Generates `count` requests with costs in [0.5, 2).
pub fn requests<R: Rng>(count: usize, rng: &mut R) -> Vec<Request> {
    (0..count)
        .map(|i| Request::new(format!("req{i}"), rng.random_range(COST_RANGE)))
        .collect()
}

/// Generates `count` processes with arrivals in [0, 1000] and bursts in
/// [1, 20].
pub fn processes<R: Rng>(count: usize, rng: &mut R) -> Vec<Process> {
    (0..count)
        .map(|i| {
            Process::new(
                format!("job{i}"),
                rng.random_range(ARRIVAL_RANGE),
                rng.random_range(BURST_RANGE),
            )
        })
        .collect()
}
