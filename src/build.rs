//! Build-stage simulator.
//!
//! Estimates the total build time of a set of services under four
//! strategies, reporting speedup and efficiency against the sequential
//! run of the same dataset.
//!
//! # Conventions
//!
//! - Speedup is always relative to the **sequential** total for the
//!   same dataset; the sequential result itself reports 1.0.
//! - Efficiency = speedup ÷ workers used: one worker per service for
//!   the parallel strategy, a single worker otherwise. Under this
//!   convention parallel efficiency equals speedup ÷ service count and
//!   reaches 1.0 exactly when all durations are equal.
//! - An empty service set yields total time 0.0 and speedup/efficiency
//!   1.0 by convention.
//!
//! All four strategies are deterministic given the same durations and
//! configuration constants.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SimResult, SimulationError};
use crate::metrics;
use crate::models::Service;

/// Build execution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStrategy {
    /// One service after another: total = Σ durations.
    Sequential,
    /// Unbounded concurrency: total = max duration.
    Parallel,
    /// Layer caching: a fixed fraction of work is served from cache,
    /// at a small lookup cost per service.
    Cached,
    /// Slimmed base images: every duration shrinks by a constant factor.
    SlimImage,
}

impl BuildStrategy {
    /// All strategies, in comparison order.
    pub const ALL: [BuildStrategy; 4] = [
        BuildStrategy::Sequential,
        BuildStrategy::Parallel,
        BuildStrategy::Cached,
        BuildStrategy::SlimImage,
    ];

    /// Display name used in reporter records.
    pub fn name(&self) -> &'static str {
        match self {
            BuildStrategy::Sequential => "Sequential Build",
            BuildStrategy::Parallel => "Parallel Build",
            BuildStrategy::Cached => "Cached Build",
            BuildStrategy::SlimImage => "Slim Image Build",
        }
    }
}

impl FromStr for BuildStrategy {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(BuildStrategy::Sequential),
            "parallel" => Ok(BuildStrategy::Parallel),
            "cached" => Ok(BuildStrategy::Cached),
            "slim" | "slim-image" => Ok(BuildStrategy::SlimImage),
            _ => Err(SimulationError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Tunable constants for the cached and slim-image strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Fraction of build work served from cache (0.0..1.0).
    /// The default of 0.3 gives the "moderate improvement" range of
    /// roughly 1.1x-1.6x over sequential on typical datasets.
    pub cache_hit_ratio: f64,
    /// Fixed cache-lookup overhead added per service.
    pub cache_lookup_cost: f64,
    /// Multiplier applied to every duration under slim images (< 1.0).
    pub slim_factor: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            cache_hit_ratio: 0.3,
            cache_lookup_cost: 0.05,
            slim_factor: 0.7,
        }
    }
}

impl BuildConfig {
    /// Sets the cache hit ratio.
    pub fn with_cache_hit_ratio(mut self, ratio: f64) -> Self {
        self.cache_hit_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-service cache lookup cost.
    pub fn with_cache_lookup_cost(mut self, cost: f64) -> Self {
        self.cache_lookup_cost = cost.max(0.0);
        self
    }

    /// Sets the slim-image duration factor.
    pub fn with_slim_factor(mut self, factor: f64) -> Self {
        self.slim_factor = factor.clamp(0.0, 1.0);
        self
    }
}

/// Metrics for one (strategy, dataset) build run.
///
/// Created once per simulation invocation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResult {
    /// Strategy that produced this result.
    pub strategy: BuildStrategy,
    /// Total elapsed build time.
    pub total_time: f64,
    /// Sequential total ÷ this total.
    pub speedup: f64,
    /// Speedup ÷ workers used.
    pub efficiency: f64,
}

/// Simulates one build run over the given services.
///
/// Validation: any negative duration is rejected before simulation.
pub fn simulate_build(
    services: &[Service],
    strategy: BuildStrategy,
    config: &BuildConfig,
) -> SimResult<BuildResult> {
    for service in services {
        if service.duration < 0.0 {
            return Err(SimulationError::NegativeDuration {
                id: service.id.clone(),
                duration: service.duration,
            });
        }
    }

    let sequential: f64 = services.iter().map(|s| s.duration).sum();
    let total_time = match strategy {
        BuildStrategy::Sequential => sequential,
        BuildStrategy::Parallel => services.iter().map(|s| s.duration).fold(0.0, f64::max),
        BuildStrategy::Cached => {
            sequential * (1.0 - config.cache_hit_ratio)
                + config.cache_lookup_cost * services.len() as f64
        }
        BuildStrategy::SlimImage => sequential * config.slim_factor,
    };

    let speedup = metrics::speedup(sequential, total_time);
    let workers = match strategy {
        BuildStrategy::Parallel => services.len(),
        _ => services.len().min(1),
    };
    let efficiency = metrics::efficiency(speedup, workers);

    Ok(BuildResult {
        strategy,
        total_time,
        speedup,
        efficiency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services(durations: &[f64]) -> Vec<Service> {
        durations
            .iter()
            .enumerate()
            .map(|(i, &d)| Service::new(format!("svc{i}"), d))
            .collect()
    }

    #[test]
    fn test_sequential() {
        let result = simulate_build(
            &services(&[2.0, 4.0, 6.0]),
            BuildStrategy::Sequential,
            &BuildConfig::default(),
        )
        .unwrap();
        assert_eq!(result.total_time, 12.0);
        assert_eq!(result.speedup, 1.0);
        assert_eq!(result.efficiency, 1.0);
    }

    #[test]
    fn test_parallel_scenario() {
        // [2,4,6] → total 6, speedup 2.0, efficiency ≈ 0.667
        let result = simulate_build(
            &services(&[2.0, 4.0, 6.0]),
            BuildStrategy::Parallel,
            &BuildConfig::default(),
        )
        .unwrap();
        assert_eq!(result.total_time, 6.0);
        assert!((result.speedup - 2.0).abs() < 1e-12);
        assert!((result.efficiency - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sequential_never_beats_parallel() {
        let set = services(&[1.0, 3.0, 5.0, 2.0]);
        let config = BuildConfig::default();
        let seq = simulate_build(&set, BuildStrategy::Sequential, &config).unwrap();
        let par = simulate_build(&set, BuildStrategy::Parallel, &config).unwrap();
        assert!(seq.total_time > par.total_time);

        // Equality only for a single service
        let single = services(&[7.0]);
        let seq = simulate_build(&single, BuildStrategy::Sequential, &config).unwrap();
        let par = simulate_build(&single, BuildStrategy::Parallel, &config).unwrap();
        assert_eq!(seq.total_time, par.total_time);
        assert_eq!(par.efficiency, 1.0);
    }

    #[test]
    fn test_parallel_efficiency_equal_durations() {
        let result = simulate_build(
            &services(&[4.0, 4.0, 4.0, 4.0]),
            BuildStrategy::Parallel,
            &BuildConfig::default(),
        )
        .unwrap();
        assert!((result.efficiency - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cached_moderate_speedup() {
        let result = simulate_build(
            &services(&[5.0, 5.0, 5.0, 5.0, 5.0]),
            BuildStrategy::Cached,
            &BuildConfig::default(),
        )
        .unwrap();
        // 25 * 0.7 + 0.05 * 5 = 17.75 → speedup ≈ 1.41
        assert!((result.total_time - 17.75).abs() < 1e-12);
        assert!(result.speedup > 1.1 && result.speedup < 1.6);
    }

    #[test]
    fn test_slim_image_stable_speedup() {
        let config = BuildConfig::default();
        let small = simulate_build(&services(&[2.0, 3.0]), BuildStrategy::SlimImage, &config)
            .unwrap();
        let large = simulate_build(
            &services(&[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
            BuildStrategy::SlimImage,
            &config,
        )
        .unwrap();
        // Speedup is 1/slim_factor regardless of dataset size
        assert!((small.speedup - 1.0 / 0.7).abs() < 1e-12);
        assert!((small.speedup - large.speedup).abs() < 1e-12);
    }

    #[test]
    fn test_empty_service_set() {
        for strategy in BuildStrategy::ALL {
            let result = simulate_build(&[], strategy, &BuildConfig::default()).unwrap();
            assert_eq!(result.total_time, 0.0);
            assert_eq!(result.speedup, 1.0);
            assert_eq!(result.efficiency, 1.0);
        }
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = simulate_build(
            &[Service::new("bad", -1.0)],
            BuildStrategy::Sequential,
            &BuildConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::NegativeDuration { .. }));
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "parallel".parse::<BuildStrategy>().unwrap(),
            BuildStrategy::Parallel
        );
        assert_eq!(
            "Slim-Image".parse::<BuildStrategy>().unwrap(),
            BuildStrategy::SlimImage
        );
        assert!(matches!(
            "fastest".parse::<BuildStrategy>(),
            Err(SimulationError::UnknownStrategy(_))
        ));
    }
}
