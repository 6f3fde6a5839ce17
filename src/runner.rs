//! Strategy comparison driver.
//!
//! Runs every strategy of a stage over one dataset, and sweeps stages
//! across dataset sizes into reporter records. Pure computation: the
//! external reporter owns persistence and plotting.
//!
//! Each simulator call builds its own fresh state, so a caller may also
//! fan the (strategy, dataset) combinations out across threads; nothing
//! here is shared between invocations.

use rand::Rng;

use crate::balance::{simulate_load_balance, BalanceStrategy, LoadResult};
use crate::build::{simulate_build, BuildConfig, BuildResult, BuildStrategy};
use crate::dataset;
use crate::error::SimResult;
use crate::models::{Process, Request, Service};
use crate::report::StageRecord;
use crate::schedule::{simulate_schedule, ScheduleResult, ScheduleStrategy};

/// Runs all four build strategies over one service set.
pub fn compare_build(services: &[Service], config: &BuildConfig) -> SimResult<Vec<BuildResult>> {
    BuildStrategy::ALL
        .iter()
        .map(|&strategy| simulate_build(services, strategy, config))
        .collect()
}

/// Runs every balancing strategy (with default parameters) over one
/// request sequence.
pub fn compare_balance<R: Rng>(
    requests: &[Request],
    server_count: usize,
    rng: &mut R,
) -> SimResult<Vec<LoadResult>> {
    BalanceStrategy::all_default()
        .iter()
        .map(|strategy| simulate_load_balance(requests, server_count, strategy, rng))
        .collect()
}

/// Runs all four scheduling policies over one process set.
pub fn compare_schedule(processes: &[Process]) -> SimResult<Vec<ScheduleResult>> {
    ScheduleStrategy::ALL
        .iter()
        .map(|&strategy| simulate_schedule(processes, strategy))
        .collect()
}

/// Sweeps all three stages across the given dataset sizes.
///
/// For each size, generates a synthetic dataset from the RNG and runs
/// every strategy of every stage, producing one flat record per
/// (stage, strategy, size) for the external reporter.
pub fn sweep<R: Rng>(
    sizes: &[usize],
    server_count: usize,
    config: &BuildConfig,
    rng: &mut R,
) -> SimResult<Vec<StageRecord>> {
    let mut records = Vec::new();

    for &size in sizes {
        let services = dataset::services(size, rng);
        for result in compare_build(&services, config)? {
            records.push(StageRecord::from_build(&result, size));
        }

        let requests = dataset::requests(size, rng);
        for result in compare_balance(&requests, server_count, rng)? {
            records.push(StageRecord::from_load(&result, size));
        }

        let processes = dataset::processes(size.max(1), rng);
        for result in compare_schedule(&processes)? {
            records.push(StageRecord::from_schedule(&result, size.max(1)));
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::report::Stage;

    #[test]
    fn test_compare_build_covers_all_strategies() {
        let services = vec![Service::new("a", 2.0), Service::new("b", 6.0)];
        let results = compare_build(&services, &BuildConfig::default()).unwrap();
        assert_eq!(results.len(), 4);
        // First entry is the sequential baseline
        assert_eq!(results[0].speedup, 1.0);
        // No strategy is slower than sequential
        for result in &results[1..] {
            assert!(result.total_time <= results[0].total_time);
        }
    }

    #[test]
    fn test_compare_balance_covers_all_strategies() {
        let requests = Request::unit_batch(12);
        let mut rng = SmallRng::seed_from_u64(42);
        let results = compare_balance(&requests, 3, &mut rng).unwrap();
        assert_eq!(results.len(), 5);
        for result in &results {
            let total: f64 = result.loads.iter().sum();
            assert!((total - 12.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_compare_schedule_covers_all_policies() {
        let processes = vec![
            Process::new("p0", 0, 5),
            Process::new("p1", 1, 3),
            Process::new("p2", 2, 1),
        ];
        let results = compare_schedule(&processes).unwrap();
        assert_eq!(results.len(), 4);
        let srtf = results.iter().find(|r| r.strategy == "SRTF").unwrap();
        let sjf = results.iter().find(|r| r.strategy == "SJF").unwrap();
        assert!(srtf.avg_waiting <= sjf.avg_waiting);
    }

    #[test]
    fn test_sweep_record_count() {
        let mut rng = SmallRng::seed_from_u64(42);
        let records = sweep(&[5, 10], 3, &BuildConfig::default(), &mut rng).unwrap();
        // Per size: 4 build + 5 balance + 4 schedule = 13
        assert_eq!(records.len(), 26);
        assert_eq!(
            records.iter().filter(|r| r.stage == Stage::Build).count(),
            8
        );
    }

    #[test]
    fn test_sweep_reproducible() {
        let config = BuildConfig::default();
        let a = sweep(&[8], 4, &config, &mut SmallRng::seed_from_u64(5)).unwrap();
        let b = sweep(&[8], 4, &config, &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }
}
