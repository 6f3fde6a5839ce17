//! Reporter-facing flat records.
//!
//! The external reporter appends one flat record per (stage, strategy,
//! dataset size) to a tabular log. The core's only obligation is a
//! stable field order, fixed here by struct declaration order; fields
//! that do not apply to a stage are `None`. File formats, CLI flags,
//! and plotting belong to the reporter, not this crate.

use serde::{Deserialize, Serialize};

use crate::balance::LoadResult;
use crate::build::BuildResult;
use crate::schedule::ScheduleResult;

/// Pipeline stage a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Build execution stage.
    Build,
    /// Load-balancing stage.
    LoadBalancing,
    /// Task-scheduling stage.
    Scheduling,
}

impl Stage {
    /// Display name used in the tabular log.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Build => "Build",
            Stage::LoadBalancing => "LoadBalancing",
            Stage::Scheduling => "Scheduling",
        }
    }
}

/// One row of the comparison log.
///
/// Serialization preserves this exact field order, so downstream
/// tabular writers see stable columns across releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    /// Stage the record belongs to.
    pub stage: Stage,
    /// Strategy display name.
    pub strategy: String,
    /// Number of input records (services, requests, or processes).
    pub dataset_size: usize,
    /// Build: total elapsed time.
    pub total_time: Option<f64>,
    /// Build: speedup over the sequential baseline.
    pub speedup: Option<f64>,
    /// Build: speedup per worker.
    pub efficiency: Option<f64>,
    /// Load balancing: mean server load.
    pub avg_load: Option<f64>,
    /// Load balancing: heaviest server load.
    pub max_load: Option<f64>,
    /// Load balancing: lightest server load.
    pub min_load: Option<f64>,
    /// Load balancing: load variance.
    pub variance: Option<f64>,
    /// Load balancing: Jain's fairness index.
    pub fairness_index: Option<f64>,
    /// Load balancing: max − min load spread.
    pub load_imbalance: Option<f64>,
    /// Scheduling: mean waiting time.
    pub avg_waiting: Option<f64>,
    /// Scheduling: mean turnaround time.
    pub avg_turnaround: Option<f64>,
    /// Scheduling: mean response time.
    pub avg_response: Option<f64>,
}

impl StageRecord {
    fn empty(stage: Stage, strategy: &str, dataset_size: usize) -> Self {
        Self {
            stage,
            strategy: strategy.to_string(),
            dataset_size,
            total_time: None,
            speedup: None,
            efficiency: None,
            avg_load: None,
            max_load: None,
            min_load: None,
            variance: None,
            fairness_index: None,
            load_imbalance: None,
            avg_waiting: None,
            avg_turnaround: None,
            avg_response: None,
        }
    }

    /// Builds a record from a build-stage result.
    pub fn from_build(result: &BuildResult, dataset_size: usize) -> Self {
        let mut record = Self::empty(Stage::Build, result.strategy.name(), dataset_size);
        record.total_time = Some(result.total_time);
        record.speedup = Some(result.speedup);
        record.efficiency = Some(result.efficiency);
        record
    }

    /// Builds a record from a load-balancing result.
    pub fn from_load(result: &LoadResult, dataset_size: usize) -> Self {
        let mut record = Self::empty(Stage::LoadBalancing, &result.strategy, dataset_size);
        record.avg_load = Some(result.average_load);
        record.max_load = Some(result.max_load);
        record.min_load = Some(result.min_load);
        record.variance = Some(result.variance);
        record.fairness_index = Some(result.fairness_index);
        record.load_imbalance = Some(result.imbalance);
        record
    }

    /// Builds a record from a scheduling result.
    pub fn from_schedule(result: &ScheduleResult, dataset_size: usize) -> Self {
        let mut record = Self::empty(Stage::Scheduling, &result.strategy, dataset_size);
        record.avg_waiting = Some(result.avg_waiting);
        record.avg_turnaround = Some(result.avg_turnaround);
        record.avg_response = Some(result.avg_response);
        record
    }
}
