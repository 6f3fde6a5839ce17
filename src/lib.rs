//! Discrete-event comparison simulator for a cloud CI/CD pipeline.
//!
//! Compares named strategies within three pipeline stages under
//! synthetic workloads: build execution, load balancing, and CPU-style
//! task scheduling. Nothing real is built or routed — the simulators
//! are pure computations over declared durations and costs, quantified
//! through standard metrics (speedup, efficiency, Jain's fairness,
//! waiting/turnaround/response times).
//!
//! # Modules
//!
//! - **`models`**: Stage inputs — `Service`, `Request`, `Server`, `Process`
//! - **`metrics`**: Variance, fairness, imbalance, speedup, efficiency
//! - **`build`**: Sequential / Parallel / Cached / Slim-Image builds
//! - **`balance`**: Round Robin, Least Connections, Random, Genetic, RRB
//! - **`schedule`**: FCFS, SJF, SRTF, HRRN
//! - **`report`**: Flat per-run records for the external reporter
//! - **`dataset`**: Seeded synthetic workload generators
//! - **`runner`**: Strategy sweeps across dataset sizes
//!
//! # Determinism
//!
//! Every simulator is a synchronous, terminating computation. The
//! stochastic strategies (Random, Genetic, Reinforced Round Robin) draw
//! from a caller-supplied RNG, so any run is reproducible from a seed.
//! Invocations share no state: each builds its server pool and process
//! table fresh, so callers may parallelize (strategy, dataset)
//! combinations freely.

pub mod balance;
pub mod build;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod report;
pub mod runner;
pub mod schedule;
