//! Scheduling stage simulator.
//!
//! Replays a process set through a single-CPU dispatch state machine
//! (Unarrived → Waiting → Running → Completed; preemptive policies may
//! bounce Running → Waiting) and reports per-process and average
//! waiting, turnaround, and response times.
//!
//! # Policies
//!
//! - **FCFS**: strictly by arrival time, non-preemptive.
//! - **SJF**: shortest burst among the arrived, non-preemptive.
//! - **SRTF**: preemptive SJF; the CPU switches at arrival events when
//!   a newcomer's remaining time is strictly shorter.
//! - **HRRN**: highest response ratio (waiting + burst) / burst;
//!   waiting time grows every ratio monotonically, so no process
//!   starves.
//!
//! # Tie-breaks
//!
//! Equal keys resolve by arrival time, then by input order. Given
//! identical (arrival, burst) tuples the whole schedule is exactly
//! reproducible.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SimResult, SimulationError};
use crate::models::Process;

/// CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleStrategy {
    /// First Come First Served.
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Shortest Remaining Time First (preemptive SJF).
    Srtf,
    /// Highest Response Ratio Next.
    Hrrn,
}

impl ScheduleStrategy {
    /// All policies, in comparison order.
    pub const ALL: [ScheduleStrategy; 4] = [
        ScheduleStrategy::Fcfs,
        ScheduleStrategy::Sjf,
        ScheduleStrategy::Srtf,
        ScheduleStrategy::Hrrn,
    ];

    /// Display name used in reporter records.
    pub fn name(&self) -> &'static str {
        match self {
            ScheduleStrategy::Fcfs => "FCFS",
            ScheduleStrategy::Sjf => "SJF",
            ScheduleStrategy::Srtf => "SRTF",
            ScheduleStrategy::Hrrn => "HRRN",
        }
    }
}

impl FromStr for ScheduleStrategy {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(ScheduleStrategy::Fcfs),
            "sjf" => Ok(ScheduleStrategy::Sjf),
            "srtf" => Ok(ScheduleStrategy::Srtf),
            "hrrn" => Ok(ScheduleStrategy::Hrrn),
            _ => Err(SimulationError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Timing outcome of a single process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub id: String,
    /// Time the process finished (ticks).
    pub completion: i64,
    /// completion − arrival.
    pub turnaround: i64,
    /// Total time spent ready-but-not-running.
    pub waiting: i64,
    /// first dispatch − arrival.
    pub response: i64,
}

/// Aggregate metrics for one (policy, dataset) scheduling run.
///
/// Created once per simulation invocation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Name of the policy that produced this result.
    pub strategy: String,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Per-process timing table, in input order.
    pub per_process: Vec<ProcessMetrics>,
}

/// Per-process run state, built fresh for every simulation call.
struct ProcState {
    arrival: i64,
    burst: i64,
    remaining: i64,
    first_dispatch: Option<i64>,
    completion: i64,
}

impl ProcState {
    fn new(p: &Process) -> Self {
        Self {
            arrival: p.arrival,
            burst: p.burst,
            remaining: p.burst,
            first_dispatch: None,
            completion: 0,
        }
    }

    fn done(&self) -> bool {
        self.remaining == 0
    }
}

/// Simulates one scheduling run over the given processes.
///
/// Validation: the set must be non-empty, arrivals must be >= 0, and
/// bursts must be > 0 (HRRN divides by burst).
pub fn simulate_schedule(
    processes: &[Process],
    strategy: ScheduleStrategy,
) -> SimResult<ScheduleResult> {
    if processes.is_empty() {
        return Err(SimulationError::EmptyProcessSet);
    }
    for p in processes {
        if p.arrival < 0 {
            return Err(SimulationError::NegativeArrival {
                id: p.id.clone(),
                arrival: p.arrival,
            });
        }
        if p.burst <= 0 {
            return Err(SimulationError::NonPositiveBurst {
                id: p.id.clone(),
                burst: p.burst,
            });
        }
    }

    let mut states: Vec<ProcState> = processes.iter().map(ProcState::new).collect();
    match strategy {
        ScheduleStrategy::Fcfs => run_fcfs(&mut states),
        ScheduleStrategy::Sjf => run_sjf(&mut states),
        ScheduleStrategy::Srtf => run_srtf(&mut states),
        ScheduleStrategy::Hrrn => run_hrrn(&mut states),
    }

    let per_process: Vec<ProcessMetrics> = processes
        .iter()
        .zip(&states)
        .map(|(p, s)| {
            let turnaround = s.completion - s.arrival;
            ProcessMetrics {
                id: p.id.clone(),
                completion: s.completion,
                turnaround,
                waiting: turnaround - s.burst,
                response: s.first_dispatch.unwrap_or(s.arrival) - s.arrival,
            }
        })
        .collect();

    let n = per_process.len() as f64;
    Ok(ScheduleResult {
        strategy: strategy.name().to_string(),
        avg_waiting: per_process.iter().map(|m| m.waiting as f64).sum::<f64>() / n,
        avg_turnaround: per_process.iter().map(|m| m.turnaround as f64).sum::<f64>() / n,
        avg_response: per_process.iter().map(|m| m.response as f64).sum::<f64>() / n,
        per_process,
    })
}

fn run_fcfs(states: &mut [ProcState]) {
    let mut order: Vec<usize> = (0..states.len()).collect();
    // sort_by_key is stable: equal arrivals keep input order.
    order.sort_by_key(|&i| states[i].arrival);

    let mut time = 0i64;
    for &i in &order {
        let s = &mut states[i];
        time = time.max(s.arrival);
        s.first_dispatch = Some(time);
        time += s.burst;
        s.completion = time;
        s.remaining = 0;
    }
}

/// Index of the next waiting process at `time`, by the given key, with
/// (arrival, input order) tie-breaks. `None` when nothing has arrived.
fn pick_waiting<K>(states: &[ProcState], time: i64, key: K) -> Option<usize>
where
    K: Fn(&ProcState) -> i64,
{
    let mut best: Option<usize> = None;
    for (i, s) in states.iter().enumerate() {
        if s.done() || s.arrival > time {
            continue;
        }
        best = match best {
            None => Some(i),
            Some(b) => {
                let better = (key(s), s.arrival) < (key(&states[b]), states[b].arrival);
                if better { Some(i) } else { Some(b) }
            }
        };
    }
    best
}

/// Earliest arrival among unfinished processes (the idle-CPU jump target).
fn next_arrival(states: &[ProcState]) -> i64 {
    states
        .iter()
        .filter(|s| !s.done())
        .map(|s| s.arrival)
        .min()
        .unwrap_or(0)
}

fn run_sjf(states: &mut [ProcState]) {
    let mut time = 0i64;
    let mut completed = 0;
    while completed < states.len() {
        match pick_waiting(states, time, |s| s.burst) {
            None => time = next_arrival(states),
            Some(i) => {
                let s = &mut states[i];
                s.first_dispatch = Some(time);
                time += s.burst;
                s.completion = time;
                s.remaining = 0;
                completed += 1;
            }
        }
    }
}

fn run_srtf(states: &mut [ProcState]) {
    let mut time = 0i64;
    let mut completed = 0;
    while completed < states.len() {
        // Re-decide at every arrival and completion event. The
        // (remaining, arrival) key means an incumbent with equal
        // remaining time keeps the CPU: a newcomer must be strictly
        // shorter to preempt.
        match pick_waiting(states, time, |s| s.remaining) {
            None => time = next_arrival(states),
            Some(i) => {
                if states[i].first_dispatch.is_none() {
                    states[i].first_dispatch = Some(time);
                }
                let finish = time + states[i].remaining;
                let preempt_at = states
                    .iter()
                    .filter(|s| !s.done() && s.arrival > time)
                    .map(|s| s.arrival)
                    .min()
                    .map_or(finish, |a| finish.min(a));

                states[i].remaining -= preempt_at - time;
                time = preempt_at;
                if states[i].done() {
                    states[i].completion = time;
                    completed += 1;
                }
            }
        }
    }
}

fn run_hrrn(states: &mut [ProcState]) {
    let mut time = 0i64;
    let mut completed = 0;
    while completed < states.len() {
        // Response ratio = (waiting + burst) / burst. Scores are
        // compared as f64; ties resolve by (arrival, input order) via
        // the strict comparison below.
        let mut best: Option<(usize, f64)> = None;
        for (i, s) in states.iter().enumerate() {
            if s.done() || s.arrival > time {
                continue;
            }
            let ratio = ((time - s.arrival + s.burst) as f64) / s.burst as f64;
            let beats = match best {
                None => true,
                Some((b, best_ratio)) => {
                    ratio > best_ratio
                        || (ratio == best_ratio && s.arrival < states[b].arrival)
                }
            };
            if beats {
                best = Some((i, ratio));
            }
        }

        match best {
            None => time = next_arrival(states),
            Some((i, _)) => {
                let s = &mut states[i];
                s.first_dispatch = Some(time);
                time += s.burst;
                s.completion = time;
                s.remaining = 0;
                completed += 1;
            }
        }
    }
}
