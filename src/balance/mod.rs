//! Load-balancing stage simulator.
//!
//! Replays an ordered request sequence against a fresh server pool,
//! assigning each request to exactly one server under the chosen
//! strategy, then computes load statistics over the final per-server
//! loads. Statistics are computed identically for every strategy so
//! they compare on equal footing.
//!
//! # Strategies
//!
//! - **Round Robin**: request i → server (i mod n); stateless counter.
//! - **Least Connections**: lowest accumulated load, ties to the lowest
//!   server index.
//! - **Random**: uniform choice from the injected RNG.
//! - **Genetic Algorithm**: offline assignment optimization, see [`ga`].
//! - **Reinforced Round Robin**: epsilon-greedy Q-value routing where
//!   the reward decays with the chosen server's connection count.
//!
//! All stochastic strategies draw from the caller's RNG, so runs are
//! reproducible under a fixed seed.

pub mod ga;

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimResult, SimulationError};
use crate::metrics;
use crate::models::{Request, Server};

pub use ga::GaConfig;

/// Parameters for the reinforced round-robin strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RrbConfig {
    /// Probability of exploring a random server instead of the best Q.
    pub epsilon: f64,
    /// Q-value learning rate.
    pub learning_rate: f64,
    /// Response-time penalty per active connection.
    pub load_penalty: f64,
}

impl Default for RrbConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            learning_rate: 0.2,
            load_penalty: 0.15,
        }
    }
}

impl RrbConfig {
    /// Sets the exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.clamp(0.0, 1.0);
        self
    }

    /// Sets the learning rate.
    pub fn with_learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate.clamp(0.0, 1.0);
        self
    }
}

/// Load-balancing strategy.
///
/// A closed set: the simulator dispatches exhaustively over these
/// variants, and unknown names fail at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BalanceStrategy {
    /// Cyclic assignment by arrival order.
    RoundRobin,
    /// Lowest accumulated load wins, ties to the lowest index.
    LeastConnections,
    /// Uniform random server choice.
    Random,
    /// Offline genetic-algorithm assignment.
    Genetic(GaConfig),
    /// Epsilon-greedy Q-value routing.
    ReinforcedRoundRobin(RrbConfig),
}

impl BalanceStrategy {
    /// The strategies compared by the runner, with default parameters.
    pub fn all_default() -> Vec<BalanceStrategy> {
        vec![
            BalanceStrategy::RoundRobin,
            BalanceStrategy::LeastConnections,
            BalanceStrategy::Random,
            BalanceStrategy::Genetic(GaConfig::default()),
            BalanceStrategy::ReinforcedRoundRobin(RrbConfig::default()),
        ]
    }

    /// Display name used in reporter records.
    pub fn name(&self) -> &'static str {
        match self {
            BalanceStrategy::RoundRobin => "Round Robin",
            BalanceStrategy::LeastConnections => "Least Connections",
            BalanceStrategy::Random => "Random",
            BalanceStrategy::Genetic(_) => "Genetic Algorithm",
            BalanceStrategy::ReinforcedRoundRobin(_) => "Reinforced Round Robin",
        }
    }
}

impl FromStr for BalanceStrategy {
    type Err = SimulationError;

    /// Parses a strategy name; parameterized strategies get defaults.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "round-robin" | "roundrobin" => Ok(BalanceStrategy::RoundRobin),
            "least-connections" => Ok(BalanceStrategy::LeastConnections),
            "random" => Ok(BalanceStrategy::Random),
            "genetic" => Ok(BalanceStrategy::Genetic(GaConfig::default())),
            "reinforced" | "rrb" => {
                Ok(BalanceStrategy::ReinforcedRoundRobin(RrbConfig::default()))
            }
            _ => Err(SimulationError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Load statistics for one (strategy, dataset) balancing run.
///
/// Created once per simulation invocation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
    /// Name of the strategy that produced this result.
    pub strategy: String,
    /// Final per-server load vector.
    pub loads: Vec<f64>,
    /// Mean server load.
    pub average_load: f64,
    /// Heaviest server load.
    pub max_load: f64,
    /// Lightest server load.
    pub min_load: f64,
    /// Population variance of the loads.
    pub variance: f64,
    /// Jain's fairness index over the loads.
    pub fairness_index: f64,
    /// Absolute spread: max − min.
    pub imbalance: f64,
}

impl LoadResult {
    fn from_loads(strategy: &BalanceStrategy, loads: Vec<f64>) -> Self {
        Self {
            strategy: strategy.name().to_string(),
            average_load: metrics::mean(&loads),
            max_load: loads.iter().copied().fold(0.0, f64::max),
            min_load: loads.iter().copied().fold(f64::INFINITY, f64::min),
            variance: metrics::variance(&loads),
            fairness_index: metrics::fairness_index(&loads),
            imbalance: metrics::imbalance(&loads),
            loads,
        }
    }
}

/// Simulates one load-balancing run.
///
/// Builds a fresh server pool, replays the request sequence once, and
/// reports statistics over the final loads. Deterministic strategies
/// never touch the RNG.
///
/// Validation: a zero server count and negative request costs are
/// rejected before any assignment happens.
pub fn simulate_load_balance<R: Rng>(
    requests: &[Request],
    server_count: usize,
    strategy: &BalanceStrategy,
    rng: &mut R,
) -> SimResult<LoadResult> {
    if server_count == 0 {
        return Err(SimulationError::NoServers);
    }
    for request in requests {
        if request.cost < 0.0 {
            return Err(SimulationError::NegativeCost {
                id: request.id.clone(),
                cost: request.cost,
            });
        }
    }

    let pool = match strategy {
        BalanceStrategy::RoundRobin => round_robin(requests, server_count),
        BalanceStrategy::LeastConnections => least_connections(requests, server_count),
        BalanceStrategy::Random => random(requests, server_count, rng),
        BalanceStrategy::Genetic(config) => genetic(requests, server_count, config, rng),
        BalanceStrategy::ReinforcedRoundRobin(config) => {
            reinforced_round_robin(requests, server_count, config, rng)
        }
    };

    let loads: Vec<f64> = pool.iter().map(|s| s.load).collect();
    Ok(LoadResult::from_loads(strategy, loads))
}

fn round_robin(requests: &[Request], server_count: usize) -> Vec<Server> {
    let mut pool = Server::pool(server_count);
    for (i, request) in requests.iter().enumerate() {
        pool[i % server_count].assign(request.cost);
    }
    pool
}

fn least_connections(requests: &[Request], server_count: usize) -> Vec<Server> {
    let mut pool = Server::pool(server_count);
    for request in requests {
        // Strict less-than keeps the lowest index on ties.
        let mut best = 0;
        for i in 1..pool.len() {
            if pool[i].load < pool[best].load {
                best = i;
            }
        }
        pool[best].assign(request.cost);
    }
    pool
}

fn random<R: Rng>(requests: &[Request], server_count: usize, rng: &mut R) -> Vec<Server> {
    let mut pool = Server::pool(server_count);
    for request in requests {
        let idx = rng.random_range(0..server_count);
        pool[idx].assign(request.cost);
    }
    pool
}

fn genetic<R: Rng>(
    requests: &[Request],
    server_count: usize,
    config: &GaConfig,
    rng: &mut R,
) -> Vec<Server> {
    let assignment = ga::optimize(requests, server_count, config, rng);
    let mut pool = Server::pool(server_count);
    for (gene, request) in assignment.iter().zip(requests) {
        pool[*gene].assign(request.cost);
    }
    pool
}

fn reinforced_round_robin<R: Rng>(
    requests: &[Request],
    server_count: usize,
    config: &RrbConfig,
    rng: &mut R,
) -> Vec<Server> {
    let mut pool = Server::pool(server_count);
    let mut q = vec![1.0f64; server_count];

    for request in requests {
        let idx = if rng.random_bool(config.epsilon) {
            rng.random_range(0..server_count)
        } else {
            // Strict greater-than keeps the lowest index on ties.
            let mut best = 0;
            for i in 1..server_count {
                if q[i] > q[best] {
                    best = i;
                }
            }
            best
        };

        // Simulated response time grows with active connections.
        let response = 1.0 + config.load_penalty * pool[idx].connections as f64;
        let reward = 1.0 / response;
        q[idx] += config.learning_rate * (reward - q[idx]);
        pool[idx].assign(request.cost);
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn conservation_holds(requests: &[Request], result: &LoadResult) -> bool {
        let assigned: f64 = result.loads.iter().sum();
        let offered: f64 = requests.iter().map(|r| r.cost).sum();
        (assigned - offered).abs() < 1e-9
    }

    #[test]
    fn test_round_robin_scenario() {
        // 6 unit requests over 3 servers land evenly: [2,2,2]
        let requests = Request::unit_batch(6);
        let mut rng = SmallRng::seed_from_u64(0);
        let result =
            simulate_load_balance(&requests, 3, &BalanceStrategy::RoundRobin, &mut rng).unwrap();
        assert_eq!(result.loads, vec![2.0, 2.0, 2.0]);
        assert!((result.fairness_index - 1.0).abs() < 1e-12);
        assert_eq!(result.imbalance, 0.0);
        assert_eq!(result.average_load, 2.0);
    }

    #[test]
    fn test_least_connections_balances_uneven_costs() {
        let requests = vec![
            Request::new("r0", 5.0),
            Request::new("r1", 1.0),
            Request::new("r2", 1.0),
            Request::new("r3", 1.0),
        ];
        let mut rng = SmallRng::seed_from_u64(0);
        let result =
            simulate_load_balance(&requests, 2, &BalanceStrategy::LeastConnections, &mut rng)
                .unwrap();
        // r0 → s0 (tie, lowest index); r1..r3 all land on s1 while it is lighter
        assert_eq!(result.loads, vec![5.0, 3.0]);
        assert!(conservation_holds(&requests, &result));
    }

    #[test]
    fn test_least_connections_tie_breaks_to_lowest_index() {
        let requests = Request::unit_batch(3);
        let mut rng = SmallRng::seed_from_u64(0);
        let result =
            simulate_load_balance(&requests, 3, &BalanceStrategy::LeastConnections, &mut rng)
                .unwrap();
        assert_eq!(result.loads, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_random_reproducible_and_conserving() {
        let requests = Request::unit_batch(50);
        let a = simulate_load_balance(
            &requests,
            4,
            &BalanceStrategy::Random,
            &mut SmallRng::seed_from_u64(42),
        )
        .unwrap();
        let b = simulate_load_balance(
            &requests,
            4,
            &BalanceStrategy::Random,
            &mut SmallRng::seed_from_u64(42),
        )
        .unwrap();
        assert_eq!(a.loads, b.loads);
        assert!(conservation_holds(&requests, &a));
    }

    #[test]
    fn test_conservation_all_strategies() {
        let requests: Vec<Request> = (0..24)
            .map(|i| Request::new(format!("r{i}"), 0.5 + (i % 5) as f64))
            .collect();
        for strategy in BalanceStrategy::all_default() {
            let mut rng = SmallRng::seed_from_u64(9);
            let result = simulate_load_balance(&requests, 4, &strategy, &mut rng).unwrap();
            assert!(
                conservation_holds(&requests, &result),
                "conservation violated by {}",
                strategy.name()
            );
            assert!(result.fairness_index > 0.0 && result.fairness_index <= 1.0);
        }
    }

    #[test]
    fn test_genetic_beats_random_on_variance() {
        let requests: Vec<Request> = (0..30)
            .map(|i| Request::new(format!("r{i}"), 1.0 + (i % 4) as f64))
            .collect();
        let random = simulate_load_balance(
            &requests,
            5,
            &BalanceStrategy::Random,
            &mut SmallRng::seed_from_u64(3),
        )
        .unwrap();
        let genetic = simulate_load_balance(
            &requests,
            5,
            &BalanceStrategy::Genetic(GaConfig::default()),
            &mut SmallRng::seed_from_u64(3),
        )
        .unwrap();
        assert!(genetic.variance <= random.variance);
    }

    #[test]
    fn test_rrb_spreads_load() {
        let requests = Request::unit_batch(60);
        let mut rng = SmallRng::seed_from_u64(11);
        let result = simulate_load_balance(
            &requests,
            3,
            &BalanceStrategy::ReinforcedRoundRobin(RrbConfig::default()),
            &mut rng,
        )
        .unwrap();
        assert!(conservation_holds(&requests, &result));
        // Q decay pushes traffic off busy servers; no server starves.
        assert!(result.min_load > 0.0);
    }

    #[test]
    fn test_zero_servers_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);
        let err = simulate_load_balance(
            &Request::unit_batch(2),
            0,
            &BalanceStrategy::RoundRobin,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, SimulationError::NoServers);
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);
        let err = simulate_load_balance(
            &[Request::new("bad", -1.0)],
            2,
            &BalanceStrategy::RoundRobin,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::NegativeCost { .. }));
    }

    #[test]
    fn test_empty_requests() {
        let mut rng = SmallRng::seed_from_u64(0);
        let result =
            simulate_load_balance(&[], 3, &BalanceStrategy::LeastConnections, &mut rng).unwrap();
        assert_eq!(result.loads, vec![0.0, 0.0, 0.0]);
        assert_eq!(result.fairness_index, 1.0);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "round-robin".parse::<BalanceStrategy>().unwrap(),
            BalanceStrategy::RoundRobin
        );
        assert_eq!(
            "genetic".parse::<BalanceStrategy>().unwrap(),
            BalanceStrategy::Genetic(GaConfig::default())
        );
        assert!(matches!(
            "weighted".parse::<BalanceStrategy>(),
            Err(SimulationError::UnknownStrategy(_))
        ));
    }
}
