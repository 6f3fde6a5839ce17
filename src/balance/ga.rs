//! Genetic-algorithm request assignment.
//!
//! # Encoding
//!
//! One gene per request, holding the index of the server that request
//! is routed to. Every request appears exactly once, so work
//! conservation holds by construction and no repair step is needed
//! after crossover.
//!
//! Fitness is the population variance of the resulting per-server load
//! vector; lower is better (minimization convention). The generational
//! loop is elitist: the best chromosomes survive unchanged, the rest of
//! the next population comes from single-point crossover and point
//! mutation over parents drawn from the fitter half.
//!
//! The generation cap is a hard limit; when the budget is exhausted the
//! best-so-far chromosome is returned, never retried.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::models::Request;

/// Genetic algorithm parameters.
///
/// Defaults are sized for request counts in the hundreds; all runs
/// terminate within `max_generations` regardless of convergence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Chromosomes per generation.
    pub population_size: usize,
    /// Hard cap on generations.
    pub max_generations: usize,
    /// Stop early after this many generations without improvement.
    pub stall_generations: usize,
    /// Probability of crossover per offspring pair.
    pub crossover_rate: f64,
    /// Probability of mutating each gene of an offspring.
    pub mutation_rate: f64,
    /// Chromosomes carried over unchanged each generation.
    pub elite_count: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 24,
            max_generations: 60,
            stall_generations: 15,
            crossover_rate: 0.9,
            mutation_rate: 0.05,
            elite_count: 2,
        }
    }
}

impl GaConfig {
    /// Sets the population size (minimum 2).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(2);
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the stall window for early stopping.
    pub fn with_stall_generations(mut self, generations: usize) -> Self {
        self.stall_generations = generations.max(1);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }
}

/// Request-to-server assignment chromosome.
#[derive(Debug, Clone)]
struct Chromosome {
    /// Server index per request.
    genes: Vec<usize>,
    /// Load variance of the decoded assignment (lower = fitter).
    fitness: f64,
}

impl Chromosome {
    fn random<R: Rng>(request_count: usize, server_count: usize, rng: &mut R) -> Self {
        let genes = (0..request_count)
            .map(|_| rng.random_range(0..server_count))
            .collect();
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Decodes the per-server load vector.
    fn loads(&self, requests: &[Request], server_count: usize) -> Vec<f64> {
        let mut loads = vec![0.0; server_count];
        for (gene, request) in self.genes.iter().zip(requests) {
            loads[*gene] += request.cost;
        }
        loads
    }

    fn evaluate(&mut self, requests: &[Request], server_count: usize) {
        self.fitness = metrics::variance(&self.loads(requests, server_count));
    }
}

/// Runs the GA and returns the best assignment found (server index per
/// request). Deterministic for a given RNG state.
pub(super) fn optimize<R: Rng>(
    requests: &[Request],
    server_count: usize,
    config: &GaConfig,
    rng: &mut R,
) -> Vec<usize> {
    if requests.is_empty() {
        return Vec::new();
    }

    let mut population: Vec<Chromosome> = (0..config.population_size.max(2))
        .map(|_| {
            let mut ch = Chromosome::random(requests.len(), server_count, rng);
            ch.evaluate(requests, server_count);
            ch
        })
        .collect();
    sort_by_fitness(&mut population);

    let mut best = population[0].clone();
    let mut stall = 0usize;

    for _ in 0..config.max_generations {
        if stall >= config.stall_generations {
            break;
        }

        let elite = config.elite_count.min(population.len());
        let mut next: Vec<Chromosome> = population[..elite].to_vec();

        // Truncation selection: parents come from the fitter half.
        let parent_pool = (population.len() / 2).max(2).min(population.len());

        while next.len() < population.len() {
            let p1 = &population[rng.random_range(0..parent_pool)];
            let p2 = &population[rng.random_range(0..parent_pool)];

            let (mut g1, mut g2) = if rng.random_bool(config.crossover_rate) {
                single_point_crossover(&p1.genes, &p2.genes, rng)
            } else {
                (p1.genes.clone(), p2.genes.clone())
            };
            point_mutation(&mut g1, server_count, config.mutation_rate, rng);
            point_mutation(&mut g2, server_count, config.mutation_rate, rng);

            for genes in [g1, g2] {
                if next.len() >= population.len() {
                    break;
                }
                let mut child = Chromosome {
                    genes,
                    fitness: f64::INFINITY,
                };
                child.evaluate(requests, server_count);
                next.push(child);
            }
        }

        population = next;
        sort_by_fitness(&mut population);

        if population[0].fitness < best.fitness {
            best = population[0].clone();
            stall = 0;
        } else {
            stall += 1;
        }
    }

    best.genes
}

fn sort_by_fitness(population: &mut [Chromosome]) {
    population.sort_by(|a, b| {
        a.fitness
            .partial_cmp(&b.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Exchanges gene tails at a random cut point.
fn single_point_crossover<R: Rng>(
    p1: &[usize],
    p2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    if p1.len() < 2 {
        return (p1.to_vec(), p2.to_vec());
    }
    let cut = rng.random_range(1..p1.len());
    let mut c1 = p1[..cut].to_vec();
    c1.extend_from_slice(&p2[cut..]);
    let mut c2 = p2[..cut].to_vec();
    c2.extend_from_slice(&p1[cut..]);
    (c1, c2)
}

/// Reassigns each gene to a random server with the given probability.
fn point_mutation<R: Rng>(genes: &mut [usize], server_count: usize, rate: f64, rng: &mut R) {
    for gene in genes {
        if rng.random_bool(rate) {
            *gene = rng.random_range(0..server_count);
        }
    }
}
