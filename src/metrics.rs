//! Load and speedup metric utilities.
//!
//! Pure functions over numeric slices, shared by all three stage
//! simulators so that strategies are compared on identical footing.
//!
//! # Conventions
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Variance | Population variance (divide by n) |
//! | Fairness | Jain's index: (Σx)² / (n·Σx²) |
//! | Imbalance | Absolute spread: max − min |
//! | Speedup | baseline ÷ candidate total time |
//! | Efficiency | speedup ÷ worker count |
//!
//! Degenerate inputs follow the neutral conventions documented on each
//! function: an empty or all-zero load vector is perfectly fair (1.0),
//! and a zero-duration run reports speedup 1.0.
//!
//! # Reference
//! Jain et al. (1984), "A Quantitative Measure of Fairness"

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance. Returns 0.0 for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation. Returns 0.0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Jain's fairness index over a load vector.
///
/// Always in (0.0, 1.0]: 1.0 means perfectly equal loads, values near
/// 1/n mean one server carries everything. Empty and all-zero vectors
/// are perfectly fair by convention.
pub fn fairness_index(values: &[f64]) -> f64 {
    let sum_sq: f64 = values.iter().map(|v| v * v).sum();
    if values.is_empty() || sum_sq == 0.0 {
        return 1.0;
    }
    let total: f64 = values.iter().sum();
    (total * total) / (values.len() as f64 * sum_sq)
}

/// Load imbalance: absolute spread (max − min) over the vector.
///
/// Returns 0.0 for an empty slice. The normalized variant
/// ((max − min) / average) is deliberately not used; this crate applies
/// the absolute convention uniformly.
pub fn imbalance(values: &[f64]) -> f64 {
    let mut iter = values.iter();
    let first = match iter.next() {
        Some(&v) => v,
        None => return 0.0,
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    max - min
}

/// Speedup of a candidate run against a baseline total time.
///
/// A zero-length candidate run (only possible when the dataset itself is
/// empty) reports 1.0 by convention.
pub fn speedup(baseline: f64, candidate: f64) -> f64 {
    if candidate <= 0.0 {
        return 1.0;
    }
    baseline / candidate
}

/// Efficiency: speedup normalized by the number of workers used.
///
/// Bounded in (0.0, 1.0] under ideal scaling. Zero workers (empty
/// dataset) reports 1.0 by convention.
pub fn efficiency(speedup: f64, workers: usize) -> f64 {
    if workers == 0 {
        return 1.0;
    }
    speedup / workers as f64
}
