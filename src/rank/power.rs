//! Power iteration engine
//!
//! Repeatedly advances a distribution through the transition matrix until
//! two successive distributions agree within a Euclidean tolerance. With a
//! positive damping factor the chain is irreducible and aperiodic, so the
//! iteration converges geometrically to the unique stationary distribution.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::RankedDistribution;
use crate::markov::TransitionMatrix;

/// Power-iteration configuration.
///
/// `damping_factor` is the teleportation probability: the chance the random
/// surfer jumps to a uniformly random page instead of following a link.
/// The complement `1 - damping_factor` is the link-following probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerIteration {
    /// Teleportation probability, expected in [0, 1] (default 0.15)
    pub damping_factor: f64,
    /// Euclidean convergence threshold (default 1e-7)
    ///
    /// This is the only bound on the loop: a tolerance unreachable under
    /// floating-point arithmetic (zero, negative) never terminates, and a
    /// damping factor of 0 on a reducible or periodic graph may oscillate.
    /// Both are caller-controlled inputs, not validated here.
    pub tolerance: f64,
    /// Whether to keep every intermediate distribution
    record_trace: bool,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            damping_factor: 0.15,
            tolerance: 1e-7,
            record_trace: false,
        }
    }
}

impl PowerIteration {
    /// Create a new PowerIteration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping (teleportation) factor
    pub fn with_damping(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set whether intermediate distributions are recorded
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Run power iteration over a web graph.
    ///
    /// `start_distribution` must have one entry per page (`max index + 1`
    /// across the edge list); a wrong length panics at the first
    /// vector-matrix product inside ndarray. The start vector is used
    /// as-is, without renormalization.
    ///
    /// The convergence check always compares the previous two computed
    /// distributions, so the first comparison is the start against the first
    /// step, and a recorded trace holds `iterations + 1` rows beginning with
    /// the start itself.
    pub fn run(&self, edges: &[(u32, u32)], start_distribution: &Array1<f64>) -> RankedDistribution {
        let matrix = TransitionMatrix::from_edges(edges, self.damping_factor);

        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("power_iteration", pages = matrix.page_count()).entered();

        let mut previous = start_distribution.clone();
        let mut current = matrix.step(&previous);
        let mut trace = self
            .record_trace
            .then(|| vec![previous.clone(), current.clone()]);

        let mut iterations = 1;
        let mut delta = euclidean_distance(&current, &previous);

        while delta > self.tolerance {
            let advanced = matrix.step(&current);
            previous = std::mem::replace(&mut current, advanced);
            iterations += 1;

            if let Some(trace) = trace.as_mut() {
                trace.push(current.clone());
            }
            delta = euclidean_distance(&current, &previous);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(iterations, delta, "power iteration converged");

        RankedDistribution {
            distribution: current,
            iterations,
            delta,
            trace: trace.map(|steps| stack_trace(&steps)),
        }
    }
}

/// Compute PageRank with the default damping factor (0.15) and tolerance
/// (1e-7), returning just the converged distribution.
pub fn page_rank(edges: &[(u32, u32)], start_distribution: &Array1<f64>) -> Array1<f64> {
    PowerIteration::new()
        .run(edges, start_distribution)
        .distribution
}

fn euclidean_distance(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Stack the recorded steps into a (steps, pages) matrix.
fn stack_trace(steps: &[Array1<f64>]) -> Array2<f64> {
    let width = steps.first().map_or(0, Array1::len);
    let mut stacked = Array2::zeros((steps.len(), width));
    for (i, step) in steps.iter().enumerate() {
        stacked.row_mut(i).assign(step);
    }
    stacked
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn three_cycle() -> Vec<(u32, u32)> {
        vec![(0, 1), (1, 2), (2, 0)]
    }

    #[test]
    fn test_three_cycle_converges_to_uniform() {
        // A symmetric cycle has the uniform stationary distribution
        // regardless of damping.
        let result = PowerIteration::new().run(&three_cycle(), &array![1.0, 0.0, 0.0]);

        for rank in result.distribution.iter() {
            assert!((rank - 1.0 / 3.0).abs() < 1e-6);
        }
        assert!(result.delta <= 1e-7);
    }

    #[test]
    fn test_converged_distribution_is_stationary() {
        let edges = [(0, 1), (1, 2), (2, 0), (0, 2), (2, 1)];
        let tolerance = 1e-7;
        let result = PowerIteration::new()
            .with_tolerance(tolerance)
            .run(&edges, &array![0.5, 0.25, 0.25]);

        // One more step moves the result by at most the tolerance.
        let matrix = TransitionMatrix::from_edges(&edges, 0.15);
        let advanced = matrix.step(&result.distribution);
        assert!(euclidean_distance(&advanced, &result.distribution) <= tolerance);
    }

    #[test]
    fn test_mass_is_conserved_along_the_trace() {
        let result = PowerIteration::new()
            .with_trace(true)
            .run(&three_cycle(), &array![0.2, 0.3, 0.5]);

        let trace = result.trace.unwrap();
        for step in trace.rows() {
            let mass: f64 = step.sum();
            assert!((mass - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_trace_starts_at_the_start_distribution() {
        let start = array![1.0, 0.0, 0.0];
        let result = PowerIteration::new()
            .with_trace(true)
            .run(&three_cycle(), &start);

        let trace = result.trace.unwrap();
        // First row is the start, exactly as supplied.
        assert_eq!(trace.row(0).to_vec(), start.to_vec());
        // One row per computed distribution, plus the start.
        assert_eq!(trace.nrows(), result.iterations + 1);
        assert_eq!(trace.ncols(), 3);
        // Last row is the returned distribution.
        assert_eq!(trace.row(result.iterations).to_vec(), result.distribution.to_vec());
    }

    #[test]
    fn test_no_trace_by_default() {
        let result = PowerIteration::new().run(&three_cycle(), &array![1.0, 0.0, 0.0]);
        assert!(result.trace.is_none());
    }

    #[test]
    fn test_loose_tolerance_stops_after_first_comparison() {
        // The first comparison is start vs first step; a huge tolerance
        // accepts it immediately.
        let result = PowerIteration::new()
            .with_tolerance(10.0)
            .with_trace(true)
            .run(&three_cycle(), &array![1.0, 0.0, 0.0]);

        assert_eq!(result.iterations, 1);
        assert_eq!(result.trace.unwrap().nrows(), 2);
    }

    #[test]
    fn test_start_distribution_is_not_renormalized() {
        // Total mass 2 stays 2: the matrix is row-stochastic and the start
        // is taken as-is.
        let result = PowerIteration::new().run(&three_cycle(), &array![2.0, 0.0, 0.0]);
        let mass: f64 = result.distribution.sum();
        assert!((mass - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_determinism() {
        let edges = [(0, 1), (1, 2), (2, 0), (1, 0)];
        let start = array![0.25, 0.5, 0.25];

        let first = PowerIteration::new().run(&edges, &start);
        let second = PowerIteration::new().run(&edges, &start);

        assert_eq!(first.distribution, second.distribution);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn test_dangling_page_keeps_ranks_summing_to_one() {
        // Page 1 is dangling; its uniform row keeps the chain stochastic.
        let edges = [(0, 1)];
        let result = PowerIteration::new().run(&edges, &array![0.5, 0.5]);

        let mass: f64 = result.distribution.sum();
        assert!((mass - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_damping_pulls_ranks_toward_uniform() {
        // Page 0 hoards importance; heavy teleportation flattens it.
        let edges = [(1, 0), (2, 0), (0, 0)];
        let third = 1.0 / 3.0;
        let start = array![third, third, third];

        let skewed = PowerIteration::new().with_damping(0.05).run(&edges, &start);
        let flattened = PowerIteration::new().with_damping(0.9).run(&edges, &start);

        assert!(skewed.score(0) > flattened.score(0));
        assert!(flattened.score(0) > flattened.score(1));
    }

    #[test]
    fn test_page_rank_free_function() {
        let ranks = page_rank(&three_cycle(), &array![1.0, 0.0, 0.0]);
        assert_eq!(ranks.len(), 3);
        for rank in ranks.iter() {
            assert!((rank - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = PowerIteration::new().with_damping(0.2).with_trace(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: PowerIteration = serde_json::from_str(&json).unwrap();

        assert!((back.damping_factor - 0.2).abs() < 1e-12);
        assert!((back.tolerance - 1e-7).abs() < 1e-20);
    }
}
