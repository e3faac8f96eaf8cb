//! PageRank power iteration
//!
//! This module drives the random-surfer chain to its stationary
//! distribution and carries the converged result.

pub mod power;

pub use power::{page_rank, PowerIteration};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Result of a power-iteration run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDistribution {
    /// The converged distribution, one probability per page
    pub distribution: Array1<f64>,
    /// Number of Markov steps taken
    pub iterations: usize,
    /// Euclidean distance between the last two distributions
    pub delta: f64,
    /// Every distribution from the start through convergence, one row per
    /// step (so `iterations + 1` rows), if the run recorded a trace
    pub trace: Option<Array2<f64>>,
}

impl RankedDistribution {
    /// Get the rank for a specific page
    pub fn score(&self, page: u32) -> f64 {
        self.distribution.get(page as usize).copied().unwrap_or(0.0)
    }

    /// Get the top N pages by rank
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .distribution
            .iter()
            .enumerate()
            .map(|(page, &rank)| (page as u32, rank))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(n);
        indexed
    }

    /// Number of pages in the distribution
    pub fn page_count(&self) -> usize {
        self.distribution.len()
    }
}
