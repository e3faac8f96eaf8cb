//! Transition probability matrix
//!
//! Dense row-stochastic matrix of the random-surfer chain: from page `i` the
//! surfer follows one of the page's outgoing links with total probability
//! `1 - damping_factor`, split evenly among them, and teleports to a
//! uniformly random page with probability `damping_factor`. A dangling page
//! has no links to follow, so its whole row is the uniform distribution.

use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::graph::edges;

/// Below this many pages the row pass runs sequentially; the rayon fan-out
/// only pays for itself on larger matrices. Both paths produce bit-identical
/// rows.
const PAR_ROW_THRESHOLD: usize = 512;

/// The transition probability matrix of the random-surfer Markov chain.
///
/// Row `i` holds the probability of moving from page `i` to every other page
/// in one step; every row sums to 1. The matrix is built once from an edge
/// list and never mutated.
///
/// Memory is `O(N^2)` for `N` pages, the dominant cost of this crate.
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    probs: Array2<f64>,
}

impl TransitionMatrix {
    /// Build the transition matrix for an edge list.
    ///
    /// The page count is `max index + 1` across both endpoints of every
    /// edge; duplicate edges are idempotent. `damping_factor` is the
    /// teleportation probability and is expected in `[0, 1]`; the caller is
    /// responsible for that, it is not validated here.
    ///
    /// An empty edge list yields an empty `0x0` matrix.
    pub fn from_edges(edges: &[(u32, u32)], damping_factor: f64) -> Self {
        let n = edges::page_count(edges);

        // Adjacency first: 1.0 wherever a link exists. Re-setting the same
        // entry for a duplicate edge is a no-op.
        let mut probs = Array2::zeros((n, n));
        for &(source, target) in edges {
            probs[[source as usize, target as usize]] = 1.0;
        }

        let degrees = edges::out_degrees(edges);
        scale_rows(&mut probs, &degrees, damping_factor);

        Self { probs }
    }

    /// Number of pages (rows) in the matrix
    pub fn page_count(&self) -> usize {
        self.probs.nrows()
    }

    /// The underlying probability matrix
    pub fn probs(&self) -> &Array2<f64> {
        &self.probs
    }

    /// The outgoing transition probabilities of one page
    pub fn row(&self, page: u32) -> ArrayView1<'_, f64> {
        self.probs.row(page as usize)
    }

    /// Advance a distribution by one Markov step.
    ///
    /// The distribution is treated as a row vector: `next = distribution · P`.
    /// Panics inside ndarray if the distribution length does not match the
    /// page count.
    pub fn step(&self, distribution: &Array1<f64>) -> Array1<f64> {
        distribution.dot(&self.probs)
    }

    /// Consume the wrapper, keeping the raw matrix
    pub fn into_probs(self) -> Array2<f64> {
        self.probs
    }
}

/// Build the transition probability matrix for an edge list.
///
/// Free-function surface over [`TransitionMatrix::from_edges`] for callers
/// that want the raw `Array2` directly.
pub fn build_transition_matrix(edges: &[(u32, u32)], damping_factor: f64) -> Array2<f64> {
    TransitionMatrix::from_edges(edges, damping_factor).into_probs()
}

/// Turn adjacency rows into probability rows in place.
fn scale_rows(probs: &mut Array2<f64>, degrees: &[u32], damping_factor: f64) {
    let n = probs.nrows();
    if n >= PAR_ROW_THRESHOLD {
        probs
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(degrees.par_iter())
            .for_each(|(row, &degree)| finish_row(row, degree, n, damping_factor));
    } else {
        for (row, &degree) in probs.axis_iter_mut(Axis(0)).zip(degrees.iter()) {
            finish_row(row, degree, n, damping_factor);
        }
    }
}

/// Scale one adjacency row into a probability row.
///
/// A linked entry becomes `(1 - d)/degree + d/n`, an unlinked one `d/n`.
/// A dangling row becomes exactly uniform: `fill` rather than arithmetic,
/// so every entry is bit-equal to `1/n`.
fn finish_row(mut row: ArrayViewMut1<'_, f64>, degree: u32, n: usize, damping_factor: f64) {
    if degree == 0 {
        row.fill(1.0 / n as f64);
    } else {
        let follow = (1.0 - damping_factor) / f64::from(degree);
        let teleport = damping_factor / n as f64;
        row.mapv_inplace(|adjacent| adjacent * follow + teleport);
    }
}
