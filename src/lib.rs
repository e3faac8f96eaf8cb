//! PageRank over directed web graphs.
//!
//! The crate ranks pages by simulating a random surfer on the link graph:
//! an edge list is turned into the transition probability matrix of a
//! Markov chain ([`TransitionMatrix`]), and power iteration advances a
//! starting distribution through that chain until it stabilizes
//! ([`PowerIteration`]). The converged stationary distribution is the
//! PageRank vector.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use webrank::page_rank;
//!
//! // A symmetric 3-cycle: every page ends up equally important.
//! let edges = [(0, 1), (1, 2), (2, 0)];
//! let ranks = page_rank(&edges, &array![1.0, 0.0, 0.0]);
//!
//! for rank in ranks.iter() {
//!     assert!((rank - 1.0 / 3.0).abs() < 1e-6);
//! }
//! ```
//!
//! Pages are dense `u32` indices; the page count is `max index + 1`. Callers
//! holding URLs instead of indices can intern them through
//! [`WebGraphBuilder`]. The transition matrix is dense (`O(N^2)` memory);
//! very large graphs want a sparse representation instead, which is out of
//! scope here.

pub mod graph;
pub mod markov;
pub mod rank;

pub use graph::builder::WebGraphBuilder;
pub use markov::{build_transition_matrix, TransitionMatrix};
pub use rank::{page_rank, PowerIteration, RankedDistribution};
