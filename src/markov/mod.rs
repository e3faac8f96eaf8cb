//! Markov chain construction
//!
//! Turns the link structure of a web graph into the transition probability
//! matrix of the random-surfer Markov chain.

pub mod transition;

pub use transition::{build_transition_matrix, TransitionMatrix};
