//! Pluggable search operators shared by both solvers.
//!
//! Each strategy family is an enum chosen at configuration time:
//!
//! - [`Mutation`]: swap, shift, or a uniform scheduler over other mutations
//! - [`Crossover`]: ordered crossover with liveness-weighted parents
//! - [`Selection`]: roulette wheel (rank-weighted, without replacement) or
//!   best-fit truncation
//!
//! The gene-level moves behind them live in [`ordered_crossover_child`],
//! [`shift_genes`] and [`random_span`].

mod crossover;
mod mutation;
mod permutation;
mod selection;

pub use crossover::{Crossover, Offspring, OrderedCrossover};
pub use mutation::{Mutation, ShiftMutation, SwapMutation, UniformScheduler};
pub use permutation::{ordered_crossover_child, random_span, shift_genes};
pub use selection::{liveness_scores, weighted_sample, Selection};
