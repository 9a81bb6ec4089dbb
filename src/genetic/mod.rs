//! Genetic algorithm for the QAP.
//!
//! Each generation breeds offspring with the configured [`Crossover`],
//! perturbs them with the configured [`Mutation`], merges them into the
//! population and cuts back with the configured [`Selection`]. When the best
//! cost stalls for `bad_epoch_patience` generations, the whole population is
//! mutated, topped up with a fresh random batch, and selected again.
//!
//! # Key Types
//!
//! - [`GeneticConfig`]: Algorithm parameters and strategy choices
//! - [`GeneticRunner`]: Executes the evolutionary loop
//! - [`GeneticResult`]: Best candidate plus run statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Tate & Smith (1995), "A genetic approach to the quadratic assignment
//!   problem"
//!
//! [`Crossover`]: crate::operators::Crossover
//! [`Mutation`]: crate::operators::Mutation
//! [`Selection`]: crate::operators::Selection

mod config;
mod runner;

pub use config::GeneticConfig;
pub use runner::{genetic_solve, GeneticResult, GeneticRunner};
