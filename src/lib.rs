//! Metaheuristic solvers for the Quadratic Assignment Problem (QAP).
//!
//! Two population-based solvers search the space of permutations:
//!
//! - **Genetic Algorithm**: ordered crossover, swap/shift mutation and
//!   roulette-wheel or best-fit survivor selection, with a diversification
//!   kick when the search stagnates.
//! - **Bees Algorithm**: tiered neighborhood search (elite, selected, random
//!   scouts) run on a dedicated rayon worker pool, with location lifetimes
//!   and the same stagnation kick.
//!
//! Supporting modules provide the problem model and objective functions,
//! reusable permutation operators, QAPLib file loading, and a random-search
//! baseline.
//!
//! # Example
//!
//! ```
//! use qap_metaheur::candidate::Individual;
//! use qap_metaheur::genetic::{GeneticConfig, GeneticRunner};
//! use qap_metaheur::problem::{Matrix, QapProblem};
//!
//! let distances = Matrix::from_rows(vec![
//!     vec![0, 1, 2],
//!     vec![1, 0, 1],
//!     vec![2, 1, 0],
//! ])
//! .unwrap();
//! let flows = Matrix::from_rows(vec![
//!     vec![0, 3, 0],
//!     vec![3, 0, 1],
//!     vec![0, 1, 0],
//! ])
//! .unwrap();
//! let problem = QapProblem::new(3, distances, flows).unwrap();
//!
//! let config = GeneticConfig::default()
//!     .with_population_size(10)
//!     .with_max_iterations(20)
//!     .with_seed(7);
//! let result = GeneticRunner::run(&problem, 3, &config).unwrap();
//! assert_eq!(result.best.permutation().len(), 3);
//! ```
//!
//! # Architecture
//!
//! The solvers depend only on the [`problem::Objective`] trait, so any
//! black-box cost over permutations can be optimized. The operators in
//! [`operators`] are generic over [`candidate::Individual`] and shared by
//! both solvers.

pub mod bees;
pub mod candidate;
pub mod error;
pub mod genetic;
pub mod operators;
pub mod problem;
pub mod qaplib;
pub mod random;

pub use error::{QapError, Result};
