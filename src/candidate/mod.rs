//! Permutation-encoded candidate solutions.
//!
//! [`Individual`] is the contract every population member satisfies: it owns
//! a permutation and caches that permutation's cost. The genetic solver
//! works on plain [`Candidate`]s; the bees solver on [`Location`]s, which add
//! an age counter and neighborhood search.

mod location;

pub use location::{Location, NeighborhoodSearch};

use crate::problem::Objective;
use crate::random::random_permutation;
use rand::Rng;
use std::cmp::Ordering;

/// Cost marker for a candidate whose objective has not been computed yet.
pub const UNEVALUATED: i64 = i64::MAX;

/// A population member with a cached cost. Lower cost is better.
///
/// The cached cost is only trustworthy after [`recompute_cost`] whenever the
/// permutation was edited through [`permutation_mut`].
///
/// [`recompute_cost`]: Individual::recompute_cost
/// [`permutation_mut`]: Individual::permutation_mut
pub trait Individual: Clone + Send + Sync {
    fn permutation(&self) -> &[usize];

    /// Mutable access to the genes. The caller must recompute the cost afterwards.
    fn permutation_mut(&mut self) -> &mut [usize];

    fn cost(&self) -> i64;

    fn set_cost(&mut self, cost: i64);

    /// Re-evaluates the objective for the current permutation.
    fn recompute_cost<O: Objective + ?Sized>(&mut self, objective: &O) {
        let cost = objective.cost(self.permutation());
        self.set_cost(cost);
    }

    /// Orders by cost ascending; ties compare equal.
    fn cmp_cost(&self, other: &Self) -> Ordering {
        self.cost().cmp(&other.cost())
    }
}

/// A permutation with its cached cost.
///
/// Equality compares permutations only: two candidates with the same cost
/// but different genes are distinct.
#[derive(Debug, Clone)]
pub struct Candidate {
    permutation: Vec<usize>,
    cost: i64,
}

impl Candidate {
    /// Wraps a permutation and evaluates it.
    pub fn new<O: Objective + ?Sized>(permutation: Vec<usize>, objective: &O) -> Self {
        let cost = objective.cost(&permutation);
        Self { permutation, cost }
    }

    /// Wraps a permutation without evaluating it.
    ///
    /// For offspring that may be discarded before anyone looks at their cost.
    pub fn unevaluated(permutation: Vec<usize>) -> Self {
        Self {
            permutation,
            cost: UNEVALUATED,
        }
    }

    /// A uniformly random, evaluated candidate of size `n`.
    pub fn random<O: Objective + ?Sized, R: Rng + ?Sized>(
        n: usize,
        objective: &O,
        rng: &mut R,
    ) -> Self {
        Self::new(random_permutation(n, rng), objective)
    }

    pub fn is_evaluated(&self) -> bool {
        self.cost != UNEVALUATED
    }
}

impl Individual for Candidate {
    fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    fn permutation_mut(&mut self) -> &mut [usize] {
        &mut self.permutation
    }

    fn cost(&self) -> i64 {
        self.cost
    }

    fn set_cost(&mut self, cost: i64) {
        self.cost = cost;
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.permutation == other.permutation
    }
}

impl Eq for Candidate {}

/// Returns the lowest-cost member.
///
/// # Panics
/// Panics if `population` is empty.
pub fn find_best<I: Individual>(population: &[I]) -> &I {
    population
        .iter()
        .min_by(|a, b| a.cmp_cost(b))
        .expect("population must not be empty")
}

/// Sorts a population best-first.
pub fn sort_by_cost<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| a.cmp_cost(b));
}
