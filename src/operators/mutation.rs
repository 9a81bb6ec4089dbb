//! Mutation strategies.
//!
//! A mutation perturbs individuals in place and leaves their cached cost
//! consistent with the new permutation.

use super::permutation::shift_genes;
use crate::candidate::Individual;
use crate::error::{QapError, Result};
use crate::problem::Objective;
use crate::random::distinct_pair;
use rand::Rng;

/// Exchanges two distinct random genes with probability `probability`.
///
/// When the coin flip fails the individual, and its cost, stay as they are.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapMutation {
    /// Chance of performing the swap, in [0, 1].
    pub probability: f64,
}

impl SwapMutation {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl Default for SwapMutation {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Moves one random gene to another random position, shifting the genes in
/// between by one place. Always applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftMutation;

/// Delegates each single mutation to one of `mutations`, picked uniformly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformScheduler {
    pub mutations: Vec<Mutation>,
}

impl UniformScheduler {
    pub fn new(mutations: Vec<Mutation>) -> Self {
        Self { mutations }
    }
}

impl Default for UniformScheduler {
    /// Swap (p = 0.5) and shift.
    fn default() -> Self {
        Self::new(vec![
            Mutation::Swap(SwapMutation::default()),
            Mutation::Shift(ShiftMutation),
        ])
    }
}

/// Mutation strategy, chosen at configuration time.
///
/// # Examples
///
/// ```
/// use qap_metaheur::operators::{Mutation, ShiftMutation, SwapMutation, UniformScheduler};
///
/// let swap = Mutation::Swap(SwapMutation::new(0.3));
/// let mixed = Mutation::Uniform(UniformScheduler::new(vec![
///     Mutation::Swap(SwapMutation::new(1.0)),
///     Mutation::Shift(ShiftMutation),
/// ]));
/// assert!(mixed.validate().is_ok());
/// # let _ = swap;
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    Swap(SwapMutation),
    Shift(ShiftMutation),
    Uniform(UniformScheduler),
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::Swap(SwapMutation::default())
    }
}

impl Mutation {
    /// Mutates one individual in place.
    ///
    /// # Panics
    /// Panics if the permutation has fewer than two genes, or if a uniform
    /// scheduler is empty (both rejected by [`validate`](Self::validate) and
    /// problem construction).
    pub fn mutate_one<I, O, R>(&self, individual: &mut I, objective: &O, rng: &mut R)
    where
        I: Individual,
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        match self {
            Mutation::Swap(swap) => {
                if rng.random_bool(swap.probability) {
                    let (i, j) = distinct_pair(individual.permutation().len(), rng);
                    individual.permutation_mut().swap(i, j);
                    individual.recompute_cost(objective);
                }
            }
            Mutation::Shift(_) => {
                let (i, j) = distinct_pair(individual.permutation().len(), rng);
                shift_genes(individual.permutation_mut(), i, j);
                individual.recompute_cost(objective);
            }
            Mutation::Uniform(scheduler) => {
                assert!(
                    !scheduler.mutations.is_empty(),
                    "uniform scheduler has no mutations"
                );
                let pick = rng.random_range(0..scheduler.mutations.len());
                scheduler.mutations[pick].mutate_one(individual, objective, rng);
            }
        }
    }

    /// Mutates every member of `population` in place.
    pub fn mutate<I, O, R>(&self, population: &mut [I], objective: &O, rng: &mut R)
    where
        I: Individual,
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        for individual in population.iter_mut() {
            self.mutate_one(individual, objective, rng);
        }
    }

    /// Validates the strategy and everything nested in it.
    pub fn validate(&self) -> Result<()> {
        match self {
            Mutation::Swap(swap) => {
                if !(0.0..=1.0).contains(&swap.probability) {
                    return Err(QapError::InvalidConfig(format!(
                        "swap probability must be in [0, 1], got {}",
                        swap.probability
                    )));
                }
                Ok(())
            }
            Mutation::Shift(_) => Ok(()),
            Mutation::Uniform(scheduler) => {
                if scheduler.mutations.is_empty() {
                    return Err(QapError::InvalidConfig(
                        "uniform scheduler needs at least one mutation".into(),
                    ));
                }
                scheduler.mutations.iter().try_for_each(Mutation::validate)
            }
        }
    }
}
