//! Crossover strategies.

use super::permutation::{ordered_crossover_child, random_span};
use super::selection::{liveness_scores, weighted_sample};
use crate::candidate::{Candidate, Individual};
use crate::error::{QapError, Result};
use crate::problem::Objective;
use crate::random::random_permutation;
use rand::Rng;
use std::collections::HashSet;

/// Ordered crossover (OX) breeding.
///
/// Each of the `count` breeding rounds draws two distinct parents, weighted
/// by [`liveness_scores`], and produces two children:
/// `ox(a, b)` and `ox(b, a)`, each with its own random span. A round whose
/// children were all produced earlier in the same pass is redrawn up to
/// `retry` times; after that two random permutations are injected instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedCrossover {
    /// Breeding rounds per call (up to `2 * count` children).
    pub count: usize,
    /// Redraws allowed for a round that produced only known children.
    pub retry: usize,
}

impl OrderedCrossover {
    pub fn new(count: usize, retry: usize) -> Self {
        Self { count, retry }
    }
}

impl Default for OrderedCrossover {
    fn default() -> Self {
        Self::new(100, 50)
    }
}

/// Children produced by one crossover pass.
#[derive(Debug, Clone)]
pub struct Offspring {
    /// Distinct, evaluated children.
    pub children: Vec<Candidate>,
    /// Rounds that gave up on breeding and injected random permutations.
    pub random_fallbacks: usize,
}

/// Crossover strategy, chosen at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    Ordered(OrderedCrossover),
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Ordered(OrderedCrossover::default())
    }
}

impl Crossover {
    /// Breeds a batch of new candidates from `population`.
    ///
    /// Returns [`QapError::PopulationTooSmall`] with fewer than two parents.
    pub fn crossover<O, R>(
        &self,
        population: &[Candidate],
        objective: &O,
        rng: &mut R,
    ) -> Result<Offspring>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        match self {
            Crossover::Ordered(ox) => ox.breed(population, objective, rng),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Crossover::Ordered(ox) if ox.count == 0 => Err(QapError::InvalidConfig(
                "crossover count must be at least 1".into(),
            )),
            Crossover::Ordered(_) => Ok(()),
        }
    }
}

impl OrderedCrossover {
    fn breed<O, R>(&self, population: &[Candidate], objective: &O, rng: &mut R) -> Result<Offspring>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        if population.len() < 2 {
            return Err(QapError::PopulationTooSmall {
                required: 2,
                available: population.len(),
            });
        }
        let n = population[0].permutation().len();
        let weights = liveness_scores(population);

        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        let mut children: Vec<Candidate> = Vec::with_capacity(2 * self.count);
        let mut random_fallbacks = 0usize;

        for _ in 0..self.count {
            let mut pair = self.mate(population, &weights, rng)?;
            let mut attempts = 0;
            while attempts < self.retry && pair.iter().all(|p| seen.contains(p)) {
                pair = self.mate(population, &weights, rng)?;
                attempts += 1;
            }
            if pair.iter().all(|p| seen.contains(p)) {
                random_fallbacks += 1;
                pair = [random_permutation(n, rng), random_permutation(n, rng)];
            }

            for child in pair {
                if !seen.contains(&child) {
                    seen.insert(child.clone());
                    children.push(Candidate::unevaluated(child));
                }
            }
        }

        if random_fallbacks > 0 {
            log::debug!(
                "ordered crossover: {random_fallbacks} of {} rounds fell back to random permutations",
                self.count
            );
        }

        // Evaluation is deferred until the pass is complete.
        for child in &mut children {
            child.recompute_cost(objective);
        }

        Ok(Offspring {
            children,
            random_fallbacks,
        })
    }

    /// Draws two distinct parents and crosses them both ways.
    fn mate<R: Rng + ?Sized>(
        &self,
        population: &[Candidate],
        weights: &[f64],
        rng: &mut R,
    ) -> Result<[Vec<usize>; 2]> {
        let parents = weighted_sample(weights, 2, rng)?;
        let a = population[parents[0]].permutation();
        let b = population[parents[1]].permutation();
        let n = a.len();

        let (start, finish) = random_span(n, rng);
        let first = ordered_crossover_child(a, b, start, finish);
        let (start, finish) = random_span(n, rng);
        let second = ordered_crossover_child(b, a, start, finish);
        Ok([first, second])
    }
}
