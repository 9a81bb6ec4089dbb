//! Bees-algorithm locations: candidates with an age and neighborhood search.

use super::{Candidate, Individual};
use crate::operators::Mutation;
use crate::problem::Objective;
use rand::Rng;

/// Everything a location needs to explore its neighborhood.
///
/// Shared read-only by all bees workers within one generation.
#[derive(Debug)]
pub struct NeighborhoodSearch<'a, O: ?Sized> {
    /// Cost function for evaluating neighbors.
    pub objective: &'a O,
    /// Perturbation used to generate each neighbor.
    pub mutation: &'a Mutation,
    /// Age at which a location is abandoned and re-rolled. `0` disables it.
    pub lifetime: usize,
}

impl<O: ?Sized> Clone for NeighborhoodSearch<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized> Copy for NeighborhoodSearch<'_, O> {}

/// A site in the search space visited by the bees solver.
///
/// The age counts consecutive generations without improvement. It resets to
/// zero whenever the permutation is replaced.
#[derive(Debug, Clone)]
pub struct Location {
    candidate: Candidate,
    age: usize,
}

impl Location {
    pub fn from_candidate(candidate: Candidate) -> Self {
        Self { candidate, age: 0 }
    }

    /// A uniformly random, evaluated location of size `n`.
    pub fn random<O: Objective + ?Sized, R: Rng + ?Sized>(
        n: usize,
        objective: &O,
        rng: &mut R,
    ) -> Self {
        Self::from_candidate(Candidate::random(n, objective, rng))
    }

    pub fn age(&self) -> usize {
        self.age
    }

    pub fn reset_age(&mut self) {
        self.age = 0;
    }

    pub fn into_candidate(self) -> Candidate {
        self.candidate
    }

    /// Ages the location by one generation. Locations do not age when the
    /// lifetime is 0.
    ///
    /// Reaching the lifetime abandons the site: the permutation is replaced by
    /// a fresh random one (re-evaluated) and the age starts over.
    pub fn bump_age<O: Objective + ?Sized, R: Rng + ?Sized>(
        &mut self,
        search: &NeighborhoodSearch<'_, O>,
        rng: &mut R,
    ) {
        if search.lifetime == 0 {
            return;
        }
        self.age += 1;
        if self.age >= search.lifetime {
            let n = self.candidate.permutation().len();
            self.candidate = Candidate::random(n, search.objective, rng);
            self.age = 0;
        }
    }

    /// Best of `size` independently mutated copies of this location.
    fn best_neighbor<O: Objective + ?Sized, R: Rng + ?Sized>(
        &self,
        size: usize,
        search: &NeighborhoodSearch<'_, O>,
        rng: &mut R,
    ) -> Location {
        (0..size)
            .map(|_| {
                let mut neighbor = Location::from_candidate(self.candidate.clone());
                search.mutation.mutate_one(&mut neighbor, search.objective, rng);
                neighbor
            })
            .min_by(|a, b| a.cmp_cost(b))
            .expect("neighborhood size must be at least 1")
    }

    /// Elite search: returns the best neighbor and leaves this location's
    /// permutation alone. Only the age moves.
    pub fn search_neighborhood_elite<O: Objective + ?Sized, R: Rng + ?Sized>(
        &mut self,
        size: usize,
        search: &NeighborhoodSearch<'_, O>,
        rng: &mut R,
    ) -> Location {
        let best = self.best_neighbor(size, search, rng);
        self.bump_age(search, rng);
        best
    }

    /// Regular search: moves to the best neighbor if it is strictly better,
    /// otherwise ages. Returns whether the location moved.
    pub fn search_neighborhood<O: Objective + ?Sized, R: Rng + ?Sized>(
        &mut self,
        size: usize,
        search: &NeighborhoodSearch<'_, O>,
        rng: &mut R,
    ) -> bool {
        let best = self.best_neighbor(size, search, rng);
        if best.cost() < self.cost() {
            self.candidate = best.candidate;
            self.age = 0;
            true
        } else {
            self.bump_age(search, rng);
            false
        }
    }
}

impl Individual for Location {
    fn permutation(&self) -> &[usize] {
        self.candidate.permutation()
    }

    fn permutation_mut(&mut self) -> &mut [usize] {
        self.candidate.permutation_mut()
    }

    fn cost(&self) -> i64 {
        self.candidate.cost()
    }

    fn set_cost(&mut self, cost: i64) {
        self.candidate.set_cost(cost);
    }
}
