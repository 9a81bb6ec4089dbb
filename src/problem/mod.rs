//! QAP instance definition and objective evaluation.
//!
//! A problem instance is an integer size `n`, an `n×n` distance matrix and an
//! `n×n` flow matrix. A solution is a permutation `p` assigning facility `i`
//! to location `p[i]`; its cost is
//!
//! ```text
//! cost(p) = Σ_i Σ_j flow[i][j] · dist[p[i]][p[j]]
//! ```
//!
//! The solvers only ever see an [`Objective`], so any black-box cost function
//! can be plugged in.
//!
//! # References
//!
//! - Koopmans & Beckmann (1957), "Assignment Problems and the Location of
//!   Economic Activities"
//! - Burkard, Karisch & Rendl (1997), "QAPLIB – A Quadratic Assignment
//!   Problem Library"

mod matrix;

pub use matrix::Matrix;

use crate::error::{QapError, Result};
use crate::random::random_permutation;
use rand::Rng;

/// Signature of a pluggable objective: `(distances, flows, permutation) -> cost`.
pub type ObjectiveFn = fn(&Matrix, &Matrix, &[usize]) -> i64;

/// Black-box cost function over permutations. Lower is better.
///
/// Implementations must be pure: the bees solver calls `cost` concurrently
/// from several worker threads without synchronization.
pub trait Objective: Send + Sync {
    /// Evaluates a permutation.
    fn cost(&self, permutation: &[usize]) -> i64;

    /// Number of facilities this objective is defined for, if it knows.
    ///
    /// Black-box closures return `None` and accept any size.
    fn size(&self) -> Option<usize> {
        None
    }
}

impl<F> Objective for F
where
    F: Fn(&[usize]) -> i64 + Send + Sync,
{
    fn cost(&self, permutation: &[usize]) -> i64 {
        self(permutation)
    }
}

/// Reference objective: plain double loop over all facility pairs.
pub fn naive_objective(permutation: &[usize], distances: &Matrix, flows: &Matrix) -> i64 {
    let n = permutation.len();
    let mut total = 0i64;
    for i in 0..n {
        for j in 0..n {
            total += flows.get(i, j) * distances.get(permutation[i], permutation[j]);
        }
    }
    total
}

/// Fast objective walking contiguous row slices.
///
/// Agrees exactly with [`naive_objective`] on every input.
pub fn objective(distances: &Matrix, flows: &Matrix, permutation: &[usize]) -> i64 {
    permutation
        .iter()
        .enumerate()
        .map(|(i, &location)| {
            let dist_row = distances.row(location);
            flows
                .row(i)
                .iter()
                .zip(permutation)
                .map(|(&flow, &other)| flow * dist_row[other])
                .sum::<i64>()
        })
        .sum()
}

/// Checks that `permutation` is a bijection on `0..n`.
pub fn validate_permutation(permutation: &[usize], n: usize) -> Result<()> {
    if permutation.len() != n {
        return Err(QapError::InvalidPermutation(format!(
            "expected length {n}, got {}",
            permutation.len()
        )));
    }
    let mut seen = vec![false; n];
    for &value in permutation {
        if value >= n {
            return Err(QapError::InvalidPermutation(format!(
                "value {value} out of range 0..{n}"
            )));
        }
        if seen[value] {
            return Err(QapError::InvalidPermutation(format!(
                "duplicate value {value}"
            )));
        }
        seen[value] = true;
    }
    Ok(())
}

/// A validated QAP instance bound to an objective function.
#[derive(Debug, Clone)]
pub struct QapProblem {
    n: usize,
    distances: Matrix,
    flows: Matrix,
    objective: ObjectiveFn,
}

impl QapProblem {
    /// Creates a problem using the fast [`objective`].
    ///
    /// Both matrices must be `n×n`.
    pub fn new(n: usize, distances: Matrix, flows: Matrix) -> Result<Self> {
        Self::with_objective(n, distances, flows, objective)
    }

    /// Creates a problem with a custom objective function.
    pub fn with_objective(
        n: usize,
        distances: Matrix,
        flows: Matrix,
        objective: ObjectiveFn,
    ) -> Result<Self> {
        for m in [&distances, &flows] {
            if m.size() != n {
                return Err(QapError::DimensionMismatch {
                    expected: n,
                    rows: m.size(),
                    cols: m.size(),
                });
            }
        }
        if n < 2 {
            return Err(QapError::InvalidConfig(format!(
                "problem size must be at least 2, got {n}"
            )));
        }
        Ok(Self {
            n,
            distances,
            flows,
            objective,
        })
    }

    /// Number of facilities (and locations).
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn distances(&self) -> &Matrix {
        &self.distances
    }

    pub fn flows(&self) -> &Matrix {
        &self.flows
    }

    /// Evaluates an externally supplied permutation after validating it.
    pub fn evaluate(&self, permutation: &[usize]) -> Result<i64> {
        validate_permutation(permutation, self.n)?;
        Ok(self.cost(permutation))
    }
}

impl Objective for QapProblem {
    fn cost(&self, permutation: &[usize]) -> i64 {
        (self.objective)(&self.distances, &self.flows, permutation)
    }

    fn size(&self) -> Option<usize> {
        Some(self.n)
    }
}

/// Checks that a solver may search permutations of `0..n` under `objective`.
///
/// Fails if `n < 2` or the objective was built for a different size.
pub fn check_problem_size<O: Objective + ?Sized>(objective: &O, n: usize) -> Result<()> {
    if let Some(size) = objective.size() {
        if size != n {
            return Err(QapError::DimensionMismatch {
                expected: n,
                rows: size,
                cols: size,
            });
        }
    }
    if n < 2 {
        return Err(QapError::InvalidConfig(format!(
            "problem size must be at least 2, got {n}"
        )));
    }
    Ok(())
}

/// Best of `samples` uniformly random permutations.
///
/// Baseline for judging how much the metaheuristics actually buy.
/// Returns `None` when `samples == 0`.
pub fn random_search<O: Objective, R: Rng>(
    objective: &O,
    n: usize,
    samples: usize,
    rng: &mut R,
) -> Option<(Vec<usize>, i64)> {
    (0..samples)
        .map(|_| {
            let perm = random_permutation(n, rng);
            let cost = objective.cost(&perm);
            (perm, cost)
        })
        .min_by_key(|(_, cost)| *cost)
}
