//! Survivor selection and rank-based sampling weights.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::candidate::{sort_by_cost, Individual};
use crate::error::{QapError, Result};
use rand::seq::index;
use rand::Rng;

/// Rank-based selection probabilities ("liveness scores").
///
/// Individuals are ranked from worst (rank 1) to best (rank n) and each gets
/// `rank / (n(n+1)/2)`. Equal costs share the average of their ranks, so the
/// weights always sum to 1, strictly decrease as cost increases, and become
/// uniform when every cost is the same.
pub fn liveness_scores<I: Individual>(population: &[I]) -> Vec<f64> {
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }

    // Worst first.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| population[b].cost().cmp(&population[a].cost()));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let cost = population[order[start]].cost();
        let mut end = start + 1;
        while end < n && population[order[end]].cost() == cost {
            end += 1;
        }
        // Tied block occupies ranks start+1 ..= end.
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }

    let total = (n * (n + 1)) as f64 / 2.0;
    ranks.into_iter().map(|r| r / total).collect()
}

/// Draws `amount` distinct indices, each draw proportional to the remaining
/// weights (successive sampling without replacement).
///
/// Positively weighted indices are drawn first. Once they run out, the rest
/// are drawn uniformly among the untaken indices.
pub fn weighted_sample<R: Rng + ?Sized>(
    weights: &[f64],
    amount: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n = weights.len();
    if amount > n {
        return Err(QapError::PopulationTooSmall {
            required: amount,
            available: n,
        });
    }

    let positive = weights.iter().filter(|&&w| w > 0.0).count();
    let weighted = amount.min(positive);
    let mut picked = if weighted > 0 {
        index::sample_weighted(rng, n, |i| weights[i].max(0.0), weighted)
            .map_err(|e| QapError::InvalidConfig(format!("sampling weights: {e}")))?
            .into_vec()
    } else {
        Vec::with_capacity(amount)
    };

    if picked.len() < amount {
        let mut taken = vec![false; n];
        for &idx in &picked {
            taken[idx] = true;
        }
        let free: Vec<usize> = (0..n).filter(|&i| !taken[i]).collect();
        let rest = index::sample(rng, free.len(), amount - picked.len());
        picked.extend(rest.iter().map(|i| free[i]));
    }

    Ok(picked)
}

/// Survivor selection strategy. Lower cost survives more often.
///
/// # Examples
///
/// ```
/// use qap_metaheur::operators::Selection;
///
/// // Stochastic, rank-weighted survival
/// let sel = Selection::RouletteWheel;
///
/// // Deterministic truncation to the best
/// let sel = Selection::BestFit;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Samples survivors without replacement, weighted by [`liveness_scores`].
    #[default]
    RouletteWheel,

    /// Keeps the lowest-cost individuals.
    BestFit,
}

impl Selection {
    /// Reduces `population` to `size` survivors.
    ///
    /// Returns [`QapError::PopulationTooSmall`] if fewer than `size`
    /// individuals are available.
    pub fn select<I: Individual, R: Rng + ?Sized>(
        &self,
        population: Vec<I>,
        size: usize,
        rng: &mut R,
    ) -> Result<Vec<I>> {
        if population.len() < size {
            return Err(QapError::PopulationTooSmall {
                required: size,
                available: population.len(),
            });
        }

        match self {
            Selection::RouletteWheel => {
                let weights = liveness_scores(&population);
                let mut keep = vec![false; population.len()];
                for idx in weighted_sample(&weights, size, rng)? {
                    keep[idx] = true;
                }
                Ok(population
                    .into_iter()
                    .zip(keep)
                    .filter_map(|(ind, k)| k.then_some(ind))
                    .collect())
            }
            Selection::BestFit => {
                let mut population = population;
                sort_by_cost(&mut population);
                population.truncate(size);
                Ok(population)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn make_population(costs: &[i64]) -> Vec<Candidate> {
        costs
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let mut cand = Candidate::unevaluated(vec![i]);
                cand.set_cost(c);
                cand
            })
            .collect()
    }

    #[test]
    fn test_liveness_known_values() {
        let pop = make_population(&[30, 10, 20]);
        let w = liveness_scores(&pop);
        // ranks worst→best: 30→1, 20→2, 10→3 over a total of 6
        assert!((w[0] - 1.0 / 6.0).abs() < 1e-12);
        assert!((w[1] - 3.0 / 6.0).abs() < 1e-12);
        assert!((w[2] - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_liveness_equal_costs_uniform() {
        for costs in [vec![0, 0, 0, 0], vec![7, 7, 7, 7]] {
            let w = liveness_scores(&make_population(&costs));
            for x in w {
                assert!((x - 0.25).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_liveness_ties_share_weight() {
        let w = liveness_scores(&make_population(&[5, 9, 5, 1]));
        assert!((w[0] - w[2]).abs() < 1e-12);
        assert!(w[3] > w[0] && w[0] > w[1]);
    }

    #[test]
    fn test_weighted_sample_distinct() {
        let mut rng = create_rng(42);
        let weights = vec![0.1, 0.2, 0.3, 0.4];
        for _ in 0..200 {
            let mut picked = weighted_sample(&weights, 4, &mut rng).unwrap();
            picked.sort_unstable();
            assert_eq!(picked, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_weighted_sample_favors_heavy() {
        let mut rng = create_rng(42);
        let weights = vec![0.05, 0.05, 0.9];
        let mut counts = [0u32; 3];
        for _ in 0..5000 {
            let first = weighted_sample(&weights, 1, &mut rng).unwrap()[0];
            counts[first] += 1;
        }
        assert!(counts[2] > 4000, "counts = {counts:?}");
    }

    #[test]
    fn test_weighted_sample_zero_weights_uniform() {
        let mut rng = create_rng(42);
        let picked = weighted_sample(&[0.0, 0.0, 0.0], 3, &mut rng).unwrap();
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_weighted_sample_takes_positive_weights_first() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let picked = weighted_sample(&[0.0, 0.5, 0.0, 0.5], 3, &mut rng).unwrap();
            let mut head = picked[..2].to_vec();
            head.sort_unstable();
            assert_eq!(head, vec![1, 3]);
            assert!(picked[2] == 0 || picked[2] == 2);
        }
    }

    #[test]
    fn test_weighted_sample_too_many() {
        let mut rng = create_rng(42);
        let err = weighted_sample(&[0.5, 0.5], 3, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            QapError::PopulationTooSmall {
                required: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_roulette_wheel_favors_best() {
        let mut rng = create_rng(42);
        let mut best_kept = 0;
        let mut worst_kept = 0;
        for _ in 0..2000 {
            let pop = make_population(&[100, 50, 1, 80]);
            let kept = Selection::RouletteWheel.select(pop, 2, &mut rng).unwrap();
            assert_eq!(kept.len(), 2);
            best_kept += kept.iter().filter(|c| c.cost() == 1).count();
            worst_kept += kept.iter().filter(|c| c.cost() == 100).count();
        }
        assert!(
            best_kept > worst_kept,
            "best={best_kept}, worst={worst_kept}"
        );
    }

    #[test]
    fn test_best_fit_keeps_lowest() {
        let mut rng = create_rng(42);
        let pop = make_population(&[100, 50, 1, 80, 3]);
        let kept = Selection::BestFit.select(pop, 3, &mut rng).unwrap();
        let costs: Vec<i64> = kept.iter().map(|c| c.cost()).collect();
        assert_eq!(costs, vec![1, 3, 50]);
    }

    #[test]
    fn test_select_too_small() {
        let mut rng = create_rng(42);
        let pop = make_population(&[1, 2]);
        assert!(Selection::RouletteWheel.select(pop.clone(), 3, &mut rng).is_err());
        assert!(Selection::BestFit.select(pop, 3, &mut rng).is_err());
    }

    proptest! {
        #[test]
        fn prop_liveness_weights(costs in proptest::collection::vec(0i64..1000, 2..80)) {
            let pop = make_population(&costs);
            let w = liveness_scores(&pop);
            let sum: f64 = w.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            prop_assert!(w.iter().all(|&x| x > 0.0));
            for i in 0..costs.len() {
                for j in 0..costs.len() {
                    if costs[i] < costs[j] {
                        prop_assert!(w[i] > w[j]);
                    } else if costs[i] == costs[j] {
                        prop_assert!((w[i] - w[j]).abs() < 1e-12);
                    }
                }
            }
        }
    }
}
