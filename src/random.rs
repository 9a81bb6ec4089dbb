//! Random number generation helpers.
//!
//! Every run owns one seeded generator. Work dispatched to the bees worker
//! pool gets its own generator, derived from the run seed so results do not
//! depend on how rayon schedules tasks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resolves an optional configured seed into the seed actually used.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Derives the seed for one parallel task.
///
/// `task` must be unique within a generation.
pub fn task_seed(run_seed: u64, generation: usize, task: usize) -> u64 {
    run_seed
        .wrapping_add((generation as u64) << 32)
        .wrapping_add(task as u64)
}

/// Draws a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Picks two distinct positions in `0..n`.
///
/// # Panics
/// Panics if `n < 2`.
pub fn distinct_pair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "need at least two positions to pick a pair");
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        assert_eq!(random_permutation(20, &mut a), random_permutation(20, &mut b));
    }

    #[test]
    fn test_random_permutation_is_complete() {
        let mut rng = create_rng(42);
        let mut perm = random_permutation(50, &mut rng);
        perm.sort_unstable();
        assert_eq!(perm, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_distinct_pair_never_equal() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (i, j) = distinct_pair(3, &mut rng);
            assert_ne!(i, j);
            assert!(i < 3 && j < 3);
        }
    }

    #[test]
    fn test_task_seeds_differ() {
        assert_ne!(task_seed(1, 0, 0), task_seed(1, 0, 1));
        assert_ne!(task_seed(1, 0, 0), task_seed(1, 1, 0));
    }

    #[test]
    #[should_panic(expected = "need at least two positions")]
    fn test_distinct_pair_rejects_single_position() {
        let mut rng = create_rng(42);
        distinct_pair(1, &mut rng);
    }
}
