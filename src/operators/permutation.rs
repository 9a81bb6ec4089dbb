//! Gene-level permutation moves.
//!
//! Pure functions on `&[usize]` used by the mutation and crossover
//! strategies. Each one maps a permutation of `0..n` to another permutation
//! of `0..n`.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::random::distinct_pair;
use rand::Rng;

/// Rotates the genes between positions `i` and `j` (inclusive) by one.
///
/// For `i < j` the gene at `i` moves to `j` and `i+1..=j` shift down one
/// place. For `i > j` the gene at `i` moves to `j` and `j..i` shift up.
/// Positions outside the range are untouched.
///
/// # Complexity
/// O(|i - j|)
pub fn shift_genes(perm: &mut [usize], i: usize, j: usize) {
    if i < j {
        perm[i..=j].rotate_left(1);
    } else if i > j {
        perm[j..=i].rotate_right(1);
    }
}

/// Builds one ordered-crossover child.
///
/// Positions `start..finish` are copied from `template`; every other
/// position is filled left to right with the genes of `donor` that are not
/// in the copied span, in `donor`'s order.
///
/// # Example
///
/// ```
/// use qap_metaheur::operators::ordered_crossover_child;
///
/// let a = [3, 5, 2, 4, 1, 0];
/// let b = [2, 1, 4, 5, 3, 0];
/// assert_eq!(ordered_crossover_child(&a, &b, 2, 4), vec![1, 5, 2, 4, 3, 0]);
/// ```
///
/// # Panics
/// Panics if the parents differ in length or the span is out of bounds.
pub fn ordered_crossover_child(
    template: &[usize],
    donor: &[usize],
    start: usize,
    finish: usize,
) -> Vec<usize> {
    let n = template.len();
    assert_eq!(n, donor.len(), "parents must have equal length");
    assert!(start <= finish && finish <= n, "span out of bounds");

    let mut in_span = vec![false; n];
    for &gene in &template[start..finish] {
        in_span[gene] = true;
    }

    let mut fill = donor.iter().copied().filter(|&gene| !in_span[gene]);
    (0..n)
        .map(|i| {
            if (start..finish).contains(&i) {
                template[i]
            } else {
                fill.next()
                    .expect("donor holds every gene missing from the span")
            }
        })
        .collect()
}

/// Random span `[start, finish)` with `start < finish < n`.
pub fn random_span<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = distinct_pair(n, rng);
    (a.min(b), a.max(b))
}
