//! Bees loop execution.

use super::config::BeesConfig;
use crate::candidate::{
    find_best, sort_by_cost, Candidate, Individual, Location, NeighborhoodSearch,
};
use crate::error::{QapError, Result};
use crate::operators::Mutation;
use crate::problem::{check_problem_size, Matrix, Objective, ObjectiveFn, QapProblem};
use crate::random::{create_rng, resolve_seed, task_seed};
use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

/// Result of a bees run.
#[derive(Debug, Clone)]
pub struct BeesResult {
    /// The best candidate found during the entire run.
    pub best: Candidate,

    /// Cost of `best`.
    pub best_cost: i64,

    /// Number of generations executed.
    pub generations: usize,

    /// Best-so-far cost: the initial population first, then one entry per
    /// generation.
    pub cost_history: Vec<i64>,

    /// Generations (1-based) at which a stagnation kick fired.
    pub diversifications: Vec<usize>,

    /// Seed the run actually used.
    pub seed: u64,
}

/// Executes the bees loop.
///
/// Neighborhood searches run on a dedicated rayon pool of
/// [`BeesConfig::workers`] threads, built for the duration of one run.
/// Every search task draws from its own generator seeded from the run seed,
/// the generation and the location's index, so a seeded run gives the same
/// answer whatever the worker count.
pub struct BeesRunner;

impl BeesRunner {
    /// Runs the bees search over permutations of `0..n`.
    ///
    /// Fails if the configuration is invalid, `n < 2`, `objective` was built
    /// for a different size, or the worker pool cannot be created.
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        n: usize,
        config: &BeesConfig,
    ) -> Result<BeesResult> {
        config.validate()?;
        check_problem_size(objective, n)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("bees-worker-{i}"))
            .build()
            .map_err(|e| QapError::WorkerPool(e.to_string()))?;

        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);
        let (elite_count, selected_count, elite_search, selected_search) = config.tiers();
        let random_count = config
            .population_size
            .saturating_sub(elite_count + selected_count);
        info!(
            "bees: n={n}, population={}, tiers elite={elite_count}/{elite_search} \
             selected={selected_count}/{selected_search} random={random_count}, \
             workers={}, seed={seed}",
            config.population_size, config.workers
        );

        let search = NeighborhoodSearch {
            objective,
            mutation: &config.mutation,
            lifetime: config.lifetime,
        };

        let mut population: Vec<Location> = (0..config.population_size)
            .map(|_| Location::random(n, objective, &mut rng))
            .collect();

        let mut best = find_best(&population).clone();
        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(best.cost());

        let mut stagnation_counter = 0usize;
        let mut diversifications = Vec::new();

        for gen in 1..=config.max_iterations {
            // Partition into tiers.
            sort_by_cost(&mut population);
            let others = population.split_off(elite_count.min(population.len()));
            let mut elite = population;
            let mut selected = config.selection.select(others, selected_count, &mut rng)?;

            // Parallel neighborhood search; both tiers finish before the
            // next population is assembled.
            let elite_len = elite.len();
            let elite_neighbors: Vec<Location> = pool.install(|| {
                let (neighbors, ()) = rayon::join(
                    || {
                        elite
                            .par_iter_mut()
                            .enumerate()
                            .map(|(i, location)| {
                                let mut task_rng = create_rng(task_seed(seed, gen, i));
                                location.search_neighborhood_elite(
                                    elite_search,
                                    &search,
                                    &mut task_rng,
                                )
                            })
                            .collect::<Vec<_>>()
                    },
                    || {
                        selected
                            .par_iter_mut()
                            .enumerate()
                            .for_each(|(i, location)| {
                                let mut task_rng =
                                    create_rng(task_seed(seed, gen, elite_len + i));
                                location.search_neighborhood(
                                    selected_search,
                                    &search,
                                    &mut task_rng,
                                );
                            })
                    },
                );
                neighbors
            });

            let mut next = Vec::with_capacity(
                elite.len() + elite_neighbors.len() + selected.len() + random_count,
            );
            next.extend(elite);
            next.extend(elite_neighbors);
            next.extend(selected);
            next.extend((0..random_count).map(|_| Location::random(n, objective, &mut rng)));
            population = next;

            let gen_best = find_best(&population);
            if gen_best.cost() < best.cost() {
                best = gen_best.clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
                if config.bad_epoch_patience > 0 && stagnation_counter >= config.bad_epoch_patience
                {
                    debug!("bees: generation {gen} stagnated, diversifying");
                    diversify(&mut population, &config.mutation, objective, &mut rng);

                    let kicked_best = find_best(&population);
                    if kicked_best.cost() < best.cost() {
                        best = kicked_best.clone();
                    }
                    stagnation_counter = 0;
                    diversifications.push(gen);
                }
            }

            cost_history.push(best.cost());

            if config.report_every > 0 && gen % config.report_every == 0 {
                info!("bees: generation {gen}, best cost {}", best.cost());
            }
        }

        info!(
            "bees: finished, best cost {} after {} generations ({} diversifications)",
            best.cost(),
            config.max_iterations,
            diversifications.len()
        );

        Ok(BeesResult {
            best_cost: best.cost(),
            best: best.into_candidate(),
            generations: config.max_iterations,
            cost_history,
            diversifications,
            seed,
        })
    }
}

/// Stagnation kick: mutates every location and resets every age.
fn diversify<O, R>(population: &mut [Location], mutation: &Mutation, objective: &O, rng: &mut R)
where
    O: Objective + ?Sized,
    R: Rng + ?Sized,
{
    mutation.mutate(population, objective, rng);
    for location in population.iter_mut() {
        location.reset_age();
    }
}

/// Builds a problem from raw matrices and runs the bees solver on it.
pub fn bees_solve(
    n: usize,
    distances: Matrix,
    flows: Matrix,
    objective: ObjectiveFn,
    config: &BeesConfig,
) -> Result<BeesResult> {
    let problem = QapProblem::with_objective(n, distances, flows, objective)?;
    BeesRunner::run(&problem, n, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{Selection, ShiftMutation, SwapMutation};
    use crate::problem::tests::random_problem;
    use crate::problem::validate_permutation;

    fn small_config() -> BeesConfig {
        BeesConfig::default()
            .with_population_size(40)
            .with_max_iterations(30)
            .with_elite_population(4usize)
            .with_selected_population(16usize)
            .with_elite_search_size(6usize)
            .with_selected_search_size(3usize)
            .with_lifetime(10)
            .with_workers(3)
            .with_report_every(0)
            .with_seed(42)
    }

    #[test]
    fn test_result_is_consistent() {
        let problem = random_problem(10, 50, 11);
        let result = BeesRunner::run(&problem, 10, &small_config()).unwrap();

        validate_permutation(result.best.permutation(), 10).unwrap();
        assert_eq!(result.best_cost, problem.cost(result.best.permutation()));
        assert_eq!(result.generations, 30);
        assert_eq!(result.cost_history.len(), 31);
        assert_eq!(result.seed, 42);
    }

    #[test]
    fn test_best_so_far_never_worsens() {
        let problem = random_problem(12, 50, 5);
        let result = BeesRunner::run(&problem, 12, &small_config()).unwrap();
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0], "{} > {}", window[1], window[0]);
        }
    }

    #[test]
    fn test_improves_on_initial_population() {
        let problem = random_problem(15, 100, 21);
        let config = small_config().with_max_iterations(100);
        let result = BeesRunner::run(&problem, 15, &config).unwrap();
        assert!(result.best_cost < result.cost_history[0]);
    }

    #[test]
    fn test_worker_count_does_not_change_seeded_result() {
        let problem = random_problem(11, 50, 4);
        let one = BeesRunner::run(&problem, 11, &small_config().with_workers(1)).unwrap();
        let many = BeesRunner::run(&problem, 11, &small_config().with_workers(4)).unwrap();
        assert_eq!(one.best.permutation(), many.best.permutation());
        assert_eq!(one.cost_history, many.cost_history);
    }

    #[test]
    fn test_roulette_selected_tier() {
        let problem = random_problem(9, 30, 8);
        for mutation in [
            Mutation::Swap(SwapMutation::new(1.0)),
            Mutation::Shift(ShiftMutation),
        ] {
            let config = small_config()
                .with_selection(Selection::RouletteWheel)
                .with_mutation(mutation);
            let result = BeesRunner::run(&problem, 9, &config).unwrap();
            validate_permutation(result.best.permutation(), 9).unwrap();
        }
    }

    #[test]
    fn test_fraction_tiers() {
        let problem = random_problem(8, 30, 2);
        let config = small_config()
            .with_population_size(100)
            .with_elite_population(0.05)
            .with_selected_population(0.45)
            .with_elite_search_size(0.05)
            .with_selected_search_size(0.03);
        let result = BeesRunner::run(&problem, 8, &config).unwrap();
        assert_eq!(result.best_cost, problem.cost(result.best.permutation()));
    }

    #[test]
    fn test_stagnation_kick_timing() {
        let flat = |_: &[usize]| 0i64;
        let config = small_config()
            .with_max_iterations(9)
            .with_bad_epoch_patience(9);
        let result = BeesRunner::run(&flat, 6, &config).unwrap();
        assert_eq!(result.diversifications, vec![9]);

        let config = config.with_max_iterations(8);
        let result = BeesRunner::run(&flat, 6, &config).unwrap();
        assert!(result.diversifications.is_empty());

        let config = config.with_max_iterations(12).with_bad_epoch_patience(4);
        let result = BeesRunner::run(&flat, 6, &config).unwrap();
        assert_eq!(result.diversifications, vec![4, 8, 12]);
    }

    #[test]
    fn test_diversify_resets_ages_and_moves_every_location() {
        let problem = random_problem(8, 30, 3);
        let mutation = Mutation::Shift(ShiftMutation);
        let search = NeighborhoodSearch {
            objective: &problem,
            mutation: &mutation,
            lifetime: 1000,
        };
        let mut rng = create_rng(42);
        let mut population: Vec<Location> = (0..12)
            .map(|_| Location::random(8, &problem, &mut rng))
            .collect();
        for (i, location) in population.iter_mut().enumerate() {
            for _ in 0..=i {
                location.bump_age(&search, &mut rng);
            }
        }
        assert!(population.iter().all(|l| l.age() > 0));
        let before: Vec<Vec<usize>> = population.iter().map(|l| l.permutation().to_vec()).collect();

        diversify(&mut population, &mutation, &problem, &mut rng);

        for (location, old) in population.iter().zip(&before) {
            assert_eq!(location.age(), 0);
            assert_ne!(location.permutation(), old.as_slice());
            assert_eq!(location.cost(), problem.cost(location.permutation()));
        }
    }

    #[test]
    fn test_size_mismatch_is_reported() {
        let problem = random_problem(10, 50, 1);
        for n in [5, 12] {
            let err = BeesRunner::run(&problem, n, &small_config()).unwrap_err();
            assert!(matches!(
                err,
                QapError::DimensionMismatch { expected, rows: 10, cols: 10 } if expected == n
            ));
        }
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let problem = random_problem(5, 10, 1);
        let config = small_config().with_workers(0);
        assert!(matches!(
            BeesRunner::run(&problem, 5, &config),
            Err(QapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bees_solve() {
        let problem = random_problem(7, 20, 6);
        let result = bees_solve(
            7,
            problem.distances().clone(),
            problem.flows().clone(),
            crate::problem::objective,
            &small_config(),
        )
        .unwrap();
        assert_eq!(result.best_cost, problem.cost(result.best.permutation()));
    }
}
