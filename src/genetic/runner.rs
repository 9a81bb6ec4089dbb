//! Genetic loop execution.
//!
//! [`GeneticRunner`] orchestrates the evolutionary process:
//! initialization → (crossover → mutation → selection → stall check)*.

use super::config::GeneticConfig;
use crate::candidate::{find_best, Candidate, Individual};
use crate::error::Result;
use crate::operators::Offspring;
use crate::problem::{check_problem_size, Matrix, Objective, ObjectiveFn, QapProblem};
use crate::random::{create_rng, resolve_seed};
use log::{debug, info};
use rand::Rng;

/// Result of a genetic run.
#[derive(Debug, Clone)]
pub struct GeneticResult {
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

    /// Crossover rounds that injected random permutations instead of children.
    pub crossover_fallbacks: usize,

    /// Seed the run actually used.
    pub seed: u64,
}

/// Executes the genetic loop.
///
/// # Usage
///
/// ```ignore
/// let problem = QapProblem::new(n, distances, flows)?;
/// let config = GeneticConfig::default().with_seed(42);
/// let result = GeneticRunner::run(&problem, problem.size(), &config)?;
/// println!("best cost: {}", result.best_cost);
/// ```
pub struct GeneticRunner;

impl GeneticRunner {
    /// Runs the genetic search over permutations of `0..n`.
    ///
    /// Fails if the configuration is invalid, `n < 2`, or `objective` was
    /// built for a different size.
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        n: usize,
        config: &GeneticConfig,
    ) -> Result<GeneticResult> {
        config.validate()?;
        check_problem_size(objective, n)?;

        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);
        let survivors = config.survivors();
        info!(
            "genetic: n={n}, population={}, iterations={}, seed={seed}",
            config.population_size, config.max_iterations
        );

        // 1. Initialize population
        let mut population: Vec<Candidate> = (0..config.population_size)
            .map(|_| Candidate::random(n, objective, &mut rng))
            .collect();

        // 2. Track best
        let mut best = find_best(&population).clone();
        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(best.cost());

        let mut stagnation_counter = 0usize;
        let mut diversifications = Vec::new();
        let mut crossover_fallbacks = 0usize;

        // 3. Evolutionary loop
        for gen in 1..=config.max_iterations {
            let Offspring {
                mut children,
                random_fallbacks,
            } = config.crossover.crossover(&population, objective, &mut rng)?;
            crossover_fallbacks += random_fallbacks;

            config.mutation.mutate(&mut children, objective, &mut rng);
            population.extend(children);
            population = config.selection.select(population, survivors, &mut rng)?;

            let gen_best = find_best(&population);
            if gen_best.cost() < best.cost() {
                best = gen_best.clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
                if config.bad_epoch_patience > 0 && stagnation_counter >= config.bad_epoch_patience
                {
                    debug!("genetic: generation {gen} stagnated, diversifying");
                    population = diversify(population, n, config, objective, &mut rng)?;

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
                info!("genetic: generation {gen}, best cost {}", best.cost());
            }
        }

        info!(
            "genetic: finished, best cost {} after {} generations ({} diversifications)",
            best.cost(),
            config.max_iterations,
            diversifications.len()
        );

        Ok(GeneticResult {
            best_cost: best.cost(),
            best,
            generations: config.max_iterations,
            cost_history,
            diversifications,
            crossover_fallbacks,
            seed,
        })
    }
}

/// Stagnation kick: mutates every member, adds `population_size` fresh
/// random candidates and selects back down to the survivor count.
fn diversify<O, R>(
    mut population: Vec<Candidate>,
    n: usize,
    config: &GeneticConfig,
    objective: &O,
    rng: &mut R,
) -> Result<Vec<Candidate>>
where
    O: Objective + ?Sized,
    R: Rng + ?Sized,
{
    config.mutation.mutate(&mut population, objective, rng);
    population.extend((0..config.population_size).map(|_| Candidate::random(n, objective, rng)));
    config.selection.select(population, config.survivors(), rng)
}

/// Builds a problem from raw matrices and runs the genetic solver on it.
pub fn genetic_solve(
    n: usize,
    distances: Matrix,
    flows: Matrix,
    objective: ObjectiveFn,
    config: &GeneticConfig,
) -> Result<GeneticResult> {
    let problem = QapProblem::with_objective(n, distances, flows, objective)?;
    GeneticRunner::run(&problem, n, config)
}

// ============================================================================
// Tests
// ============================================================================
