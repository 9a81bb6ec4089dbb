//! Genetic solver configuration.
//!
//! [`GeneticConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{QapError, Result};
use crate::operators::{Crossover, Mutation, OrderedCrossover, Selection};

/// Configuration for the genetic solver.
///
/// # Defaults
///
/// ```
/// use qap_metaheur::genetic::GeneticConfig;
///
/// let config = GeneticConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_iterations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use qap_metaheur::genetic::GeneticConfig;
/// use qap_metaheur::operators::{Mutation, ShiftMutation, SwapMutation, UniformScheduler};
///
/// let config = GeneticConfig::default()
///     .with_max_iterations(1000)
///     .with_crossover_count(50)
///     .with_mutation(Mutation::Uniform(UniformScheduler::new(vec![
///         Mutation::Swap(SwapMutation::new(0.3)),
///         Mutation::Shift(ShiftMutation),
///     ])))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticConfig {
    /// Number of candidates kept between generations when no explicit
    /// `selection_size` is set. Also the size of the initial population and
    /// of each random batch injected on stagnation.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_iterations: usize,

    /// Breeding strategy.
    pub crossover: Crossover,

    /// Perturbation applied to offspring, and to the whole population on
    /// stagnation.
    pub mutation: Mutation,

    /// Survivor selection strategy.
    pub selection: Selection,

    /// Survivors per generation. `None` means `population_size`.
    pub selection_size: Option<usize>,

    /// Consecutive non-improving generations before a diversification kick.
    ///
    /// Set to 0 to disable.
    pub bad_epoch_patience: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Log progress every this many generations. 0 disables. Has no effect
    /// on the search.
    pub report_every: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_iterations: 100,
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            selection: Selection::RouletteWheel,
            selection_size: None,
            bad_epoch_patience: 20,
            seed: None,
            report_every: 100,
        }
    }
}

impl GeneticConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the number of ordered-crossover breeding rounds per generation,
    /// keeping the current retry budget.
    pub fn with_crossover_count(mut self, count: usize) -> Self {
        let Crossover::Ordered(ox) = self.crossover;
        self.crossover = Crossover::Ordered(OrderedCrossover::new(count, ox.retry));
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_selection_size(mut self, n: usize) -> Self {
        self.selection_size = Some(n);
        self
    }

    pub fn with_bad_epoch_patience(mut self, n: usize) -> Self {
        self.bad_epoch_patience = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_report_every(mut self, n: usize) -> Self {
        self.report_every = n;
        self
    }

    /// Survivors kept per generation.
    pub fn survivors(&self) -> usize {
        self.selection_size.unwrap_or(self.population_size)
    }

    /// Validates the configuration, including the nested strategies.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(QapError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(QapError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        if self.survivors() < 2 {
            return Err(QapError::InvalidConfig(
                "selection_size must be at least 2".into(),
            ));
        }
        if self.survivors() > self.population_size {
            // Fresh survivors come from population + offspring; only the
            // population part is guaranteed.
            return Err(QapError::InvalidConfig(format!(
                "selection_size ({}) must not exceed population_size ({})",
                self.survivors(),
                self.population_size
            )));
        }
        self.crossover.validate()?;
        self.mutation.validate()
    }
}
