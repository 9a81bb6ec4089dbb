//! Bees solver configuration.

use crate::error::{QapError, Result};
use crate::operators::{Mutation, Selection, UniformScheduler};

/// A tier or neighborhood size, given absolutely or relative to the
/// population size.
///
/// Fractions resolve to `floor(population_size * fraction)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TierSize {
    Count(usize),
    Fraction(f64),
}

impl TierSize {
    /// Resolves to an absolute count.
    pub fn resolve(&self, population_size: usize) -> usize {
        match *self {
            TierSize::Count(n) => n,
            TierSize::Fraction(f) => (population_size as f64 * f).floor() as usize,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        match *self {
            TierSize::Fraction(f) if !(0.0..=1.0).contains(&f) => Err(QapError::InvalidConfig(
                format!("{name} fraction must be in [0, 1], got {f}"),
            )),
            _ => Ok(()),
        }
    }
}

impl From<usize> for TierSize {
    fn from(n: usize) -> Self {
        TierSize::Count(n)
    }
}

impl From<f64> for TierSize {
    fn from(f: f64) -> Self {
        TierSize::Fraction(f)
    }
}

/// Configuration for the bees solver.
///
/// # Tiers
///
/// Every generation the population is sorted by cost. The best
/// `elite_population` locations each search `elite_search_size` neighbors;
/// `selected_population` further locations, picked from the rest by
/// `selection`, each search `selected_search_size` neighbors. The remaining
/// `population_size - elite - selected` slots are re-seeded at random.
///
/// # Examples
///
/// ```
/// use qap_metaheur::bees::{BeesConfig, TierSize};
///
/// let config = BeesConfig::default()
///     .with_population_size(500)
///     .with_elite_population(20)
///     .with_selected_population(300)
///     .with_elite_search_size(20)
///     .with_selected_search_size(10)
///     .with_lifetime(20)
///     .with_bad_epoch_patience(40)
///     .with_workers(12);
/// assert_eq!(config.elite_population, TierSize::Count(20));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeesConfig {
    /// Number of locations at the start of each generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_iterations: usize,

    /// Neighbor generator, also used for the stagnation kick.
    pub mutation: Mutation,

    /// Picks the selected tier from the non-elite locations.
    pub selection: Selection,

    pub elite_population: TierSize,
    pub selected_population: TierSize,
    pub elite_search_size: TierSize,
    pub selected_search_size: TierSize,

    /// Generations without improvement after which a location is abandoned
    /// and re-rolled. 0 disables abandonment.
    pub lifetime: usize,

    /// Consecutive non-improving generations before a diversification kick.
    ///
    /// Set to 0 to disable.
    pub bad_epoch_patience: usize,

    /// Threads in the neighborhood-search worker pool.
    pub workers: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Log progress every this many generations. 0 disables. Has no effect
    /// on the search.
    pub report_every: usize,
}

impl Default for BeesConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_iterations: 100,
            mutation: Mutation::Uniform(UniformScheduler::default()),
            selection: Selection::BestFit,
            elite_population: TierSize::Fraction(0.01),
            selected_population: TierSize::Fraction(0.49),
            elite_search_size: TierSize::Fraction(0.02),
            selected_search_size: TierSize::Fraction(0.01),
            lifetime: 0,
            bad_epoch_patience: 20,
            workers: 6,
            seed: None,
            report_every: 100,
        }
    }
}

impl BeesConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
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

    pub fn with_elite_population(mut self, size: impl Into<TierSize>) -> Self {
        self.elite_population = size.into();
        self
    }

    pub fn with_selected_population(mut self, size: impl Into<TierSize>) -> Self {
        self.selected_population = size.into();
        self
    }

    pub fn with_elite_search_size(mut self, size: impl Into<TierSize>) -> Self {
        self.elite_search_size = size.into();
        self
    }

    pub fn with_selected_search_size(mut self, size: impl Into<TierSize>) -> Self {
        self.selected_search_size = size.into();
        self
    }

    pub fn with_lifetime(mut self, n: usize) -> Self {
        self.lifetime = n;
        self
    }

    pub fn with_bad_epoch_patience(mut self, n: usize) -> Self {
        self.bad_epoch_patience = n;
        self
    }

    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
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

    /// Resolved `(elite, selected, elite_search, selected_search)` counts.
    pub fn tiers(&self) -> (usize, usize, usize, usize) {
        let p = self.population_size;
        (
            self.elite_population.resolve(p),
            self.selected_population.resolve(p),
            self.elite_search_size.resolve(p),
            self.selected_search_size.resolve(p),
        )
    }

    /// Validates the configuration, including the mutation strategy.
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
        if self.workers == 0 {
            return Err(QapError::InvalidConfig("workers must be at least 1".into()));
        }
        self.elite_population.validate("elite_population")?;
        self.selected_population.validate("selected_population")?;
        self.elite_search_size.validate("elite_search_size")?;
        self.selected_search_size.validate("selected_search_size")?;

        let (elite, selected, elite_search, selected_search) = self.tiers();
        if elite + selected > self.population_size {
            return Err(QapError::InvalidConfig(format!(
                "elite ({elite}) + selected ({selected}) exceed population_size ({})",
                self.population_size
            )));
        }
        if elite > 0 && elite_search == 0 {
            return Err(QapError::InvalidConfig(
                "elite_search_size resolves to 0".into(),
            ));
        }
        if selected > 0 && selected_search == 0 {
            return Err(QapError::InvalidConfig(
                "selected_search_size resolves to 0".into(),
            ));
        }
        self.mutation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BeesConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.selection, Selection::BestFit);
        assert_eq!(config.workers, 6);
        assert_eq!(config.lifetime, 0);
        assert_eq!(config.tiers(), (1, 49, 2, 1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fraction_floors() {
        assert_eq!(TierSize::Fraction(0.49).resolve(10), 4);
        assert_eq!(TierSize::Fraction(0.5).resolve(7), 3);
        assert_eq!(TierSize::Count(12).resolve(7), 12);
    }

    #[test]
    fn test_builder_accepts_counts_and_fractions() {
        let config = BeesConfig::default()
            .with_population_size(200)
            .with_elite_population(0.05)
            .with_selected_population(50usize)
            .with_elite_search_size(8usize)
            .with_selected_search_size(0.02);
        assert_eq!(config.tiers(), (10, 50, 8, 4));
    }

    #[test]
    fn test_validate_tiers_exceed_population() {
        let config = BeesConfig::default()
            .with_population_size(10)
            .with_elite_population(5usize)
            .with_selected_population(6usize);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_search_size() {
        let config = BeesConfig::default()
            .with_population_size(10)
            .with_elite_population(1usize)
            .with_elite_search_size(0.01);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_fraction() {
        let config = BeesConfig::default().with_selected_population(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_workers() {
        assert!(BeesConfig::default().with_workers(0).validate().is_err());
    }
}
