//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{LottoError, Result};

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, elitism, tournament size, operator rates,
/// convergence detection, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_lotto::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 50);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_lotto::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_elite_size(10)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: u32,

    /// Number of top individuals copied unchanged into the next generation.
    pub elite_size: usize,

    /// Number of individuals sampled (with replacement) per tournament.
    ///
    /// - 2: light pressure
    /// - 3-5: moderate pressure
    /// - >5: strong pressure, risk of premature convergence
    pub tournament_size: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the parents are copied.
    pub crossover_rate: f64,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of trailing best-of-generation values inspected for
    /// convergence. The check only runs once more generations than this
    /// have completed.
    pub convergence_window: usize,

    /// The run converges when the variance of the last
    /// `convergence_window` best fitness values falls below this.
    pub convergence_variance: f64,

    /// How many individuals of the final population are reported.
    pub top_count: usize,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 50,
            elite_size: 5,
            tournament_size: 3,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            convergence_window: 10,
            convergence_variance: 0.001,
            top_count: 20,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: u32) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the convergence window and variance threshold.
    pub fn with_convergence(mut self, window: usize, variance: f64) -> Self {
        self.convergence_window = window;
        self.convergence_variance = variance.max(0.0);
        self
    }

    /// Sets how many final individuals are reported.
    pub fn with_top_count(mut self, n: usize) -> Self {
        self.top_count = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick suggestions: small population, few generations.
    ///
    /// - Population: 40, Generations: 25, Elites: 2
    pub fn fast() -> Self {
        Self {
            population_size: 40,
            max_generations: 25,
            elite_size: 2,
            ..Self::default()
        }
    }

    /// Preset matching the defaults.
    ///
    /// - Population: 100, Generations: 50, Elites: 5
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for a wider search at the cost of longer computation.
    ///
    /// - Population: 300, Generations: 150, Elites: 15, Tournament: 4
    pub fn thorough() -> Self {
        Self {
            population_size: 300,
            max_generations: 150,
            elite_size: 15,
            tournament_size: 4,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`LottoError::InvalidConfig`] describing the first
    /// inconsistent parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(LottoError::invalid_config(
                "population_size must be at least 1",
            ));
        }
        if self.population_size < self.elite_size {
            return Err(LottoError::invalid_config(format!(
                "population_size ({}) is smaller than elite_size ({})",
                self.population_size, self.elite_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(LottoError::invalid_config(
                "tournament_size must be at least 1",
            ));
        }
        if self.max_generations == 0 {
            return Err(LottoError::invalid_config(
                "max_generations must be at least 1",
            ));
        }
        if self.convergence_window < 2 {
            return Err(LottoError::invalid_config(
                "convergence_window must be at least 2",
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) || !(0.0..=1.0).contains(&self.mutation_rate)
        {
            return Err(LottoError::invalid_config(
                "crossover_rate and mutation_rate must lie in 0.0..=1.0",
            ));
        }
        Ok(())
    }
}
