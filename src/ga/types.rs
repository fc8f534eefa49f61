//! Core trait definitions for the GA engine.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the generic evolutionary loop and a domain-specific
//! problem such as the lottery game search in [`crate::evolve`].

use crate::error::Result;
use rand::Rng;

/// A candidate solution in the GA population.
///
/// Higher fitness is better (maximization). An individual that has not been
/// evaluated yet reports `None`.
///
/// Individuals are treated as immutable values: the runner never changes a
/// scored individual, it asks for a new one via [`scored`](Individual::scored).
/// This keeps population snapshots reproducible.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct MySolution {
///     genes: Vec<u32>,
///     fitness: Option<f64>,
///     generation: u32,
/// }
///
/// impl Individual for MySolution {
///     fn fitness(&self) -> Option<f64> { self.fitness }
///     fn scored(&self, fitness: f64, generation: u32) -> Self {
///         Self { fitness: Some(fitness), generation, ..self.clone() }
///     }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Returns the fitness assigned by the last evaluation, if any.
    fn fitness(&self) -> Option<f64>;

    /// Returns a copy carrying `fitness`, stamped with the generation in
    /// which it was evaluated.
    fn scored(&self, fitness: f64, generation: u32) -> Self;

    /// Fitness used for ranking; unscored individuals rank as `0.0`.
    fn fitness_value(&self) -> f64 {
        self.fitness().unwrap_or(0.0)
    }
}

/// Defines a GA optimization problem.
///
/// Implementors plug their domain logic into [`GaRunner`](super::GaRunner):
///
/// 1. **Seeding**: How to build the initial population
/// 2. **Evaluation**: How to compute fitness (must be pure)
/// 3. **Crossover**: How to recombine two parents
/// 4. **Mutation**: How to perturb an individual
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel using rayon.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Builds the initial population of `size` unscored individuals.
    ///
    /// Errors propagate out of the run unchanged.
    fn initial_population<R: Rng>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Result<Vec<Self::Individual>>;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Must be deterministic for identical inputs; the runner may call this
    /// from several threads at once.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Produces offspring by recombining two parents.
    ///
    /// Returns a `Vec` of 1 or 2 children. The runner handles sizing.
    ///
    /// The default implementation clones both parents (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone(), parent2.clone()]
    }

    /// Returns a mutated copy of `individual`.
    ///
    /// The default implementation returns an unchanged clone.
    fn mutate<R: Rng>(&self, individual: &Self::Individual, _rng: &mut R) -> Self::Individual {
        individual.clone()
    }

    /// Called at the end of each generation with the best fitness of that
    /// generation. The default implementation is a no-op.
    fn on_generation(&self, _generation: u32, _best_fitness: f64) {}
}
