//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives a [`GaProblem`] through the state machine
//!
//! ```text
//! Initialized → Evolving(generation) → Converged | MaxGenerationsReached | Cancelled
//! ```
//!
//! Each generation is a full evaluate-then-breed cycle: every unscored
//! individual is evaluated (optionally in parallel), the population is
//! sorted, convergence is checked, and only then is the next population
//! bred through elitism, tournament selection, crossover and mutation.

use super::config::GaConfig;
use super::selection::tournament;
use super::types::{GaProblem, Individual};
use crate::error::{LottoError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// State of the evolutionary loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    /// Population not yet evaluated.
    Initialized,
    /// Running the given generation (1-based).
    Evolving { generation: u32 },
    /// Best fitness variance over the convergence window dropped below the
    /// configured threshold.
    Converged { generation: u32 },
    /// The generation cap was hit.
    MaxGenerationsReached { generation: u32 },
    /// The cancellation flag was observed at a generation boundary.
    Cancelled { generation: u32 },
}

impl EngineState {
    /// Returns `true` for the three terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EngineState::Converged { .. }
                | EngineState::MaxGenerationsReached { .. }
                | EngineState::Cancelled { .. }
        )
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult<I> {
    /// The best individual observed in any generation.
    pub best: I,

    /// The fittest individuals of the final population, best first.
    pub top_population: Vec<I>,

    /// Number of generations evaluated.
    pub generations_run: u32,

    /// Best-of-generation fitness, one entry per generation.
    pub fitness_history: Vec<f64>,

    /// Generation at which the convergence criterion fired, if it did.
    pub converged_at_generation: Option<u32>,

    /// Terminal state of the loop.
    pub final_state: EngineState,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best.fitness());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a [`StdRng`] seeded from `config.seed`
    /// (or a random seed when unset).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_cancel(problem, config, &mut rng, None)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, rng, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is set, the loop stops at the end of the current
    /// generation (after evaluation, before breeding) and returns the best
    /// individual found so far. At least one generation is always evaluated.
    ///
    /// # Errors
    ///
    /// - [`LottoError::InvalidConfig`] if `config` fails validation or the
    ///   problem seeds an empty population
    /// - any error returned by [`GaProblem::initial_population`]
    pub fn run_with_cancel<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>> {
        config.validate()?;

        let mut population = problem.initial_population(config.population_size, rng)?;
        if population.is_empty() {
            return Err(LottoError::invalid_config("initial population is empty"));
        }

        let mut state = EngineState::Initialized;
        let mut best: Option<P::Individual> = None;
        let mut fitness_history = Vec::with_capacity(config.max_generations as usize);
        let mut generation = 0u32;

        while !state.is_terminal() {
            generation += 1;
            state = EngineState::Evolving { generation };

            evaluate_population(problem, &mut population, generation, config.parallel);
            sort_descending(&mut population);

            let gen_best = &population[0];
            let gen_best_fitness = gen_best.fitness_value();
            let improved = match &best {
                Some(b) => gen_best_fitness > b.fitness_value(),
                None => true,
            };
            if improved {
                best = Some(gen_best.clone());
            }
            fitness_history.push(gen_best_fitness);

            problem.on_generation(generation, gen_best_fitness);
            tracing::debug!(generation, best = gen_best_fitness, "generation evaluated");

            let cancelled = cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed));

            state = if has_converged(&fitness_history, generation, config) {
                EngineState::Converged { generation }
            } else if generation >= config.max_generations {
                EngineState::MaxGenerationsReached { generation }
            } else if cancelled {
                EngineState::Cancelled { generation }
            } else {
                population = next_generation(problem, &population, config, rng);
                state
            };
        }

        let best = best.ok_or_else(|| LottoError::invalid_config("population is empty"))?;
        let converged_at_generation = match state {
            EngineState::Converged { generation } => Some(generation),
            _ => None,
        };

        tracing::info!(
            generations = generation,
            best = best.fitness_value(),
            state = ?state,
            "evolution finished"
        );

        Ok(GaResult {
            best,
            top_population: population.into_iter().take(config.top_count).collect(),
            generations_run: generation,
            fitness_history,
            converged_at_generation,
            final_state: state,
        })
    }
}

/// Evaluate every individual that has no fitness yet.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    generation: u32,
    parallel: bool,
) {
    if parallel && cfg!(feature = "parallel") {
        evaluate_parallel(problem, population, generation);
    } else {
        for ind in population.iter_mut().filter(|ind| ind.fitness().is_none()) {
            let f = problem.evaluate(ind);
            *ind = ind.scored(f, generation);
        }
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel<P: GaProblem>(problem: &P, population: &mut [P::Individual], generation: u32) {
    population
        .par_iter_mut()
        .filter(|ind| ind.fitness().is_none())
        .for_each(|ind| {
            let f = problem.evaluate(ind);
            *ind = ind.scored(f, generation);
        });
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel<P: GaProblem>(problem: &P, population: &mut [P::Individual], generation: u32) {
    evaluate_population(problem, population, generation, false);
}

/// Stable sort, best (highest fitness) first.
fn sort_descending<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        b.fitness_value()
            .partial_cmp(&a.fitness_value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Variance test over the trailing convergence window.
fn has_converged(history: &[f64], generation: u32, config: &GaConfig) -> bool {
    let window = config.convergence_window;
    if (generation as usize) <= window || history.len() < window {
        return false;
    }
    variance(&history[history.len() - window..]) < config.convergence_variance
}

/// Population variance.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Build the next population from a sorted, fully evaluated one.
fn next_generation<P: GaProblem, R: Rng>(
    problem: &P,
    population: &[P::Individual],
    config: &GaConfig,
    rng: &mut R,
) -> Vec<P::Individual> {
    let elite_count = config.elite_size.min(population.len());
    let mut next_gen: Vec<P::Individual> = Vec::with_capacity(config.population_size);
    next_gen.extend_from_slice(&population[..elite_count]);

    while next_gen.len() < config.population_size {
        let p1 = tournament(population, config.tournament_size, rng);
        let p2 = tournament(population, config.tournament_size, rng);

        let mut children = if rng.random_range(0.0..1.0) < config.crossover_rate {
            problem.crossover(&population[p1], &population[p2], rng)
        } else {
            vec![population[p1].clone(), population[p2].clone()]
        };
        if children.is_empty() {
            children.push(population[p1].clone());
        }

        for child in children {
            if next_gen.len() >= config.population_size {
                break;
            }
            let child = if rng.random_range(0.0..1.0) < config.mutation_rate {
                problem.mutate(&child, rng)
            } else {
                child
            };
            next_gen.push(child);
        }
    }

    next_gen
}

// ============================================================================
// Tests
// ============================================================================
