//! Genetic Algorithm engine.
//!
//! A generic, maximizing GA loop built on trait-based abstractions.
//! Problems plug in by implementing [`GaProblem`], which specifies how to
//! seed, evaluate, crossover, and mutate individuals. The lottery game
//! search in [`crate::evolve`] is one such problem.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying an optional fitness
//! - [`GaProblem`]: Problem definition: seeding, evaluation and operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, elitism, tournament, rates)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final result with history and terminal [`EngineState`]
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{EngineState, GaResult, GaRunner};
pub use selection::tournament;
pub use types::{GaProblem, Individual};
