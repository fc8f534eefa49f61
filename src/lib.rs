//! Lottery game optimization core.
//!
//! Builds candidate games from historical draw statistics and sizes them
//! against a budget:
//!
//! - **Evolution** ([`evolve()`]): a genetic algorithm over fixed-size number
//!   sets, seeded from hot and recent numbers and scored on frequency, pair
//!   co-occurrence, sum, odd/even balance, recency and spread.
//! - **Closures** ([`closure`]): greedy covering designs that pick a bounded
//!   set of games from a base pool so that as many hit patterns as possible
//!   overlap some game.
//! - **Budget advice** ([`advisor`]): a fixed ladder of game counts with the
//!   tier closest to 60% of the affordable maximum marked as recommended.
//!
//! # Architecture
//!
//! The genetic loop in [`ga`] is domain-agnostic; [`evolve`](mod@evolve) plugs the
//! lottery problem into it. Statistics ([`stats`]) are immutable snapshots
//! rebuilt per run. External data (draw history, strategy weights, lottery
//! definitions) is consumed through the traits in [`sources`], and the
//! library performs no I/O of its own.
//!
//! Every operation is synchronous. Randomness is drawn from an explicit RNG,
//! so seeded runs are reproducible. With the `parallel` feature, fitness
//! evaluation and closure candidate scoring run on rayon without changing
//! results.

pub mod advisor;
pub mod closure;
pub mod error;
pub mod evolve;
pub mod ga;
pub mod lottery;
pub mod sources;
pub mod stats;

pub use advisor::recommend;
pub use closure::generate_closure;
pub use error::{LottoError, Result};
pub use evolve::evolve;
