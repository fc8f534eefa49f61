//! Lottery variant configuration and historical draw records.
//!
//! - [`LotteryConfig`]: immutable description of one lottery variant
//!   (pick count, number range, price of one game)
//! - [`Draw`]: one historical drawing, consumed read-only

mod config;
mod draw;

pub use config::LotteryConfig;
pub use draw::Draw;
