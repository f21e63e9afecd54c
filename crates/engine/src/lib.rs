//! Tomebound Engine library.
//!
//! Runs the progression rules from `tomebound-domain` against a player
//! store, a clock and a random source.
//!
//! ## Structure
//!
//! - `use_cases/` - One struct per player-facing operation (load, mutate, save)
//! - `infrastructure/` - Ports plus the clock, random, storage and config adapters
//! - `simulation` - Balance simulation driving the use cases
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod simulation;
pub mod use_cases;

/// Shared test fixtures.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
