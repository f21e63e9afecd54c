//! Common utility functions shared across the domain.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Time is injected** - callers pass `now`, nothing reads the system clock

pub mod datetime;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{next_weekday, timezone_midnight, UtcOffset};
