//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};
use uuid::Uuid;

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Shared random source. Domain code sees it through
/// [`PortRandom`](crate::infrastructure::clock::PortRandom).
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform integer in `[min, max]`; `min` when `max <= min`.
    fn gen_range(&self, min: u32, max: u32) -> u32;
    /// Uniform float in `[0, 100)`.
    fn gen_percent(&self) -> f64;
    fn gen_uuid(&self) -> Uuid;
}
